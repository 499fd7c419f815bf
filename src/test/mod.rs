mod disciplines;
mod simulator;
