pub mod compare;
pub mod error;
pub mod model;
pub mod sim;
pub mod stats;
pub mod theory;

pub use error::{ConfigError, SimError};

#[cfg(test)]
mod test;
