//! 有限总体（封闭系统）：M/M/s/N
//!
//! 到达者是大小为 N 的总体中的成员。到达速率为 `系统外人数 × λ`：
//! 每次到达后只要系统外仍有人就重新调度；另外，当一次离开使系统外人数从 0
//! 变为 1 时，以速率 λ 重启到达过程。
//!
//! 注意：系统外人数在离开时增加（1→2 等）并不会重新计算已调度到达的速率。
//! 这是一个已知的建模简化，严格的有限源模型应在每个事件处重算速率。

use super::params::{ModelKind, ModelParams};
use super::state::{Customer, SimulationState};
use super::{Admission, Discipline};
use crate::error::SimError;
use crate::sim::{CustomerId, Scheduler};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct FinitePopulation {
    params: ModelParams,
    population: usize,
    state: SimulationState,
}

impl FinitePopulation {
    /// `params` 应已通过 [`ModelParams::validate`]。
    pub fn new(params: ModelParams) -> Self {
        let population = params.population.unwrap_or(1);
        Self {
            params,
            population,
            state: SimulationState::new(params.server_count(), Some(population)),
        }
    }

    pub fn population(&self) -> usize {
        self.population
    }

    fn outside(&self) -> usize {
        self.state.outside().unwrap_or(0)
    }
}

impl Discipline for FinitePopulation {
    fn kind(&self) -> ModelKind {
        ModelKind::Mmsn
    }

    fn params(&self) -> &ModelParams {
        &self.params
    }

    fn state(&self) -> &SimulationState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    fn initial_arrival_rate(&self) -> f64 {
        self.population as f64 * self.params.lambda
    }

    fn next_arrival_rate(&self) -> Option<f64> {
        match self.outside() {
            0 => None,
            n => Some(n as f64 * self.params.lambda),
        }
    }

    fn on_arrival(&mut self, sched: &mut Scheduler<'_>) -> Result<Admission, SimError> {
        self.state.take_from_population()?;
        self.state.record_arrival();
        let id = self.state.admit(self.params.mu, sched);
        Ok(Admission::Admitted(id))
    }

    fn on_departure(
        &mut self,
        customer: CustomerId,
        sched: &mut Scheduler<'_>,
    ) -> Result<Customer, SimError> {
        let done = self.state.depart(customer, self.params.mu, sched)?;
        if self.state.return_to_population() == 1 {
            let at = sched.schedule_arrival(self.params.lambda);
            trace!(now = ?sched.now(), at = ?at, "总体恢复，重启到达过程");
        }
        Ok(done)
    }
}
