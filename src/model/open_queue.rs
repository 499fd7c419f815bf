//! 开放系统：M/M/1、M/M/1/K、M/M/s、M/M/s/K
//!
//! 到达速率恒为 λ。有容量上限时，系统内顾客数达到 K 的到达被拒绝（阻塞）。

use super::params::{ModelKind, ModelParams};
use super::state::{Customer, SimulationState};
use super::{Admission, Discipline};
use crate::error::SimError;
use crate::sim::{CustomerId, Scheduler};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct OpenQueue {
    kind: ModelKind,
    params: ModelParams,
    capacity: Option<usize>,
    state: SimulationState,
}

impl OpenQueue {
    /// `params` 应已通过 [`ModelParams::validate`]。
    pub fn new(kind: ModelKind, params: ModelParams) -> Self {
        let capacity = if kind.is_capacity_bounded() {
            params.capacity
        } else {
            None
        };
        Self {
            kind,
            params,
            capacity,
            state: SimulationState::new(params.server_count(), None),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn is_full(&self) -> bool {
        self.capacity.is_some_and(|k| self.state.in_system() >= k)
    }
}

impl Discipline for OpenQueue {
    fn kind(&self) -> ModelKind {
        self.kind
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
        self.params.lambda
    }

    fn next_arrival_rate(&self) -> Option<f64> {
        Some(self.params.lambda)
    }

    fn on_arrival(&mut self, sched: &mut Scheduler<'_>) -> Result<Admission, SimError> {
        self.state.record_arrival();
        if self.is_full() {
            self.state.reject();
            debug!(
                now = ?sched.now(),
                in_system = self.state.in_system(),
                rejected = self.state.rejected(),
                "系统已满，拒绝到达"
            );
            return Ok(Admission::Rejected);
        }
        let id = self.state.admit(self.params.mu, sched);
        Ok(Admission::Admitted(id))
    }

    fn on_departure(
        &mut self,
        customer: CustomerId,
        sched: &mut Scheduler<'_>,
    ) -> Result<Customer, SimError> {
        self.state.depart(customer, self.params.mu, sched)
    }
}
