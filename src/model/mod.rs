//! 排队规则（Queue disciplines）
//!
//! 每种规则决定到达如何被接纳/排队/拒绝，以及离开如何释放服务台并从队列补位。
//! 仿真器只通过 [`Discipline`] trait 与规则交互，不关心具体是哪种模型。

mod finite_population;
mod open_queue;
mod params;
mod state;

pub use finite_population::FinitePopulation;
pub use open_queue::OpenQueue;
pub use params::{ModelKind, ModelParams, QueueModel, validate};
pub use state::{Customer, Occupancy, SimulationState};

use crate::error::{ConfigError, SimError};
use crate::sim::{CustomerId, Scheduler};
use std::fmt;

/// 到达的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted(CustomerId),
    /// 系统已满；只计数，不创建顾客，也不再为其调度任何事件。
    Rejected,
}

/// 排队规则抽象
pub trait Discipline: fmt::Debug + Send {
    fn kind(&self) -> ModelKind;
    fn params(&self) -> &ModelParams;
    fn state(&self) -> &SimulationState;
    fn state_mut(&mut self) -> &mut SimulationState;

    fn validate(&self) -> Result<(), ConfigError> {
        validate(self.kind(), self.params())
    }

    fn reset(&mut self) {
        self.state_mut().reset();
    }

    /// 第一次到达使用的速率
    fn initial_arrival_rate(&self) -> f64;

    /// 处理完一次到达后，下一次到达的速率；None 表示暂不调度。
    fn next_arrival_rate(&self) -> Option<f64>;

    fn on_arrival(&mut self, sched: &mut Scheduler<'_>) -> Result<Admission, SimError>;

    fn on_departure(
        &mut self,
        customer: CustomerId,
        sched: &mut Scheduler<'_>,
    ) -> Result<Customer, SimError>;
}

/// 按模型类型选择具体实现。
pub fn build_discipline(model: &QueueModel) -> Box<dyn Discipline> {
    let params = *model.params();
    if model.kind().is_finite_population() {
        Box::new(FinitePopulation::new(params))
    } else {
        Box::new(OpenQueue::new(model.kind(), params))
    }
}
