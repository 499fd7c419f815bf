//! 调度句柄
//!
//! 仿真器在调用排队规则的处理函数时传入 `Scheduler`，规则通过它读取当前时间、
//! 抽样并调度新事件，而无需持有仿真器本身。

use super::event::{CustomerId, Event};
use super::event_queue::EventQueue;
use super::time::SimTime;
use super::variate::Variates;
use tracing::trace;

pub struct Scheduler<'a> {
    now: SimTime,
    queue: &'a mut EventQueue,
    variates: &'a mut Variates,
}

impl<'a> Scheduler<'a> {
    pub fn new(now: SimTime, queue: &'a mut EventQueue, variates: &'a mut Variates) -> Self {
        Self {
            now,
            queue,
            variates,
        }
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn exponential(&mut self, rate: f64) -> f64 {
        self.variates.exponential(rate)
    }

    /// 在 `now + Exp(rate)` 调度下一次到达，返回调度时刻。
    #[tracing::instrument(skip(self), fields(now = ?self.now))]
    pub fn schedule_arrival(&mut self, rate: f64) -> SimTime {
        let at = self.now.after(self.exponential(rate));
        trace!(at = ?at, "调度到达");
        self.queue.insert(Event::arrival(at));
        at
    }

    /// 在 `now + Exp(mu)` 调度该顾客的离开，返回调度时刻。
    #[tracing::instrument(skip(self, customer), fields(now = ?self.now, customer = customer.0))]
    pub fn schedule_departure(&mut self, customer: CustomerId, mu: f64) -> SimTime {
        let at = self.now.after(self.exponential(mu));
        trace!(at = ?at, "调度离开");
        self.queue.insert(Event::departure(at, customer));
        at
    }
}
