//! 仿真器
//!
//! 驱动一个模型的单次运行：取出最早事件、先累积统计再推进时钟、分派给排队规则，
//! 并重新调度下一次到达。状态机为 Idle → Running → Finalized。

use super::event::EventKind;
use super::event_queue::EventQueue;
use super::observer::{NoopObserver, Observer};
use super::scheduler::Scheduler;
use super::time::SimTime;
use super::variate::Variates;
use crate::error::{ConfigError, SimError};
use crate::model::{Admission, Discipline, QueueModel, build_discipline};
use crate::stats::{DEFAULT_SAMPLES, FinalMetrics, Sampler, TimeSeries, finalize};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Finalized,
}

/// 一次运行的结果
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub metrics: FinalMetrics,
    pub time_series: Option<TimeSeries>,
    pub events_processed: u64,
}

/// 事件驱动仿真器：独占事件队列与当前模型的排队规则。
#[derive(Debug)]
pub struct Simulator {
    model: QueueModel,
    discipline: Box<dyn Discipline>,
    queue: EventQueue,
    variates: Variates,
    phase: Phase,
    record_series: bool,
}

impl Simulator {
    pub fn new(model: QueueModel, variates: Variates) -> Self {
        let discipline = build_discipline(&model);
        Self {
            model,
            discipline,
            queue: EventQueue::new(),
            variates,
            phase: Phase::Idle,
            record_series: false,
        }
    }

    /// 是否在运行中采样时间序列
    pub fn with_time_series(mut self, enabled: bool) -> Self {
        self.record_series = enabled;
        self
    }

    pub fn model(&self) -> &QueueModel {
        &self.model
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn now(&self) -> SimTime {
        self.discipline.state().clock()
    }

    pub fn discipline(&self) -> &dyn Discipline {
        self.discipline.as_ref()
    }

    pub fn pending_events(&self) -> usize {
        self.queue.size()
    }

    pub fn run(&mut self, duration: f64) -> Result<RunReport, SimError> {
        self.run_with_observer(duration, &mut NoopObserver)
    }

    /// 运行到 `duration`；超出 `duration` 的事件被丢弃而不处理。
    #[tracing::instrument(skip(self, observer), fields(model = %self.model.label()))]
    pub fn run_with_observer(
        &mut self,
        duration: f64,
        observer: &mut dyn Observer,
    ) -> Result<RunReport, SimError> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(ConfigError::NonPositiveDuration(duration).into());
        }
        self.discipline.validate()?;

        self.discipline.reset();
        self.queue.clear();
        self.phase = Phase::Running;
        let until = SimTime(duration);
        let mut sampler = self
            .record_series
            .then(|| Sampler::new(duration, DEFAULT_SAMPLES, self.discipline.state().servers()));

        info!(
            kind = %self.discipline.kind(),
            lambda = self.discipline.params().lambda,
            mu = self.discipline.params().mu,
            duration,
            "▶️  开始运行仿真"
        );

        let first_rate = self.discipline.initial_arrival_rate();
        Scheduler::new(SimTime::ZERO, &mut self.queue, &mut self.variates)
            .schedule_arrival(first_rate);

        let mut event_count: u64 = 0;
        while let Some(item) = self.queue.extract_min() {
            let at = item.at();
            if at > until {
                break;
            }
            event_count += 1;

            self.discipline.state_mut().advance_to(at)?;
            if let Some(s) = sampler.as_mut() {
                s.observe(at, &self.discipline.state().occupancy());
            }

            let ev = item.into_event();
            let mut sched = Scheduler::new(at, &mut self.queue, &mut self.variates);
            match ev.kind {
                EventKind::Arrival => {
                    let outcome = self.discipline.on_arrival(&mut sched)?;
                    if at < until {
                        if let Some(rate) = self.discipline.next_arrival_rate() {
                            sched.schedule_arrival(rate);
                        }
                    }
                    let occ = self.discipline.state().occupancy();
                    match outcome {
                        Admission::Admitted(id) => observer.on_arrival(at, id, &occ),
                        Admission::Rejected => observer.on_rejection(at, &occ),
                    }
                }
                EventKind::Departure => {
                    let Some(id) = ev.customer else {
                        return Err(SimError::UnknownCustomer { id: 0 });
                    };
                    let done = self.discipline.on_departure(id, &mut sched)?;
                    let occ = self.discipline.state().occupancy();
                    observer.on_departure(at, done.id, &occ);
                }
            }

            debug!(
                event_num = event_count,
                now = at.as_f64(),
                kind = ?ev.kind,
                in_system = self.discipline.state().in_system(),
                remaining_queue = self.queue.size(),
                "执行事件"
            );
        }

        let report = self.finish(until, event_count, sampler)?;
        info!(
            total_events = event_count,
            served = report.metrics.served,
            rejected = report.metrics.rejected,
            "✅ 仿真完成"
        );
        Ok(report)
    }

    /// 把最后一个事件到 `until` 的时间计入统计并冻结指标。
    fn finish(
        &mut self,
        until: SimTime,
        events_processed: u64,
        sampler: Option<Sampler>,
    ) -> Result<RunReport, SimError> {
        let state = self.discipline.state_mut();
        if state.clock() < until {
            state.advance_to(until)?;
        }
        let metrics = finalize(
            self.discipline.state(),
            self.discipline.params(),
            until.as_f64(),
        );
        self.phase = Phase::Finalized;
        Ok(RunReport {
            metrics,
            time_series: sampler.map(Sampler::finish),
            events_processed,
        })
    }
}
