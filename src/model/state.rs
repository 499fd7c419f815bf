//! 模型运行状态
//!
//! 顾客要么在等待队列（FIFO）中，要么在忙碌服务台集合中；离开时被销毁。

use crate::error::SimError;
use crate::sim::{CustomerId, Scheduler, SimTime};
use crate::stats::Accumulator;
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub arrival_time: SimTime,
    pub service_start_time: Option<SimTime>,
    pub departure_time: Option<SimTime>,
}

impl Customer {
    /// 排队等待时长；尚未开始服务时为 None
    pub fn wait_time(&self) -> Option<f64> {
        self.service_start_time
            .map(|start| start.since(self.arrival_time))
    }
}

/// 某一时刻的占用快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Occupancy {
    pub in_system: usize,
    pub queue_len: usize,
    pub busy: usize,
    /// 仅有限总体模型：系统外的顾客数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outside: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct SimulationState {
    pub(crate) clock: SimTime,
    waiting: VecDeque<Customer>,
    busy: Vec<Customer>,
    servers: usize,
    population: Option<usize>,
    outside: usize,
    next_id: u64,
    pub(crate) arrivals: u64,
    pub(crate) departures: u64,
    pub(crate) rejected: u64,
    pub(crate) stats: Accumulator,
}

impl SimulationState {
    pub fn new(servers: usize, population: Option<usize>) -> Self {
        Self {
            clock: SimTime::ZERO,
            waiting: VecDeque::new(),
            busy: Vec::with_capacity(servers),
            servers,
            population,
            outside: population.unwrap_or(0),
            next_id: 0,
            arrivals: 0,
            departures: 0,
            rejected: 0,
            stats: Accumulator::default(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.servers, self.population);
    }

    pub fn clock(&self) -> SimTime {
        self.clock
    }

    pub fn servers(&self) -> usize {
        self.servers
    }

    pub fn in_system(&self) -> usize {
        self.waiting.len() + self.busy.len()
    }

    pub fn queue_len(&self) -> usize {
        self.waiting.len()
    }

    pub fn busy_servers(&self) -> usize {
        self.busy.len()
    }

    pub fn has_idle_server(&self) -> bool {
        self.busy.len() < self.servers
    }

    pub fn outside(&self) -> Option<usize> {
        self.population.map(|_| self.outside)
    }

    pub fn arrivals(&self) -> u64 {
        self.arrivals
    }

    pub fn departures(&self) -> u64 {
        self.departures
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    pub fn stats(&self) -> &Accumulator {
        &self.stats
    }

    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            in_system: self.in_system(),
            queue_len: self.queue_len(),
            busy: self.busy.len(),
            outside: self.outside(),
        }
    }

    /// 先用旧状态累积 `[clock, to)` 区间，再推进时钟。
    pub fn advance_to(&mut self, to: SimTime) -> Result<(), SimError> {
        let elapsed = to.since(self.clock);
        if elapsed < 0.0 {
            return Err(SimError::TimeWentBackwards {
                clock: self.clock.as_f64(),
                event: to.as_f64(),
            });
        }
        let occ = self.occupancy();
        self.stats.update(elapsed, &occ);
        self.clock = to;
        Ok(())
    }

    /// 记录一次到达尝试；被接纳时再调用 `admit`。
    pub(crate) fn record_arrival(&mut self) {
        self.arrivals += 1;
    }

    pub(crate) fn reject(&mut self) {
        self.rejected += 1;
    }

    pub(crate) fn take_from_population(&mut self) -> Result<(), SimError> {
        if self.outside == 0 {
            return Err(SimError::PopulationExhausted);
        }
        self.outside -= 1;
        Ok(())
    }

    pub(crate) fn return_to_population(&mut self) -> usize {
        self.outside += 1;
        self.outside
    }

    /// 创建顾客：有空闲服务台则立即开始服务，否则进入等待队列。
    pub(crate) fn admit(&mut self, mu: f64, sched: &mut Scheduler<'_>) -> CustomerId {
        self.next_id += 1;
        let customer = Customer {
            id: CustomerId(self.next_id),
            arrival_time: sched.now(),
            service_start_time: None,
            departure_time: None,
        };
        let id = customer.id;
        if self.has_idle_server() {
            self.start_service(customer, mu, sched);
        } else {
            self.waiting.push_back(customer);
        }
        id
    }

    pub(crate) fn start_service(
        &mut self,
        mut customer: Customer,
        mu: f64,
        sched: &mut Scheduler<'_>,
    ) {
        debug_assert!(self.has_idle_server(), "start_service with every server busy");
        customer.service_start_time = Some(sched.now());
        customer.departure_time = Some(sched.schedule_departure(customer.id, mu));
        self.busy.push(customer);
    }

    /// 释放服务台；若队列非空，队首立即开始服务。
    pub(crate) fn depart(
        &mut self,
        id: CustomerId,
        mu: f64,
        sched: &mut Scheduler<'_>,
    ) -> Result<Customer, SimError> {
        let pos = self
            .busy
            .iter()
            .position(|c| c.id == id)
            .ok_or(SimError::UnknownCustomer { id: id.0 })?;
        let done = self.busy.swap_remove(pos);
        self.departures += 1;
        if let Some(next) = self.waiting.pop_front() {
            self.start_service(next, mu, sched);
        }
        Ok(done)
    }
}
