//! 观察者
//!
//! 每次离散状态转移完成后回调；核心不依赖观察者做任何事。

use super::event::{CustomerId, EventKind};
use super::time::SimTime;
use crate::model::Occupancy;

pub trait Observer {
    fn on_arrival(&mut self, _at: SimTime, _customer: CustomerId, _occ: &Occupancy) {}
    fn on_rejection(&mut self, _at: SimTime, _occ: &Occupancy) {}
    fn on_departure(&mut self, _at: SimTime, _customer: CustomerId, _occ: &Occupancy) {}
}

/// 什么也不做的观察者
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// 一条轨迹记录：事件类型、时间、顾客（被拒绝时为 None）以及事件后的占用情况。
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEntry {
    pub kind: EventKind,
    pub at: SimTime,
    pub customer: Option<CustomerId>,
    pub rejected: bool,
    pub after: Occupancy,
}

/// 记录完整事件轨迹，用于确定性与不变量检查。
#[derive(Debug, Default)]
pub struct TraceRecorder {
    pub entries: Vec<TraceEntry>,
}

impl Observer for TraceRecorder {
    fn on_arrival(&mut self, at: SimTime, customer: CustomerId, occ: &Occupancy) {
        self.entries.push(TraceEntry {
            kind: EventKind::Arrival,
            at,
            customer: Some(customer),
            rejected: false,
            after: *occ,
        });
    }

    fn on_rejection(&mut self, at: SimTime, occ: &Occupancy) {
        self.entries.push(TraceEntry {
            kind: EventKind::Arrival,
            at,
            customer: None,
            rejected: true,
            after: *occ,
        });
    }

    fn on_departure(&mut self, at: SimTime, customer: CustomerId, occ: &Occupancy) {
        self.entries.push(TraceEntry {
            kind: EventKind::Departure,
            at,
            customer: Some(customer),
            rejected: false,
            after: *occ,
        });
    }
}
