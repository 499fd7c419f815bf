//! 事件类型
//!
//! 排队网络只有两类事件：到达与离开。离开事件携带对应顾客的标识。

use super::time::SimTime;
use serde::{Deserialize, Serialize};

/// 顾客标识符（每次运行内单调递增）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Arrival,
    Departure,
}

/// 已调度的事件；入队后不可变，出队即被消费。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub time: SimTime,
    pub customer: Option<CustomerId>,
}

impl Event {
    pub fn arrival(time: SimTime) -> Self {
        Self {
            kind: EventKind::Arrival,
            time,
            customer: None,
        }
    }

    pub fn departure(time: SimTime, customer: CustomerId) -> Self {
        Self {
            kind: EventKind::Departure,
            time,
            customer: Some(customer),
        }
    }
}
