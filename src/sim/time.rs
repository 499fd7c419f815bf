//! 仿真时间类型
//!
//! 逻辑时钟：连续时间（单位由 λ/μ 决定），而非纳秒整数。

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 仿真时间。内部为 `f64`，通过 `total_cmp` 提供全序，便于放入堆中比较。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// 当前时间之后 `dt` 的时刻
    pub fn after(self, dt: f64) -> SimTime {
        SimTime(self.0 + dt)
    }

    /// 自 `earlier` 以来经过的时间（可能为负，由调用方检查）
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
