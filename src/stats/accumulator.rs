//! 时间加权统计
//!
//! 在两个事件之间，系统状态保持不变；用事件发生“之前”的状态乘以经过时间，
//! 累加曲线下面积。

use crate::model::Occupancy;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Accumulator {
    /// ∫ L(t) dt
    pub area_l: f64,
    /// ∫ Lq(t) dt
    pub area_lq: f64,
    /// 系统为空的总时长
    pub empty_time: f64,
    pub max_queue: usize,
}

impl Accumulator {
    /// `occ` 必须是即将处理的事件之前的状态。`elapsed <= 0` 时不做任何事。
    pub fn update(&mut self, elapsed: f64, occ: &Occupancy) {
        if elapsed <= 0.0 {
            return;
        }
        self.area_l += occ.in_system as f64 * elapsed;
        self.area_lq += occ.queue_len as f64 * elapsed;
        if occ.in_system == 0 {
            self.empty_time += elapsed;
        }
        self.max_queue = self.max_queue.max(occ.queue_len);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
