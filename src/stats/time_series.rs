//! 时间序列采样（用于绘图）
//!
//! 在约 100 个等间隔时刻采样事件前的状态；对指标计算没有影响。

use crate::model::Occupancy;
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SAMPLES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub t: f64,
    #[serde(rename = "L")]
    pub l: usize,
    #[serde(rename = "Lq")]
    pub lq: usize,
    /// 忙碌服务台比例
    pub rho: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outside: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub samples: Vec<Sample>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// 采样器：事件时间越过下一个采样点时记录一次。
#[derive(Debug, Clone)]
pub struct Sampler {
    interval: f64,
    next_at: f64,
    servers: usize,
    series: TimeSeries,
}

impl Sampler {
    pub fn new(duration: f64, samples: usize, servers: usize) -> Self {
        Self {
            interval: duration / samples.max(1) as f64,
            next_at: 0.0,
            servers: servers.max(1),
            series: TimeSeries::default(),
        }
    }

    pub fn observe(&mut self, at: SimTime, occ: &Occupancy) {
        if at.as_f64() < self.next_at {
            return;
        }
        self.series.samples.push(Sample {
            t: at.as_f64(),
            l: occ.in_system,
            lq: occ.queue_len,
            rho: occ.busy as f64 / self.servers as f64,
            outside: occ.outside,
        });
        self.next_at += self.interval;
    }

    pub fn finish(self) -> TimeSeries {
        self.series
    }
}
