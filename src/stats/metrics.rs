//! 最终指标
//!
//! L、Lq 由面积除以总时长得到；W、Wq 由 Little 定律从 L、Lq 推出，
//! 因此四者天然一致。

use crate::model::{ModelParams, SimulationState};
use serde::{Deserialize, Serialize};

/// Flat, model-agnostic result of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalMetrics {
    pub lambda: f64,
    pub lambda_eff: f64,
    pub mu: f64,
    /// Observed utilization, `(L - Lq) / s`.
    pub rho: f64,
    #[serde(rename = "L")]
    pub l: f64,
    #[serde(rename = "Lq")]
    pub lq: f64,
    #[serde(rename = "W")]
    pub w: f64,
    #[serde(rename = "Wq")]
    pub wq: f64,
    /// Fraction of time the system was empty.
    #[serde(rename = "P0")]
    pub p0: f64,
    pub max_queue: usize,
    pub served: u64,
    pub rejected: u64,
    pub arrivals: u64,
    pub rejection_rate: f64,
    pub utilization_percent: f64,
    pub in_system_at_end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outside_at_end: Option<usize>,
    pub total_time: f64,
}

/// 由运行结束时的状态计算指标。`total_time <= 0` 或无离开时相关项记为 0。
pub fn finalize(state: &SimulationState, params: &ModelParams, total_time: f64) -> FinalMetrics {
    let stats = state.stats();
    let served = state.departures();
    let (l, lq, lambda_eff, p0) = if total_time > 0.0 {
        (
            stats.area_l / total_time,
            stats.area_lq / total_time,
            served as f64 / total_time,
            stats.empty_time / total_time,
        )
    } else {
        (0.0, 0.0, 0.0, 0.0)
    };
    let (w, wq) = if lambda_eff > 0.0 {
        (l / lambda_eff, lq / lambda_eff)
    } else {
        (0.0, 0.0)
    };
    let rho = (l - lq) / state.servers().max(1) as f64;
    let rejection_rate = if state.arrivals() > 0 {
        state.rejected() as f64 / state.arrivals() as f64
    } else {
        0.0
    };

    FinalMetrics {
        lambda: params.lambda,
        lambda_eff,
        mu: params.mu,
        rho,
        l,
        lq,
        w,
        wq,
        p0,
        max_queue: stats.max_queue,
        served,
        rejected: state.rejected(),
        arrivals: state.arrivals(),
        rejection_rate,
        utilization_percent: rho * 100.0,
        in_system_at_end: state.in_system(),
        outside_at_end: state.outside(),
        total_time,
    }
}
