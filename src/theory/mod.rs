//! 理论指标
//!
//! 各模型族的闭式公式，仅用于与仿真结果交叉验证，仿真器本身不依赖它们。

mod formulas;

pub use formulas::{finite_capacity, finite_source, mm1, multi_server};

use crate::model::{ModelKind, ModelParams};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TheoreticalMetrics {
    /// Offered utilization (`λ/(sμ)`, or `Nλ/(sμ)` for a finite source).
    pub rho: f64,
    #[serde(rename = "L")]
    pub l: f64,
    #[serde(rename = "Lq")]
    pub lq: f64,
    #[serde(rename = "W")]
    pub w: f64,
    #[serde(rename = "Wq")]
    pub wq: f64,
    #[serde(rename = "P0")]
    pub p0: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambda_eff: Option<f64>,
    /// Erlang C probability that an arrival has to wait.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_wait: Option<f64>,
    /// Probability that the system is full (arrivals blocked).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_block: Option<f64>,
}

/// 返回 None 表示参数非法或系统不稳定。
pub fn theoretical(kind: ModelKind, params: &ModelParams) -> Option<TheoreticalMetrics> {
    let p = params.validate(kind).ok()?;
    let s = p.server_count();
    match kind {
        ModelKind::Mm1 => mm1(p.lambda, p.mu),
        ModelKind::Mms => multi_server(p.lambda, p.mu, s),
        ModelKind::Mm1k | ModelKind::Mmsk => finite_capacity(p.lambda, p.mu, s, p.capacity?),
        ModelKind::Mmsn => finite_source(p.lambda, p.mu, s, p.population?),
    }
}
