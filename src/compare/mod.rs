//! 多模型对比
//!
//! 一个场景最多包含 [`MAX_MODELS`] 个模型。所有模型先统一校验，再用 rayon 并行运行；
//! 每个模型独占自己的事件队列、状态与随机源，结果在全部完成后一起返回。

mod scenario;

pub use scenario::{ModelSpec, ScenarioSpec};

use crate::error::{ConfigError, SimError};
use crate::model::{ModelKind, ModelParams, QueueModel};
use crate::sim::{Simulator, Variates};
use crate::stats::{FinalMetrics, TimeSeries};
use crate::theory::{TheoreticalMetrics, theoretical};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

pub const MAX_MODELS: usize = 4;

/// 单个模型的对比结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelReport {
    pub label: String,
    pub kind: ModelKind,
    pub params: ModelParams,
    pub seed: u64,
    pub simulated: FinalMetrics,
    pub theoretical: Option<TheoreticalMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_series: Option<TimeSeries>,
    pub events_processed: u64,
}

/// 整个场景的对比结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub duration: f64,
    pub seed: u64,
    pub models: Vec<ModelReport>,
}

/// 运行场景。没有给定种子时随机生成一个并记录在报告里，以便复现。
pub fn run_scenario(spec: &ScenarioSpec) -> Result<ComparisonReport, SimError> {
    if spec.models.is_empty() {
        return Err(ConfigError::NoModels.into());
    }
    if spec.models.len() > MAX_MODELS {
        return Err(ConfigError::TooManyModels {
            count: spec.models.len(),
            max: MAX_MODELS,
        }
        .into());
    }
    if !(spec.duration.is_finite() && spec.duration > 0.0) {
        return Err(ConfigError::NonPositiveDuration(spec.duration).into());
    }

    let models = spec
        .models
        .iter()
        .map(ModelSpec::to_model)
        .collect::<Result<Vec<_>, _>>()?;
    let seed = spec.seed.unwrap_or_else(rand::random);
    info!(
        models = models.len(),
        duration = spec.duration,
        seed,
        "开始对比运行"
    );

    let reports = run_models(&models, spec.duration, seed, spec.time_series)?;
    Ok(ComparisonReport {
        duration: spec.duration,
        seed,
        models: reports,
    })
}

/// 并行运行已校验的模型；第 i 个模型使用种子 `seed + i`。
pub fn run_models(
    models: &[QueueModel],
    duration: f64,
    seed: u64,
    time_series: bool,
) -> Result<Vec<ModelReport>, SimError> {
    models
        .par_iter()
        .enumerate()
        .map(|(i, model)| -> Result<ModelReport, SimError> {
            let model_seed = seed.wrapping_add(i as u64);
            let mut sim = Simulator::new(model.clone(), Variates::seeded(model_seed))
                .with_time_series(time_series);
            let run = sim.run(duration)?;
            Ok(ModelReport {
                label: model.label().to_string(),
                kind: model.kind(),
                params: *model.params(),
                seed: model_seed,
                simulated: run.metrics,
                theoretical: theoretical(model.kind(), model.params()),
                time_series: run.time_series,
                events_processed: run.events_processed,
            })
        })
        .collect()
}
