//! 统计模块
//!
//! 时间加权累积、最终指标与时间序列采样。

mod accumulator;
mod metrics;
mod time_series;

pub use accumulator::Accumulator;
pub use metrics::{FinalMetrics, finalize};
pub use time_series::{DEFAULT_SAMPLES, Sample, Sampler, TimeSeries};
