//! 错误类型
//!
//! 配置错误在运行开始前被报告；运行期错误表示调度器内部不一致，会中止本次运行。

use thiserror::Error;

/// Invalid model or run configuration, detected before any event is scheduled.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NonPositiveRate { name: &'static str, value: f64 },

    #[error("missing parameter `{name}` for {model}")]
    MissingParameter {
        name: &'static str,
        model: &'static str,
    },

    #[error("there must be at least 1 server")]
    NoServers,

    #[error("capacity K must be >= 1")]
    CapacityTooSmall,

    #[error("capacity K ({capacity}) must be >= number of servers ({servers})")]
    CapacityBelowServers { capacity: usize, servers: usize },

    #[error("population N must be >= 1")]
    EmptyPopulation,

    #[error("unstable system: lambda ({lambda}) must be < s*mu ({capacity})")]
    Unstable { lambda: f64, capacity: f64 },

    #[error("simulation duration must be a positive finite number, got {0}")]
    NonPositiveDuration(f64),

    #[error("unknown model kind `{0}` (expected mm1, mm1k, mms, mmsk or mmsn)")]
    UnknownModel(String),

    #[error("at most {max} models can be compared at once, got {count}")]
    TooManyModels { count: usize, max: usize },

    #[error("scenario contains no models")]
    NoModels,
}

/// Errors that abort a simulation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("departure for customer {id} who is not in service")]
    UnknownCustomer { id: u64 },

    #[error("arrival while no customer is outside the system")]
    PopulationExhausted,

    #[error("event at t={event} precedes the clock at t={clock}")]
    TimeWentBackwards { clock: f64, event: f64 },
}
