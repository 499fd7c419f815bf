//! 模型类型与参数
//!
//! 参数在构造时校验一次，之后不可变。

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported queueing models, in Kendall notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Single server, unbounded queue.
    Mm1,
    /// Single server, at most K customers in the system.
    Mm1k,
    /// s servers, unbounded queue.
    Mms,
    /// s servers, at most K customers in the system.
    Mmsk,
    /// s servers, closed population of N customers.
    Mmsn,
}

impl ModelKind {
    pub const ALL: [ModelKind; 5] = [
        ModelKind::Mm1,
        ModelKind::Mm1k,
        ModelKind::Mms,
        ModelKind::Mmsk,
        ModelKind::Mmsn,
    ];

    pub fn notation(self) -> &'static str {
        match self {
            ModelKind::Mm1 => "M/M/1",
            ModelKind::Mm1k => "M/M/1/K",
            ModelKind::Mms => "M/M/s",
            ModelKind::Mmsk => "M/M/s/K",
            ModelKind::Mmsn => "M/M/s/N",
        }
    }

    pub fn is_single_server(self) -> bool {
        matches!(self, ModelKind::Mm1 | ModelKind::Mm1k)
    }

    pub fn is_capacity_bounded(self) -> bool {
        matches!(self, ModelKind::Mm1k | ModelKind::Mmsk)
    }

    pub fn is_finite_population(self) -> bool {
        matches!(self, ModelKind::Mmsn)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}

impl FromStr for ModelKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match norm.as_str() {
            "mm1" => Ok(ModelKind::Mm1),
            "mm1k" => Ok(ModelKind::Mm1k),
            "mms" => Ok(ModelKind::Mms),
            "mmsk" => Ok(ModelKind::Mmsk),
            "mmsn" => Ok(ModelKind::Mmsn),
            _ => Err(ConfigError::UnknownModel(s.to_string())),
        }
    }
}

/// Arrival rate, per-server service rate and the optional structural
/// parameters. Single-server kinds always resolve to one server.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    pub lambda: f64,
    pub mu: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<usize>,
}

impl ModelParams {
    pub fn new(lambda: f64, mu: f64) -> Self {
        Self {
            lambda,
            mu,
            servers: None,
            capacity: None,
            population: None,
        }
    }

    pub fn with_servers(mut self, servers: usize) -> Self {
        self.servers = Some(servers);
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_population(mut self, population: usize) -> Self {
        self.population = Some(population);
        self
    }

    /// 服务台数量；未设置时视为 1
    pub fn server_count(&self) -> usize {
        self.servers.unwrap_or(1)
    }

    /// 按模型类型校验参数，返回规范化后的副本（单服务台模型强制 servers = 1）。
    pub fn validate(&self, kind: ModelKind) -> Result<ModelParams, ConfigError> {
        check_rate("lambda", self.lambda)?;
        check_rate("mu", self.mu)?;

        let mut out = *self;
        if kind.is_single_server() {
            out.servers = Some(1);
        }
        let servers = match out.servers {
            Some(0) => return Err(ConfigError::NoServers),
            Some(s) => s,
            None => {
                return Err(ConfigError::MissingParameter {
                    name: "servers",
                    model: kind.notation(),
                });
            }
        };

        match kind {
            ModelKind::Mm1 | ModelKind::Mms => {
                let service_capacity = servers as f64 * out.mu;
                if out.lambda >= service_capacity {
                    return Err(ConfigError::Unstable {
                        lambda: out.lambda,
                        capacity: service_capacity,
                    });
                }
            }
            ModelKind::Mm1k | ModelKind::Mmsk => {
                let capacity = out.capacity.ok_or(ConfigError::MissingParameter {
                    name: "capacity",
                    model: kind.notation(),
                })?;
                if capacity < 1 {
                    return Err(ConfigError::CapacityTooSmall);
                }
                if capacity < servers {
                    return Err(ConfigError::CapacityBelowServers { capacity, servers });
                }
            }
            ModelKind::Mmsn => {
                let population = out.population.ok_or(ConfigError::MissingParameter {
                    name: "population",
                    model: kind.notation(),
                })?;
                if population < 1 {
                    return Err(ConfigError::EmptyPopulation);
                }
            }
        }
        Ok(out)
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveRate { name, value })
    }
}

/// Synchronous precondition check exposed to callers.
pub fn validate(kind: ModelKind, params: &ModelParams) -> Result<(), ConfigError> {
    params.validate(kind).map(|_| ())
}

/// 一个已校验的模型：类型 + 规范化参数 + 可选标签。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueModel {
    kind: ModelKind,
    params: ModelParams,
    label: String,
}

impl QueueModel {
    pub fn new(kind: ModelKind, params: ModelParams) -> Result<Self, ConfigError> {
        let params = params.validate(kind)?;
        Ok(Self {
            kind,
            params,
            label: kind.notation().to_string(),
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
