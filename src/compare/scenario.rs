use crate::error::ConfigError;
use crate::model::{ModelKind, ModelParams, QueueModel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub duration: f64,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Capture ~100 evenly spaced state samples per model.
    #[serde(default)]
    pub time_series: bool,
    pub models: Vec<ModelSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSpec {
    pub kind: ModelKind,
    #[serde(default)]
    pub label: Option<String>,
    pub lambda: f64,
    pub mu: f64,
    #[serde(default)]
    pub servers: Option<usize>,
    #[serde(default)]
    pub capacity: Option<usize>,
    #[serde(default)]
    pub population: Option<usize>,
}

impl ModelSpec {
    pub fn params(&self) -> ModelParams {
        ModelParams {
            lambda: self.lambda,
            mu: self.mu,
            servers: self.servers,
            capacity: self.capacity,
            population: self.population,
        }
    }

    pub fn to_model(&self) -> Result<QueueModel, ConfigError> {
        let model = QueueModel::new(self.kind, self.params())?;
        Ok(match &self.label {
            Some(label) => model.with_label(label.clone()),
            None => model,
        })
    }
}
