use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::experiment_config::ConfigError;
use crate::jssp::Time;
use crate::solver::SolverParams;

fn default_threshold() -> f64 {
    SolverParams::default().threshold
}

fn default_patience() -> f64 {
    SolverParams::default().patience
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SolverConfig {
    /// Number of independent search instances.
    pub instances: usize,
    pub max_iterations: usize,
    pub epoch_size: usize,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_patience")]
    pub patience: f64,
    /// Best known makespans by problem instance name.
    #[serde(default)]
    pub benchmarks: BTreeMap<String, Time>,
}

impl SolverConfig {
    pub fn params(&self) -> SolverParams {
        SolverParams {
            threshold: self.threshold,
            patience: self.patience,
        }
    }

    pub fn benchmark(&self, problem: &str) -> Option<Time> {
        self.benchmarks.get(problem).copied()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::InvalidSolverConfig(msg.to_string()));

        if self.instances == 0 {
            return invalid("instances has to be at least 1.");
        }
        if self.max_iterations == 0 {
            return invalid("max_iterations has to be at least 1.");
        }
        if self.epoch_size == 0 {
            return invalid("epoch_size has to be at least 1.");
        }
        if !(self.patience.is_finite() && self.patience > 0.0) {
            return invalid("patience has to be positive.");
        }
        if self.threshold.is_nan() {
            return invalid("threshold is not a number.");
        }

        Ok(())
    }
}
