mod algo_config;
mod error;
mod solver_config;

pub use algo_config::{
    AcoExperiment, AlgoConfig, FixedAlgo, PsoExperiment, UnseededAcoExperiment,
    UnseededPsoExperiment,
};
pub use error::ConfigError;
pub use solver_config::SolverConfig;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub trait Fix<CorrectType> {
    fn to_fixed(&self) -> CorrectType;
}

/// A complete experiment: how to run the solver and which engines to run.
///
/// The solver instances are assigned to the listed algorithms round-robin, so
/// a list of one ACO and one PSO section yields alternating instances.
#[derive(Deserialize, Serialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExperimentConfig {
    pub solver: SolverConfig,
    pub algorithms: Vec<AlgoConfig>,
}

impl ExperimentConfig {
    /// Reads a config from a `.yml`, `.yaml` or `.ron` file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::MissingFile(display));
        }

        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml") | Some("yaml") => ExperimentConfig::from_yaml(&content),
            Some("ron") => ExperimentConfig::from_ron(&content),
            _ => Err(ConfigError::UnknownFormat(display)),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        Ok(ron::de::from_str(content)?)
    }

    /// Checks every section, so that no engine is built from an invalid config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.algorithms.is_empty() {
            return Err(ConfigError::NoAlgorithms);
        }

        self.solver.validate()?;
        for algorithm in self.algorithms.iter() {
            algorithm.validate()?;
        }

        Ok(())
    }
}
