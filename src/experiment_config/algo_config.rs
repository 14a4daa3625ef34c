mod aco_experiment;
mod pso_experiment;

use serde::{Deserialize, Serialize};

use crate::experiment_config::{ConfigError, Fix};
pub use aco_experiment::{AcoExperiment, UnseededAcoExperiment};
pub use pso_experiment::{PsoExperiment, UnseededPsoExperiment};

#[derive(Deserialize, Serialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum AlgoConfig {
    Aco(AcoExperiment),
    UnseededAco(UnseededAcoExperiment),
    Pso(PsoExperiment),
    UnseededPso(UnseededPsoExperiment),
}

/// An algorithm section with its seed settled.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FixedAlgo {
    Aco(AcoExperiment),
    Pso(PsoExperiment),
}

impl AlgoConfig {
    pub fn aco(&self) -> Result<AcoExperiment, ConfigError> {
        match self {
            AlgoConfig::Aco(aco) => Ok(*aco),
            AlgoConfig::UnseededAco(usaco) => Ok(usaco.to_fixed()),
            _ => Err(ConfigError::NotAco),
        }
    }

    pub fn pso(&self) -> Result<PsoExperiment, ConfigError> {
        match self {
            AlgoConfig::Pso(pso) => Ok(*pso),
            AlgoConfig::UnseededPso(uspso) => Ok(uspso.to_fixed()),
            _ => Err(ConfigError::NotPso),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.to_fixed() {
            FixedAlgo::Aco(aco) => aco.validate(),
            FixedAlgo::Pso(pso) => pso.validate(),
        }
    }
}

/// Settles the seed, drawing one from the OS for unseeded sections.
impl Fix<FixedAlgo> for AlgoConfig {
    fn to_fixed(&self) -> FixedAlgo {
        match self {
            AlgoConfig::Aco(aco) => FixedAlgo::Aco(*aco),
            AlgoConfig::UnseededAco(usaco) => FixedAlgo::Aco(usaco.to_fixed()),
            AlgoConfig::Pso(pso) => FixedAlgo::Pso(*pso),
            AlgoConfig::UnseededPso(uspso) => FixedAlgo::Pso(uspso.to_fixed()),
        }
    }
}
