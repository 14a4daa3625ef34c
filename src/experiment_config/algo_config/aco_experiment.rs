use serde::{Deserialize, Serialize};

use crate::experiment_config::{ConfigError, Fix};
use crate::metaheuristic::aco::{Params, Reinforcement};
use crate::rng::os_random_seed;

fn default_initial_pheromone() -> f64 {
    Params::default().initial_pheromone
}

fn default_q() -> f64 {
    Params::default().q
}

fn default_epsilon() -> f64 {
    Params::default().epsilon
}

#[derive(Copy, Clone, Deserialize, Serialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AcoExperiment {
    pub alpha: f64,
    pub beta: f64,
    pub rho: f64,
    pub ant_count: usize,
    #[serde(default = "default_initial_pheromone")]
    pub initial_pheromone: f64,
    #[serde(default = "default_q")]
    pub q: f64,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default)]
    pub exploration: f64,
    #[serde(default)]
    pub reinforcement: Reinforcement,
    pub seed: u64,
}

impl AcoExperiment {
    /// Returns the engine parameters for one instance seeded with `seed`.
    pub fn params(&self, seed: u128) -> Params {
        Params {
            alpha: self.alpha,
            beta: self.beta,
            ant_count: self.ant_count,
            initial_pheromone: self.initial_pheromone,
            rho: self.rho,
            q: self.q,
            epsilon: self.epsilon,
            exploration: self.exploration,
            reinforcement: self.reinforcement,
            seed,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::InvalidAlgorithmConfig(format!("ACO: {}", msg)));

        if self.ant_count == 0 {
            return invalid("ant_count has to be at least 1.");
        }
        if !(0.0..=1.0).contains(&self.rho) {
            return invalid("rho has to be within [0, 1].");
        }
        if !(0.0..=1.0).contains(&self.exploration) {
            return invalid("exploration has to be within [0, 1].");
        }
        if !(self.alpha.is_finite() && self.alpha >= 0.0 && self.beta.is_finite() && self.beta >= 0.0) {
            return invalid("alpha and beta have to be finite and not negative.");
        }
        if !(self.q.is_finite() && self.q > 0.0) {
            return invalid("q has to be positive.");
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return invalid("epsilon has to be positive.");
        }
        if !(self.initial_pheromone.is_finite() && self.initial_pheromone > 0.0) {
            return invalid("initial_pheromone has to be positive.");
        }

        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UnseededAcoExperiment {
    pub alpha: f64,
    pub beta: f64,
    pub rho: f64,
    pub ant_count: usize,
    #[serde(default = "default_initial_pheromone")]
    pub initial_pheromone: f64,
    #[serde(default = "default_q")]
    pub q: f64,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default)]
    pub exploration: f64,
    #[serde(default)]
    pub reinforcement: Reinforcement,
}

impl Fix<AcoExperiment> for UnseededAcoExperiment {
    fn to_fixed(&self) -> AcoExperiment {
        AcoExperiment {
            alpha: self.alpha,
            beta: self.beta,
            rho: self.rho,
            ant_count: self.ant_count,
            initial_pheromone: self.initial_pheromone,
            q: self.q,
            epsilon: self.epsilon,
            exploration: self.exploration,
            reinforcement: self.reinforcement,
            seed: (os_random_seed() >> 64) as u64,
        }
    }
}
