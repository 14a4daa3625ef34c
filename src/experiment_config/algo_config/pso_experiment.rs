use serde::{Deserialize, Serialize};

use crate::experiment_config::{ConfigError, Fix};
use crate::metaheuristic::pso::Params;
use crate::rng::os_random_seed;

#[derive(Copy, Clone, Deserialize, Serialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PsoExperiment {
    pub particle_count: usize,
    pub xmin: f64,
    pub xmax: f64,
    pub vmin: f64,
    pub vmax: f64,
    pub initial_inertia: f64,
    pub min_inertia: f64,
    pub local_acceleration: f64,
    pub global_acceleration: f64,
    pub seed: u64,
}

impl PsoExperiment {
    /// Returns the engine parameters for one instance seeded with `seed`.
    /// The inertia schedule spans `max_iterations`.
    pub fn params(&self, max_iterations: usize, seed: u128) -> Params {
        Params {
            particle_count: self.particle_count,
            xmin: self.xmin,
            xmax: self.xmax,
            vmin: self.vmin,
            vmax: self.vmax,
            initial_inertia: self.initial_inertia,
            min_inertia: self.min_inertia,
            c1: self.local_acceleration,
            c2: self.global_acceleration,
            max_iterations,
            seed,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::InvalidAlgorithmConfig(format!("PSO: {}", msg)));

        if self.particle_count == 0 {
            return invalid("particle_count has to be at least 1.");
        }
        if !(self.xmin < self.xmax) {
            return invalid("xmin has to be smaller than xmax.");
        }
        if !(self.vmin < self.vmax) {
            return invalid("vmin has to be smaller than vmax.");
        }
        if !(self.min_inertia <= self.initial_inertia) {
            return invalid("min_inertia must not exceed initial_inertia.");
        }
        let values = [
            self.xmin,
            self.xmax,
            self.vmin,
            self.vmax,
            self.initial_inertia,
            self.min_inertia,
            self.local_acceleration,
            self.global_acceleration,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return invalid("all values have to be finite.");
        }

        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UnseededPsoExperiment {
    pub particle_count: usize,
    pub xmin: f64,
    pub xmax: f64,
    pub vmin: f64,
    pub vmax: f64,
    pub initial_inertia: f64,
    pub min_inertia: f64,
    pub local_acceleration: f64,
    pub global_acceleration: f64,
}

impl Fix<PsoExperiment> for UnseededPsoExperiment {
    fn to_fixed(&self) -> PsoExperiment {
        PsoExperiment {
            particle_count: self.particle_count,
            xmin: self.xmin,
            xmax: self.xmax,
            vmin: self.vmin,
            vmax: self.vmax,
            initial_inertia: self.initial_inertia,
            min_inertia: self.min_inertia,
            local_acceleration: self.local_acceleration,
            global_acceleration: self.global_acceleration,
            seed: (os_random_seed() >> 64) as u64,
        }
    }
}
