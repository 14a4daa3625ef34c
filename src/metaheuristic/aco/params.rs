use crate::rng::os_random_seed;

use serde::{Deserialize, Serialize};

/// Decides which ants of a generation lay down pheromone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reinforcement {
    /// Only the best ant of the generation deposits.
    IterationBest,
    /// Every ant deposits proportional to its own makespan.
    AllAnts,
}

impl Default for Reinforcement {
    fn default() -> Self {
        Reinforcement::IterationBest
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub alpha: f64,
    pub beta: f64,
    pub ant_count: usize,
    pub initial_pheromone: f64,
    pub rho: f64,
    pub q: f64,
    /// Added to the induced gap, so that operations which do not extend the
    /// makespan keep a finite weight.
    pub epsilon: f64,
    /// Probability of an ant ignoring the pheromone for a whole construction.
    pub exploration: f64,
    pub reinforcement: Reinforcement,
    pub seed: u128,
}

impl Params {
    pub fn new(alpha: f64, beta: f64, rho: f64, ant_count: usize, seed: Option<u128>) -> Self {
        Params {
            alpha,
            beta,
            rho,
            ant_count,
            seed: seed.unwrap_or_else(os_random_seed),
            ..Params::default()
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Params {
            alpha: 1.0,
            beta: 1.0,
            ant_count: 20,
            initial_pheromone: 1.0,
            rho: 0.1,
            q: 1.0,
            epsilon: 0.5,
            exploration: 0.0,
            reinforcement: Reinforcement::IterationBest,
            seed: 0,
        }
    }
}
