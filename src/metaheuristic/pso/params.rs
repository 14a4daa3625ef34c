use crate::rng::os_random_seed;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub particle_count: usize,
    pub xmin: f64,
    pub xmax: f64,
    pub vmin: f64,
    pub vmax: f64,
    pub initial_inertia: f64,
    pub min_inertia: f64,
    /// Acceleration towards the particle's own best position.
    pub c1: f64,
    /// Acceleration towards the swarm's best position.
    pub c2: f64,
    /// Length of the inertia schedule.
    pub max_iterations: usize,
    pub seed: u128,
}

impl Params {
    pub fn new(particle_count: usize, max_iterations: usize, seed: Option<u128>) -> Self {
        Params {
            particle_count,
            max_iterations,
            seed: seed.unwrap_or_else(os_random_seed),
            ..Params::default()
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Params {
            particle_count: 30,
            xmin: 0.0,
            xmax: 2.0,
            vmin: -1.0,
            vmax: 1.0,
            initial_inertia: 1.4,
            min_inertia: 0.4,
            c1: 2.0,
            c2: 2.0,
            max_iterations: 1000,
            seed: 0,
        }
    }
}
