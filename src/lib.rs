pub mod experiment;
pub mod experiment_config;
pub mod jssp;
pub mod metaheuristic;
pub mod rng;
pub mod solver;
pub mod util;
