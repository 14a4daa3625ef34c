pub mod aco;
pub mod pso;
mod solution;

pub use aco::Aco;
pub use pso::Pso;
pub use solution::Solution;

use crate::jssp::Time;

/// Engine specific figures of the last iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineReport {
    Colony {
        generation_best: Time,
        generation_average: f64,
    },
    Swarm {
        inertia: f64,
        swarm_best: Time,
        swarm_average: f64,
    },
}

/// A search engine that improves a best-so-far operation order iteration by iteration.
///
/// Engines own all of their state, including their random source, so that
/// independent instances can run on separate threads.
pub trait Metaheuristic: Send {
    /// Runs one iteration. Returns the new best solution if it strictly improved.
    fn single_iteration(&mut self) -> Option<&Solution>;

    fn ran_iterations(&self) -> usize;

    fn best_solution(&self) -> &Solution;

    /// Returns the makespan of the best solution, `None` before one was found.
    fn best_makespan(&self) -> Option<Time>;

    fn name(&self) -> &'static str;

    /// Returns a one-line summary of the engine state.
    fn status(&self) -> String {
        match self.best_makespan() {
            Some(makespan) => format!(
                "{} after {} iterations: best makespan {}",
                self.name(),
                self.ran_iterations(),
                makespan
            ),
            None => format!("{} after {} iterations: no solution", self.name(), self.ran_iterations()),
        }
    }

    fn report(&self) -> Option<EngineReport> {
        None
    }
}
