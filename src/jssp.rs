mod error;
mod evaluate;
pub mod export;
mod gantt;
pub mod import;
mod problem;

pub use error::ProblemError;
pub use evaluate::{Evaluator, Simulation};
pub use gantt::{GanttChart, GanttTask};
pub use problem::{Operation, ProblemInstance};

/// Time unit of durations, start times and makespans.
pub type Time = u32;
