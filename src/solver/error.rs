use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum SolverError {
    NoInstances,
    ZeroEpochSize,
    /// The worker thread running the instance with this index panicked.
    WorkerPanicked(usize),
    /// No instance found any solution, which happens if no iteration was run.
    NoSolution,
    Statistics(csv::Error),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoInstances => write!(f, "Solver has no search instances."),
            Self::ZeroEpochSize => write!(f, "Epoch size has to be at least 1."),
            Self::WorkerPanicked(idx) => write!(f, "Worker of instance {} panicked.", idx),
            Self::NoSolution => write!(f, "No instance found a solution."),
            Self::Statistics(err) => write!(f, "Could not write statistics: {}", err),
        }
    }
}

impl Error for SolverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Statistics(err) => Some(err),
            _ => None,
        }
    }
}

impl From<csv::Error> for SolverError {
    fn from(err: csv::Error) -> Self {
        SolverError::Statistics(err)
    }
}
