use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum ProblemError {
    NoJobs,
    EmptyJob(usize),
    NonRectangular {
        job: usize,
        expected: usize,
        found: usize,
    },
    MachineOutOfRange {
        job: usize,
        position: usize,
        machine: usize,
    },
    ZeroDuration {
        job: usize,
        position: usize,
    },
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoJobs => write!(f, "Problem instance has no jobs."),
            Self::EmptyJob(job) => write!(f, "Job {} has no operations.", job),
            Self::NonRectangular {
                job,
                expected,
                found,
            } => write!(
                f,
                "Job {} has {} operations, but every job needs {}.",
                job, found, expected
            ),
            Self::MachineOutOfRange {
                job,
                position,
                machine,
            } => write!(
                f,
                "Operation {} of job {} uses unknown machine {}.",
                position, job, machine
            ),
            Self::ZeroDuration { job, position } => write!(
                f,
                "Operation {} of job {} has a duration of zero.",
                position, job
            ),
        }
    }
}

impl Error for ProblemError {}
