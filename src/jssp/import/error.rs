use crate::jssp::ProblemError;

use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ImportError {
    MissingFile(String),
    InvalidFormat(String),
    Problem(ProblemError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFile(file) => write!(f, "Missing file: {}", file),
            Self::InvalidFormat(msg) => write!(f, "Invalid format on file: {}", msg),
            Self::Problem(err) => write!(f, "Invalid problem instance: {}", err),
        }
    }
}

impl Error for ImportError {}

impl From<ProblemError> for ImportError {
    fn from(err: ProblemError) -> Self {
        Self::Problem(err)
    }
}
