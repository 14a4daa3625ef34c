mod error;

pub use error::ImportError;

use crate::jssp::{Operation, ProblemInstance, Time};

use std::fs;
use std::path::Path;

/// Reads a problem instance from a file, using the file name without extension as instance name.
pub fn read_problem(path: &Path) -> Result<ProblemInstance, ImportError> {
    let content = fs::read_to_string(path)
        .map_err(|_| ImportError::MissingFile(path.display().to_string()))?;
    let name = path
        .file_stem()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_problem(&name, &content)
}

/// Parses the textual instance format.
///
/// The first line holds the number of jobs and the number of operations per job,
/// each following line lists the `machine duration` pairs of one job in order.
pub fn parse_problem(name: &str, content: &str) -> Result<ProblemInstance, ImportError> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_line, header) = lines
        .next()
        .ok_or_else(|| ImportError::InvalidFormat("file is empty".to_string()))?;
    let meta = parse_line_of_integers(header_line, header)?;
    if meta.len() != 2 {
        return Err(ImportError::InvalidFormat(format!(
            "line {}: expected the number of jobs and operations per job, found {} values",
            header_line + 1,
            meta.len()
        )));
    }
    let (job_count, operations_per_job) = (meta[0] as usize, meta[1] as usize);

    let mut jobs = Vec::with_capacity(job_count);
    for job in 0..job_count {
        let (line_idx, line) = lines.next().ok_or_else(|| {
            ImportError::InvalidFormat(format!("expected {} jobs, found {}", job_count, job))
        })?;
        let values = parse_line_of_integers(line_idx, line)?;
        if values.len() != operations_per_job * 2 {
            return Err(ImportError::InvalidFormat(format!(
                "line {}: expected {} values for job {}, found {}",
                line_idx + 1,
                operations_per_job * 2,
                job,
                values.len()
            )));
        }

        jobs.push(
            values
                .chunks(2)
                .map(|pair| Operation::new(pair[0] as usize, pair[1]))
                .collect(),
        );
    }

    if let Some((line_idx, _)) = lines.next() {
        return Err(ImportError::InvalidFormat(format!(
            "line {}: unexpected data after the last job",
            line_idx + 1
        )));
    }

    Ok(ProblemInstance::new(name, jobs)?)
}

fn parse_line_of_integers(line_idx: usize, line: &str) -> Result<Vec<Time>, ImportError> {
    line.split_whitespace()
        .map(|segment| {
            segment.parse::<Time>().map_err(|_| {
                ImportError::InvalidFormat(format!(
                    "line {}: '{}' is not a non-negative integer",
                    line_idx + 1,
                    segment
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jssp::ProblemError;

    const SMALL: &str = "2 2\n 0 3  1 2\n1 2 0 4\n";

    #[test]
    fn parse_problem_works() {
        let problem = parse_problem("small", SMALL).unwrap();

        assert_eq!(problem.job_count(), 2);
        assert_eq!(problem.operations_per_job(), 2);
        assert_eq!(*problem.operation(0, 0), Operation::new(0, 3));
        assert_eq!(*problem.operation(1, 1), Operation::new(0, 4));
    }

    #[test]
    fn parse_problem_ignores_blank_lines() {
        let problem = parse_problem("small", "\n2 2\n\n0 3 1 2\n1 2 0 4\n\n").unwrap();

        assert_eq!(problem.total_operations(), 4);
    }

    #[test]
    fn parse_empty_errors() {
        let err = parse_problem("empty", "  \n").err();

        assert!(matches!(err, Some(ImportError::InvalidFormat(_))));
    }

    #[test]
    fn parse_garbage_errors() {
        let err = parse_problem("garbage", "2 two\n").err();

        assert!(matches!(err, Some(ImportError::InvalidFormat(_))));
    }

    #[test]
    fn parse_missing_job_errors() {
        let err = parse_problem("short", "2 2\n0 3 1 2\n").err();

        assert!(matches!(err, Some(ImportError::InvalidFormat(_))));
    }

    #[test]
    fn parse_short_job_errors() {
        let err = parse_problem("short", "2 2\n0 3 1 2\n1 2\n").err();

        assert!(matches!(err, Some(ImportError::InvalidFormat(_))));
    }

    #[test]
    fn parse_trailing_data_errors() {
        let err = parse_problem("long", "1 1\n0 3\n0 4\n").err();

        assert!(matches!(err, Some(ImportError::InvalidFormat(_))));
    }

    #[test]
    fn parse_invalid_instance_errors() {
        let err = parse_problem("machine", "1 1\n1 3\n").err();

        assert!(matches!(
            err,
            Some(ImportError::Problem(ProblemError::MachineOutOfRange { .. }))
        ));
    }

    #[test]
    fn read_problem_works() {
        let problem = read_problem(Path::new("instances/ft06.txt")).unwrap();

        assert_eq!(problem.name(), "ft06");
        assert_eq!(problem.job_count(), 6);
        assert_eq!(problem.machine_count(), 6);
        assert_eq!(problem.operation(1, 2).machine, 4);
        assert_eq!(problem.duration(1, 2), 10);
        // the optimum of ft06 is 55
        assert!(problem.lower_bound() <= 55);
    }

    #[test]
    fn read_missing_file_errors() {
        let err = read_problem(Path::new("does/not/exist.txt")).err();

        assert!(matches!(err, Some(ImportError::MissingFile(_))));
    }
}
