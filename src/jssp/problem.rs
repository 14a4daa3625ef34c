use crate::jssp::{ProblemError, Time};

use serde::{Deserialize, Serialize};

/// A single processing step of a job, bound to one machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub machine: usize,
    pub duration: Time,
}

impl Operation {
    pub fn new(machine: usize, duration: Time) -> Self {
        Operation { machine, duration }
    }
}

/// Implements an immutable, rectangular job shop.
///
/// Operations are addressed globally by `job * operations_per_job + position`,
/// which is the index used in every operation order and in the pheromone matrix.
/// Every job visits exactly `operations_per_job` operations and there are as many
/// machines as operations per job.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemInstance {
    name: String,
    jobs: Vec<Vec<Operation>>,
    operations_per_job: usize,
}

impl ProblemInstance {
    /// Creates a new problem instance from the given jobs.
    /// Returns an error if the jobs do not form a rectangular instance, if a
    /// machine index is out of range or if an operation has no duration.
    pub fn new(name: &str, jobs: Vec<Vec<Operation>>) -> Result<Self, ProblemError> {
        let operations_per_job = match jobs.first() {
            None => return Err(ProblemError::NoJobs),
            Some(first) => first.len(),
        };

        for (job, operations) in jobs.iter().enumerate() {
            if operations.is_empty() {
                return Err(ProblemError::EmptyJob(job));
            }
            if operations.len() != operations_per_job {
                return Err(ProblemError::NonRectangular {
                    job,
                    expected: operations_per_job,
                    found: operations.len(),
                });
            }

            for (position, operation) in operations.iter().enumerate() {
                if operation.machine >= operations_per_job {
                    return Err(ProblemError::MachineOutOfRange {
                        job,
                        position,
                        machine: operation.machine,
                    });
                }
                if operation.duration == 0 {
                    return Err(ProblemError::ZeroDuration { job, position });
                }
            }
        }

        Ok(ProblemInstance {
            name: name.to_string(),
            jobs,
            operations_per_job,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Returns the number of operations in each job.
    pub fn operations_per_job(&self) -> usize {
        self.operations_per_job
    }

    pub fn machine_count(&self) -> usize {
        self.operations_per_job
    }

    /// Returns the total amount of operations, which is the number of jobs times the number of machines.
    pub fn total_operations(&self) -> usize {
        self.jobs.len() * self.operations_per_job
    }

    /// Returns the job the operation with the given global index belongs to.
    pub fn job_of(&self, operation: usize) -> usize {
        operation / self.operations_per_job
    }

    /// Returns the global index of the first operation of job.
    pub fn first_operation(&self, job: usize) -> usize {
        job * self.operations_per_job
    }

    /// Returns true if the operation is the last one of its job.
    pub fn is_last_of_job(&self, operation: usize) -> bool {
        (operation + 1) % self.operations_per_job == 0
    }

    /// Returns the operation that has to follow the given one in its job, if any.
    pub fn successor(&self, operation: usize) -> Option<usize> {
        if self.is_last_of_job(operation) {
            None
        } else {
            Some(operation + 1)
        }
    }

    pub fn operation(&self, job: usize, position: usize) -> &Operation {
        &self.jobs[job][position]
    }

    pub fn machine(&self, job: usize, position: usize) -> usize {
        self.jobs[job][position].machine
    }

    pub fn duration(&self, job: usize, position: usize) -> Time {
        self.jobs[job][position].duration
    }

    pub fn iter_jobs(&self) -> impl Iterator<Item = &[Operation]> + '_ {
        self.jobs.iter().map(|job| job.as_slice())
    }

    /// Returns a trivial lower bound of the makespan: the longest job or the busiest machine.
    pub fn lower_bound(&self) -> Time {
        let longest_job = self
            .jobs
            .iter()
            .map(|job| job.iter().map(|op| op.duration).sum::<Time>())
            .max()
            .unwrap_or(0);

        let mut machine_loads = vec![0; self.machine_count()];
        for operation in self.jobs.iter().flatten() {
            machine_loads[operation.machine] += operation.duration;
        }
        let busiest_machine = machine_loads.into_iter().max().unwrap_or(0);

        longest_job.max(busiest_machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_instance() -> ProblemInstance {
        ProblemInstance::new(
            "small",
            vec![
                vec![Operation::new(0, 3), Operation::new(1, 2)],
                vec![Operation::new(1, 2), Operation::new(0, 4)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn new_works() {
        let problem = small_instance();

        assert_eq!(problem.name(), "small");
        assert_eq!(problem.job_count(), 2);
        assert_eq!(problem.operations_per_job(), 2);
        assert_eq!(problem.machine_count(), 2);
        assert_eq!(problem.total_operations(), 4);
    }

    #[test]
    fn new_without_jobs_errors() {
        let err = ProblemInstance::new("empty", Vec::new()).err();

        assert_eq!(err, Some(ProblemError::NoJobs));
    }

    #[test]
    fn new_with_empty_job_errors() {
        let err = ProblemInstance::new("empty job", vec![Vec::new()]).err();

        assert_eq!(err, Some(ProblemError::EmptyJob(0)));
    }

    #[test]
    fn new_non_rectangular_errors() {
        let err = ProblemInstance::new(
            "ragged",
            vec![
                vec![Operation::new(0, 3), Operation::new(1, 2)],
                vec![Operation::new(1, 2)],
            ],
        )
        .err();

        assert_eq!(
            err,
            Some(ProblemError::NonRectangular {
                job: 1,
                expected: 2,
                found: 1
            }),
            "Ragged jobs were accepted."
        );
    }

    #[test]
    fn new_with_unknown_machine_errors() {
        let err = ProblemInstance::new("machine", vec![vec![Operation::new(1, 3)]]).err();

        assert_eq!(
            err,
            Some(ProblemError::MachineOutOfRange {
                job: 0,
                position: 0,
                machine: 1
            })
        );
    }

    #[test]
    fn new_with_zero_duration_errors() {
        let err = ProblemInstance::new("zero", vec![vec![Operation::new(0, 0)]]).err();

        assert_eq!(err, Some(ProblemError::ZeroDuration { job: 0, position: 0 }));
    }

    #[test]
    fn precedence_queries_work() {
        let problem = small_instance();

        assert_eq!(problem.job_of(0), 0);
        assert_eq!(problem.job_of(3), 1);
        assert_eq!(problem.first_operation(1), 2);
        assert_eq!(problem.successor(0), Some(1));
        assert_eq!(problem.successor(1), None);
        assert!(problem.is_last_of_job(3));
        assert!(!problem.is_last_of_job(2));
    }

    #[test]
    fn lower_bound_works() {
        let problem = small_instance();

        // machine 0 has to process 3 + 4
        assert_eq!(problem.lower_bound(), 7);
    }
}
