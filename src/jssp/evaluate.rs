use crate::jssp::{GanttChart, GanttTask, ProblemInstance, Time};

/// Where and when an operation ends up when it is appended to a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub job: usize,
    pub position: usize,
    pub machine: usize,
    pub start: Time,
    pub duration: Time,
}

impl Placement {
    pub fn end(&self) -> Time {
        self.start + self.duration
    }
}

/// Running state of a schedule replay.
///
/// The position of an operation inside its job is taken from a per-job counter,
/// not from the operation index. Any permutation of operation indices therefore
/// replays into a schedule that respects job precedence.
#[derive(Debug, Clone)]
pub struct Simulation {
    job_positions: Vec<usize>,
    job_times: Vec<Time>,
    machine_times: Vec<Time>,
    makespan: Time,
    scheduled: usize,
}

impl Simulation {
    pub fn new(problem: &ProblemInstance) -> Self {
        Simulation {
            job_positions: vec![0; problem.job_count()],
            job_times: vec![0; problem.job_count()],
            machine_times: vec![0; problem.machine_count()],
            makespan: 0,
            scheduled: 0,
        }
    }

    /// Clears the state without giving up the allocated buffers.
    pub fn reset(&mut self) {
        self.job_positions.iter_mut().for_each(|p| *p = 0);
        self.job_times.iter_mut().for_each(|t| *t = 0);
        self.machine_times.iter_mut().for_each(|t| *t = 0);
        self.makespan = 0;
        self.scheduled = 0;
    }

    /// Returns the makespan of everything pushed so far.
    pub fn makespan(&self) -> Time {
        self.makespan
    }

    /// Returns the number of operations pushed so far.
    pub fn scheduled(&self) -> usize {
        self.scheduled
    }

    /// Returns the placement the operation would get if it was pushed now.
    pub fn placement(&self, problem: &ProblemInstance, operation: usize) -> Placement {
        let job = problem.job_of(operation);
        let position = self.job_positions[job];
        debug_assert!(
            position < problem.operations_per_job(),
            "job {} is already finished",
            job
        );
        let machine = problem.machine(job, position);

        Placement {
            job,
            position,
            machine,
            start: self.job_times[job].max(self.machine_times[machine]),
            duration: problem.duration(job, position),
        }
    }

    /// Appends the operation to the simulated schedule.
    pub fn push(&mut self, problem: &ProblemInstance, operation: usize) -> Placement {
        let placement = self.placement(problem, operation);
        let end = placement.end();

        self.machine_times[placement.machine] = end;
        self.job_times[placement.job] = end;
        self.job_positions[placement.job] += 1;
        self.makespan = self.makespan.max(end);
        self.scheduled += 1;

        placement
    }

    /// Returns the increase of the makespan that pushing the operation would cause.
    pub fn gap(&self, problem: &ProblemInstance, operation: usize) -> Time {
        self.placement(problem, operation)
            .end()
            .saturating_sub(self.makespan)
    }
}

/// Replays operation orders of one problem instance.
/// The scratch buffers are allocated once, so evaluations do not allocate.
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    problem: &'a ProblemInstance,
    simulation: Simulation,
}

impl<'a> Evaluator<'a> {
    pub fn new(problem: &'a ProblemInstance) -> Self {
        Evaluator {
            problem,
            simulation: Simulation::new(problem),
        }
    }

    pub fn problem(&self) -> &'a ProblemInstance {
        self.problem
    }

    fn replay(&mut self, order: &[usize]) {
        self.simulation.reset();
        for &operation in order {
            self.simulation.push(self.problem, operation);
        }
    }

    /// Calculates the makespan of a full or partial operation order.
    pub fn makespan(&mut self, order: &[usize]) -> Time {
        self.replay(order);
        self.simulation.makespan()
    }

    /// Returns by how much appending `candidate` to `order` would increase its makespan.
    pub fn induced_gap(&mut self, order: &[usize], candidate: usize) -> Time {
        self.replay(order);
        self.simulation.gap(self.problem, candidate)
    }

    /// Builds the Gantt chart of an operation order.
    pub fn schedule(&mut self, order: &[usize]) -> GanttChart {
        self.simulation.reset();
        let mut chart = GanttChart::new(self.problem.machine_count());
        for &operation in order {
            let placement = self.simulation.push(self.problem, operation);
            chart.add_task(
                placement.machine,
                GanttTask {
                    job: placement.job,
                    position: placement.position,
                    start: placement.start,
                    duration: placement.duration,
                },
            );
        }

        chart
    }
}
