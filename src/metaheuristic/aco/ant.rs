use crate::jssp::{ProblemInstance, Simulation, Time};
use crate::metaheuristic::aco::{Params, PheromoneMatrix};
use crate::metaheuristic::Solution;
use crate::util::RouletteWheel;

use oorandom::Rand64;

/// A single ant of the colony.
///
/// All buffers are allocated once and rebuilt by every call to `construct`.
#[derive(Debug, Clone)]
pub struct Ant {
    order: Solution,
    last_of_job: Vec<Option<usize>>,
    connections: Vec<Option<usize>>,
    simulation: Simulation,
    accessible: Vec<usize>,
    weights: Vec<f64>,
    wheel: RouletteWheel,
    makespan: Time,
}

impl Ant {
    pub fn new(problem: &ProblemInstance) -> Self {
        let n = problem.total_operations();
        Ant {
            order: Solution::with_capacity(n),
            last_of_job: vec![None; problem.job_count()],
            connections: vec![None; n + 1],
            simulation: Simulation::new(problem),
            accessible: Vec::with_capacity(problem.job_count()),
            weights: Vec::with_capacity(problem.job_count()),
            wheel: RouletteWheel::with_capacity(problem.job_count()),
            makespan: 0,
        }
    }

    pub fn order(&self) -> &Solution {
        &self.order
    }

    /// Returns the makespan of the operations scheduled so far.
    pub fn makespan(&self) -> Time {
        self.makespan
    }

    /// Returns the edges walked during the last construction, starting at node 0.
    pub fn iter_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.connections
            .iter()
            .enumerate()
            .filter_map(|(from, to)| to.map(|to| (from, to)))
    }

    fn reset(&mut self) {
        self.order.clear();
        self.last_of_job.iter_mut().for_each(|op| *op = None);
        self.connections.iter_mut().for_each(|to| *to = None);
        self.simulation.reset();
        self.makespan = 0;
    }

    fn collect_accessible(&mut self, problem: &ProblemInstance) {
        self.accessible.clear();
        for (job, last) in self.last_of_job.iter().enumerate() {
            match last {
                None => self.accessible.push(problem.first_operation(job)),
                Some(op) => {
                    if let Some(next) = problem.successor(*op) {
                        self.accessible.push(next);
                    }
                }
            }
        }
    }

    fn choose(
        &mut self,
        problem: &ProblemInstance,
        pheromones: &PheromoneMatrix,
        params: &Params,
        current: usize,
        follow_trails: bool,
        rng: &mut Rand64,
    ) -> usize {
        if self.accessible.len() == 1 {
            return self.accessible[0];
        }

        self.weights.clear();
        for &candidate in self.accessible.iter() {
            let trail = if follow_trails {
                pheromones.get(current, candidate + 1).into_inner()
            } else {
                1.0
            };
            let gap = self.simulation.gap(problem, candidate) as f64;
            self.weights
                .push(trail.powf(params.alpha) / (gap + params.epsilon).powf(params.beta));
        }

        self.wheel.fill(&self.weights);
        let idx = match self.wheel.spin(rng) {
            Some(idx) => idx,
            None => rng.rand_range(0..self.accessible.len() as u64) as usize,
        };

        self.accessible[idx]
    }

    /// Builds a complete operation order, one accessible operation at a time.
    ///
    /// If `follow_trails` is false the pheromone term is 1 for every candidate
    /// and only the induced gap guides the ant.
    pub fn construct(
        &mut self,
        problem: &ProblemInstance,
        pheromones: &PheromoneMatrix,
        params: &Params,
        follow_trails: bool,
        rng: &mut Rand64,
    ) {
        self.reset();
        let mut current = 0;

        for _ in 0..problem.total_operations() {
            self.collect_accessible(problem);
            let operation = self.choose(problem, pheromones, params, current, follow_trails, rng);

            self.connections[current] = Some(operation + 1);
            self.simulation.push(problem, operation);
            self.order.push(operation);
            self.last_of_job[problem.job_of(operation)] = Some(operation);
            self.makespan = self.simulation.makespan();
            current = operation + 1;
        }
    }
}
