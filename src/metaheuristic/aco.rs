mod ant;
mod params;
mod pheromone;

pub use ant::Ant;
pub use params::{Params, Reinforcement};
pub use pheromone::PheromoneMatrix;

use crate::jssp::{ProblemInstance, Time};
use crate::metaheuristic::{EngineReport, Metaheuristic, Solution};
use crate::rng::rng64;

use oorandom::Rand64;

/// Where the colony is within a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Constructing,
    Evaluated,
}

/// Ant colony optimization over the operation graph of a job shop.
///
/// Every generation each ant builds a full operation order, guided by the
/// pheromone trails and by how much an operation would extend the partial
/// makespan. Afterwards all trails evaporate and the depositing ants reinforce
/// the edges they walked with `q / makespan`.
pub struct Aco<'a> {
    problem: &'a ProblemInstance,
    pheromones: PheromoneMatrix,
    ants: Vec<Ant>,
    params: Params,
    rng: Rand64,
    phase: Phase,
    best_solution: Solution,
    best_makespan: Option<Time>,
    ran_iterations: usize,
    last_report: Option<EngineReport>,
}

impl<'a> Aco<'a> {
    pub fn new(problem: &'a ProblemInstance, params: Params) -> Self {
        Aco {
            problem,
            pheromones: PheromoneMatrix::new(problem, params.initial_pheromone),
            ants: (0..params.ant_count).map(|_| Ant::new(problem)).collect(),
            params,
            rng: rng64(params.seed),
            phase: Phase::Idle,
            best_solution: Solution::new(),
            best_makespan: None,
            ran_iterations: 0,
            last_report: None,
        }
    }

    pub fn pheromones(&self) -> &PheromoneMatrix {
        &self.pheromones
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    fn construct_solutions(&mut self) {
        self.phase = Phase::Constructing;
        let exploration = self.params.exploration;

        for ant in self.ants.iter_mut() {
            let follow_trails = !(exploration > 0.0 && self.rng.rand_float() < exploration);
            ant.construct(
                self.problem,
                &self.pheromones,
                &self.params,
                follow_trails,
                &mut self.rng,
            );
        }
    }

    /// Returns the index of the ant with the lowest makespan, the first one on ties.
    fn generation_best(&self) -> Option<usize> {
        let mut best: Option<(usize, Time)> = None;
        for (idx, ant) in self.ants.iter().enumerate() {
            if best.map_or(true, |(_, makespan)| ant.makespan() < makespan) {
                best = Some((idx, ant.makespan()));
            }
        }

        best.map(|(idx, _)| idx)
    }

    fn pheromone_update(&mut self, best_ant: usize) {
        self.pheromones.evaporate(self.params.rho);

        let depositing = match self.params.reinforcement {
            Reinforcement::IterationBest => &self.ants[best_ant..=best_ant],
            Reinforcement::AllAnts => &self.ants[..],
        };
        for ant in depositing {
            let amount = self.params.q / ant.makespan() as f64;
            for (from, to) in ant.iter_edges() {
                self.pheromones.deposit(from, to, amount);
            }
        }
    }
}

impl<'a> Metaheuristic for Aco<'a> {
    fn single_iteration(&mut self) -> Option<&Solution> {
        self.construct_solutions();
        self.ran_iterations += 1;

        let best_ant = match self.generation_best() {
            Some(idx) => idx,
            None => {
                self.phase = Phase::Idle;
                return None;
            }
        };

        let generation_best = self.ants[best_ant].makespan();
        let generation_average = self
            .ants
            .iter()
            .map(|ant| ant.makespan() as f64)
            .sum::<f64>()
            / self.ants.len() as f64;
        self.last_report = Some(EngineReport::Colony {
            generation_best,
            generation_average,
        });
        self.phase = Phase::Evaluated;

        self.pheromone_update(best_ant);
        self.phase = Phase::Idle;

        if self.best_makespan.map_or(true, |best| generation_best < best) {
            self.best_solution.clone_from(self.ants[best_ant].order());
            self.best_makespan = Some(generation_best);
            return Some(&self.best_solution);
        }

        None
    }

    fn ran_iterations(&self) -> usize {
        self.ran_iterations
    }

    fn best_solution(&self) -> &Solution {
        &self.best_solution
    }

    fn best_makespan(&self) -> Option<Time> {
        self.best_makespan
    }

    fn name(&self) -> &'static str {
        "ACO"
    }

    fn report(&self) -> Option<EngineReport> {
        self.last_report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jssp::{Evaluator, Operation};

    use decorum::R64;
    use num_traits::identities::Zero;

    fn problem() -> ProblemInstance {
        ProblemInstance::new(
            "small",
            vec![
                vec![Operation::new(0, 3), Operation::new(1, 2)],
                vec![Operation::new(1, 2), Operation::new(0, 4)],
            ],
        )
        .unwrap()
    }

    fn params(seed: u128) -> Params {
        Params {
            ant_count: 5,
            seed,
            ..Params::default()
        }
    }

    #[test]
    fn finds_optimum_of_small_instance() {
        let problem = problem();
        let mut aco = Aco::new(&problem, params(1));

        for _ in 0..20 {
            aco.single_iteration();
        }

        assert_eq!(aco.best_makespan(), Some(7));
        assert_eq!(aco.ran_iterations(), 20);
        assert_eq!(
            Evaluator::new(&problem).makespan(aco.best_solution().as_slice()),
            7
        );
    }

    #[test]
    fn best_makespan_never_increases() {
        let problem = problem();
        let mut aco = Aco::new(&problem, params(8));
        let mut last = Time::MAX;

        for _ in 0..30 {
            let improved = aco.single_iteration().is_some();
            let best = aco.best_makespan().unwrap();
            assert!(best <= last);
            assert_eq!(improved, best < last);
            last = best;
        }
    }

    #[test]
    fn first_iteration_reports_improvement() {
        let problem = problem();
        let mut aco = Aco::new(&problem, params(2));

        assert!(aco.best_makespan().is_none());
        assert!(aco.single_iteration().is_some());
        assert_eq!(aco.phase(), Phase::Idle);
        match aco.report() {
            Some(EngineReport::Colony {
                generation_best, ..
            }) => assert_eq!(Some(generation_best), aco.best_makespan()),
            other => panic!("Unexpected report {:?}.", other),
        }
    }

    #[test]
    fn trails_stay_non_negative() {
        let problem = problem();
        for reinforcement in [Reinforcement::IterationBest, Reinforcement::AllAnts] {
            let mut aco = Aco::new(
                &problem,
                Params {
                    reinforcement,
                    rho: 0.7,
                    ..params(4)
                },
            );
            for _ in 0..25 {
                aco.single_iteration();
                assert!(aco
                    .pheromones()
                    .iter_trails()
                    .all(|(_, _, trail)| trail >= R64::zero()));
            }
        }
    }

    #[test]
    fn only_best_ant_reinforces() {
        let problem = problem();
        let mut aco = Aco::new(
            &problem,
            Params {
                rho: 1.0,
                ..params(6)
            },
        );
        aco.single_iteration();

        // with full evaporation only the edges of the generation best remain
        let best = aco.best_solution().clone();
        let mut expected = Vec::new();
        let mut current = 0;
        for &op in best.iter() {
            expected.push((current, op + 1));
            current = op + 1;
        }
        let mut walked: Vec<_> = aco
            .pheromones()
            .iter_trails()
            .filter(|(_, _, trail)| *trail > R64::zero())
            .map(|(from, to, _)| (from, to))
            .collect();
        walked.sort_unstable();
        expected.sort_unstable();

        assert_eq!(walked, expected);
    }

    #[test]
    fn same_seed_same_result() {
        let problem = problem();
        let mut first = Aco::new(&problem, params(77));
        let mut second = Aco::new(&problem, params(77));

        for _ in 0..5 {
            first.single_iteration();
            second.single_iteration();
        }

        assert_eq!(first.best_solution(), second.best_solution());
    }

    #[test]
    fn exploration_still_builds_valid_orders() {
        let problem = problem();
        let mut aco = Aco::new(
            &problem,
            Params {
                exploration: 1.0,
                ..params(3)
            },
        );

        for _ in 0..10 {
            aco.single_iteration();
        }

        assert!(aco.best_solution().is_complete(&problem));
    }
}
