use crate::experiment_config::{ConfigError, ExperimentConfig, Fix, FixedAlgo};
use crate::jssp::import::ImportError;
use crate::jssp::ProblemInstance;
use crate::metaheuristic::{Aco, Metaheuristic, Pso};
use crate::rng::{rng64, seed_from};
use crate::solver::{Solver, SolverError, SolverResult, Supervisor};

use std::error::Error;
use std::fmt;
use std::io::Write;
use tracing::{debug, info};

#[derive(Debug)]
pub enum ExperimentError {
    Config(ConfigError),
    Import(ImportError),
    Solver(SolverError),
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{}", err),
            Self::Import(err) => write!(f, "{}", err),
            Self::Solver(err) => write!(f, "{}", err),
        }
    }
}

impl Error for ExperimentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Import(err) => Some(err),
            Self::Solver(err) => Some(err),
        }
    }
}

impl From<ConfigError> for ExperimentError {
    fn from(err: ConfigError) -> Self {
        ExperimentError::Config(err)
    }
}

impl From<ImportError> for ExperimentError {
    fn from(err: ImportError) -> Self {
        ExperimentError::Import(err)
    }
}

impl From<SolverError> for ExperimentError {
    fn from(err: SolverError) -> Self {
        ExperimentError::Solver(err)
    }
}

/// Runs the engines described by an experiment config on one problem instance.
pub struct JsspExperiment<'a> {
    config: &'a ExperimentConfig,
    problem: &'a ProblemInstance,
    progress: bool,
}

impl<'a> JsspExperiment<'a> {
    pub fn new(config: &'a ExperimentConfig, problem: &'a ProblemInstance) -> Self {
        JsspExperiment {
            config,
            problem,
            progress: false,
        }
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Builds one engine per solver instance, assigning the algorithm sections
    /// round-robin. Every instance gets its own seed, derived from the seed of
    /// its section, so a seeded config always builds the same engines.
    pub fn build_algorithms(&self) -> Result<Vec<Box<dyn Metaheuristic + 'a>>, ConfigError> {
        self.config.validate()?;

        let solver = &self.config.solver;
        let sections: Vec<FixedAlgo> = self
            .config
            .algorithms
            .iter()
            .map(|algorithm| algorithm.to_fixed())
            .collect();
        let mut seeders: Vec<_> = sections
            .iter()
            .map(|section| match section {
                FixedAlgo::Aco(aco) => rng64(aco.seed as u128),
                FixedAlgo::Pso(pso) => rng64(pso.seed as u128),
            })
            .collect();

        let mut algorithms: Vec<Box<dyn Metaheuristic + 'a>> = Vec::with_capacity(solver.instances);
        for instance in 0..solver.instances {
            let section = instance % sections.len();
            let seed = seed_from(&mut seeders[section]);

            match sections[section] {
                FixedAlgo::Aco(aco) => {
                    debug!(instance, seed = %seed, "building ACO instance");
                    algorithms.push(Box::new(Aco::new(self.problem, aco.params(seed))));
                }
                FixedAlgo::Pso(pso) => {
                    debug!(instance, seed = %seed, "building PSO instance");
                    algorithms.push(Box::new(Pso::new(
                        self.problem,
                        pso.params(solver.max_iterations, seed),
                    )));
                }
            }
        }

        Ok(algorithms)
    }

    /// Solves the problem and writes the epoch statistics through the supervisor.
    pub fn run<W: Write>(&self, supervisor: Supervisor<W>) -> Result<SolverResult, ExperimentError> {
        let algorithms = self.build_algorithms()?;
        info!(
            problem = self.problem.name(),
            jobs = self.problem.job_count(),
            machines = self.problem.machine_count(),
            instances = algorithms.len(),
            "running experiment"
        );

        let solver_config = &self.config.solver;
        let mut solver = Solver::new(algorithms, solver_config.params(), supervisor);
        if self.progress {
            solver = solver.with_progress();
        }

        Ok(solver.solve(solver_config.max_iterations, solver_config.epoch_size)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment_config::AlgoConfig;
    use crate::jssp::{Evaluator, Operation};

    const CONFIG: &str = "
solver:
  instances: 3
  max_iterations: 40
  epoch_size: 5
algorithms:
  - alpha: 1.0
    beta: 1.0
    rho: 0.1
    ant_count: 4
    seed: 7
  - particle_count: 6
    xmin: 0.0
    xmax: 2.0
    vmin: -1.0
    vmax: 1.0
    initial_inertia: 1.4
    min_inertia: 0.4
    local_acceleration: 2.0
    global_acceleration: 2.0
    seed: 8
";

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

    #[test]
    fn build_algorithms_assigns_round_robin() {
        let config = ExperimentConfig::from_yaml(CONFIG).unwrap();
        let problem = problem();
        let experiment = JsspExperiment::new(&config, &problem);

        let names: Vec<&str> = experiment
            .build_algorithms()
            .unwrap()
            .iter()
            .map(|algorithm| algorithm.name())
            .collect();

        assert_eq!(names, vec!["ACO", "PSO", "ACO"]);
    }

    #[test]
    fn seeded_config_is_reproducible() {
        let config = ExperimentConfig::from_yaml(CONFIG).unwrap();
        let problem = problem();
        let experiment = JsspExperiment::new(&config, &problem);

        let mut first = experiment.build_algorithms().unwrap();
        let mut second = experiment.build_algorithms().unwrap();
        for (a, b) in first.iter_mut().zip(second.iter_mut()) {
            for _ in 0..3 {
                a.single_iteration();
                b.single_iteration();
            }
            assert_eq!(a.best_solution(), b.best_solution());
        }
    }

    #[test]
    fn build_algorithms_validates() {
        let mut config = ExperimentConfig::from_yaml(CONFIG).unwrap();
        config.algorithms.truncate(1);
        if let AlgoConfig::Aco(aco) = &mut config.algorithms[0] {
            aco.ant_count = 0;
        }
        let problem = problem();

        assert!(matches!(
            JsspExperiment::new(&config, &problem).build_algorithms(),
            Err(ConfigError::InvalidAlgorithmConfig(_))
        ));
    }

    #[test]
    fn run_works() {
        let config = ExperimentConfig::from_yaml(CONFIG).unwrap();
        let problem = problem();

        let result = JsspExperiment::new(&config, &problem)
            .run(Supervisor::default())
            .unwrap();

        assert_eq!(result.best_makespan, 7);
        assert_eq!(
            Evaluator::new(&problem).makespan(result.best_solution.as_slice()),
            7
        );
        assert_eq!(result.instances.len(), 3);
    }
}
