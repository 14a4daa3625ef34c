mod error;
mod supervisor;
mod termination;

pub use error::SolverError;
pub use supervisor::{Message, Supervisor};
pub use termination::{Pressure, SolverParams};

use crate::jssp::Time;
use crate::metaheuristic::{EngineReport, Metaheuristic, Solution};

use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

/// Final state of one search instance.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceSummary {
    pub index: usize,
    pub engine: &'static str,
    pub ran_iterations: usize,
    pub epochs: usize,
    pub best_makespan: Option<Time>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverResult {
    pub best_instance: usize,
    pub best_makespan: Time,
    pub best_solution: Solution,
    pub instances: Vec<InstanceSummary>,
}

struct EpochOutcome {
    index: usize,
    improved: bool,
}

fn run_epoch(
    index: usize,
    epoch: usize,
    iterations: usize,
    instance: &mut dyn Metaheuristic,
    sender: Sender<Message>,
) -> EpochOutcome {
    let start = Instant::now();
    let before = instance.best_makespan();

    for _ in 0..iterations {
        instance.single_iteration();
    }

    let after = instance.best_makespan();
    let improved = match (before, after) {
        (None, Some(_)) => true,
        (Some(before), Some(after)) => after < before,
        _ => false,
    };

    // the supervisor may already be gone, statistics are best effort
    let _res = sender.send(Message::new(
        index,
        instance.name(),
        epoch,
        iterations,
        instance.ran_iterations(),
        start.elapsed(),
        after,
        improved,
    ));

    EpochOutcome { index, improved }
}

/// Runs several independent search instances in parallel, epoch by epoch,
/// and stops instances early that are unlikely to catch up with the others.
pub struct Solver<'a, W: Write> {
    instances: Vec<Box<dyn Metaheuristic + 'a>>,
    params: SolverParams,
    supervisor: Supervisor<W>,
    progress: ProgressBar,
    running: Vec<bool>,
    epochs: Vec<usize>,
    epochs_since_improvement: Vec<usize>,
    history: Vec<Vec<Option<Time>>>,
}

impl<'a, W: Write> Solver<'a, W> {
    pub fn new(
        instances: Vec<Box<dyn Metaheuristic + 'a>>,
        params: SolverParams,
        supervisor: Supervisor<W>,
    ) -> Self {
        let count = instances.len();
        Solver {
            instances,
            params,
            supervisor,
            progress: ProgressBar::hidden(),
            running: vec![false; count],
            epochs: vec![0; count],
            epochs_since_improvement: vec![0; count],
            history: vec![Vec::new(); count],
        }
    }

    /// Shows a progress bar on stderr while solving.
    pub fn with_progress(mut self) -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{elapsed_precise} [{bar:40}] {pos}/{len} iterations {msg}"),
        );
        self.progress = bar;
        self
    }

    pub fn instances(&self) -> &[Box<dyn Metaheuristic + 'a>] {
        &self.instances
    }

    pub fn is_running(&self, index: usize) -> bool {
        self.running[index]
    }

    /// Returns the best makespan of the instance after each of its epochs.
    pub fn history(&self, index: usize) -> &[Option<Time>] {
        &self.history[index]
    }

    pub fn supervisor(&self) -> &Supervisor<W> {
        &self.supervisor
    }

    pub fn into_supervisor(self) -> Supervisor<W> {
        self.supervisor
    }

    fn reset(&mut self) {
        self.running.iter_mut().for_each(|r| *r = true);
        self.epochs.iter_mut().for_each(|e| *e = 0);
        self.epochs_since_improvement
            .iter_mut()
            .for_each(|e| *e = 0);
        self.history.iter_mut().for_each(Vec::clear);
    }

    fn running_count(&self) -> usize {
        self.running.iter().filter(|&&r| r).count()
    }

    fn ran_iterations(&self) -> u64 {
        self.instances
            .iter()
            .map(|instance| instance.ran_iterations() as u64)
            .sum()
    }

    /// Runs one epoch on every running instance, each on its own thread.
    fn run_parallel_epoch(&mut self, budgets: &[usize]) -> Result<Vec<EpochOutcome>, SolverError> {
        let sender = self.supervisor.sender();
        let epochs = &self.epochs;

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(budgets.len());

            for (index, instance) in self.instances.iter_mut().enumerate() {
                if budgets[index] == 0 {
                    continue;
                }
                let sender = sender.clone();
                let epoch = epochs[index] + 1;
                let iterations = budgets[index];
                let handle = scope
                    .spawn(move || run_epoch(index, epoch, iterations, &mut **instance, sender));
                handles.push((index, handle));
            }

            // join every worker before looking at the results
            let joined: Vec<_> = handles
                .into_iter()
                .map(|(index, handle)| {
                    handle
                        .join()
                        .map_err(|_| SolverError::WorkerPanicked(index))
                })
                .collect();

            joined.into_iter().collect()
        })
    }

    /// Decides which of the instances that just completed an epoch have to stop.
    fn retired_instances(&self, outcomes: &[EpochOutcome], max_iterations: usize) -> Vec<usize> {
        let running_bests: Vec<Time> = outcomes
            .iter()
            .filter_map(|outcome| self.instances[outcome.index].best_makespan())
            .collect();

        let mut retired = Vec::new();
        for outcome in outcomes {
            let index = outcome.index;
            let instance = &self.instances[index];

            if instance.ran_iterations() >= max_iterations {
                debug!(instance = index, "reached the iteration ceiling");
                retired.push(index);
                continue;
            }
            if self.epochs[index] <= 2 {
                continue;
            }

            if let Some(best) = instance.best_makespan() {
                let pressure = self.params.pressure(
                    best,
                    &running_bests,
                    self.instances.len(),
                    self.epochs_since_improvement[index],
                );
                debug!(
                    instance = index,
                    m = pressure.m,
                    delta = pressure.delta,
                    g = pressure.g,
                    "termination pressure"
                );
                if self.params.should_stop(&pressure) {
                    retired.push(index);
                }
            }
        }

        retired
    }

    fn log_state(&self) {
        for (index, instance) in self.instances.iter().enumerate() {
            let marker = if self.running[index] { '*' } else { '-' };
            match instance.report() {
                Some(EngineReport::Colony {
                    generation_best,
                    generation_average,
                }) => debug!(
                    "[{:03}{}] {} colony_best={} colony_avg={:.4}",
                    index,
                    marker,
                    instance.status(),
                    generation_best,
                    generation_average
                ),
                Some(EngineReport::Swarm {
                    inertia,
                    swarm_best,
                    swarm_average,
                }) => debug!(
                    "[{:03}{}] {} inertia={:.4} swarm_best={} swarm_avg={:.4}",
                    index,
                    marker,
                    instance.status(),
                    inertia,
                    swarm_best,
                    swarm_average
                ),
                None => debug!("[{:03}{}] {}", index, marker, instance.status()),
            }
        }
    }

    /// Runs all instances in epochs of `epoch_size` iterations until every
    /// instance stopped, either early or by reaching `max_iterations`.
    /// Returns the best solution found by any instance, ties go to the lowest index.
    pub fn solve(
        &mut self,
        max_iterations: usize,
        epoch_size: usize,
    ) -> Result<SolverResult, SolverError> {
        if self.instances.is_empty() {
            return Err(SolverError::NoInstances);
        }
        if epoch_size == 0 {
            return Err(SolverError::ZeroEpochSize);
        }

        self.reset();
        self.progress
            .set_length((self.instances.len() * max_iterations) as u64);
        self.progress.set_position(self.ran_iterations());
        info!(
            instances = self.instances.len(),
            max_iterations, epoch_size, "starting solver"
        );

        while self.running.iter().any(|&r| r) {
            let budgets: Vec<usize> = self
                .instances
                .iter()
                .zip(self.running.iter())
                .map(|(instance, &running)| {
                    if running {
                        epoch_size.min(max_iterations.saturating_sub(instance.ran_iterations()))
                    } else {
                        0
                    }
                })
                .collect();

            // instances that are out of budget before the epoch stop right away
            for (index, &budget) in budgets.iter().enumerate() {
                if self.running[index] && budget == 0 {
                    self.running[index] = false;
                }
            }

            let outcomes = self.run_parallel_epoch(&budgets)?;

            for outcome in outcomes.iter() {
                let index = outcome.index;
                self.epochs[index] += 1;
                if outcome.improved {
                    self.epochs_since_improvement[index] = 0;
                } else {
                    self.epochs_since_improvement[index] += 1;
                }
                self.history[index].push(self.instances[index].best_makespan());
            }

            let retired = self.retired_instances(&outcomes, max_iterations);
            for &index in retired.iter() {
                self.running[index] = false;
                info!(
                    instance = index,
                    iterations = self.instances[index].ran_iterations(),
                    best_makespan = ?self.instances[index].best_makespan(),
                    "instance stopped"
                );
            }
            self.supervisor.aggregate_receive(&retired)?;

            self.progress.set_position(self.ran_iterations());
            self.progress
                .set_message(&format!("{} running", self.running_count()));
            self.log_state();
        }
        self.progress.finish_and_clear();

        self.result()
    }

    fn result(&self) -> Result<SolverResult, SolverError> {
        let mut best: Option<(usize, Time)> = None;
        for (index, instance) in self.instances.iter().enumerate() {
            if let Some(makespan) = instance.best_makespan() {
                if best.map_or(true, |(_, best)| makespan < best) {
                    best = Some((index, makespan));
                }
            }
        }
        let (best_instance, best_makespan) = best.ok_or(SolverError::NoSolution)?;

        let instances = self
            .instances
            .iter()
            .enumerate()
            .map(|(index, instance)| InstanceSummary {
                index,
                engine: instance.name(),
                ran_iterations: instance.ran_iterations(),
                epochs: self.epochs[index],
                best_makespan: instance.best_makespan(),
            })
            .collect();

        info!(best_instance, best_makespan, "solver finished");

        Ok(SolverResult {
            best_instance,
            best_makespan,
            best_solution: self.instances[best_instance].best_solution().clone(),
            instances,
        })
    }
}
