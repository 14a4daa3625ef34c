mod decoder;
mod params;
mod particle;

pub use decoder::Decoder;
pub use params::Params;
pub use particle::Particle;

use crate::jssp::{ProblemInstance, Time};
use crate::metaheuristic::{EngineReport, Metaheuristic, Solution};
use crate::rng::rng64;

use oorandom::Rand64;

/// Returns the inertia weight after `ran_iterations` of `max_iterations`.
///
/// The weight drops quickly at first and slower later on, it never falls below
/// `min_inertia`.
pub fn inertia_schedule(params: &Params, ran_iterations: usize) -> f64 {
    let x = ran_iterations as f64 / params.max_iterations.max(1) as f64;
    let inertia = params.initial_inertia
        - 1.35 * (x + 1.0).log10().powf(0.25) * (params.initial_inertia - params.min_inertia);

    inertia.max(params.min_inertia)
}

/// Particle swarm optimization on a random-key encoding of operation orders.
pub struct Pso<'a> {
    problem: &'a ProblemInstance,
    particles: Vec<Particle>,
    decoder: Decoder<'a>,
    params: Params,
    rng: Rand64,
    inertia: f64,
    global_best_position: Vec<f64>,
    global_best_fitness: i64,
    best_solution: Solution,
    ran_iterations: usize,
    last_report: Option<EngineReport>,
}

impl<'a> Pso<'a> {
    pub fn new(problem: &'a ProblemInstance, params: Params) -> Self {
        let dimensions = problem.total_operations();
        let mut rng = rng64(params.seed);
        let mut decoder = Decoder::new(problem);
        let particles = (0..params.particle_count)
            .map(|_| Particle::random(dimensions, &params, &mut rng, &mut decoder))
            .collect();

        let mut pso = Pso {
            problem,
            particles,
            decoder,
            params,
            rng,
            inertia: params.initial_inertia,
            global_best_position: vec![0.0; dimensions],
            global_best_fitness: i64::MIN,
            best_solution: Solution::with_capacity(dimensions),
            ran_iterations: 0,
            last_report: None,
        };
        pso.refresh_global_best();

        pso
    }

    pub fn problem(&self) -> &'a ProblemInstance {
        self.problem
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn global_best_position(&self) -> &[f64] {
        &self.global_best_position
    }

    /// Takes over the fittest local best if it beats the global best.
    /// Returns true if the global best changed.
    fn refresh_global_best(&mut self) -> bool {
        let mut improved = false;
        for particle in self.particles.iter() {
            if particle.local_best_fitness() > self.global_best_fitness {
                self.global_best_fitness = particle.local_best_fitness();
                self.global_best_position
                    .copy_from_slice(particle.local_best_position());
                improved = true;
            }
        }

        if improved {
            let order = self.decoder.decode(&self.global_best_position);
            self.best_solution = Solution::from_operations(order.to_vec());
        }

        improved
    }

    fn update_inertia(&mut self) {
        if self.inertia > self.params.min_inertia {
            self.inertia = inertia_schedule(&self.params, self.ran_iterations);
        }
    }

    fn swarm_report(&mut self) -> EngineReport {
        let decoder = &mut self.decoder;
        let mut swarm_best = Time::MAX;
        let mut sum = 0.0;
        for particle in self.particles.iter_mut() {
            let makespan = -particle.fitness(decoder) as Time;
            swarm_best = swarm_best.min(makespan);
            sum += makespan as f64;
        }

        EngineReport::Swarm {
            inertia: self.inertia,
            swarm_best,
            swarm_average: sum / self.particles.len().max(1) as f64,
        }
    }
}

impl<'a> Metaheuristic for Pso<'a> {
    fn single_iteration(&mut self) -> Option<&Solution> {
        let inertia = self.inertia;
        for particle in self.particles.iter_mut() {
            particle.update(
                &self.global_best_position,
                inertia,
                &self.params,
                &mut self.rng,
                &mut self.decoder,
            );
        }

        self.update_inertia();
        self.ran_iterations += 1;
        self.last_report = Some(self.swarm_report());

        // this is the global best the updates of the next iteration are pulled towards
        if self.refresh_global_best() {
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
        if self.global_best_fitness == i64::MIN {
            None
        } else {
            Some(-self.global_best_fitness as Time)
        }
    }

    fn name(&self) -> &'static str {
        "PSO"
    }

    fn report(&self) -> Option<EngineReport> {
        self.last_report
    }
}
