use crate::metaheuristic::pso::{Decoder, Params};
use crate::util::Cached;

use oorandom::Rand64;

fn uniform(rng: &mut Rand64, min: f64, max: f64) -> f64 {
    min + rng.rand_float() * (max - min)
}

/// A particle moving through the random-key space.
/// Its fitness is the negated makespan of its decoded position.
#[derive(Debug, Clone)]
pub struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    fitness: Cached<i64>,
    local_best_position: Vec<f64>,
    local_best_fitness: i64,
}

impl Particle {
    /// Creates a particle with uniformly drawn position and velocity.
    /// The local best starts out at the initial position.
    pub fn random(dimensions: usize, params: &Params, rng: &mut Rand64, decoder: &mut Decoder) -> Self {
        let position: Vec<f64> = (0..dimensions)
            .map(|_| uniform(rng, params.xmin, params.xmax))
            .collect();
        let velocity = (0..dimensions)
            .map(|_| uniform(rng, params.vmin, params.vmax))
            .collect();

        let mut particle = Particle {
            local_best_position: position.clone(),
            position,
            velocity,
            fitness: Cached::new(),
            local_best_fitness: i64::MIN,
        };
        particle.local_best_fitness = particle.fitness(decoder);

        particle
    }

    pub fn position(&self) -> &[f64] {
        &self.position
    }

    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    pub fn fitness(&mut self, decoder: &mut Decoder) -> i64 {
        let position = &self.position;
        *self
            .fitness
            .get_or_update(|| -(decoder.makespan(position) as i64))
    }

    pub fn local_best_position(&self) -> &[f64] {
        &self.local_best_position
    }

    pub fn local_best_fitness(&self) -> i64 {
        self.local_best_fitness
    }

    /// Moves the particle and remembers the new position if it is strictly fitter.
    pub fn update(
        &mut self,
        global_best: &[f64],
        inertia: f64,
        params: &Params,
        rng: &mut Rand64,
        decoder: &mut Decoder,
    ) {
        for j in 0..self.position.len() {
            let local_pull = params.c1 * rng.rand_float() * (self.local_best_position[j] - self.position[j]);
            let global_pull = params.c2 * rng.rand_float() * (global_best[j] - self.position[j]);
            let velocity = inertia * self.velocity[j] + local_pull + global_pull;

            self.velocity[j] = velocity.max(params.vmin).min(params.vmax);
            self.position[j] += self.velocity[j];
        }
        self.fitness.invalidate();

        let fitness = self.fitness(decoder);
        if fitness > self.local_best_fitness {
            self.local_best_fitness = fitness;
            self.local_best_position.copy_from_slice(&self.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jssp::{Operation, ProblemInstance};
    use crate::rng::rng64;

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
    fn random_respects_bounds() {
        let problem = problem();
        let mut decoder = Decoder::new(&problem);
        let params = Params::default();
        let mut rng = rng64(12);

        for _ in 0..20 {
            let particle = Particle::random(4, &params, &mut rng, &mut decoder);
            assert!(particle
                .position()
                .iter()
                .all(|&x| x >= params.xmin && x < params.xmax));
            assert!(particle
                .velocity()
                .iter()
                .all(|&v| v >= params.vmin && v < params.vmax));
            assert_eq!(particle.local_best_position(), particle.position());
        }
    }

    #[test]
    fn fitness_is_cached() {
        let problem = problem();
        let mut decoder = Decoder::new(&problem);
        let mut particle = Particle::random(4, &Params::default(), &mut rng64(1), &mut decoder);
        let evaluations = decoder.evaluations();

        let first = particle.fitness(&mut decoder);
        let second = particle.fitness(&mut decoder);

        assert_eq!(first, second);
        assert_eq!(first, particle.local_best_fitness());
        assert_eq!(decoder.evaluations(), evaluations, "Clean fitness was recomputed.");
    }

    #[test]
    fn update_clamps_velocity_and_evaluates_once() {
        let problem = problem();
        let mut decoder = Decoder::new(&problem);
        let params = Params {
            vmin: -0.1,
            vmax: 0.1,
            ..Params::default()
        };
        let mut rng = rng64(4);
        let mut particle = Particle::random(4, &params, &mut rng, &mut decoder);
        let evaluations = decoder.evaluations();

        particle.update(&[10.0, -10.0, 10.0, -10.0], 1.0, &params, &mut rng, &mut decoder);

        assert!(particle
            .velocity()
            .iter()
            .all(|&v| v >= params.vmin && v <= params.vmax));
        assert_eq!(decoder.evaluations(), evaluations + 1);
        assert!(particle.local_best_fitness() >= particle.fitness(&mut decoder));
    }
}
