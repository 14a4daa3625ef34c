use crate::jssp::ProblemInstance;

use decorum::R64;
use num_traits::identities::Zero;

/// Square matrix of trail intensities over the construction graph.
///
/// Node 0 is the virtual start, node `o + 1` stands for operation `o`. Only
/// edges an ant can actually walk carry pheromone, every other entry stays 0.
#[derive(Debug, Clone)]
pub struct PheromoneMatrix {
    trails: Vec<Vec<R64>>,
}

impl PheromoneMatrix {
    pub fn new(problem: &ProblemInstance, initial: f64) -> Self {
        let n = problem.total_operations();
        let initial = R64::from_inner(initial);
        let mut trails = vec![vec![R64::zero(); n + 1]; n + 1];

        for job in 0..problem.job_count() {
            trails[0][problem.first_operation(job) + 1] = initial;
        }

        for from in 0..n {
            for to in 0..n {
                if problem.job_of(from) != problem.job_of(to) || problem.successor(from) == Some(to) {
                    trails[from + 1][to + 1] = initial;
                }
            }
        }

        PheromoneMatrix { trails }
    }

    /// Returns the number of nodes, which is one more than the number of operations.
    pub fn size(&self) -> usize {
        self.trails.len()
    }

    pub fn get(&self, from: usize, to: usize) -> R64 {
        self.trails[from][to]
    }

    /// Lets every trail decay by the factor `1 - rho`.
    pub fn evaporate(&mut self, rho: f64) {
        let factor = R64::from_inner(1.0 - rho);
        for trail in self.trails.iter_mut().flatten() {
            *trail = *trail * factor;
        }
    }

    pub fn deposit(&mut self, from: usize, to: usize, amount: f64) {
        let trail = &mut self.trails[from][to];
        *trail = *trail + R64::from_inner(amount);
    }

    pub fn total(&self) -> R64 {
        self.trails
            .iter()
            .flatten()
            .fold(R64::zero(), |acc, &trail| acc + trail)
    }

    pub fn iter_trails(&self) -> impl Iterator<Item = (usize, usize, R64)> + '_ {
        self.trails.iter().enumerate().flat_map(|(from, row)| {
            row.iter()
                .enumerate()
                .map(move |(to, &trail)| (from, to, trail))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jssp::Operation;

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
    fn new_only_initializes_walkable_edges() {
        let matrix = PheromoneMatrix::new(&problem(), 0.5);
        let one = R64::from_inner(0.5);
        let zero = R64::zero();

        assert_eq!(matrix.size(), 5);
        // start to first operations of the jobs
        assert_eq!(matrix.get(0, 1), one);
        assert_eq!(matrix.get(0, 3), one);
        assert_eq!(matrix.get(0, 2), zero);
        // job successor and cross-job edges
        assert_eq!(matrix.get(1, 2), one);
        assert_eq!(matrix.get(1, 3), one);
        assert_eq!(matrix.get(4, 1), one);
        // a job never goes back and never loops
        assert_eq!(matrix.get(2, 1), zero);
        assert_eq!(matrix.get(3, 3), zero);
        assert_eq!(matrix.get(2, 0), zero);
    }

    #[test]
    fn evaporation_strictly_decreases_trails() {
        let mut matrix = PheromoneMatrix::new(&problem(), 1.0);
        let before = matrix.clone();

        matrix.evaporate(0.2);

        for (from, to, trail) in matrix.iter_trails() {
            let old = before.get(from, to);
            assert!(trail >= R64::zero(), "Negative trail at ({}, {}).", from, to);
            if old > R64::zero() {
                assert!(trail < old, "Trail at ({}, {}) did not decrease.", from, to);
            }
        }
        assert!(matrix.total() < before.total());
    }

    #[test]
    fn trails_stay_non_negative() {
        let mut matrix = PheromoneMatrix::new(&problem(), 1.0);

        for i in 0..200 {
            matrix.evaporate(0.5);
            if i % 3 == 0 {
                matrix.deposit(0, 1, 1.0 / 7.0);
            }
        }

        assert!(matrix.iter_trails().all(|(_, _, trail)| trail >= R64::zero()));
    }

    #[test]
    fn deposit_works() {
        let mut matrix = PheromoneMatrix::new(&problem(), 1.0);
        matrix.deposit(1, 2, 0.25);

        assert_eq!(matrix.get(1, 2), R64::from_inner(1.25));
    }
}
