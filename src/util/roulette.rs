use oorandom::Rand64;

/// Weighted random selection over cumulative weights.
///
/// Building the wheel is linear in the number of weights, a spin is a binary
/// search. Candidates with a weight of zero can never be selected.
#[derive(Debug, Clone, Default)]
pub struct RouletteWheel {
    cumulative: Vec<f64>,
}

impl RouletteWheel {
    pub fn new(weights: &[f64]) -> Self {
        let mut wheel = RouletteWheel::with_capacity(weights.len());
        wheel.fill(weights);
        wheel
    }

    pub fn with_capacity(capacity: usize) -> Self {
        RouletteWheel {
            cumulative: Vec::with_capacity(capacity + 1),
        }
    }

    /// Rebuilds the wheel from the given weights, reusing the allocated buffer.
    /// Negative weights are treated as zero.
    pub fn fill(&mut self, weights: &[f64]) {
        self.cumulative.clear();
        self.cumulative.push(0.0);
        let mut total = 0.0;
        for weight in weights {
            total += weight.max(0.0);
            self.cumulative.push(total);
        }
    }

    /// Returns the number of candidates on the wheel.
    pub fn len(&self) -> usize {
        self.cumulative.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Selects a candidate index with a probability proportional to its weight.
    ///
    /// A single candidate is returned without drawing a random number. Returns
    /// `None` if there is nothing to select from, which is also the case when
    /// the weights do not sum up to a positive, finite total.
    pub fn spin(&self, rng: &mut Rand64) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        if len == 1 {
            return Some(0);
        }

        let total = self.total();
        if !(total.is_finite() && total > 0.0) {
            return None;
        }

        let r = total * rng.rand_float();
        let idx = self
            .cumulative
            .partition_point(|&c| c <= r)
            .saturating_sub(1)
            .min(len - 1);

        // rounding may land r on the border of an empty interval
        (0..=idx)
            .rev()
            .find(|&i| self.cumulative[i + 1] > self.cumulative[i])
    }

    /// Builds a wheel for the weights and spins it once.
    pub fn spin_once(rng: &mut Rand64, weights: &[f64]) -> Option<usize> {
        RouletteWheel::new(weights).spin(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::rng64;

    #[test]
    fn fill_builds_cumulative_weights() {
        let wheel = RouletteWheel::new(&[0.0, 1.0, 0.0, 3.0]);

        assert_eq!(wheel.cumulative, vec![0.0, 0.0, 1.0, 1.0, 4.0]);
        assert_eq!(wheel.len(), 4);
        assert_eq!(wheel.total(), 4.0);
    }

    #[test]
    fn spin_follows_weights() {
        let wheel = RouletteWheel::new(&[0.0, 1.0, 0.0, 3.0]);
        let mut rng = rng64(42);
        let mut counts = [0usize; 4];
        let draws = 20_000;

        for _ in 0..draws {
            counts[wheel.spin(&mut rng).unwrap()] += 1;
        }

        assert_eq!(counts[0], 0, "Zero weight candidate was selected.");
        assert_eq!(counts[2], 0, "Zero weight candidate was selected.");
        let share = counts[3] as f64 / draws as f64;
        assert!((share - 0.75).abs() < 0.02, "Share of index 3 was {}.", share);
        let share = counts[1] as f64 / draws as f64;
        assert!((share - 0.25).abs() < 0.02, "Share of index 1 was {}.", share);
    }

    #[test]
    fn single_candidate_draws_no_random_number() {
        let wheel = RouletteWheel::new(&[0.5]);
        let mut rng = rng64(7);
        let mut untouched = rng64(7);

        assert_eq!(wheel.spin(&mut rng), Some(0));
        assert_eq!(rng.rand_u64(), untouched.rand_u64());
    }

    #[test]
    fn empty_wheel_selects_nothing() {
        let mut rng = rng64(1);

        assert_eq!(RouletteWheel::new(&[]).spin(&mut rng), None);
        assert_eq!(RouletteWheel::spin_once(&mut rng, &[0.0, 0.0]), None);
    }

    #[test]
    fn fill_reuses_wheel() {
        let mut wheel = RouletteWheel::new(&[1.0, 2.0, 3.0]);
        wheel.fill(&[0.0, 2.0]);
        let mut rng = rng64(3);

        assert_eq!(wheel.len(), 2);
        for _ in 0..100 {
            assert_eq!(wheel.spin(&mut rng), Some(1));
        }
    }
}
