use crate::jssp::Time;

use float_cmp::approx_eq;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverParams {
    /// An instance stops once its pressure reaches this value.
    pub threshold: f64,
    /// Number of epochs without improvement that add a pressure of 1.
    pub patience: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            threshold: 1.5,
            patience: 15.0,
        }
    }
}

/// The three terms that push a running instance towards early termination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pressure {
    /// Share of instances still running.
    pub m: f64,
    /// Distance of the own best makespan to the mean of the running instances,
    /// scaled by the largest such distance. Positive means worse than average.
    pub delta: f64,
    /// Epochs since the last improvement relative to the patience.
    pub g: f64,
}

impl Pressure {
    pub fn total(&self) -> f64 {
        self.m + self.delta + self.g
    }
}

impl SolverParams {
    /// Computes the termination pressure for an instance with best makespan
    /// `own_best`, given the best makespans of all running instances.
    pub fn pressure(
        &self,
        own_best: Time,
        running_bests: &[Time],
        total_instances: usize,
        epochs_since_improvement: usize,
    ) -> Pressure {
        let m = running_bests.len() as f64 / total_instances.max(1) as f64;
        let g = epochs_since_improvement as f64 / self.patience;

        let mut delta = 0.0;
        if running_bests.len() > 1 {
            let mean = running_bests.iter().map(|&b| b as f64).sum::<f64>() / running_bests.len() as f64;
            let spread = running_bests
                .iter()
                .map(|&b| (b as f64 - mean).abs())
                .fold(0.0, f64::max);
            if !approx_eq!(f64, spread, 0.0, ulps = 2) {
                delta = (own_best as f64 - mean) / spread;
            }
        }

        Pressure { m, delta, g }
    }

    pub fn should_stop(&self, pressure: &Pressure) -> bool {
        pressure.total() >= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_instance_has_no_delta() {
        let params = SolverParams::default();
        let pressure = params.pressure(120, &[120], 4, 3);

        assert_eq!(pressure.delta, 0.0);
        assert!(approx_eq!(f64, pressure.m, 0.25, ulps = 2));
        assert!(approx_eq!(f64, pressure.g, 0.2, ulps = 2));
    }

    #[test]
    fn equal_bests_have_no_delta() {
        let pressure = SolverParams::default().pressure(50, &[50, 50, 50], 3, 0);

        assert_eq!(pressure.delta, 0.0);
        assert!(approx_eq!(f64, pressure.m, 1.0, ulps = 2));
    }

    #[test]
    fn delta_is_scaled_by_spread() {
        let params = SolverParams::default();
        let bests = [10, 20, 30];

        let worst = params.pressure(30, &bests, 3, 0);
        let best = params.pressure(10, &bests, 3, 0);
        let mid = params.pressure(20, &bests, 3, 0);

        assert!(approx_eq!(f64, worst.delta, 1.0, ulps = 2));
        assert!(approx_eq!(f64, best.delta, -1.0, ulps = 2));
        assert!(approx_eq!(f64, mid.delta, 0.0, ulps = 2));
    }

    #[test]
    fn should_stop_works() {
        let params = SolverParams::default();

        // all running, average makespan, 8 stale epochs: 1 + 0 + 8/15 >= 1.5
        assert!(params.should_stop(&params.pressure(20, &[10, 20, 30], 3, 8)));
        // best instance keeps going even when stale for a while
        assert!(!params.should_stop(&params.pressure(10, &[10, 20, 30], 3, 15)));
        assert!(params.should_stop(&params.pressure(10, &[10, 20, 30], 3, 23)));
    }
}
