use crate::jssp::{Evaluator, ProblemInstance, Time};

/// Turns random-key positions into operation orders.
///
/// Operations are sorted by their key in ascending order, equal keys keep the
/// order of their operation indices.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    evaluator: Evaluator<'a>,
    order: Vec<usize>,
    evaluations: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(problem: &'a ProblemInstance) -> Self {
        Decoder {
            evaluator: Evaluator::new(problem),
            order: Vec::with_capacity(problem.total_operations()),
            evaluations: 0,
        }
    }

    pub fn decode(&mut self, position: &[f64]) -> &[usize] {
        self.order.clear();
        self.order.extend(0..position.len());
        self.order
            .sort_by(|&a, &b| position[a].total_cmp(&position[b]));

        &self.order
    }

    /// Decodes the position and returns the makespan of the resulting order.
    pub fn makespan(&mut self, position: &[f64]) -> Time {
        self.decode(position);
        self.evaluations += 1;
        self.evaluator.makespan(&self.order)
    }

    /// Returns how many positions were evaluated so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }
}
