use crate::jssp::ProblemInstance;

use std::fmt;
use std::fmt::{Display, Formatter};

/// An operation order, listing global operation indices in the order they are
/// dispatched. While it is being constructed it may only hold a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
    operations: Vec<usize>,
}

impl Solution {
    pub fn new() -> Self {
        Solution {
            operations: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Solution {
            operations: Vec::with_capacity(capacity),
        }
    }

    pub fn from_operations(operations: Vec<usize>) -> Self {
        Solution { operations }
    }

    pub fn push(&mut self, operation: usize) {
        self.operations.push(operation);
    }

    pub fn clear(&mut self) {
        self.operations.clear();
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.operations
    }

    pub fn iter(&self) -> impl Iterator<Item = &usize> + '_ {
        self.operations.iter()
    }

    /// Returns true if every operation of the problem occurs exactly once.
    pub fn is_complete(&self, problem: &ProblemInstance) -> bool {
        if self.operations.len() != problem.total_operations() {
            return false;
        }

        let mut seen = vec![false; problem.total_operations()];
        for &operation in self.operations.iter() {
            match seen.get_mut(operation) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }

        true
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.operations
                .iter()
                .map(|x| format!("{}", x))
                .collect::<Vec<String>>()
                .join(" -> ")
        )
    }
}
