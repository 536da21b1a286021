//! Backtracking depth-first solver.

use crate::instance::Item;
use crate::solver::KnapsackSolver;

/// Exact solver exploring the binary inclusion/exclusion tree as a DFS over
/// `(current weight, current value, index)`. The include branch is only taken
/// when the item still fits, so every visited state is feasible; there is no
/// bound-based pruning beyond that.
#[derive(Debug, Clone, Copy, Default)]
pub struct Backtracking;

impl Backtracking {
    pub fn new() -> Self {
        Backtracking
    }
}

impl KnapsackSolver for Backtracking {
    fn name(&self) -> &str {
        "Backtracking"
    }

    fn solve(&self, capacity: u64, items: &[Item]) -> u64 {
        search(capacity, items, 0, 0, 0)
    }
}

fn search(capacity: u64, items: &[Item], current_weight: u64, current_value: u64, index: usize) -> u64 {
    if index == items.len() {
        return current_value;
    }

    let item = items[index];
    let mut best = search(capacity, items, current_weight, current_value, index + 1);

    if current_weight + item.weight <= capacity {
        let include = search(
            capacity,
            items,
            current_weight + item.weight,
            current_value + item.value,
            index + 1,
        );
        best = best.max(include);
    }

    best
}
