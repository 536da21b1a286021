//! Top-down memoized recursion solver.

use std::collections::HashMap;

use crate::instance::Item;
use crate::solver::KnapsackSolver;

/// Exact solver recursing on `(items remaining, remaining capacity)` with
/// results memoized on that joint pair. Same O(n * W) bound as the DP table,
/// but only visits states that are actually reachable.
///
/// Recursion depth equals the item count; very large instances should use
/// [`crate::exact::DynamicProgramming`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoizedRecursion;

impl MemoizedRecursion {
    pub fn new() -> Self {
        MemoizedRecursion
    }
}

impl KnapsackSolver for MemoizedRecursion {
    fn name(&self) -> &str {
        "Memoized Recursion"
    }

    fn solve(&self, capacity: u64, items: &[Item]) -> u64 {
        let mut memo = HashMap::new();
        best_value(capacity, items, items.len(), &mut memo)
    }
}

fn best_value(
    capacity: u64,
    items: &[Item],
    n: usize,
    memo: &mut HashMap<(usize, u64), u64>,
) -> u64 {
    // Capacity 0 is not a base case: zero-weight items still contribute.
    if n == 0 {
        return 0;
    }

    // The key must cover both coordinates; memoizing on either one alone
    // conflates distinct states.
    let key = (n, capacity);
    if let Some(&cached) = memo.get(&key) {
        return cached;
    }

    let item = items[n - 1];
    let result = if item.weight > capacity {
        best_value(capacity, items, n - 1, memo)
    } else {
        let include = item.value + best_value(capacity - item.weight, items, n - 1, memo);
        let exclude = best_value(capacity, items, n - 1, memo);
        include.max(exclude)
    };

    memo.insert(key, result);
    result
}
