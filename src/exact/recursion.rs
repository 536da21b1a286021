//! Plain recursive solver, no memoization.

use crate::instance::Item;
use crate::solver::KnapsackSolver;

/// Exact O(2^n) include/exclude recursion. Exists as a correctness baseline
/// and a complexity contrast for the benchmark; keep item counts small.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRecursion;

impl PlainRecursion {
    pub fn new() -> Self {
        PlainRecursion
    }
}

impl KnapsackSolver for PlainRecursion {
    fn name(&self) -> &str {
        "Plain Recursion"
    }

    fn solve(&self, capacity: u64, items: &[Item]) -> u64 {
        best_value(capacity, items, items.len())
    }
}

fn best_value(capacity: u64, items: &[Item], n: usize) -> u64 {
    // Capacity 0 is not a base case: zero-weight items still contribute.
    if n == 0 {
        return 0;
    }

    let item = items[n - 1];
    if item.weight > capacity {
        best_value(capacity, items, n - 1)
    } else {
        let include = item.value + best_value(capacity - item.weight, items, n - 1);
        let exclude = best_value(capacity, items, n - 1);
        include.max(exclude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_instance() {
        let solver = PlainRecursion::new();
        let items = vec![Item::new(10, 60), Item::new(20, 100), Item::new(30, 120)];
        assert_eq!(solver.solve(50, &items), 220);
    }

    #[test]
    fn test_single_item() {
        let solver = PlainRecursion::new();
        assert_eq!(solver.solve(5, &[Item::new(5, 40)]), 40);
        assert_eq!(solver.solve(4, &[Item::new(5, 40)]), 0);
    }

    #[test]
    fn test_empty_items() {
        assert_eq!(PlainRecursion::new().solve(100, &[]), 0);
    }

    #[test]
    fn test_agrees_with_dp() {
        use crate::exact::DynamicProgramming;
        use rand::prelude::*;
        use rand_chacha::ChaCha8Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let dp = DynamicProgramming::new();
        let rec = PlainRecursion::new();

        for _ in 0..30 {
            let n = rng.gen_range(0..=14);
            let items: Vec<Item> = (0..n)
                .map(|_| Item::new(rng.gen_range(0..=25), rng.gen_range(0..=90)))
                .collect();
            let capacity = rng.gen_range(0..=60);
            assert_eq!(rec.solve(capacity, &items), dp.solve(capacity, &items));
        }
    }
}
