//! Bottom-up dynamic programming solver.
//!
//! Runs in O(n * W) time and space and is the production path for instances
//! where the recursive solvers would be too slow or too deep.

use crate::instance::Item;
use crate::solver::KnapsackSolver;

/// Exact solver building the classic `dp[i][w]` table, where `dp[i][w]` is
/// the best value achievable with the first `i` items and weight budget `w`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicProgramming;

impl DynamicProgramming {
    pub fn new() -> Self {
        DynamicProgramming
    }
}

impl KnapsackSolver for DynamicProgramming {
    fn name(&self) -> &str {
        "Dynamic Programming"
    }

    fn solve(&self, capacity: u64, items: &[Item]) -> u64 {
        let n = items.len();
        let w_max = capacity as usize;
        let mut dp = vec![vec![0u64; w_max + 1]; n + 1];

        for i in 1..=n {
            let item = items[i - 1];
            for w in 0..=w_max {
                dp[i][w] = if item.weight as usize <= w {
                    dp[i - 1][w].max(dp[i - 1][w - item.weight as usize] + item.value)
                } else {
                    dp[i - 1][w]
                };
            }
        }

        dp[n][w_max]
    }
}
