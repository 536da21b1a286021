//! Branch-and-bound solver with a fractional-relaxation bound.

use crate::instance::{sort_by_ratio_desc, Item};
use crate::solver::KnapsackSolver;

/// Exact solver searching partial solutions in ratio order.
///
/// Items are sorted by descending value/weight ratio, then a LIFO frontier
/// of decision nodes is expanded; a child enters the frontier only when its
/// fractional upper bound exceeds the best feasible profit found so far.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBound;

impl BranchAndBound {
    pub fn new() -> Self {
        BranchAndBound
    }
}

/// A decision boundary: the first `level` sorted items have been fixed,
/// accumulating `profit` and `weight`.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    level: usize,
    profit: u64,
    weight: u64,
}

impl KnapsackSolver for BranchAndBound {
    fn name(&self) -> &str {
        "Branch and Bound"
    }

    fn solve(&self, capacity: u64, items: &[Item]) -> u64 {
        let mut sorted = items.to_vec();
        sort_by_ratio_desc(&mut sorted);
        let n = sorted.len();

        let mut frontier = vec![SearchNode {
            level: 0,
            profit: 0,
            weight: 0,
        }];
        let mut max_profit = 0u64;

        while let Some(node) = frontier.pop() {
            if node.level == n {
                continue;
            }
            let item = sorted[node.level];

            // Include the next item.
            let include = SearchNode {
                level: node.level + 1,
                profit: node.profit + item.value,
                weight: node.weight + item.weight,
            };
            if include.weight <= capacity && include.profit > max_profit {
                max_profit = include.profit;
            }
            if fractional_bound(&include, capacity, &sorted) > max_profit as f64 {
                frontier.push(include);
            }

            // Exclude it.
            let exclude = SearchNode {
                level: node.level + 1,
                profit: node.profit,
                weight: node.weight,
            };
            if fractional_bound(&exclude, capacity, &sorted) > max_profit as f64 {
                frontier.push(exclude);
            }
        }

        max_profit
    }
}

/// Upper bound on any completion of `node`: greedily pack the remaining
/// sorted items, then add the fractional value of the first one that no
/// longer fits whole.
fn fractional_bound(node: &SearchNode, capacity: u64, sorted: &[Item]) -> f64 {
    if node.weight > capacity {
        return 0.0;
    }

    let mut bound = node.profit as f64;
    let mut total_weight = node.weight;
    let mut j = node.level;

    while j < sorted.len() && total_weight + sorted[j].weight <= capacity {
        total_weight += sorted[j].weight;
        bound += sorted[j].value as f64;
        j += 1;
    }

    // Zero-weight items always fit whole, so the item here has weight > 0.
    if j < sorted.len() {
        bound += (capacity - total_weight) as f64 * sorted[j].value as f64
            / sorted[j].weight as f64;
    }

    bound
}
