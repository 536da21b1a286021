//! Common interface implemented by every knapsack solver.

use crate::instance::Item;

/// A solver for the 0/1 knapsack problem.
///
/// Each call is a self-contained computation over its inputs: solvers hold
/// configuration only, never per-call state, so a solver can be shared across
/// threads and invoked concurrently on disjoint instances.
pub trait KnapsackSolver {
    /// Human-readable algorithm name, used in benchmark reports.
    fn name(&self) -> &str;

    /// Best achievable total value found for the given capacity and items.
    ///
    /// Exact solvers return the optimum; heuristics return a feasible lower
    /// bound on it. The result is always achievable by some subset whose
    /// total weight fits the capacity, so it is never negative and never
    /// overestimates.
    fn solve(&self, capacity: u64, items: &[Item]) -> u64;
}
