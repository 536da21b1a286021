//! Knapsack Solver Benchmark Library
//!
//! A benchmarking suite for the 0/1 knapsack problem comparing exact and
//! heuristic solvers on the same instances.
//!
//! # Features
//!
//! - Exact solvers (Dynamic Programming, Memoized Recursion, Plain
//!   Recursion, Backtracking, Branch-and-Bound)
//! - Metaheuristics (Simulated Annealing, Ant Colony Optimization)
//! - Nine deterministic greedy heuristics
//! - Benchmarking with per-run timing, statistics, and CSV/JSON export
//!
//! # Example
//!
//! ```
//! use knapsack_bench::exact::DynamicProgramming;
//! use knapsack_bench::heuristics::standard_greedy;
//! use knapsack_bench::instance::Item;
//! use knapsack_bench::solver::KnapsackSolver;
//!
//! let items = vec![Item::new(10, 60), Item::new(20, 100), Item::new(30, 120)];
//!
//! // The exact optimum takes items 1 and 2.
//! let optimum = DynamicProgramming::new().solve(50, &items);
//! assert_eq!(optimum, 220);
//!
//! // Greedy by ratio settles for less.
//! assert_eq!(standard_greedy(50, &items), 160);
//! ```

pub mod benchmark;
pub mod exact;
pub mod heuristics;
pub mod instance;
pub mod solver;

pub use instance::{Item, KnapsackInstance};
pub use solver::KnapsackSolver;
