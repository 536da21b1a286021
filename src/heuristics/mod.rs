//! Heuristic and metaheuristic solvers module.
//!
//! The greedy family is deterministic and O(n log n); the annealing and
//! ant-colony solvers are randomized and trade determinism for quality.

pub mod aco;
pub mod annealing;
pub mod greedy;

pub use aco::*;
pub use annealing::*;
pub use greedy::*;
