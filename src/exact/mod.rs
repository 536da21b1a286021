//! Exact solvers module.
//!
//! Every solver here returns the mathematically optimal value. They share
//! the same recurrence but differ in time/space complexity, which is what
//! the benchmark contrasts.

pub mod backtracking;
pub mod branch_and_bound;
pub mod dp;
pub mod memoization;
pub mod recursion;

pub use backtracking::*;
pub use branch_and_bound::*;
pub use dp::*;
pub use memoization::*;
pub use recursion::*;
