//! MILP Allocator: builds and solves the cigarette release model (spec
//! §4.3), then hands the result through the §4.3.5 post-processing pass.
//!
//! Constraint semantics mirror `alloc_constraints` exactly — the same
//! slack constants and merged round parameters feed both, so a solved
//! model and its post-hoc validation never disagree.

pub mod constraints;
pub mod objective;
pub mod postprocess;
pub mod solve;
pub mod variables;

pub use solve::{solve, SolveOutcome};
pub use variables::DecisionVariables;
