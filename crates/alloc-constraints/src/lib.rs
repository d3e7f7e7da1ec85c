//! Constraint Manager: turns a `DataFacade` + `ConfigRecord` +
//! `AllocationMatrix` into a `ValidationReport` (spec §4.2).
//!
//! This crate is pure validation — it never builds or solves a model.
//! `alloc-solver` consumes `merge_round_params` and the family slack
//! constants from here to encode the same constraints into the MILP it
//! builds, so the solved model and the post-hoc check agree on tolerances.

pub mod aggregate;
pub mod families;
pub mod params;
pub mod report;

pub use aggregate::{validate_all, ALWAYS_ENABLED_FAMILIES};
pub use params::{merge_round_params, params_for, RoundParams};
pub use report::{FamilyReport, ValidationReport, Violation};
