//! Unified error type for the allocator.
//!
//! [`CigError`] represents every failure mode the core can produce. Domain
//! layers (`alloc-io`, `alloc-constraints`, `alloc-solver`) each surface
//! their own failures through this type so callers handle one error enum
//! at every API boundary.
//!
//! Validation violations are *not* errors: a failed constraint family is a
//! `ViolationRecord` returned by `alloc-constraints`, not a `CigError`. A
//! `TimeLimit` solve is likewise not an error — it is a successful
//! `SolveOutcome::TimeLimit` carrying a feasible incumbent (see
//! `alloc-solver::SolveOutcome`).

use thiserror::Error;

/// Errors produced by the allocation core.
#[derive(Error, Debug)]
pub enum CigError {
    /// Missing required column, malformed round label, or non-numeric
    /// override value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Inconsistent fixed cells (e.g. two fixed cells whose sum exceeds
    /// demand) or a fixed first-round value exceeding available supply.
    #[error("model error: {0}")]
    Model(String),

    /// The solver proved the model infeasible.
    #[error("infeasible with families {enabled_families:?}: {message}")]
    Infeasible {
        message: String,
        enabled_families: Vec<String>,
    },

    /// The solver returned `Error` or `Unbounded`.
    #[error("solver error: {0}")]
    Solver(String),

    /// Generic errors wrapping an external failure (file I/O, parsing).
    #[error("{0}")]
    Other(String),
}

/// Convenience alias for results using [`CigError`].
pub type CigResult<T> = Result<T, CigError>;

impl From<anyhow::Error> for CigError {
    fn from(err: anyhow::Error) -> Self {
        CigError::Other(err.to_string())
    }
}

impl From<String> for CigError {
    fn from(s: String) -> Self {
        CigError::Other(s)
    }
}

impl From<&str> for CigError {
    fn from(s: &str) -> Self {
        CigError::Other(s.to_string())
    }
}
