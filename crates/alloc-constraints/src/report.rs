//! Shared violation/report types returned by every constraint family.
//!
//! Validation failures are data, never `CigError` (spec §7): a caller gets
//! a `ViolationReport` back and decides what to do with it.

use std::collections::HashMap;

/// One constraint violation.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub family: &'static str,
    pub message: String,
    pub product_code: Option<String>,
    pub round_label: Option<String>,
    /// How far past the allowed slack the observed value was; 0.0 for
    /// violations that aren't a simple magnitude overshoot.
    pub excess: f64,
}

/// Result of validating one constraint family.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FamilyReport {
    pub ok: bool,
    pub violations: Vec<Violation>,
    /// Diagnostic magnitudes (e.g. observed slack per round), keyed by a
    /// short label — lets a caller doing constraint relaxation see how
    /// far off a binding family was, not just pass/fail.
    pub details: HashMap<String, f64>,
}

impl FamilyReport {
    pub fn passing() -> Self {
        FamilyReport {
            ok: true,
            violations: Vec::new(),
            details: HashMap::new(),
        }
    }

    pub fn push(&mut self, violation: Violation) {
        self.ok = false;
        self.violations.push(violation);
    }
}

/// Aggregate result across every enabled family (spec §4.2.2).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub overall_valid: bool,
    pub families: HashMap<&'static str, FamilyReport>,
    pub skipped: Vec<&'static str>,
}
