//! Per-round parameter merge: table defaults overridden by a
//! `ConfigRecord` (spec §4.1 override contract, §4.2 "merged per-round
//! parameter view").
//!
//! This is the single deterministic merge path referenced in spec §9
//! Open Question (b): the source has two code paths that can initialize
//! round constraints and disagree if called out of order. Here there is
//! exactly one function that produces the merged view, and it is called
//! fresh — never mutated in place — every time the configuration changes.

use alloc_core::{CigError, ConfigRecord, DataFacade, Round};
use std::collections::HashMap;

/// Merged, ready-to-use constraint parameters for one round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundParams {
    pub price_upper: f64,
    pub price_lower: f64,
    pub volume_target: f64,
    pub volume_upper: f64,
    pub volume_lower: f64,
}

/// Merge table values with configuration overrides for every round in
/// `facade`. Rounds absent from an override map fall back to table
/// values; overrides never mutate the facade.
pub fn merge_round_params(
    facade: &DataFacade,
    config: &ConfigRecord,
) -> Result<HashMap<String, RoundParams>, CigError> {
    let mut out = HashMap::new();
    for round in facade.rounds() {
        let table = facade.round_constraints(round)?;
        let price_upper = config
            .price_upper_limits
            .get(round.label())
            .copied()
            .unwrap_or(table.price_upper);
        let price_lower = config
            .price_lower_limits
            .get(round.label())
            .copied()
            .unwrap_or(table.price_lower);
        let volume_target = config
            .volume_limits
            .get(round.label())
            .copied()
            .unwrap_or(table.volume_target);
        let tau = config.volume_tolerance;
        out.insert(
            round.label().to_string(),
            RoundParams {
                price_upper,
                price_lower,
                volume_target,
                volume_upper: volume_target * (1.0 + tau),
                volume_lower: volume_target * (1.0 - tau),
            },
        );
    }
    Ok(out)
}

/// Look up merged params for a single round, failing the way the rest of
/// the pipeline fails on an unknown round.
pub fn params_for<'a>(
    merged: &'a HashMap<String, RoundParams>,
    round: &Round,
) -> Result<&'a RoundParams, CigError> {
    merged
        .get(round.label())
        .ok_or_else(|| CigError::Config(format!("no merged params for round '{round}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc_core::facade::RoundConstraintRaw;
    use alloc_core::ProductRecord;
    use std::collections::HashMap as Map;

    fn facade_with_one_round() -> DataFacade {
        let r1 = Round::parse("第一轮").unwrap();
        let mut constraints = Map::new();
        constraints.insert(
            "第一轮".to_string(),
            RoundConstraintRaw {
                price_upper: 50050.0,
                price_lower: 49950.0,
                volume_target: 100.0,
            },
        );
        DataFacade::new(Vec::<ProductRecord>::new(), vec![r1], constraints).unwrap()
    }

    #[test]
    fn override_wins_for_its_round() {
        let facade = facade_with_one_round();
        let mut config = ConfigRecord::default();
        config.volume_limits.insert("第一轮".to_string(), 250.0);
        let merged = merge_round_params(&facade, &config).unwrap();
        assert_eq!(merged["第一轮"].volume_target, 250.0);
        assert_eq!(merged["第一轮"].price_upper, 50050.0); // untouched table value
    }

    #[test]
    fn volume_bounds_derive_from_tolerance() {
        let facade = facade_with_one_round();
        let mut config = ConfigRecord::default();
        config.volume_tolerance = 0.01;
        let merged = merge_round_params(&facade, &config).unwrap();
        let p = &merged["第一轮"];
        assert!((p.volume_upper - 101.0).abs() < 1e-9);
        assert!((p.volume_lower - 99.0).abs() < 1e-9);
    }
}
