//! Walks every constraint family and assembles a `ValidationReport`
//! (spec §4.2.2).

use crate::families::{balance, ctype, demand, fixed_supply, price_volume, priority};
use crate::params::merge_round_params;
use crate::report::{FamilyReport, ValidationReport};
use alloc_core::{AllocationMatrix, CigError, CigResult, ConfigRecord, DataFacade};

/// C1, C4, C5 have no toggle in `EnabledFamilies` — they hold regardless
/// of configuration (spec §4.2.2).
pub const ALWAYS_ENABLED_FAMILIES: &[&str] = &["C1", "C4", "C5"];

/// Run every family, skipping the ones `config.enabled` turns off, and
/// fold the result into one report.
///
/// Returns `Err` only if the per-round parameter merge itself fails
/// (e.g. a round the facade doesn't know about); individual constraint
/// violations are never `Err` — they are entries in the returned report.
pub fn validate_all(
    facade: &DataFacade,
    config: &ConfigRecord,
    allocation: &AllocationMatrix,
) -> CigResult<ValidationReport> {
    let mut report = ValidationReport::default();
    report.overall_valid = true;

    let mut record = |tag: &'static str, fr: FamilyReport| {
        if !fr.ok {
            report.overall_valid = false;
        }
        report.families.insert(tag, fr);
    };

    record("C1", demand::validate_demand_satisfaction(facade, allocation));
    record("C4", fixed_supply::validate_fixed_cells(facade, allocation));
    record("C5", fixed_supply::validate_first_round_supply(facade, allocation));

    let params = merge_round_params(facade, config)
        .map_err(|e| CigError::Config(format!("validation could not merge round params: {e}")))?;

    if config.enabled.c2_price {
        record("C2", price_volume::validate_price(facade, &params, allocation));
    } else {
        report.skipped.push("C2");
    }
    if config.enabled.c3_volume {
        record("C3", price_volume::validate_volume(facade, &params, allocation));
    } else {
        report.skipped.push("C3");
    }
    if config.enabled.c6_demand_split {
        record("C6", demand::validate_demand_split(facade, allocation));
    } else {
        report.skipped.push("C6");
    }
    if config.enabled.c7_demand_priority {
        record("C7", priority::validate_demand_priority(facade, allocation));
    } else {
        report.skipped.push("C7");
    }
    if config.enabled.c8_price_priority {
        record("C8", priority::validate_price_priority_share(facade, config, allocation));
    } else {
        report.skipped.push("C8");
    }
    if config.enabled.c9_c_type {
        record("C9", ctype::validate_c_type(facade, config, allocation));
    } else {
        report.skipped.push("C9");
    }
    if config.enabled.c10_balance {
        record("C10", balance::validate_balance(facade, allocation));
    } else {
        report.skipped.push("C10");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc_core::facade::RoundConstraintRaw;
    use alloc_core::{ProductRecord, Round};
    use std::collections::HashMap;

    fn facade() -> DataFacade {
        let r1 = Round::parse("第一轮").unwrap();
        let product = ProductRecord {
            code: "A001".into(),
            name: "A".into(),
            category: String::new(),
            brand: String::new(),
            wholesale_price: 200.0,
            sticks_per_bundle: 200.0,
            demand: 100.0,
            available_supply: 100.0,
            c_flag: String::new(),
            c_subtype_raw: String::new(),
            demand_tag: String::new(),
            price_tag: "按价".into(),
            existing_allocations: HashMap::new(),
        };
        let mut constraints = HashMap::new();
        constraints.insert(
            "第一轮".to_string(),
            RoundConstraintRaw {
                price_upper: 50050.0,
                price_lower: 49950.0,
                volume_target: 100.0,
            },
        );
        DataFacade::new(vec![product], vec![r1], constraints).unwrap()
    }

    #[test]
    fn fully_allocated_scenario_passes_every_family() {
        let facade = facade();
        let config = ConfigRecord::default();
        let mut a = AllocationMatrix::new();
        a.set("A001", &Round::parse("第一轮").unwrap(), 100.0);
        let report = validate_all(&facade, &config, &a).unwrap();
        assert!(report.overall_valid);
        assert!(report.skipped.is_empty());
        assert_eq!(report.families.len(), 10);
    }

    #[test]
    fn disabling_a_family_marks_it_skipped_not_failing() {
        let facade = facade();
        let mut config = ConfigRecord::default();
        config.enabled.c9_c_type = false;
        let mut a = AllocationMatrix::new();
        a.set("A001", &Round::parse("第一轮").unwrap(), 100.0);
        let report = validate_all(&facade, &config, &a).unwrap();
        assert!(report.overall_valid);
        assert_eq!(report.skipped, vec!["C9"]);
        assert!(!report.families.contains_key("C9"));
    }

    #[test]
    fn always_enabled_families_cannot_be_skipped() {
        let facade = facade();
        let config = ConfigRecord::default();
        let a = AllocationMatrix::new();
        let report = validate_all(&facade, &config, &a).unwrap();
        for tag in ALWAYS_ENABLED_FAMILIES {
            assert!(report.families.contains_key(tag));
        }
    }
}
