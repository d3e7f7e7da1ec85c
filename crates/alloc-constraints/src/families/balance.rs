//! C10 — round-to-round volume balance (soft).

use crate::report::{FamilyReport, Violation};
use alloc_core::AllocationMatrix;
use alloc_core::DataFacade;

pub const C10_LOWER_FACTOR: f64 = 0.8;
pub const C10_UPPER_FACTOR: f64 = 1.2;
pub const C10_SLACK_BOXES: f64 = 1e-3;

/// C10: for adjacent rounds r_i, r_{i+1} with V_{r_{i+1}} > 0, the band
/// 0.8·V_{r_{i+1}} ≤ V_{r_i} ≤ 1.2·V_{r_{i+1}} should hold — the earlier
/// round's volume is bounded relative to the later one. This is a soft
/// preference in the objective (spec §4.3.3 balance term), so violations
/// here are reported but never treated as infeasibility by the caller.
pub fn validate_balance(facade: &DataFacade, a: &AllocationMatrix) -> FamilyReport {
    let mut report = FamilyReport::passing();
    let rounds = facade.rounds();
    for pair in rounds.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        let v_prev = a.round_total(prev);
        let v_next = a.round_total(next);
        if v_next <= 0.0 {
            continue;
        }
        let lower = C10_LOWER_FACTOR * v_next;
        let upper = C10_UPPER_FACTOR * v_next;
        report
            .details
            .insert(format!("{prev}->{next}"), v_prev);

        if v_prev > upper + C10_SLACK_BOXES {
            report.push(Violation {
                family: "C10",
                message: format!(
                    "round {prev} volume {v_prev:.3} exceeds {C10_UPPER_FACTOR}x of round {next} ({upper:.3})"
                ),
                product_code: None,
                round_label: Some(prev.label().to_string()),
                excess: v_prev - upper - C10_SLACK_BOXES,
            });
        } else if v_prev < lower - C10_SLACK_BOXES {
            report.push(Violation {
                family: "C10",
                message: format!(
                    "round {prev} volume {v_prev:.3} below {C10_LOWER_FACTOR}x of round {next} ({lower:.3})"
                ),
                product_code: None,
                round_label: Some(prev.label().to_string()),
                excess: lower - v_prev - C10_SLACK_BOXES,
            });
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc_core::facade::RoundConstraintRaw;
    use alloc_core::{ProductRecord, Round};
    use std::collections::HashMap;

    fn product(code: &str, demand: f64) -> ProductRecord {
        ProductRecord {
            code: code.into(),
            name: code.into(),
            category: String::new(),
            brand: String::new(),
            wholesale_price: 200.0,
            sticks_per_bundle: 200.0,
            demand,
            available_supply: demand,
            c_flag: String::new(),
            c_subtype_raw: String::new(),
            demand_tag: String::new(),
            price_tag: String::new(),
            existing_allocations: HashMap::new(),
        }
    }

    fn facade(rounds: &[&str]) -> DataFacade {
        let rounds: Vec<_> = rounds.iter().map(|l| Round::parse(l).unwrap()).collect();
        let mut constraints = HashMap::new();
        for r in &rounds {
            constraints.insert(
                r.label().to_string(),
                RoundConstraintRaw { price_upper: 1e9, price_lower: 0.0, volume_target: 1.0 },
            );
        }
        DataFacade::new(vec![product("A001", 1000.0)], rounds, constraints).unwrap()
    }

    #[test]
    fn within_band_passes() {
        let f = facade(&["第一轮", "第二轮"]);
        let mut a = AllocationMatrix::new();
        a.set("A001", &Round::parse("第一轮").unwrap(), 500.0);
        a.set("A001", &Round::parse("第二轮").unwrap(), 450.0);
        let report = validate_balance(&f, &a);
        assert!(report.ok);
    }

    #[test]
    fn spike_above_band_fails() {
        let f = facade(&["第一轮", "第二轮"]);
        let mut a = AllocationMatrix::new();
        a.set("A001", &Round::parse("第一轮").unwrap(), 100.0);
        a.set("A001", &Round::parse("第二轮").unwrap(), 500.0);
        let report = validate_balance(&f, &a);
        assert!(!report.ok);
    }

    #[test]
    fn zero_next_round_is_skipped() {
        let f = facade(&["第一轮", "第二轮"]);
        let mut a = AllocationMatrix::new();
        a.set("A001", &Round::parse("第一轮").unwrap(), 900.0);
        let report = validate_balance(&f, &a);
        assert!(report.ok);
    }
}
