//! C2 — per-round average box price, C3 — per-round volume.

use crate::params::RoundParams;
use crate::report::{FamilyReport, Violation};
use alloc_core::{AllocationMatrix, DataFacade};

pub const C2_SLACK_YUAN: f64 = 1e-2;
pub const C3_SLACK_BOXES: f64 = 1e-3;

/// C2: if V_r > 0, price_lower(r) ≤ S_r/V_r ≤ price_upper(r), where
/// S_r = Σ_p A[p,r]·unit_box_price[p].
pub fn validate_price(
    facade: &DataFacade,
    params: &std::collections::HashMap<String, RoundParams>,
    a: &AllocationMatrix,
) -> FamilyReport {
    let mut report = FamilyReport::passing();
    for round in facade.rounds() {
        let v_r = a.round_total(round);
        if v_r <= 0.0 {
            continue;
        }
        let s_r: f64 = facade
            .product_table()
            .iter()
            .map(|p| a.get(&p.code, round) * p.unit_box_price())
            .sum();
        let avg = s_r / v_r;
        let p = &params[round.label()];
        report.details.insert(round.label().to_string(), avg);

        if avg > p.price_upper + C2_SLACK_YUAN {
            report.push(Violation {
                family: "C2",
                message: format!(
                    "round {round} average box price {avg:.2} exceeds upper {:.2}",
                    p.price_upper
                ),
                product_code: None,
                round_label: Some(round.label().to_string()),
                excess: avg - p.price_upper - C2_SLACK_YUAN,
            });
        } else if avg < p.price_lower - C2_SLACK_YUAN {
            report.push(Violation {
                family: "C2",
                message: format!(
                    "round {round} average box price {avg:.2} below lower {:.2}",
                    p.price_lower
                ),
                product_code: None,
                round_label: Some(round.label().to_string()),
                excess: p.price_lower - avg - C2_SLACK_YUAN,
            });
        }
    }
    report
}

/// C3: volume_lower(r) ≤ V_r ≤ volume_upper(r).
pub fn validate_volume(
    facade: &DataFacade,
    params: &std::collections::HashMap<String, RoundParams>,
    a: &AllocationMatrix,
) -> FamilyReport {
    let mut report = FamilyReport::passing();
    for round in facade.rounds() {
        let v_r = a.round_total(round);
        let p = &params[round.label()];
        report.details.insert(round.label().to_string(), v_r);

        if v_r > p.volume_upper + C3_SLACK_BOXES {
            report.push(Violation {
                family: "C3",
                message: format!(
                    "round {round} volume {v_r:.3} exceeds upper bound {:.3}",
                    p.volume_upper
                ),
                product_code: None,
                round_label: Some(round.label().to_string()),
                excess: v_r - p.volume_upper - C3_SLACK_BOXES,
            });
        } else if v_r < p.volume_lower - C3_SLACK_BOXES {
            report.push(Violation {
                family: "C3",
                message: format!(
                    "round {round} volume {v_r:.3} below lower bound {:.3}",
                    p.volume_lower
                ),
                product_code: None,
                round_label: Some(round.label().to_string()),
                excess: p.volume_lower - v_r - C3_SLACK_BOXES,
            });
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::merge_round_params;
    use alloc_core::facade::RoundConstraintRaw;
    use alloc_core::{ConfigRecord, ProductRecord, Round};
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
            price_tag: String::new(),
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
    fn c2_passes_scenario_1() {
        let facade = facade();
        let config = ConfigRecord::default();
        let params = merge_round_params(&facade, &config).unwrap();
        let mut a = AllocationMatrix::new();
        a.set("A001", &Round::parse("第一轮").unwrap(), 100.0);
        let report = validate_price(&facade, &params, &a);
        assert!(report.ok);
    }

    #[test]
    fn c3_passes_scenario_1() {
        let facade = facade();
        let config = ConfigRecord::default();
        let params = merge_round_params(&facade, &config).unwrap();
        let mut a = AllocationMatrix::new();
        a.set("A001", &Round::parse("第一轮").unwrap(), 100.0);
        let report = validate_volume(&facade, &params, &a);
        assert!(report.ok);
    }

    #[test]
    fn c3_fails_when_volume_too_low() {
        let facade = facade();
        let config = ConfigRecord::default();
        let params = merge_round_params(&facade, &config).unwrap();
        let mut a = AllocationMatrix::new();
        a.set("A001", &Round::parse("第一轮").unwrap(), 50.0);
        let report = validate_volume(&facade, &params, &a);
        assert!(!report.ok);
    }

    #[test]
    fn c2_skips_rounds_with_zero_volume() {
        let facade = facade();
        let config = ConfigRecord::default();
        let params = merge_round_params(&facade, &config).unwrap();
        let a = AllocationMatrix::new();
        let report = validate_price(&facade, &params, &a);
        assert!(report.ok);
    }
}
