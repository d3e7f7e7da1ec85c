//! C7 — demand-priority, C8 — price-priority share.

use crate::report::{FamilyReport, Violation};
use alloc_core::{AllocationMatrix, ConfigRecord, DataFacade};

pub const C7_SLACK_BOXES: f64 = 1e-3;

/// C7: demand-priority SKUs should allocate entirely into the first two
/// rounds. The validator checks the hard reference form — fraction in the
/// first two rounds equals 1 — even though the MILP only encodes this as
/// a soft penalty (spec §4.2.1 C7).
pub fn validate_demand_priority(facade: &DataFacade, a: &AllocationMatrix) -> FamilyReport {
    let mut report = FamilyReport::passing();
    let first_two: Vec<_> = facade.rounds().iter().take(2).collect();
    for product in facade.product_table() {
        if !product.is_demand_based() {
            continue;
        }
        let total = a.product_total(&product.code);
        if total <= 0.0 {
            continue;
        }
        let early: f64 = first_two.iter().map(|r| a.get(&product.code, r)).sum();
        let late = total - early;
        report.details.insert(product.code.clone(), late);
        if late > C7_SLACK_BOXES {
            report.push(Violation {
                family: "C7",
                message: format!(
                    "demand-priority product {} allocated {late:.3} outside the first two rounds",
                    product.code
                ),
                product_code: Some(product.code.clone()),
                round_label: None,
                excess: late - C7_SLACK_BOXES,
            });
        }
    }
    report
}

/// C8: among SKUs with A[p,r]>0, the price-priority fraction must be ≥
/// `price_based_ratio`.
pub fn validate_price_priority_share(
    facade: &DataFacade,
    config: &ConfigRecord,
    a: &AllocationMatrix,
) -> FamilyReport {
    let mut report = FamilyReport::passing();
    for round in facade.rounds() {
        let active: Vec<_> = facade
            .product_table()
            .iter()
            .filter(|p| a.get(&p.code, round) > 0.0)
            .collect();
        if active.is_empty() {
            continue;
        }
        let price_based = active.iter().filter(|p| p.is_price_based()).count();
        let fraction = price_based as f64 / active.len() as f64;
        report.details.insert(round.label().to_string(), fraction);
        if fraction < config.price_based_ratio {
            report.push(Violation {
                family: "C8",
                message: format!(
                    "round {round} price-priority fraction {fraction:.3} below required {:.3}",
                    config.price_based_ratio
                ),
                product_code: None,
                round_label: Some(round.label().to_string()),
                excess: config.price_based_ratio - fraction,
            });
        }
    }
    report
}
