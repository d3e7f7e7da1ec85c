//! C1 — demand satisfaction, C6 — demand-split preference.

use crate::report::{FamilyReport, Violation};
use alloc_core::{AllocationMatrix, DataFacade};

/// Slack for demand satisfaction (spec §4.2.1 C1).
pub const C1_SLACK_BOXES: f64 = 1e-3;

/// C1: Σ_r A[p,r] = demand[p] for all p with demand > 0.
pub fn validate_demand_satisfaction(facade: &DataFacade, a: &AllocationMatrix) -> FamilyReport {
    let mut report = FamilyReport::passing();
    for product in facade.product_table() {
        if product.demand <= 0.0 {
            continue;
        }
        let total = a.product_total(&product.code);
        let diff = (total - product.demand).abs();
        report.details.insert(product.code.clone(), diff);
        if diff > C1_SLACK_BOXES {
            report.push(Violation {
                family: "C1",
                message: format!(
                    "product {} allocated {:.3} against demand {:.3}",
                    product.code, total, product.demand
                ),
                product_code: Some(product.code.clone()),
                round_label: None,
                excess: diff - C1_SLACK_BOXES,
            });
        }
    }
    report
}

/// C6: rounds-used caps/floors for non-fixed SKUs, keyed on demand
/// magnitude.
///
/// Per spec §9 Open Question (a): the source's `demand < 50` branch is
/// documented as a "tendency to concentrate" but is coded as the same
/// hard cap as the 50–100 case. Reproduced verbatim here — do not relax
/// it into a soft preference without resolving that ambiguity upstream.
pub fn validate_demand_split(facade: &DataFacade, a: &AllocationMatrix) -> FamilyReport {
    let mut report = FamilyReport::passing();
    for product in facade.product_table() {
        if product.has_any_fixed_cell() {
            continue;
        }
        let demand = product.demand;
        let used = a.rounds_used(&product.code) as f64;
        report.details.insert(product.code.clone(), used);

        if demand < 50.0 || (demand > 50.0 && demand <= 100.0) {
            if used > 2.0 {
                report.push(Violation {
                    family: "C6",
                    message: format!(
                        "product {} used {} rounds but demand {:.3} caps at 2",
                        product.code, used, demand
                    ),
                    product_code: Some(product.code.clone()),
                    round_label: None,
                    excess: used - 2.0,
                });
            }
        } else if demand > 100.0 && demand <= 250.0 && used < 2.0 {
            report.push(Violation {
                family: "C6",
                message: format!(
                    "product {} used {} rounds but demand {:.3} requires at least 2",
                    product.code, used, demand
                ),
                product_code: Some(product.code.clone()),
                round_label: None,
                excess: 2.0 - used,
            });
        }
    }
    report
}
