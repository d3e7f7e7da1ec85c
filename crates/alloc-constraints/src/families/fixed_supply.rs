//! C4 — fixed cells, C5 — first-round supply cap.

use crate::report::{FamilyReport, Violation};
use alloc_core::{AllocationMatrix, DataFacade};

pub const C4_SLACK_BOXES: f64 = 1e-3;

/// C4: for each fixed (p, r, v>0), |A[p,r] − v| ≤ slack.
pub fn validate_fixed_cells(facade: &DataFacade, a: &AllocationMatrix) -> FamilyReport {
    let mut report = FamilyReport::passing();
    for product in facade.product_table() {
        for round in facade.rounds() {
            if let Some(fixed) = product.fixed_allocation(round) {
                let actual = a.get(&product.code, round);
                let diff = (actual - fixed).abs();
                report
                    .details
                    .insert(format!("{}/{round}", product.code), diff);
                if diff > C4_SLACK_BOXES {
                    report.push(Violation {
                        family: "C4",
                        message: format!(
                            "product {} round {round} allocated {actual:.3} but fixed at {fixed:.3}",
                            product.code
                        ),
                        product_code: Some(product.code.clone()),
                        round_label: Some(round.label().to_string()),
                        excess: diff - C4_SLACK_BOXES,
                    });
                }
            }
        }
    }
    report
}

/// C5: A[p, r1] ≤ available_supply[p].
pub fn validate_first_round_supply(facade: &DataFacade, a: &AllocationMatrix) -> FamilyReport {
    let mut report = FamilyReport::passing();
    let Some(first_round) = facade.rounds().first() else {
        return report;
    };
    for product in facade.product_table() {
        let allocated = a.get(&product.code, first_round);
        report.details.insert(product.code.clone(), allocated);
        if allocated > product.available_supply + C4_SLACK_BOXES {
            report.push(Violation {
                family: "C5",
                message: format!(
                    "product {} first-round allocation {allocated:.3} exceeds supply {:.3}",
                    product.code, product.available_supply
                ),
                product_code: Some(product.code.clone()),
                round_label: Some(first_round.label().to_string()),
                excess: allocated - product.available_supply - C4_SLACK_BOXES,
            });
        }
    }
    report
}
