//! Assembles the weighted objective (spec §4.3.3): a minimized sum over
//! five always-on terms plus two penalty terms added when their family
//! toggles are on. The allocation term is the only one that rewards
//! growth — it enters negatively so minimizing the sum still maximizes
//! total allocation — every other term is a spread/variance penalty and
//! enters positively.

use crate::variables::DecisionVariables;
use alloc_core::{ConfigRecord, DataFacade};
use good_lp::Expression;

/// Weight given to the demand-priority late-round penalty at 1-based
/// round number `i` (the third round onward): `50 * 2^(i-3)`, i.e. the
/// penalty doubles every round the SKU is pushed back (spec §4.3.3).
fn priority_penalty_weight(round_number: usize) -> f64 {
    50.0 * 2f64.powi(round_number as i32 - 3)
}

/// Flat penalty applied to every unit of C10 balance-band overshoot.
const BALANCE_PENALTY_WEIGHT: f64 = 500.0;

pub fn build_objective(facade: &DataFacade, config: &ConfigRecord, dv: &DecisionVariables) -> Expression {
    let w = &config.weights;
    let rounds = facade.rounds();

    let total_allocation: Expression = dv.x.values().copied().sum();

    let round_balance: Expression = dv.max_round - dv.min_round;

    let round_variance: Expression = rounds
        .iter()
        .map(|r| dv.dev_plus[r.label()] + dv.dev_minus[r.label()])
        .sum();

    let product_balance: Expression = facade
        .product_table()
        .iter()
        .filter(|p| !p.has_any_fixed_cell())
        .map(|p| dv.pmax[&p.code] - dv.pmin[&p.code])
        .sum::<Expression>()
        + 3.0 * dv.slack60.values().copied().sum::<Expression>()
        + 5.0 * dv.slack80.values().copied().sum::<Expression>()
        + 10.0 * dv.slack90.values().copied().sum::<Expression>()
        + 1.5 * dv.rounds_shortage.values().copied().sum::<Expression>();

    let smooth_transition: Expression =
        dv.round_diff.values().copied().sum::<Expression>() + dv.sku_diff.values().copied().sum::<Expression>();

    let mut objective = -w.maximize_allocation_weight * total_allocation
        + w.round_balance_weight * round_balance
        + w.round_variance_weight * round_variance
        + w.product_balance_weight * product_balance
        + w.smooth_transition_weight * smooth_transition;

    if config.enabled.c7_demand_priority {
        for (idx, round) in rounds.iter().enumerate().skip(2) {
            let weight = priority_penalty_weight(idx + 1);
            for product in facade.product_table() {
                let key = (product.code.clone(), round.label().to_string());
                if let Some(&q) = dv.priority_penalty.get(&key) {
                    objective += weight * q;
                }
            }
        }
    }

    if config.enabled.c10_balance {
        for pair in rounds.windows(2) {
            let key = (pair[0].label().to_string(), pair[1].label().to_string());
            objective += BALANCE_PENALTY_WEIGHT * (dv.balance_plus[&key] + dv.balance_minus[&key]);
        }
    }

    objective
}
