//! Adds every linear and linearized constraint to the model (spec
//! §4.2.1, §4.3.1, §4.3.2). Ratio constraints are linearized per §9:
//! `X/Y <= k` becomes `X <= k*Y`, never a division.

use crate::variables::{DecisionVariables, BIG_M, EPS_BALANCE, EPS_COMMERCIAL, EPS_COUNTING};
use alloc_constraints::RoundParams;
use alloc_core::{CSubtype, ConfigRecord, DataFacade, Round};
use good_lp::{constraint, Expression, SolverModel};
use std::collections::HashMap;

fn round_volume(facade: &DataFacade, dv: &DecisionVariables, round: &Round) -> Expression {
    facade
        .product_table()
        .iter()
        .map(|p| dv.x_at(&p.code, round.label()))
        .sum()
}

fn round_c_type_sums(
    facade: &DataFacade,
    dv: &DecisionVariables,
    round: &Round,
) -> (Expression, Expression, Expression) {
    let mut c = Expression::from(0.0);
    let mut l = Expression::from(0.0);
    let mut x = Expression::from(0.0);
    for product in facade.product_table() {
        if !product.is_c_type() {
            continue;
        }
        let var = dv.x_at(&product.code, round.label());
        c += var;
        match product.c_subtype() {
            CSubtype::Chang => l += var,
            CSubtype::Xi => x += var,
            _ => {}
        }
    }
    (c, l, x)
}

pub fn add_constraints<M: SolverModel>(
    mut model: M,
    facade: &DataFacade,
    config: &ConfigRecord,
    params: &HashMap<String, RoundParams>,
    dv: &DecisionVariables,
) -> M {
    let rounds = facade.rounds();

    // C1 — demand satisfaction is a hard equality, always enabled.
    for product in facade.product_table() {
        if product.demand <= 0.0 {
            continue;
        }
        let total: Expression = rounds.iter().map(|r| dv.x_at(&product.code, r.label())).sum();
        model = model.with(constraint!(total == product.demand));
    }

    // C4/C5 are already encoded as variable bounds in `build_variables`
    // (fixed-cell collapse and the first-round supply cap) — nothing to
    // add here.

    // The product-balance round indicator is part of the always-on
    // objective (it feeds `rounds_shortage`), so its coupling runs
    // regardless of family toggles. C6's and C8's indicators only exist
    // when their family is enabled, so their couplings are gated the
    // same way `build_variables` gated building them.
    for product in facade.product_table() {
        for round in rounds {
            let x = dv.x_at(&product.code, round.label());
            let key = (product.code.clone(), round.label().to_string());

            let yb = dv.y_balance[&key];
            model = model.with(constraint!(x <= BIG_M * yb));
            model = model.with(constraint!(x >= EPS_BALANCE * yb));

            if let Some(&yc) = dv.y_counting.get(&key) {
                model = model.with(constraint!(x <= BIG_M * yc));
                model = model.with(constraint!(x >= EPS_COUNTING * yc));
            }

            if let Some(&ym) = dv.y_commercial.get(&key) {
                model = model.with(constraint!(x <= BIG_M * ym));
                model = model.with(constraint!(x >= EPS_COMMERCIAL * ym));
            }
        }
    }

    if config.enabled.c2_price || config.enabled.c3_volume {
        for round in rounds {
            let p = &params[round.label()];
            let v_r = round_volume(facade, dv, round);
            if config.enabled.c3_volume {
                model = model.with(constraint!(v_r.clone() <= p.volume_upper));
                model = model.with(constraint!(v_r.clone() >= p.volume_lower));
            }
            if config.enabled.c2_price {
                let s_r: Expression = facade
                    .product_table()
                    .iter()
                    .map(|product| dv.x_at(&product.code, round.label()) * product.unit_box_price())
                    .sum();
                model = model.with(constraint!(s_r.clone() <= p.price_upper * v_r.clone()));
                model = model.with(constraint!(s_r >= p.price_lower * v_r));
            }
        }
    }

    if config.enabled.c6_demand_split {
        for product in facade.product_table() {
            if product.has_any_fixed_cell() {
                continue;
            }
            let used: Expression = rounds
                .iter()
                .map(|r| dv.y_counting[&(product.code.clone(), r.label().to_string())])
                .sum();
            let d = product.demand;
            if d < 50.0 || (d > 50.0 && d <= 100.0) {
                model = model.with(constraint!(used <= 2.0));
            } else if d > 100.0 && d <= 250.0 {
                model = model.with(constraint!(used >= 2.0));
            }
        }
    }

    if config.enabled.c8_price_priority {
        for round in rounds {
            let mut price_based = Expression::from(0.0);
            let mut all_active = Expression::from(0.0);
            for product in facade.product_table() {
                let ym = dv.y_commercial[&(product.code.clone(), round.label().to_string())];
                all_active += ym;
                if product.is_price_based() {
                    price_based += ym;
                }
            }
            model = model.with(constraint!(price_based >= config.price_based_ratio * all_active));
        }
    }

    if config.enabled.c9_c_type {
        for round in rounds {
            let (c_r, l_r, x_r) = round_c_type_sums(facade, dv, round);
            let v_r = round_volume(facade, dv, round);
            model = model.with(constraint!(c_r.clone() <= config.c_type_ratio * v_r));
            model = model.with(constraint!(c_r.clone() <= config.c_type_volume_limit));
            model = model.with(constraint!(l_r.clone() <= config.chang_type_ratio * c_r.clone()));
            model = model.with(constraint!(l_r <= config.chang_type_volume_limit));
            model = model.with(constraint!(x_r.clone() <= config.xi_type_ratio * c_r));
            model = model.with(constraint!(x_r <= config.xi_type_volume_limit));
        }

        for product in facade.product_table() {
            if product.c_subtype() != CSubtype::Fang || product.has_any_fixed_cell() {
                continue;
            }
            let selector: Expression = rounds
                .iter()
                .map(|r| dv.z_fang[&(product.code.clone(), r.label().to_string())])
                .sum();
            model = model.with(constraint!(selector == 1.0));
            for round in rounds {
                let key = (product.code.clone(), round.label().to_string());
                let x = dv.x[&key];
                let z = dv.z_fang[&key];
                model = model.with(constraint!(x <= BIG_M * z));
            }
        }
    }

    if config.enabled.c10_balance {
        for pair in rounds.windows(2) {
            let (r_i, r_next) = (&pair[0], &pair[1]);
            let key = (r_i.label().to_string(), r_next.label().to_string());
            let v_i = round_volume(facade, dv, r_i);
            let v_next = round_volume(facade, dv, r_next);
            let plus = dv.balance_plus[&key];
            let minus = dv.balance_minus[&key];
            model = model.with(constraint!(plus >= v_i.clone() - 1.2 * v_next.clone()));
            model = model.with(constraint!(minus >= 0.8 * v_next - v_i));
        }
    }

    // Objective auxiliaries that are part of the always-on objective
    // terms (round balance, round variance, product balance, smooth
    // transition) get their defining constraints unconditionally.
    for round in rounds {
        let v_r = round_volume(facade, dv, round);
        model = model.with(constraint!(v_r.clone() <= dv.max_round));
        model = model.with(constraint!(v_r >= dv.min_round));
    }

    let n = rounds.len().max(1) as f64;
    let total_volume: Expression = rounds.iter().map(|r| round_volume(facade, dv, r)).sum();
    for round in rounds {
        let v_r = round_volume(facade, dv, round);
        let mean = (1.0 / n) * total_volume.clone();
        let plus = dv.dev_plus[round.label()];
        let minus = dv.dev_minus[round.label()];
        model = model.with(constraint!(v_r - mean == plus - minus));
    }

    for product in facade.product_table() {
        if product.has_any_fixed_cell() {
            continue;
        }
        let pmax = dv.pmax[&product.code];
        let pmin = dv.pmin[&product.code];
        for round in rounds {
            let x = dv.x_at(&product.code, round.label());
            model = model.with(constraint!(x <= pmax));
            model = model.with(constraint!(x >= pmin));

            let key = (product.code.clone(), round.label().to_string());
            let d = product.demand;
            model = model.with(constraint!(dv.slack60[&key] >= x - 0.6 * d));
            model = model.with(constraint!(dv.slack80[&key] >= x - 0.8 * d));
            model = model.with(constraint!(dv.slack90[&key] >= x - 0.9 * d));
        }
        if let Some(&shortage) = dv.rounds_shortage.get(&product.code) {
            let used: Expression = rounds
                .iter()
                .map(|r| dv.y_balance[&(product.code.clone(), r.label().to_string())])
                .sum();
            model = model.with(constraint!(shortage >= 2.0 - used));
        }
    }

    for pair in rounds.windows(2) {
        let (r_i, r_next) = (&pair[0], &pair[1]);
        let pair_key = (r_i.label().to_string(), r_next.label().to_string());
        let v_i = round_volume(facade, dv, r_i);
        let v_next = round_volume(facade, dv, r_next);
        let diff = dv.round_diff[&pair_key];
        model = model.with(constraint!(diff.clone() >= v_next.clone() - v_i.clone()));
        model = model.with(constraint!(diff >= v_i - v_next));

        for product in facade.product_table() {
            let sku_key = (product.code.clone(), r_i.label().to_string(), r_next.label().to_string());
            let Some(&diff) = dv.sku_diff.get(&sku_key) else { continue };
            let x_i = dv.x_at(&product.code, r_i.label());
            let x_next = dv.x_at(&product.code, r_next.label());
            model = model.with(constraint!(diff.clone() >= x_next.clone() - x_i.clone()));
            model = model.with(constraint!(diff >= x_i - x_next));
        }
    }

    if config.enabled.c7_demand_priority {
        for (key, &q) in &dv.priority_penalty {
            let x = dv.x[key];
            model = model.with(constraint!(q == x));
        }
    }

    model
}
