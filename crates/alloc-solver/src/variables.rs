//! Decision and auxiliary variable construction (spec §4.3.1). Auxiliary
//! variables tied to a toggleable constraint family are only built when
//! that family is enabled; the five always-on objective terms get their
//! auxiliaries unconditionally.

use alloc_core::{CSubtype, ConfigRecord, DataFacade};
use good_lp::{variable, ProblemVariables, Variable};
use std::collections::HashMap;

/// Big-M used for every activation coupling and the 方-concentration
/// selector.
pub const BIG_M: f64 = 1e6;

/// Activation epsilon for round-usage counting (C6).
pub const EPS_COUNTING: f64 = 0.01;
/// Activation epsilon for "meaningful commercial presence" (C8).
pub const EPS_COMMERCIAL: f64 = 1.0;
/// Activation epsilon for the product-balance round indicator feeding the
/// rounds-shortage penalty — deliberately distinct from `EPS_COUNTING`
/// even though both answer "is this SKU active in this round" (spec
/// §4.3.2 calls out mismatched epsilons between uses as a latent bug to
/// avoid, not a license to share one variable across uses).
pub const EPS_BALANCE: f64 = 0.1;

type Cell = (String, String);

/// Every variable the model needs, keyed the same way the rest of the
/// crate keys allocation cells: `(product_code, round_label)`.
pub struct DecisionVariables {
    pub x: HashMap<Cell, Variable>,
    /// C6 round-usage indicator, built only when C6 is enabled.
    pub y_counting: HashMap<Cell, Variable>,
    /// C8 commercial-presence indicator, built only when C8 is enabled.
    pub y_commercial: HashMap<Cell, Variable>,
    /// Product-balance round indicator feeding `rounds_shortage`; always
    /// built since product balance is one of the five always-on terms.
    pub y_balance: HashMap<Cell, Variable>,
    /// C9 单-round concentration selector, built only when C9 is enabled.
    pub z_fang: HashMap<Cell, Variable>,
    pub max_round: Variable,
    pub min_round: Variable,
    pub dev_plus: HashMap<String, Variable>,
    pub dev_minus: HashMap<String, Variable>,
    pub pmax: HashMap<String, Variable>,
    pub pmin: HashMap<String, Variable>,
    pub slack60: HashMap<Cell, Variable>,
    pub slack80: HashMap<Cell, Variable>,
    pub slack90: HashMap<Cell, Variable>,
    pub rounds_shortage: HashMap<String, Variable>,
    /// Keyed by `(round_i_label, round_next_label)`.
    pub round_diff: HashMap<Cell, Variable>,
    /// Keyed by `(product_code, round_i_label, round_next_label)`.
    pub sku_diff: HashMap<(String, String, String), Variable>,
    /// C10 balance slacks, built only when C10 is enabled.
    pub balance_plus: HashMap<Cell, Variable>,
    pub balance_minus: HashMap<Cell, Variable>,
    /// q_{p,r}: demand-priority penalty variable, built only when C7 is
    /// enabled, for priority SKUs at rounds beyond the first two.
    pub priority_penalty: HashMap<Cell, Variable>,
}

/// Upper bound for round totals (used for `max_round`/`min_round`/etc.):
/// large enough never to bind, small enough to keep the solver's bounds
/// finite.
const ROUND_TOTAL_CEILING: f64 = 1e9;

pub fn build_variables(vars: &mut ProblemVariables, facade: &DataFacade, config: &ConfigRecord) -> DecisionVariables {
    let rounds = facade.rounds();
    let mut x = HashMap::new();

    for product in facade.product_table() {
        for (idx, round) in rounds.iter().enumerate() {
            let key = (product.code.clone(), round.label().to_string());
            let var = if let Some(fixed) = product.fixed_allocation(round) {
                vars.add(variable().min(fixed).max(fixed))
            } else {
                let upper = if idx == 0 {
                    product.demand.min(product.available_supply)
                } else {
                    product.demand
                };
                vars.add(variable().min(0.0).max(upper.max(0.0)))
            };
            x.insert(key, var);
        }
    }

    let mut y_counting = HashMap::new();
    let mut y_commercial = HashMap::new();
    let mut y_balance = HashMap::new();
    for product in facade.product_table() {
        for round in rounds {
            let key = (product.code.clone(), round.label().to_string());
            if config.enabled.c6_demand_split {
                y_counting.insert(key.clone(), vars.add(variable().binary()));
            }
            if config.enabled.c8_price_priority {
                y_commercial.insert(key.clone(), vars.add(variable().binary()));
            }
            y_balance.insert(key, vars.add(variable().binary()));
        }
    }

    let mut z_fang = HashMap::new();
    if config.enabled.c9_c_type {
        for product in facade.product_table() {
            if product.c_subtype() != CSubtype::Fang || product.has_any_fixed_cell() {
                continue;
            }
            for round in rounds {
                let key = (product.code.clone(), round.label().to_string());
                z_fang.insert(key, vars.add(variable().binary()));
            }
        }
    }

    let max_round = vars.add(variable().min(0.0).max(ROUND_TOTAL_CEILING));
    let min_round = vars.add(variable().min(0.0).max(ROUND_TOTAL_CEILING));

    let mut dev_plus = HashMap::new();
    let mut dev_minus = HashMap::new();
    for round in rounds {
        dev_plus.insert(round.label().to_string(), vars.add(variable().min(0.0)));
        dev_minus.insert(round.label().to_string(), vars.add(variable().min(0.0)));
    }

    // Product-balance auxiliaries (pmax/pmin, rounds_shortage, the
    // concentration slacks below) are only meaningful for non-fixed
    // SKUs — spec §4.3.3 scopes the product-balance term to "each
    // non-fixed SKU", and a SKU with even one fixed cell must not have
    // its free cells pulled around by these penalties either.
    let mut pmax = HashMap::new();
    let mut pmin = HashMap::new();
    let mut rounds_shortage = HashMap::new();
    for product in facade.product_table() {
        if product.has_any_fixed_cell() {
            continue;
        }
        pmax.insert(product.code.clone(), vars.add(variable().min(0.0).max(product.demand.max(0.0))));
        pmin.insert(product.code.clone(), vars.add(variable().min(0.0).max(product.demand.max(0.0))));
        if product.demand >= 100.0 {
            rounds_shortage.insert(product.code.clone(), vars.add(variable().min(0.0).max(2.0)));
        }
    }

    let mut slack60 = HashMap::new();
    let mut slack80 = HashMap::new();
    let mut slack90 = HashMap::new();
    for product in facade.product_table() {
        if product.has_any_fixed_cell() {
            continue;
        }
        for round in rounds {
            let key = (product.code.clone(), round.label().to_string());
            slack60.insert(key.clone(), vars.add(variable().min(0.0)));
            slack80.insert(key.clone(), vars.add(variable().min(0.0)));
            slack90.insert(key, vars.add(variable().min(0.0)));
        }
    }

    let mut round_diff = HashMap::new();
    let mut balance_plus = HashMap::new();
    let mut balance_minus = HashMap::new();
    let mut sku_diff = HashMap::new();
    for pair in rounds.windows(2) {
        let (r_i, r_next) = (&pair[0], &pair[1]);
        let pair_key = (r_i.label().to_string(), r_next.label().to_string());
        round_diff.insert(pair_key.clone(), vars.add(variable().min(0.0)));
        if config.enabled.c10_balance {
            balance_plus.insert(pair_key.clone(), vars.add(variable().min(0.0)));
            balance_minus.insert(pair_key.clone(), vars.add(variable().min(0.0)));
        }

        for product in facade.product_table() {
            if product.demand < 30.0 || product.has_any_fixed_cell() {
                continue;
            }
            sku_diff.insert(
                (product.code.clone(), r_i.label().to_string(), r_next.label().to_string()),
                vars.add(variable().min(0.0)),
            );
        }
    }

    let mut priority_penalty = HashMap::new();
    if config.enabled.c7_demand_priority {
        for product in facade.product_table() {
            if !product.is_demand_based() {
                continue;
            }
            for round in rounds.iter().skip(2) {
                let key = (product.code.clone(), round.label().to_string());
                priority_penalty.insert(key, vars.add(variable().min(0.0)));
            }
        }
    }

    DecisionVariables {
        x,
        y_counting,
        y_commercial,
        y_balance,
        z_fang,
        max_round,
        min_round,
        dev_plus,
        dev_minus,
        pmax,
        pmin,
        slack60,
        slack80,
        slack90,
        rounds_shortage,
        round_diff,
        sku_diff,
        balance_plus,
        balance_minus,
        priority_penalty,
    }
}

impl DecisionVariables {
    pub fn x_at(&self, product_code: &str, round_label: &str) -> Variable {
        self.x[&(product_code.to_string(), round_label.to_string())]
    }
}
