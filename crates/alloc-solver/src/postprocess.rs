//! Two-pass cleanup applied to the solver's raw solution (spec §4.3.5).
//! Neither pass changes a SKU's total allocation — they only move mass
//! between rounds and absorb rounding residue.

use alloc_core::{AllocationMatrix, DataFacade};

/// Cells below this many boxes are considered noise, not a meaningful
/// per-round allocation.
const SMALL_ALLOCATION_THRESHOLD: f64 = 0.1;

/// Residual unmet demand this small or smaller is rounding noise, not a
/// real shortfall, and gets folded back into the allocation.
const TINY_UNMET_DEMAND_THRESHOLD: f64 = 0.01;

/// Pass 1: coalesce small per-round allocations into the round that
/// already carries the SKU's largest allocation.
pub fn coalesce_small_allocations(facade: &DataFacade, a: &mut AllocationMatrix) {
    let rounds = facade.rounds();
    for product in facade.product_table() {
        let cells: Vec<(usize, f64)> = rounds
            .iter()
            .enumerate()
            .map(|(idx, r)| (idx, a.get(&product.code, r)))
            .collect();

        let small: Vec<(usize, f64)> = cells
            .iter()
            .copied()
            .filter(|(_, v)| *v > 0.0 && *v < SMALL_ALLOCATION_THRESHOLD)
            .collect();
        if small.is_empty() {
            continue;
        }
        let small_total: f64 = small.iter().map(|(_, v)| v).sum();

        let target = cells
            .iter()
            .filter(|(_, v)| *v >= SMALL_ALLOCATION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(idx, _)| *idx)
            .or_else(|| {
                if small_total >= SMALL_ALLOCATION_THRESHOLD {
                    small.first().map(|(idx, _)| *idx)
                } else {
                    None
                }
            });

        for (idx, _) in &small {
            a.set(&product.code, &rounds[*idx], 0.0);
        }
        if let Some(target_idx) = target {
            let current = a.get(&product.code, &rounds[target_idx]);
            a.set(&product.code, &rounds[target_idx], current + small_total);
        }
    }
}

/// Pass 2: absorb tiny leftover unmet demand (rounding residue, never a
/// real shortfall) into the SKU's largest already-positive round.
pub fn absorb_tiny_unmet_demand(facade: &DataFacade, a: &mut AllocationMatrix) {
    let rounds = facade.rounds();
    for product in facade.product_table() {
        let residue = product.demand - a.product_total(&product.code);
        if residue <= 0.0 || residue > TINY_UNMET_DEMAND_THRESHOLD {
            continue;
        }

        let target = rounds
            .iter()
            .map(|r| (r, a.get(&product.code, r)))
            .filter(|(_, v)| *v > 0.0)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(r, _)| r)
            .unwrap_or(&rounds[0]);

        let current = a.get(&product.code, target);
        a.set(&product.code, target, current + residue);
    }
}

/// Runs both passes, then rounds every cell to three decimals.
pub fn run(facade: &DataFacade, a: &mut AllocationMatrix) {
    coalesce_small_allocations(facade, a);
    absorb_tiny_unmet_demand(facade, a);
    a.round_to_three_decimals();
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc_core::facade::RoundConstraintRaw;
    use alloc_core::{ProductRecord, Round};
    use std::collections::HashMap;

    fn facade() -> DataFacade {
        let rounds = vec![Round::parse("第一轮").unwrap(), Round::parse("第二轮").unwrap()];
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
        for r in &rounds {
            constraints.insert(
                r.label().to_string(),
                RoundConstraintRaw {
                    price_upper: 1e9,
                    price_lower: 0.0,
                    volume_target: 1000.0,
                },
            );
        }
        DataFacade::new(vec![product], rounds, constraints).unwrap()
    }

    #[test]
    fn small_allocation_folds_into_largest_round() {
        let facade = facade();
        let rounds = facade.rounds();
        let mut a = AllocationMatrix::new();
        a.set("A001", &rounds[0], 95.0);
        a.set("A001", &rounds[1], 0.05);
        coalesce_small_allocations(&facade, &mut a);
        assert_eq!(a.get("A001", &rounds[0]), 95.05);
        assert_eq!(a.get("A001", &rounds[1]), 0.0);
    }

    #[test]
    fn tiny_residue_absorbed_into_positive_round() {
        let facade = facade();
        let rounds = facade.rounds();
        let mut a = AllocationMatrix::new();
        a.set("A001", &rounds[0], 99.995);
        absorb_tiny_unmet_demand(&facade, &mut a);
        assert_eq!(a.get("A001", &rounds[0]), 100.0);
    }

    #[test]
    fn residue_larger_than_threshold_is_left_alone() {
        let facade = facade();
        let rounds = facade.rounds();
        let mut a = AllocationMatrix::new();
        a.set("A001", &rounds[0], 50.0);
        absorb_tiny_unmet_demand(&facade, &mut a);
        assert_eq!(a.get("A001", &rounds[0]), 50.0);
    }
}
