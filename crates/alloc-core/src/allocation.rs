//! The allocation matrix A: the system's single output artifact.

use crate::round::Round;
use std::collections::BTreeMap;

/// Allocation matrix A ∈ ℝ₊^{P×R}, keyed by product code and round label
/// so cells survive independent of any particular `Vec` ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationMatrix {
    cells: BTreeMap<(String, String), f64>,
}

impl AllocationMatrix {
    pub fn new() -> Self {
        AllocationMatrix::default()
    }

    /// Set `A[product_code, round]`. Negative values are clamped to 0
    /// (invariant I4).
    pub fn set(&mut self, product_code: &str, round: &Round, value: f64) {
        let value = value.max(0.0);
        self.cells
            .insert((product_code.to_string(), round.label().to_string()), value);
    }

    /// `A[product_code, round]`, or 0.0 if the cell was never set.
    pub fn get(&self, product_code: &str, round: &Round) -> f64 {
        self.cells
            .get(&(product_code.to_string(), round.label().to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Σ_r A[product_code, r] — total allocation for one SKU.
    pub fn product_total(&self, product_code: &str) -> f64 {
        self.cells
            .iter()
            .filter(|((code, _), _)| code == product_code)
            .map(|(_, v)| v)
            .sum()
    }

    /// Σ_p A[p, round] — total volume for one round (V_r in the spec).
    pub fn round_total(&self, round: &Round) -> f64 {
        self.cells
            .iter()
            .filter(|((_, label), _)| label == round.label())
            .map(|(_, v)| v)
            .sum()
    }

    /// Number of rounds with `A[product_code, r] > 0`, used by C6.
    pub fn rounds_used(&self, product_code: &str) -> usize {
        self.cells
            .iter()
            .filter(|((code, _), v)| code == product_code && **v > 0.0)
            .count()
    }

    /// Round every cell to three decimals (spec §4.3.5 final step).
    pub fn round_to_three_decimals(&mut self) {
        for v in self.cells.values_mut() {
            *v = (*v * 1000.0).round() / 1000.0;
        }
    }

    /// Iterate all `((product_code, round_label), value)` cells.
    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), &f64)> {
        self.cells.iter()
    }
}

/// Derived output columns per product: `总分配量` (total) and `分配率`
/// (fulfilment rate, or 1.0 if demand is 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FulfilmentRow {
    pub total_allocation: f64,
    pub fulfilment_rate: f64,
}

pub fn fulfilment_row(total_allocation: f64, demand: f64) -> FulfilmentRow {
    let fulfilment_rate = if demand > 0.0 {
        total_allocation / demand
    } else {
        1.0
    };
    FulfilmentRow {
        total_allocation,
        fulfilment_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_roundtrip() {
        let r1 = Round::parse("第一轮").unwrap();
        let mut a = AllocationMatrix::new();
        a.set("A001", &r1, 40.0);
        assert_eq!(a.get("A001", &r1), 40.0);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        let r1 = Round::parse("第一轮").unwrap();
        let mut a = AllocationMatrix::new();
        a.set("A001", &r1, -5.0);
        assert_eq!(a.get("A001", &r1), 0.0);
    }

    #[test]
    fn totals_sum_across_rounds_and_products() {
        let r1 = Round::parse("第一轮").unwrap();
        let r2 = Round::parse("第二轮").unwrap();
        let mut a = AllocationMatrix::new();
        a.set("A001", &r1, 30.0);
        a.set("A001", &r2, 10.0);
        a.set("A002", &r1, 5.0);
        assert_eq!(a.product_total("A001"), 40.0);
        assert_eq!(a.round_total(&r1), 35.0);
        assert_eq!(a.rounds_used("A001"), 2);
    }

    #[test]
    fn rounding_to_three_decimals() {
        let r1 = Round::parse("第一轮").unwrap();
        let mut a = AllocationMatrix::new();
        a.set("A001", &r1, 1.0 / 3.0);
        a.round_to_three_decimals();
        assert_eq!(a.get("A001", &r1), 0.333);
    }

    #[test]
    fn fulfilment_rate_is_one_when_demand_zero() {
        let row = fulfilment_row(0.0, 0.0);
        assert_eq!(row.fulfilment_rate, 1.0);
        let row2 = fulfilment_row(50.0, 100.0);
        assert_eq!(row2.fulfilment_rate, 0.5);
    }
}
