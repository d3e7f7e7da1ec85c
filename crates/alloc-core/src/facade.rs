//! Data Facade: read-only views over a loaded product table and the
//! per-round constraint table (spec §4.1).
//!
//! The facade itself never touches a file — `alloc-io` parses tables and
//! constructs a `DataFacade` from the resulting in-memory records, which
//! is also how the facade is exercised in this crate's own tests, without
//! any file I/O.

use crate::error::CigError;
use crate::product::ProductRecord;
use crate::round::Round;
use std::collections::HashMap;

/// Per-round price/volume parameters sourced from the round-constraint
/// table, before any configuration override is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundConstraintRaw {
    pub price_upper: f64,
    pub price_lower: f64,
    pub volume_target: f64,
}

/// Immutable, reload-free view over one upload's product and round data.
#[derive(Debug, Clone)]
pub struct DataFacade {
    products: Vec<ProductRecord>,
    rounds: Vec<Round>,
    round_constraints: HashMap<String, RoundConstraintRaw>,
}

impl DataFacade {
    /// Build a facade from already-parsed records.
    ///
    /// Fails with `CigError::Config` if any round lacks a constraint row —
    /// per spec §4.1, a missing round-constraint row is a load-time error,
    /// not something the solver discovers later.
    pub fn new(
        products: Vec<ProductRecord>,
        rounds: Vec<Round>,
        round_constraints: HashMap<String, RoundConstraintRaw>,
    ) -> Result<Self, CigError> {
        for round in &rounds {
            if !round_constraints.contains_key(round.label()) {
                return Err(CigError::Config(format!(
                    "round '{}' has no round-constraint row",
                    round.label()
                )));
            }
        }
        Ok(DataFacade {
            products,
            rounds,
            round_constraints,
        })
    }

    pub fn product_table(&self) -> &[ProductRecord] {
        &self.products
    }

    /// Rounds in canonical order (spec §3: position-sensitive).
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Table-sourced constraint parameters for `round`. Overrides from a
    /// `ConfigRecord` are applied by `alloc_constraints::params`, never
    /// here — the facade only ever returns table values.
    pub fn round_constraints(&self, round: &Round) -> Result<RoundConstraintRaw, CigError> {
        self.round_constraints
            .get(round.label())
            .copied()
            .ok_or_else(|| CigError::Config(format!("round '{}' has no constraint row", round)))
    }

    /// Mapping round label → product code → fixed value, for every cell
    /// with a positive pre-existing allocation.
    pub fn existing_allocations(&self) -> HashMap<String, HashMap<String, f64>> {
        let mut out: HashMap<String, HashMap<String, f64>> = HashMap::new();
        for round in &self.rounds {
            let mut per_product = HashMap::new();
            for product in &self.products {
                if let Some(v) = product.fixed_allocation(round) {
                    per_product.insert(product.code.clone(), v);
                }
            }
            out.insert(round.label().to_string(), per_product);
        }
        out
    }
}
