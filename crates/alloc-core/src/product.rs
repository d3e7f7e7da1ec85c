//! Product (SKU) records and their derived classification flags.

use crate::round::Round;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default pack-to-stick ratio when a product row omits it.
pub const DEFAULT_STICKS_PER_BUNDLE: f64 = 200.0;

/// Sticks contained in one box, used to derive `unit_box_price`.
pub const STICKS_PER_BOX: f64 = 50_000.0;

/// C-type subtype, derived from a substring match on the raw subtype tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CSubtype {
    /// 方 — square.
    Fang,
    /// 长 — long.
    Chang,
    /// 细 — slim.
    Xi,
    /// No recognized subtype tag, or the product isn't C-type.
    None,
}

impl CSubtype {
    fn from_tag(raw: &str) -> Self {
        if raw.contains('方') {
            CSubtype::Fang
        } else if raw.contains('长') {
            CSubtype::Chang
        } else if raw.contains('细') {
            CSubtype::Xi
        } else {
            CSubtype::None
        }
    }
}

/// One SKU row, immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub code: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub wholesale_price: f64,
    pub sticks_per_bundle: f64,
    pub demand: f64,
    pub available_supply: f64,

    /// Raw C-grade tag; non-empty means C-type.
    pub c_flag: String,
    /// Raw subtype tag, substring-matched against 方/长/细.
    pub c_subtype_raw: String,
    /// Raw demand-priority tag; contains 需 means demand-priority.
    pub demand_tag: String,
    /// Raw price-priority tag; contains 价 means price-priority.
    pub price_tag: String,

    /// Pre-existing fixed allocation per round label; 0 or absent means
    /// "not fixed".
    pub existing_allocations: HashMap<String, f64>,
}

impl ProductRecord {
    /// `true` when `c_flag` is non-empty.
    pub fn is_c_type(&self) -> bool {
        !self.c_flag.trim().is_empty()
    }

    /// Subtype derived from `c_subtype_raw`. Only meaningful when
    /// `is_c_type()` is true, but computed unconditionally since the
    /// subtype tag is independent raw text.
    pub fn c_subtype(&self) -> CSubtype {
        CSubtype::from_tag(&self.c_subtype_raw)
    }

    /// `true` when `demand_tag` contains 需.
    pub fn is_demand_based(&self) -> bool {
        self.demand_tag.contains('需')
    }

    /// `true` when `price_tag` contains 价.
    pub fn is_price_based(&self) -> bool {
        self.price_tag.contains('价')
    }

    /// Per-box wholesale price: `wholesale_price * 50000 / sticks_per_bundle`.
    pub fn unit_box_price(&self) -> f64 {
        let sticks = if self.sticks_per_bundle > 0.0 {
            self.sticks_per_bundle
        } else {
            DEFAULT_STICKS_PER_BUNDLE
        };
        self.wholesale_price * STICKS_PER_BOX / sticks
    }

    /// Fixed allocation for `round`, or `None` if not fixed (value is
    /// absent or 0).
    pub fn fixed_allocation(&self, round: &Round) -> Option<f64> {
        self.existing_allocations
            .get(round.label())
            .copied()
            .filter(|v| *v > 0.0)
    }

    /// `true` if this product has any fixed cell in any round.
    pub fn has_any_fixed_cell(&self) -> bool {
        self.existing_allocations.values().any(|v| *v > 0.0)
    }
}
