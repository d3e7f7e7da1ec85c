//! Configuration record: all fields optional, defaults per spec §3.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Objective term weights (spec §4.3.3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveWeights {
    pub maximize_allocation_weight: f64,
    pub round_balance_weight: f64,
    pub round_variance_weight: f64,
    pub product_balance_weight: f64,
    pub smooth_transition_weight: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        ObjectiveWeights {
            maximize_allocation_weight: 1000.0,
            round_balance_weight: 800.0,
            round_variance_weight: 400.0,
            product_balance_weight: 100.0,
            smooth_transition_weight: 300.0,
        }
    }
}

/// Toggles for each constraint family. C1, C4, C5 are always enabled and
/// are intentionally not represented here — see
/// `alloc_constraints::aggregate::ALWAYS_ENABLED_FAMILIES`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledFamilies {
    pub c2_price: bool,
    pub c3_volume: bool,
    pub c6_demand_split: bool,
    pub c7_demand_priority: bool,
    pub c8_price_priority: bool,
    pub c9_c_type: bool,
    pub c10_balance: bool,
}

impl Default for EnabledFamilies {
    fn default() -> Self {
        EnabledFamilies {
            c2_price: true,
            c3_volume: true,
            c6_demand_split: true,
            c7_demand_priority: true,
            c8_price_priority: true,
            c9_c_type: true,
            c10_balance: true,
        }
    }
}

/// A configuration record, as uploaded by the caller. Every field is
/// optional; `ConfigRecord::default()` reproduces the table values
/// unmodified and every `enable_*` flag on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRecord {
    pub volume_tolerance: f64,
    pub price_based_ratio: f64,
    pub c_type_ratio: f64,
    pub c_type_volume_limit: f64,
    pub chang_type_ratio: f64,
    pub chang_type_volume_limit: f64,
    pub xi_type_ratio: f64,
    pub xi_type_volume_limit: f64,

    /// Overrides keyed by round label; rounds absent fall back to table
    /// values (§4.1 override contract).
    pub price_upper_limits: HashMap<String, f64>,
    pub price_lower_limits: HashMap<String, f64>,
    pub volume_limits: HashMap<String, f64>,

    pub enabled: EnabledFamilies,
    pub weights: ObjectiveWeights,

    /// Wall-clock solve limit in seconds (§4.3.4).
    pub time_limit_seconds: f64,
}

impl Default for ConfigRecord {
    fn default() -> Self {
        ConfigRecord {
            volume_tolerance: 0.005,
            price_based_ratio: 0.30,
            c_type_ratio: 0.40,
            c_type_volume_limit: 4900.0,
            chang_type_ratio: 0.20,
            chang_type_volume_limit: 1000.0,
            xi_type_ratio: 0.60,
            xi_type_volume_limit: 3000.0,
            price_upper_limits: HashMap::new(),
            price_lower_limits: HashMap::new(),
            volume_limits: HashMap::new(),
            enabled: EnabledFamilies::default(),
            weights: ObjectiveWeights::default(),
            time_limit_seconds: 300.0,
        }
    }
}
