//! # alloc-io: table readers for the allocation pipeline
//!
//! Thin glue (spec §1, "out of scope"): reads the product table and the
//! round-constraint table from CSV and hands parsed records to
//! `alloc-core::DataFacade`. No constraint or solver logic lives here.

pub mod product_table;
pub mod round_table;

use alloc_core::{CigError, DataFacade};
use std::path::Path;

/// Load both tables and assemble a `DataFacade`.
pub fn load_facade(product_table_path: &Path, round_table_path: &Path) -> Result<DataFacade, CigError> {
    let (rounds, round_constraints) = round_table::load_round_constraints(round_table_path)?;
    let products = product_table::load_product_table(product_table_path, &rounds)?;
    DataFacade::new(products, rounds, round_constraints)
}
