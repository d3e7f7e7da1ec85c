//! Shared file-loading helpers used by every command.

use alloc_core::{ConfigRecord, DataFacade};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn load_facade(products: &Path, rounds: &Path) -> Result<DataFacade> {
    alloc_io::load_facade(products, rounds)
        .with_context(|| format!("loading facade from {} and {}", products.display(), rounds.display()))
}

/// Loads a `ConfigRecord` from JSON, or the §3 defaults when no path is
/// given.
pub fn load_config(path: Option<&Path>) -> Result<ConfigRecord> {
    match path {
        None => Ok(ConfigRecord::default()),
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading configuration file {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing configuration JSON {}", path.display()))
        }
    }
}
