use crate::commands::util::{load_config, load_facade};
use crate::commands::AllocationDocument;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn handle(products: &Path, rounds: &Path, config: Option<&PathBuf>, allocation: &Path) -> Result<()> {
    let facade = load_facade(products, rounds)?;
    let config = load_config(config.map(|p| p.as_path()))?;

    let text = fs::read_to_string(allocation)
        .with_context(|| format!("reading allocation file {}", allocation.display()))?;
    let document: AllocationDocument =
        serde_json::from_str(&text).with_context(|| format!("parsing allocation JSON {}", allocation.display()))?;
    let matrix = document.into_matrix()?;

    let report = alloc_constraints::validate_all(&facade, &config, &matrix).context("validating allocation")?;

    println!("Validation: {}", if report.overall_valid { "PASS" } else { "FAIL" });
    if !report.skipped.is_empty() {
        println!("  Skipped families: {:?}", report.skipped);
    }
    let mut tags: Vec<_> = report.families.keys().copied().collect();
    tags.sort();
    for tag in tags {
        let family = &report.families[tag];
        if family.ok {
            println!("  {tag}: ok");
        } else {
            println!("  {tag}: {} violation(s)", family.violations.len());
            for violation in &family.violations {
                println!("    - {}", violation.message);
            }
        }
    }

    if !report.overall_valid {
        std::process::exit(1);
    }
    Ok(())
}
