use crate::commands::util::{load_config, load_facade};
use crate::commands::AllocationDocument;
use alloc_core::fulfilment_row;
use alloc_solver::SolveOutcome;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn handle(products: &Path, rounds: &Path, config: Option<&PathBuf>, out: &Path) -> Result<()> {
    let facade = load_facade(products, rounds)?;
    let config = load_config(config.map(|p| p.as_path()))?;

    info!(
        products = facade.product_table().len(),
        rounds = facade.rounds().len(),
        "loaded upload"
    );

    let start = std::time::Instant::now();
    let outcome = alloc_solver::solve(&facade, &config).context("solving allocation")?;
    let elapsed = start.elapsed();

    let allocation = outcome.allocation();
    let document = AllocationDocument::from(allocation);
    let json = serde_json::to_string_pretty(&document).context("serializing allocation matrix")?;
    let mut file = File::create(out).with_context(|| format!("creating output file {}", out.display()))?;
    file.write_all(json.as_bytes()).context("writing allocation matrix")?;

    let status = match outcome {
        SolveOutcome::Optimal(_) => "optimal",
        SolveOutcome::TimeLimit(_) => "time_limit",
    };

    println!("Allocation solve: {status}");
    println!("  Solve time: {} ms", elapsed.as_millis());
    for product in facade.product_table() {
        let row = fulfilment_row(allocation.product_total(&product.code), product.demand);
        println!(
            "  {:<10} total={:>10.3} rate={:>6.1}%",
            product.code,
            row.total_allocation,
            row.fulfilment_rate * 100.0
        );
    }
    println!("Results written to {}", out.display());

    Ok(())
}
