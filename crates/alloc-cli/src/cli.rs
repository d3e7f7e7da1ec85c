use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve the release allocation for one product/round upload and
    /// write the resulting allocation matrix to a JSON file.
    Solve {
        /// Path to the product table CSV.
        #[arg(long)]
        products: PathBuf,
        /// Path to the round-constraint table CSV.
        #[arg(long)]
        rounds: PathBuf,
        /// Optional JSON configuration overriding §3 defaults.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Where to write the solved allocation matrix.
        #[arg(long, default_value = "allocation.json")]
        out: PathBuf,
    },
    /// Validate a previously solved allocation matrix against every
    /// constraint family, without invoking the solver.
    Validate {
        /// Path to the product table CSV.
        #[arg(long)]
        products: PathBuf,
        /// Path to the round-constraint table CSV.
        #[arg(long)]
        rounds: PathBuf,
        /// Optional JSON configuration overriding §3 defaults.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Path to a JSON allocation matrix, as produced by `solve`.
        #[arg(long)]
        allocation: PathBuf,
    },
}
