use alloc_cli::cli::{Cli, Commands};
use alloc_cli::commands::{solve, validate};
use clap::Parser;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder().with_max_level(cli.log_level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let result = match &cli.command {
        Commands::Solve { products, rounds, config, out } => solve::handle(products, rounds, config.as_ref(), out),
        Commands::Validate { products, rounds, config, allocation } => {
            validate::handle(products, rounds, config.as_ref(), allocation)
        }
    };

    if let Err(err) = result {
        error!("{err:?}");
        std::process::exit(1);
    }
}
