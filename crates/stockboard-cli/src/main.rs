mod board;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stockboard-cli")]
#[command(about = "Product availability board for the catalog API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch products and availability, and write the joined board
    Run(BoardArgs),
    /// Fetch products only and write the board without availability
    Products(BoardArgs),
}

/// Overrides applied on top of the environment configuration.
#[derive(Debug, Default, Args)]
struct BoardArgs {
    /// Where to write the HTML board (overrides `STOCKBOARD_OUTPUT_PATH`)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Only accept the validated response shapes
    #[arg(long)]
    strict: bool,

    /// Category to fetch; repeat for several (overrides `STOCKBOARD_CATEGORIES`)
    #[arg(long = "category", value_name = "NAME")]
    categories: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = stockboard_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Products(args)) => {
            board::run_products(&board::apply_overrides(config, &args)).await
        }
        Some(Commands::Run(args)) => board::run_board(&board::apply_overrides(config, &args)).await,
        None => board::run_board(&config).await,
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
