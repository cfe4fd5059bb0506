//! Tierlist CLI - Command-line interface
//!
//! Commands:
//! - flat: peel off the optimal meta tier by tier (alias: smogon)
//! - dominance: re-solve without each tier member and its dominators (alias: dominator)

mod input;
mod report;
mod tier_cmd;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tierlist_core::TierMode;
use tier_cmd::TierArgs;

#[derive(Parser)]
#[command(name = "tierlist")]
#[command(about = "Tier lists from head-to-head matchup results")]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve, remove the optimal meta, solve again
    #[command(alias = "smogon")]
    Flat(TierArgs),
    /// Re-solve without each tier member and everything that dominates it
    #[command(alias = "dominator")]
    Dominance(TierArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Flat(args) => tier_cmd::run(args, TierMode::Flat),
        Commands::Dominance(args) => tier_cmd::run(args, TierMode::Dominance),
    }
}

/// Log to stderr so reports on stdout stay clean
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
