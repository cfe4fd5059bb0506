//! Tier command - build a tier list from a directory of CSV files
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_input(), derive_tiers(), write_report()
//! - Level 3: CSV parsing, text rendering
//! - Level 4: formatting utilities

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use tierlist_core::{derive_tiers, TierConfig, TierError, TierList, TierMode};
use tierlist_solver::PivotSolver;

use crate::input::load_input;
use crate::report::{render_json, render_text};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args, Debug)]
pub struct TierArgs {
    /// Directory holding pokemon_list.csv and matrix.csv
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,

    /// Number of tiers to make
    #[arg(short = 'n', long, default_value = "1")]
    pub num_tiers: usize,

    /// Write the tier list to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub outfile: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Solve the members of each dominance round on the rayon thread pool
    #[arg(long)]
    pub parallel: bool,

    /// Weight a strategy needs (strictly above) to count as played
    #[arg(long, default_value = "0")]
    pub threshold: f64,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run tier command
///
/// 1. Load roster and matrix
/// 2. Derive the tier list
/// 3. Write the report
pub fn run(args: TierArgs, mode: TierMode) -> Result<()> {
    let config = tier_config(&args, mode);
    let (roster, matrix) = load_input(&args.directory)?;

    let tiers = derive_tiers(roster, matrix, &config, &PivotSolver::default())
        .map_err(|err| {
            let context = derive_error_context(&err);
            anyhow::Error::new(err).context(context)
        })?;
    tracing::info!("Built {} tiers", tiers.tier_count());

    write_report(&tiers, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn tier_config(args: &TierArgs, mode: TierMode) -> TierConfig {
    TierConfig {
        mode,
        tier_count: args.num_tiers,
        parallel: args.parallel,
        support_threshold: args.threshold,
    }
}

/// Input problems are reported differently from failures during solving
fn derive_error_context(err: &TierError) -> &'static str {
    if err.is_input_error() {
        "Invalid tier input"
    } else {
        "Failed to derive tier list"
    }
}

fn write_report(tiers: &TierList, args: &TierArgs) -> Result<()> {
    let report = if args.json {
        render_json(tiers)?
    } else {
        render_text(tiers)?
    };

    match &args.outfile {
        Some(path) => write_file(path, &report),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(report.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn write_file(path: &Path, report: &str) -> Result<()> {
    std::fs::write(path, report)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote tier list to {}", path.display());
    Ok(())
}
