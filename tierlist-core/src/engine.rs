//! Tier derivation entry point
//!
//! Level 1 - Orchestration

use std::sync::Arc;

use tierlist_solver::MatrixGameSolver;

use crate::config::{TierConfig, TierMode};
use crate::dominator::build_dominance_tiers;
use crate::error::Result;
use crate::flat::build_flat_tiers;
use crate::matrix::{symmetrize, validate_shape};
use crate::pool::{Arena, Pool};
use crate::tiers::TierList;

/// Derive a tier list from a roster and its raw head-to-head matrix.
///
/// This function reads like a table of contents:
/// 1. Validate configuration and input shape
/// 2. Symmetrize the raw matrix into a zero-sum payoff matrix
/// 3. Build tiers with the configured algorithm
pub fn derive_tiers<S>(
    roster: Vec<String>,
    raw_matrix: Vec<Vec<f64>>,
    config: &TierConfig,
    solver: &S,
) -> Result<TierList>
where
    S: MatrixGameSolver + ?Sized,
{
    config.validate()?;
    validate_shape(roster.len(), &raw_matrix)?;

    tracing::info!("Symmetrizing matrix...");
    let mut payoffs = raw_matrix;
    symmetrize(&mut payoffs);
    let arena = Arc::new(Arena::new(roster, payoffs)?);

    match config.mode {
        TierMode::Flat => {
            tracing::info!(
                "Solving flat tiers: {} strategies, up to {} tiers",
                arena.len(),
                config.tier_count
            );
            build_flat_tiers(Pool::full(arena), solver, config).map(TierList::Flat)
        }
        TierMode::Dominance => {
            tracing::info!(
                "Solving dominance tiers: {} strategies, up to {} tiers",
                arena.len(),
                config.tier_count
            );
            build_dominance_tiers(arena, solver, config).map(TierList::Dominance)
        }
    }
}
