//! Flat tiering - iterative reduction
//!
//! Tier 1 is the support of the optimal mix over the whole roster. Remove it,
//! solve what is left, and the new support is tier 2; and so on.
//!
//! Level 2 - Phases and Level 3 - Steps

use std::cmp::Ordering;

use tierlist_solver::MatrixGameSolver;

use crate::config::TierConfig;
use crate::error::{Result, TierError};
use crate::pool::Pool;
use crate::tiers::{FlatTier, FlatTierList, TierEntry, TierMember};

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Build flat tiers until `config.tier_count` tiers exist or the pool is empty
pub fn build_flat_tiers<S>(pool: Pool, solver: &S, config: &TierConfig) -> Result<FlatTierList>
where
    S: MatrixGameSolver + ?Sized,
{
    let mut pool = pool;
    let mut tiers = Vec::new();

    for tier in 1..=config.tier_count {
        if pool.is_empty() {
            break;
        }

        let (flat_tier, positions) = solve_tier(&pool, solver, tier, config.support_threshold)?;
        tracing::debug!(
            tier,
            size = flat_tier.entries.len(),
            remaining = pool.len() - positions.len(),
            "flat tier solved"
        );

        pool = pool.without_positions(&positions);
        tiers.push(flat_tier);
    }

    let unranked = pool
        .members()
        .iter()
        .map(|&index| TierMember {
            index,
            id: pool.arena().id(index).to_string(),
        })
        .collect();

    Ok(FlatTierList { tiers, unranked })
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Solve the game over `pool`; return the tier and the pool positions it used
fn solve_tier<S>(
    pool: &Pool,
    solver: &S,
    tier: usize,
    threshold: f64,
) -> Result<(FlatTier, Vec<usize>)>
where
    S: MatrixGameSolver + ?Sized,
{
    let equilibrium = solver.solve(&pool.payoff_matrix())?;
    let support = ranked_support(&equilibrium.row_strategy, threshold);
    if support.is_empty() {
        return Err(TierError::EmptySupport { tier });
    }

    let entries = support
        .iter()
        .map(|&(position, weight)| {
            let index = pool.original_index(position);
            TierEntry {
                index,
                id: pool.arena().id(index).to_string(),
                weight,
            }
        })
        .collect();
    let positions = support.iter().map(|&(position, _)| position).collect();

    Ok((
        FlatTier {
            tier,
            value: equilibrium.value,
            entries,
        },
        positions,
    ))
}

/// Positions with weight above `threshold`, heaviest first.
///
/// The sort is stable, so equal weights stay in roster order.
fn ranked_support(strategy: &[f64], threshold: f64) -> Vec<(usize, f64)> {
    let mut support: Vec<(usize, f64)> = strategy
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, w)| w > threshold)
        .collect();
    support.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    support
}
