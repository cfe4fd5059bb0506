//! Dominance tiering
//!
//! Tier 1 is the optimal support of the full game. For tier `t > 1`, every
//! member `y` of tier `t - 1` is removed together with all of its direct and
//! indirect dominators, and the reduced game is solved. Strategies that enter
//! the support and are not yet in an earlier tier join tier `t`, and `y` is
//! recorded as one of their direct dominators.
//!
//! The full roster and matrix are never reduced in place; every hypothetical
//! removal is a separate `Pool` snapshot.
//!
//! Level 2 - Phases and Level 3 - Steps

use std::collections::BTreeSet;
use std::sync::Arc;

use rayon::prelude::*;
use tierlist_solver::MatrixGameSolver;

use crate::config::TierConfig;
use crate::error::{Result, TierError};
use crate::graph::DominanceGraph;
use crate::pool::{Arena, Pool};
use crate::tiers::{DominanceTier, DominanceTierList, DominatorSet, TierMember};

/// Strategies nominated by one previous-tier member
struct Nomination {
    dominator: usize,
    support: Vec<usize>,
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Build dominance tiers over the whole arena
pub fn build_dominance_tiers<S>(
    arena: Arc<Arena>,
    solver: &S,
    config: &TierConfig,
) -> Result<DominanceTierList>
where
    S: MatrixGameSolver + ?Sized,
{
    let full = Pool::full(arena);
    let mut graph = DominanceGraph::new(full.len());
    let mut placement: Vec<Option<usize>> = vec![None; full.len()];
    let mut tiers: Vec<BTreeSet<usize>> = Vec::new();

    let first: BTreeSet<usize> = solve_support(&full, solver, config.support_threshold)?
        .into_iter()
        .collect();
    if first.is_empty() {
        return Err(TierError::EmptySupport { tier: 1 });
    }
    for &index in &first {
        placement[index] = Some(1);
    }
    tracing::debug!(tier = 1, size = first.len(), "dominance tier solved");
    tiers.push(first);

    for tier in 2..=config.tier_count {
        let previous = &tiers[tier - 2];
        let nominations = collect_nominations(&full, &graph, previous, solver, config)?;
        let members = place_nominations(tier, nominations, &mut placement, &mut graph);

        if members.is_empty() {
            tracing::debug!(tier, "no new strategies, stopping");
            break;
        }
        tracing::debug!(tier, size = members.len(), "dominance tier solved");
        tiers.push(members);
    }

    Ok(build_output(full.arena(), &tiers, &graph))
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Solve one reduced game per member of the previous tier.
///
/// Removal sets are taken from the graph as it stands before any of this
/// tier's edges are added. Results come back in ascending member order
/// whether or not the solves ran in parallel.
fn collect_nominations<S>(
    full: &Pool,
    graph: &DominanceGraph,
    previous: &BTreeSet<usize>,
    solver: &S,
    config: &TierConfig,
) -> Result<Vec<Nomination>>
where
    S: MatrixGameSolver + ?Sized,
{
    let removals: Vec<(usize, BTreeSet<usize>)> = previous
        .iter()
        .map(|&y| graph.closure(y).map(|closure| (y, closure)))
        .collect::<Result<_>>()?;

    let nominate = |(dominator, removed): &(usize, BTreeSet<usize>)| -> Result<Nomination> {
        let reduced = full.without_indices(removed);
        let support = if reduced.is_empty() {
            Vec::new()
        } else {
            solve_support(&reduced, solver, config.support_threshold)?
        };
        tracing::trace!(
            dominator,
            removed = removed.len(),
            nominated = support.len(),
            "reduced game solved"
        );
        Ok(Nomination {
            dominator: *dominator,
            support,
        })
    };

    if config.parallel {
        removals.par_iter().map(nominate).collect()
    } else {
        removals.iter().map(nominate).collect()
    }
}

/// Merge nominations into tier `tier`.
///
/// A strategy already placed in an earlier tier is skipped. Otherwise it
/// joins this tier (first nomination places it) and every nominating
/// dominator gets an edge into it.
fn place_nominations(
    tier: usize,
    nominations: Vec<Nomination>,
    placement: &mut [Option<usize>],
    graph: &mut DominanceGraph,
) -> BTreeSet<usize> {
    let mut members = BTreeSet::new();

    for nomination in nominations {
        for z in nomination.support {
            match placement[z] {
                Some(placed) if placed < tier => continue,
                _ => {}
            }
            placement[z] = Some(tier);
            members.insert(z);
            graph.add_edge(z, nomination.dominator);
        }
    }

    members
}

/// Original indices of the row player's optimal support over `pool`
fn solve_support<S>(pool: &Pool, solver: &S, threshold: f64) -> Result<Vec<usize>>
where
    S: MatrixGameSolver + ?Sized,
{
    let equilibrium = solver.solve(&pool.payoff_matrix())?;
    Ok(equilibrium
        .row_strategy
        .iter()
        .enumerate()
        .filter(|(_, &w)| w > threshold)
        .map(|(position, _)| pool.original_index(position))
        .collect())
}

fn build_output(
    arena: &Arena,
    tiers: &[BTreeSet<usize>],
    graph: &DominanceGraph,
) -> DominanceTierList {
    let member = |index: usize| TierMember {
        index,
        id: arena.id(index).to_string(),
    };

    let tiers = tiers
        .iter()
        .enumerate()
        .map(|(i, members)| DominanceTier {
            tier: i + 1,
            members: members.iter().map(|&index| member(index)).collect(),
        })
        .collect();

    let dominators = graph
        .dominated()
        .map(|(index, set)| DominatorSet {
            strategy: member(index),
            dominators: set.iter().map(|&d| member(d)).collect(),
        })
        .collect();

    DominanceTierList { tiers, dominators }
}
