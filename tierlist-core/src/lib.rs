//! Tierlist Core - Tier lists from head-to-head results
//!
//! This crate turns a matrix of matchup results into ranked tiers:
//! - Symmetrize raw scores into a zero-sum payoff matrix
//! - Flat tiers: solve, peel off the optimal support, repeat
//! - Dominance tiers: re-solve without each tier member and its dominators
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: derive_tiers (orchestration)
//! - Level 2: build_flat_tiers, build_dominance_tiers (phases)
//! - Level 3: solve a reduced game, merge nominations (steps)
//! - Level 4: pools, dominance graph, configuration

mod config;
mod dominator;
mod engine;
mod error;
mod flat;
mod graph;
mod matrix;
mod pool;
mod tiers;

pub use config::{TierConfig, TierMode};
pub use dominator::build_dominance_tiers;
pub use engine::derive_tiers;
pub use error::{Result, TierError};
pub use flat::build_flat_tiers;
pub use graph::DominanceGraph;
pub use matrix::{is_antisymmetric, symmetrize, validate_shape};
pub use pool::{Arena, Pool};
pub use tiers::{
    DominanceTier, DominanceTierList, DominatorSet, FlatTier, FlatTierList, TierEntry, TierList,
    TierMember,
};
