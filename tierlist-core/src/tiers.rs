//! Tier list output types

use serde::Serialize;

/// A strategy, by original roster index and identifier
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TierMember {
    pub index: usize,
    pub id: String,
}

/// A strategy in a flat tier with its weight in the optimal mix
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TierEntry {
    pub index: usize,
    pub id: String,
    pub weight: f64,
}

/// One tier of a flat tier list, entries by descending weight
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlatTier {
    /// Tier number, starting at 1
    pub tier: usize,
    /// Value to the row player of the game this tier was solved from
    pub value: f64,
    pub entries: Vec<TierEntry>,
}

/// Result of iterative-reduction tiering
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlatTierList {
    pub tiers: Vec<FlatTier>,
    /// Strategies left over when the tier limit was reached
    pub unranked: Vec<TierMember>,
}

impl FlatTierList {
    /// Tier number of the strategy with original index `index`
    pub fn tier_of(&self, index: usize) -> Option<usize> {
        self.tiers
            .iter()
            .find(|t| t.entries.iter().any(|e| e.index == index))
            .map(|t| t.tier)
    }

    /// Number of strategies placed in some tier
    pub fn ranked_count(&self) -> usize {
        self.tiers.iter().map(|t| t.entries.len()).sum()
    }
}

/// One tier of a dominance tier list, members by ascending index
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DominanceTier {
    pub tier: usize,
    pub members: Vec<TierMember>,
}

/// Direct dominators of one strategy
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DominatorSet {
    pub strategy: TierMember,
    pub dominators: Vec<TierMember>,
}

/// Result of dominance tiering
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DominanceTierList {
    pub tiers: Vec<DominanceTier>,
    /// Every strategy with at least one direct dominator, by ascending index
    pub dominators: Vec<DominatorSet>,
}

impl DominanceTierList {
    pub fn tier_of(&self, index: usize) -> Option<usize> {
        self.tiers
            .iter()
            .find(|t| t.members.iter().any(|m| m.index == index))
            .map(|t| t.tier)
    }

    /// Direct dominators of the strategy with original index `index`
    pub fn dominators_of(&self, index: usize) -> Vec<usize> {
        self.dominators
            .iter()
            .find(|d| d.strategy.index == index)
            .map(|d| d.dominators.iter().map(|m| m.index).collect())
            .unwrap_or_default()
    }
}

/// Tier list produced by either mode
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TierList {
    Flat(FlatTierList),
    Dominance(DominanceTierList),
}

impl TierList {
    pub fn tier_count(&self) -> usize {
        match self {
            TierList::Flat(list) => list.tiers.len(),
            TierList::Dominance(list) => list.tiers.len(),
        }
    }

    pub fn tier_of(&self, index: usize) -> Option<usize> {
        match self {
            TierList::Flat(list) => list.tier_of(index),
            TierList::Dominance(list) => list.tier_of(index),
        }
    }
}
