//! Configuration types for tier derivation
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};

use crate::error::{Result, TierError};

/// Tier construction algorithm
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierMode {
    /// Solve, peel off the optimal support, repeat
    Flat,
    /// Re-solve without each previous-tier member and its dominators
    Dominance,
}

impl Default for TierMode {
    fn default() -> Self {
        TierMode::Flat
    }
}

/// Tier derivation configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Tier construction algorithm
    pub mode: TierMode,
    /// Maximum number of tiers to build (at least 1)
    pub tier_count: usize,
    /// Run the per-strategy solves of a dominance round on the rayon pool.
    /// Off by default; output is identical either way.
    pub parallel: bool,
    /// Strategies with weight strictly above this are in the support
    pub support_threshold: f64,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            mode: TierMode::Flat,
            tier_count: 1,
            parallel: false,
            support_threshold: 0.0,
        }
    }
}

impl TierConfig {
    /// Create flat (iterative reduction) config
    pub fn flat(tier_count: usize) -> Self {
        Self {
            mode: TierMode::Flat,
            tier_count,
            ..Default::default()
        }
    }

    /// Create dominance config
    pub fn dominance(tier_count: usize) -> Self {
        Self {
            mode: TierMode::Dominance,
            tier_count,
            ..Default::default()
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_support_threshold(mut self, threshold: f64) -> Self {
        self.support_threshold = threshold;
        self
    }

    /// Reject configurations that cannot produce a tier list
    pub fn validate(&self) -> Result<()> {
        if self.tier_count == 0 {
            return Err(TierError::InvalidConfig(
                "tier count must be at least 1".to_string(),
            ));
        }
        if !self.support_threshold.is_finite() || self.support_threshold < 0.0 {
            return Err(TierError::InvalidConfig(format!(
                "support threshold must be a non-negative number, got {}",
                self.support_threshold
            )));
        }
        Ok(())
    }
}
