//! Strategy pools - immutable roster/matrix snapshots
//!
//! The full roster and payoff matrix live once in an `Arena`. A `Pool` is a
//! view over it: the original indices of the surviving strategies, in roster
//! order. Removing strategies yields a new `Pool`; neither the arena nor the
//! previous pool is touched, so reductions can be taken independently (and in
//! parallel) from the same starting point.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::Result;
use crate::matrix::validate_shape;

/// Full roster and payoff matrix for one derivation run
#[derive(Clone, Debug, PartialEq)]
pub struct Arena {
    ids: Vec<String>,
    payoffs: Vec<Vec<f64>>,
}

impl Arena {
    pub fn new(ids: Vec<String>, payoffs: Vec<Vec<f64>>) -> Result<Self> {
        validate_shape(ids.len(), &payoffs)?;
        Ok(Self { ids, payoffs })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Strategy identifier at original index `index`
    pub fn id(&self, index: usize) -> &str {
        &self.ids[index]
    }

    pub fn payoff(&self, row: usize, col: usize) -> f64 {
        self.payoffs[row][col]
    }
}

/// Surviving strategies of an arena, in roster order
#[derive(Clone, Debug)]
pub struct Pool {
    arena: Arc<Arena>,
    members: Vec<usize>,
}

impl Pool {
    /// Pool containing every strategy of the arena
    pub fn full(arena: Arc<Arena>) -> Self {
        let members = (0..arena.len()).collect();
        Self { arena, members }
    }

    pub fn arena(&self) -> &Arc<Arena> {
        &self.arena
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Original indices of the surviving strategies
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Original index of the strategy at `position` in this pool
    pub fn original_index(&self, position: usize) -> usize {
        self.members[position]
    }

    /// Dense payoff matrix restricted to the surviving strategies
    pub fn payoff_matrix(&self) -> Vec<Vec<f64>> {
        self.members
            .iter()
            .map(|&i| self.members.iter().map(|&j| self.arena.payoff(i, j)).collect())
            .collect()
    }

    /// New pool without the strategies at `positions` (indices into this pool).
    ///
    /// Positions may be unsorted or repeated; out-of-range positions are
    /// ignored. Survivors keep their relative order.
    pub fn without_positions(&self, positions: &[usize]) -> Pool {
        if positions.is_empty() {
            return self.clone();
        }

        let mut removed = vec![false; self.members.len()];
        for &p in positions {
            if let Some(flag) = removed.get_mut(p) {
                *flag = true;
            }
        }

        let members = self
            .members
            .iter()
            .zip(&removed)
            .filter(|(_, &gone)| !gone)
            .map(|(&i, _)| i)
            .collect();
        Pool {
            arena: Arc::clone(&self.arena),
            members,
        }
    }

    /// New pool without the strategies whose original index is in `indices`
    pub fn without_indices(&self, indices: &BTreeSet<usize>) -> Pool {
        let members = self
            .members
            .iter()
            .copied()
            .filter(|i| !indices.contains(i))
            .collect();
        Pool {
            arena: Arc::clone(&self.arena),
            members,
        }
    }
}
