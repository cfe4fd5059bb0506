//! Dominance graph - who made whom newly optimal
//!
//! Edge `z <- y` means: with `y` (and everything dominating `y`) removed, `z`
//! entered the optimal support. Closures follow these edges upward.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::error::{Result, TierError};

static NO_DOMINATORS: BTreeSet<usize> = BTreeSet::new();

/// Traversal state of a node during a closure walk
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Visit {
    /// Still on the path from the start node
    Open,
    /// All of its dominators have been collected
    Done,
}

/// Direct dominators of every strategy, by original index
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DominanceGraph {
    dominators: Vec<BTreeSet<usize>>,
}

impl DominanceGraph {
    pub fn new(size: usize) -> Self {
        Self {
            dominators: vec![BTreeSet::new(); size],
        }
    }

    pub fn len(&self) -> usize {
        self.dominators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dominators.is_empty()
    }

    /// Record that `dominator` directly dominates `dominated`
    pub fn add_edge(&mut self, dominated: usize, dominator: usize) {
        let needed = dominated.max(dominator) + 1;
        if self.dominators.len() < needed {
            self.dominators.resize(needed, BTreeSet::new());
        }
        self.dominators[dominated].insert(dominator);
    }

    pub fn direct_dominators(&self, index: usize) -> &BTreeSet<usize> {
        self.dominators.get(index).unwrap_or(&NO_DOMINATORS)
    }

    /// Strategies with at least one direct dominator, by ascending index
    pub fn dominated(&self) -> impl Iterator<Item = (usize, &BTreeSet<usize>)> + '_ {
        self.dominators
            .iter()
            .enumerate()
            .filter(|(_, set)| !set.is_empty())
    }

    /// `index` plus all of its direct and indirect dominators.
    ///
    /// Walks the graph depth-first without recursion. Reaching a node that is
    /// still open on the current path means the graph has a cycle.
    pub fn closure(&self, index: usize) -> Result<BTreeSet<usize>> {
        let mut state: FxHashMap<usize, Visit> = FxHashMap::default();
        let mut closure = BTreeSet::new();
        // (node, leaving)
        let mut stack = vec![(index, false)];

        while let Some((node, leaving)) = stack.pop() {
            if leaving {
                state.insert(node, Visit::Done);
                continue;
            }
            match state.get(&node) {
                Some(Visit::Open) => return Err(TierError::DominanceCycle { index: node }),
                Some(Visit::Done) => continue,
                None => {}
            }

            state.insert(node, Visit::Open);
            closure.insert(node);
            stack.push((node, true));
            stack.extend(self.direct_dominators(node).iter().map(|&d| (d, false)));
        }

        Ok(closure)
    }
}
