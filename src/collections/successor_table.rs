//! `SuccessorTable` - singly-linked structure as a flat table of successor indices.
//!
//! Node `i` is simply the index `i`; `table[i]` names its successor. This is
//! the lightest representation of converging sequences: no payloads, no
//! allocation per node, and identity is index equality.

use crate::algorithms::chain::{ForwardChain, Nodes};
use crate::algorithms::intersection::find_intersection;

/// A table mapping every node index to its successor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuccessorTable {
    next: Vec<Option<usize>>,
}

impl SuccessorTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing successor table.
    ///
    /// Successors that point past the end of the table are treated as the
    /// end of the sequence.
    pub fn from_successors(next: Vec<Option<usize>>) -> Self {
        Self { next }
    }

    /// Adds a node whose successor is `next`, returning its index.
    pub fn push(&mut self, next: Option<usize>) -> usize {
        self.next.push(next);
        self.next.len() - 1
    }

    /// Successor of `node`; `None` at the end or for unknown nodes.
    #[inline]
    pub fn successor(&self, node: usize) -> Option<usize> {
        self.next
            .get(node)
            .copied()
            .flatten()
            .filter(|&next| next < self.next.len())
    }

    /// Returns `true` if `node` is an index of this table.
    #[inline]
    pub fn contains(&self, node: usize) -> bool {
        node < self.next.len()
    }

    /// Number of nodes in the table.
    pub fn len(&self) -> usize {
        self.next.len()
    }

    /// Returns `true` if the table has no nodes.
    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    /// Walks the sequence starting at `head`. An unknown head walks nothing.
    pub fn walk(&self, head: Option<usize>) -> Nodes<&Self> {
        Nodes::new(self, head)
    }

    /// First node shared by the sequences at `head_a` and `head_b`.
    ///
    /// Heads that are not indices of the table count as empty sequences.
    pub fn intersection(&self, head_a: Option<usize>, head_b: Option<usize>) -> Option<usize> {
        find_intersection(self, head_a, head_b)
    }
}

impl ForwardChain for SuccessorTable {
    type Node = usize;

    #[inline]
    fn successor(&self, node: &usize) -> Option<usize> {
        SuccessorTable::successor(self, *node)
    }

    #[inline]
    fn same_node(&self, a: &usize, b: &usize) -> bool {
        a == b
    }

    #[inline]
    fn contains(&self, node: &usize) -> bool {
        SuccessorTable::contains(self, *node)
    }
}
