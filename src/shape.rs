//! `ConvergingShape` - a description of two sequences that may share a tail.
//!
//! A shape is three runs of values: the private prefix of A, the private
//! prefix of B, and the shared suffix. It can be materialized into any of the
//! node representations, so one description drives tests and benchmarks
//! across all of them.

use crate::algorithms::intersection::ConvergenceStats;
use crate::collections::{ConvergingLists, NodeRef, SharedList, SuccessorTable};
use crate::GhostToken;

/// Two sequences described as `prefix_a ++ shared` and `prefix_b ++ shared`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvergingShape<T> {
    /// Values only sequence A walks through.
    pub prefix_a: Vec<T>,
    /// Values only sequence B walks through.
    pub prefix_b: Vec<T>,
    /// Values of the shared suffix. Empty means the sequences are disjoint.
    pub shared: Vec<T>,
}

/// Heads of a materialized shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heads<N> {
    /// Head of sequence A.
    pub a: Option<N>,
    /// Head of sequence B.
    pub b: Option<N>,
    /// First node of the shared suffix: the expected intersection.
    pub shared: Option<N>,
}

impl<T> ConvergingShape<T> {
    /// Creates a shape from its three runs.
    pub fn new(prefix_a: Vec<T>, prefix_b: Vec<T>, shared: Vec<T>) -> Self {
        Self {
            prefix_a,
            prefix_b,
            shared,
        }
    }

    /// Length of sequence A.
    pub fn len_a(&self) -> usize {
        self.prefix_a.len() + self.shared.len()
    }

    /// Length of sequence B.
    pub fn len_b(&self) -> usize {
        self.prefix_b.len() + self.shared.len()
    }

    /// What a convergence analysis of this shape must report.
    pub fn expected_stats(&self) -> ConvergenceStats {
        ConvergenceStats {
            len_a: self.len_a(),
            len_b: self.len_b(),
            prefix_a: self.prefix_a.len(),
            prefix_b: self.prefix_b.len(),
            shared_len: self.shared.len(),
            converges: !self.shared.is_empty(),
        }
    }

    /// Builds the shape as a [`SuccessorTable`] (payloads are dropped).
    ///
    /// The shared suffix occupies the lowest indices, followed by the nodes
    /// of prefix A, then those of prefix B.
    pub fn build_table(&self) -> (SuccessorTable, Heads<usize>) {
        fn link_run(table: &mut SuccessorTable, len: usize, tail: Option<usize>) -> Option<usize> {
            (0..len).fold(tail, |next, _| Some(table.push(next)))
        }

        let mut table = SuccessorTable::new();
        let shared = link_run(&mut table, self.shared.len(), None);
        let a = link_run(&mut table, self.prefix_a.len(), shared);
        let b = link_run(&mut table, self.prefix_b.len(), shared);
        (table, Heads { a, b, shared })
    }
}

impl<T: Clone> ConvergingShape<T> {
    /// Builds the shape inside `lists`, creating the shared suffix once.
    pub fn build_lists<'brand>(
        &self,
        lists: &ConvergingLists<'brand, T>,
        token: &mut GhostToken<'brand>,
    ) -> Heads<NodeRef<'brand>> {
        let shared = lists.chain(token, self.shared.iter().cloned(), None);
        let a = lists.chain(token, self.prefix_a.iter().cloned(), shared);
        let b = lists.chain(token, self.prefix_b.iter().cloned(), shared);
        Heads { a, b, shared }
    }

    /// Builds the shape as reference-counted lists `(a, b, shared)`.
    pub fn build_shared(&self) -> (SharedList<T>, SharedList<T>, SharedList<T>) {
        let shared = SharedList::from_values(self.shared.iter().cloned(), &SharedList::new());
        let a = SharedList::from_values(self.prefix_a.iter().cloned(), &shared);
        let b = SharedList::from_values(self.prefix_b.iter().cloned(), &shared);
        (a, b, shared)
    }

    /// Values sequence A walks through, head first.
    pub fn values_a(&self) -> Vec<T> {
        self.prefix_a.iter().chain(&self.shared).cloned().collect()
    }

    /// Values sequence B walks through, head first.
    pub fn values_b(&self) -> Vec<T> {
        self.prefix_b.iter().chain(&self.shared).cloned().collect()
    }
}
