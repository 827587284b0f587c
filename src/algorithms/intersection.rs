//! Intersection of two converging singly-linked sequences.
//!
//! Two sequences either share no node at all, or share a suffix: from some
//! node `N` on, both walk through exactly the same nodes. The search below
//! finds `N` with the length-equalization technique:
//!
//! 1. Walk both sequences once to measure `len_a` and `len_b`.
//! 2. Skip `|len_a - len_b|` nodes at the head of the longer one.
//! 3. Walk both cursors in lock-step, comparing node identity.
//!
//! After step 2 both cursors are equally far from the end. A shared suffix
//! is entered by both cursors on the same step, so the first coincidence is
//! the intersection node. If there is none, both cursors hit the end together.
//!
//! Time is linear in `len_a + len_b`; extra memory is two cursors.
//!
//! # Preconditions
//!
//! Both sequences must be acyclic. A successor cycle makes the measuring walk
//! in step 1 run forever. Cycles are not detected.

use super::chain::ForwardChain;
use serde::{Deserialize, Serialize};

/// Counts the nodes reachable from `head`, including `head` itself.
///
/// `None`, or a head the chain does not contain, is the empty sequence and
/// has length 0.
pub fn sequence_len<C>(chain: &C, head: Option<C::Node>) -> usize
where
    C: ForwardChain + ?Sized,
{
    let mut count = 0;
    let mut cursor = head.filter(|node| chain.contains(node));
    while let Some(node) = cursor {
        count += 1;
        cursor = chain.successor(&node);
    }
    count
}

/// Follows `steps` successor links from `cursor`.
///
/// Returns `None` if the sequence ends first or `cursor` is not in `chain`.
pub fn advance<C>(chain: &C, cursor: Option<C::Node>, steps: usize) -> Option<C::Node>
where
    C: ForwardChain + ?Sized,
{
    let mut cursor = cursor.filter(|node| chain.contains(node));
    for _ in 0..steps {
        cursor = chain.successor(&cursor?);
    }
    cursor
}

/// Finds the first node shared by the sequences starting at `head_a` and
/// `head_b`.
///
/// Nodes are matched by identity through [`ForwardChain::same_node`]; two
/// distinct nodes carrying equal values never match. Returns `None` when the
/// sequences are disjoint or either one is empty. A head the chain does not
/// contain counts as empty.
///
/// # Example
///
/// ```rust
/// use confluent::{find_intersection, SuccessorTable};
///
/// // 0 -> 1 -> 2 and 3 -> 1 -> 2
/// let table = SuccessorTable::from_successors(vec![Some(1), Some(2), None, Some(1)]);
/// assert_eq!(find_intersection(&table, Some(0), Some(3)), Some(1));
/// ```
pub fn find_intersection<C>(
    chain: &C,
    head_a: Option<C::Node>,
    head_b: Option<C::Node>,
) -> Option<C::Node>
where
    C: ForwardChain + ?Sized,
{
    let aligned = align(chain, head_a, head_b);
    let (node, _) = walk_in_step(chain, aligned.a, aligned.b);

    #[cfg(feature = "tracing")]
    tracing::trace!(
        len_a = aligned.len_a,
        len_b = aligned.len_b,
        found = node.is_some(),
        "intersection search finished"
    );

    node
}

/// Runs the same search as [`find_intersection`] and also reports how the
/// two sequences are shaped around the intersection.
pub fn analyze_convergence<C>(
    chain: &C,
    head_a: Option<C::Node>,
    head_b: Option<C::Node>,
) -> Convergence<C::Node>
where
    C: ForwardChain + ?Sized,
{
    let aligned = align(chain, head_a, head_b);
    let (node, steps) = walk_in_step(chain, aligned.a, aligned.b);

    // `steps` is the distance from the aligned cursors to the meeting node,
    // and the aligned cursors sit `min(len_a, len_b)` nodes from the end.
    let shared_len = if node.is_some() {
        aligned.len_a.min(aligned.len_b) - steps
    } else {
        0
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        len_a = aligned.len_a,
        len_b = aligned.len_b,
        shared_len,
        "convergence analyzed"
    );

    Convergence {
        node,
        len_a: aligned.len_a,
        len_b: aligned.len_b,
        shared_len,
    }
}

/// Result of [`analyze_convergence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Convergence<N> {
    /// The intersection node, if the sequences converge.
    pub node: Option<N>,
    /// Length of sequence A.
    pub len_a: usize,
    /// Length of sequence B.
    pub len_b: usize,
    /// Length of the shared suffix, starting at `node`. Zero if disjoint.
    pub shared_len: usize,
}

impl<N> Convergence<N> {
    /// Nodes of A that precede the intersection (all of A if disjoint).
    pub fn prefix_a(&self) -> usize {
        self.len_a - self.shared_len
    }

    /// Nodes of B that precede the intersection (all of B if disjoint).
    pub fn prefix_b(&self) -> usize {
        self.len_b - self.shared_len
    }

    /// Returns `true` if the sequences share no node.
    pub fn is_disjoint(&self) -> bool {
        self.node.is_none()
    }

    /// The node-free summary of this result.
    pub fn stats(&self) -> ConvergenceStats {
        ConvergenceStats {
            len_a: self.len_a,
            len_b: self.len_b,
            prefix_a: self.prefix_a(),
            prefix_b: self.prefix_b(),
            shared_len: self.shared_len,
            converges: !self.is_disjoint(),
        }
    }
}

/// Serializable summary of a [`Convergence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConvergenceStats {
    /// Length of sequence A.
    pub len_a: usize,
    /// Length of sequence B.
    pub len_b: usize,
    /// Non-shared prefix length of A.
    pub prefix_a: usize,
    /// Non-shared prefix length of B.
    pub prefix_b: usize,
    /// Shared suffix length.
    pub shared_len: usize,
    /// Whether the sequences meet at all.
    pub converges: bool,
}

/// Cursors positioned the same distance from their sequence ends.
struct Aligned<N> {
    a: Option<N>,
    b: Option<N>,
    len_a: usize,
    len_b: usize,
}

fn align<C>(chain: &C, head_a: Option<C::Node>, head_b: Option<C::Node>) -> Aligned<C::Node>
where
    C: ForwardChain + ?Sized,
{
    let head_a = head_a.filter(|node| chain.contains(node));
    let head_b = head_b.filter(|node| chain.contains(node));
    let len_a = sequence_len(chain, head_a.clone());
    let len_b = sequence_len(chain, head_b.clone());

    let (a, b) = if len_a > len_b {
        (advance(chain, head_a, len_a - len_b), head_b)
    } else {
        (head_a, advance(chain, head_b, len_b - len_a))
    };

    Aligned { a, b, len_a, len_b }
}

/// Walks both aligned cursors together until they name the same node.
///
/// Returns the meeting node (if any) and the number of steps taken.
fn walk_in_step<C>(
    chain: &C,
    mut a: Option<C::Node>,
    mut b: Option<C::Node>,
) -> (Option<C::Node>, usize)
where
    C: ForwardChain + ?Sized,
{
    let mut steps = 0;
    loop {
        let (next_a, next_b) = match (&a, &b) {
            (Some(x), Some(y)) if chain.same_node(x, y) => break,
            (Some(x), Some(y)) => (chain.successor(x), chain.successor(y)),
            // Aligned cursors run out together.
            _ => return (None, steps),
        };
        a = next_a;
        b = next_b;
        steps += 1;
    }
    (a, steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::SuccessorTable;

    /// `prefix_a` nodes, then `prefix_b` nodes, then `shared` nodes, with both
    /// prefixes leading into the shared tail. Returns `(table, head_a, head_b, meet)`.
    fn y_shape(
        prefix_a: usize,
        prefix_b: usize,
        shared: usize,
    ) -> (SuccessorTable, Option<usize>, Option<usize>, Option<usize>) {
        let mut table = SuccessorTable::new();
        let tail_start = prefix_a + prefix_b;
        let meet = (shared > 0).then_some(tail_start);

        let link_prefix = |len: usize, table: &mut SuccessorTable| -> Option<usize> {
            let first = table.len();
            for i in 0..len {
                let next = if i + 1 == len { meet } else { Some(first + i + 1) };
                table.push(next);
            }
            (len > 0).then_some(first).or(meet)
        };

        let head_a = link_prefix(prefix_a, &mut table);
        let head_b = link_prefix(prefix_b, &mut table);
        for i in 0..shared {
            let next = (i + 1 < shared).then_some(tail_start + i + 1);
            table.push(next);
        }
        (table, head_a, head_b, meet)
    }

    #[test]
    fn lengths_and_advance() {
        let (table, head_a, head_b, _) = y_shape(2, 3, 3);
        assert_eq!(sequence_len(&table, head_a), 5);
        assert_eq!(sequence_len(&table, head_b), 6);
        assert_eq!(sequence_len(&table, None), 0);

        assert_eq!(advance(&table, head_a, 0), head_a);
        assert_eq!(advance(&table, head_a, 2), Some(5));
        assert_eq!(advance(&table, head_a, 5), None);
        assert_eq!(advance(&table, head_a, 50), None);
    }

    #[test]
    fn every_prefix_combination_meets_at_tail_start() {
        for prefix_a in 0..5 {
            for prefix_b in 0..5 {
                for shared in 1..4 {
                    let (table, head_a, head_b, meet) = y_shape(prefix_a, prefix_b, shared);
                    assert_eq!(
                        find_intersection(&table, head_a, head_b),
                        meet,
                        "prefixes ({prefix_a}, {prefix_b}), shared {shared}"
                    );
                    assert_eq!(find_intersection(&table, head_b, head_a), meet);
                }
            }
        }
    }

    #[test]
    fn disjoint_and_empty_sequences() {
        let (table, head_a, head_b, meet) = y_shape(3, 2, 0);
        assert_eq!(meet, None);
        assert_eq!(find_intersection(&table, head_a, head_b), None);
        assert_eq!(find_intersection(&table, head_a, None), None);
        assert_eq!(find_intersection(&table, None, head_b), None);
        assert_eq!(find_intersection::<SuccessorTable>(&table, None, None), None);
    }

    #[test]
    fn identical_heads_meet_immediately() {
        let table = SuccessorTable::from_successors(vec![None]);
        assert_eq!(find_intersection(&table, Some(0), Some(0)), Some(0));

        let convergence = analyze_convergence(&table, Some(0), Some(0));
        assert_eq!(convergence.shared_len, 1);
        assert_eq!((convergence.prefix_a(), convergence.prefix_b()), (0, 0));
    }

    #[test]
    fn analysis_reports_prefixes_and_shared_suffix() {
        let (table, head_a, head_b, meet) = y_shape(2, 3, 3);
        let convergence = analyze_convergence(&table, head_a, head_b);

        assert_eq!(convergence.node, meet);
        assert_eq!(
            convergence.stats(),
            ConvergenceStats {
                len_a: 5,
                len_b: 6,
                prefix_a: 2,
                prefix_b: 3,
                shared_len: 3,
                converges: true,
            }
        );
    }

    #[test]
    fn analysis_of_disjoint_sequences() {
        let (table, head_a, head_b, _) = y_shape(3, 2, 0);
        let convergence = analyze_convergence(&table, head_a, head_b);

        assert!(convergence.is_disjoint());
        assert_eq!(convergence.shared_len, 0);
        assert_eq!((convergence.prefix_a(), convergence.prefix_b()), (3, 2));
        assert!(!convergence.stats().converges);
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn traced_search_matches_untraced_result() {
        let (table, head_a, head_b, meet) = y_shape(2, 1, 2);
        assert_eq!(find_intersection(&table, head_a, head_b), meet);
        assert_eq!(analyze_convergence(&table, head_a, head_b).shared_len, 2);

        let (table, head_a, head_b, _) = y_shape(1, 1, 0);
        assert_eq!(find_intersection(&table, head_a, head_b), None);
        assert!(analyze_convergence(&table, head_a, head_b).is_disjoint());
    }

    #[test]
    fn stats_serialize_to_json() {
        let (table, head_a, head_b, _) = y_shape(1, 0, 2);
        let stats = analyze_convergence(&table, head_a, head_b).stats();

        let json = serde_json::to_string(&stats).unwrap();
        let back: ConvergenceStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
        assert!(json.contains("\"shared_len\":2"));
    }
}
