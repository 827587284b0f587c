//! `ConvergingLists` - token-gated singly-linked sequences that may share tails.
//!
//! All nodes live in one [`NodePool`]. A sequence is just a head handle, so
//! any number of sequences can run into the same tail: build the tail once,
//! then [`chain`](ConvergingLists::chain) different prefixes onto it.
//!
//! Handles ([`NodeRef`]) are slot indices tagged with the id of the store
//! that created them and branded with the token lifetime. Two handles are
//! equal exactly when they name the same node of the same store; node values
//! play no part in handle equality. Several stores may live under one token,
//! and a handle from one store is never resolved against another.

use crate::algorithms::chain::{ForwardChain, Nodes};
use crate::algorithms::intersection::{analyze_convergence, find_intersection, Convergence};
use crate::alloc::NodePool;
use crate::token::InvariantLifetime;
use crate::GhostToken;
use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

static NEXT_STORE_ID: AtomicUsize = AtomicUsize::new(0);

/// Identity of one node in a [`ConvergingLists`] store.
///
/// A handle is only meaningful in the store that created it. Other stores
/// treat it as a node they do not hold.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef<'brand> {
    store: usize,
    index: usize,
    _brand: InvariantLifetime<'brand>,
}

impl<'brand> NodeRef<'brand> {
    #[inline(always)]
    const fn new(store: usize, index: usize) -> Self {
        Self {
            store,
            index,
            _brand: InvariantLifetime::new(),
        }
    }

    /// Slot index of the node inside its store.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({}@{})", self.index, self.store)
    }
}

struct ListNode<'brand, T> {
    value: T,
    next: Option<NodeRef<'brand>>,
}

/// A store of singly-linked nodes forming any number of converging sequences.
///
/// Every store has its own id. Handles it returns carry that id, and handles
/// from any other store are treated as absent: they have no value, no
/// successor, and never take part in an intersection.
pub struct ConvergingLists<'brand, T> {
    id: usize,
    pool: NodePool<'brand, ListNode<'brand, T>>,
}

impl<'brand, T> ConvergingLists<'brand, T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::from_pool(NodePool::new())
    }

    /// Creates an empty store with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_pool(NodePool::with_capacity(capacity))
    }

    fn from_pool(pool: NodePool<'brand, ListNode<'brand, T>>) -> Self {
        Self {
            id: NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed),
            pool,
        }
    }

    /// Returns `true` if `node` was created by this store.
    #[inline]
    pub fn owns(&self, node: NodeRef<'brand>) -> bool {
        node.store == self.id
    }

    #[inline]
    fn slot<'a>(&'a self, token: &'a GhostToken<'brand>, node: NodeRef<'brand>) -> Option<&'a ListNode<'brand, T>> {
        if self.owns(node) {
            self.pool.get(token, node.index)
        } else {
            None
        }
    }

    #[inline]
    fn slot_mut<'a>(
        &'a self,
        token: &'a mut GhostToken<'brand>,
        node: NodeRef<'brand>,
    ) -> Option<&'a mut ListNode<'brand, T>> {
        if self.owns(node) {
            self.pool.get_mut(token, node.index)
        } else {
            None
        }
    }

    fn own(&self, node: Option<NodeRef<'brand>>) -> Option<NodeRef<'brand>> {
        node.filter(|&n| self.owns(n))
    }

    /// Total number of nodes in the store, across all sequences.
    pub fn len(&self, token: &GhostToken<'brand>) -> usize {
        self.pool.len(token)
    }

    /// Returns `true` if the store holds no nodes.
    pub fn is_empty(&self, token: &GhostToken<'brand>) -> bool {
        self.pool.is_empty(token)
    }

    /// Allocates one node holding `value` whose successor is `next`.
    ///
    /// A `next` from another store is dropped: the new node ends its sequence.
    pub fn push(
        &self,
        token: &mut GhostToken<'brand>,
        value: T,
        next: Option<NodeRef<'brand>>,
    ) -> NodeRef<'brand> {
        let next = self.own(next);
        NodeRef::new(self.id, self.pool.alloc(token, ListNode { value, next }))
    }

    /// Builds a sequence of `values` (in order) that continues into `tail`.
    ///
    /// Returns the head of the new sequence, or `tail` itself when `values`
    /// is empty.
    pub fn chain<I>(
        &self,
        token: &mut GhostToken<'brand>,
        values: I,
        tail: Option<NodeRef<'brand>>,
    ) -> Option<NodeRef<'brand>>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: DoubleEndedIterator,
    {
        values
            .into_iter()
            .rev()
            .fold(tail, |next, value| Some(self.push(token, value, next)))
    }

    /// Rewires the successor of `node`, returning the previous successor.
    ///
    /// Creating a cycle is allowed here, but sequences that contain one must
    /// not be passed to the intersection search. A `node` from another store
    /// is left alone, and a `next` from another store ends the sequence.
    pub fn set_next(
        &self,
        token: &mut GhostToken<'brand>,
        node: NodeRef<'brand>,
        next: Option<NodeRef<'brand>>,
    ) -> Option<NodeRef<'brand>> {
        let next = self.own(next);
        self.slot_mut(token, node)
            .and_then(|slot| core::mem::replace(&mut slot.next, next))
    }

    /// Successor of `node`.
    #[inline]
    pub fn next(&self, token: &GhostToken<'brand>, node: NodeRef<'brand>) -> Option<NodeRef<'brand>> {
        self.slot(token, node).and_then(|slot| slot.next)
    }

    /// Value stored in `node`.
    #[inline]
    pub fn value<'a>(&'a self, token: &'a GhostToken<'brand>, node: NodeRef<'brand>) -> Option<&'a T> {
        self.slot(token, node).map(|slot| &slot.value)
    }

    /// Mutable access to the value stored in `node`.
    #[inline]
    pub fn value_mut<'a>(
        &'a self,
        token: &'a mut GhostToken<'brand>,
        node: NodeRef<'brand>,
    ) -> Option<&'a mut T> {
        self.slot_mut(token, node).map(|slot| &mut slot.value)
    }

    /// Read-only [`ForwardChain`] view of the store.
    ///
    /// The view borrows the token, so nothing can be allocated or rewired
    /// while it is alive.
    pub fn view<'a>(&'a self, token: &'a GhostToken<'brand>) -> ChainView<'a, 'brand, T> {
        ChainView { lists: self, token }
    }

    /// Iterates over the values of the sequence starting at `head`.
    pub fn iter<'a>(&'a self, token: &'a GhostToken<'brand>, head: Option<NodeRef<'brand>>) -> Iter<'a, 'brand, T> {
        Iter {
            slots: self.pool.as_slice(token),
            current: self.own(head),
        }
    }

    /// Iterates over the node handles of the sequence starting at `head`.
    pub fn nodes<'a>(
        &'a self,
        token: &'a GhostToken<'brand>,
        head: Option<NodeRef<'brand>>,
    ) -> Nodes<ChainView<'a, 'brand, T>> {
        Nodes::new(self.view(token), head)
    }

    /// First node shared by the sequences at `head_a` and `head_b`.
    ///
    /// A head from another store counts as an empty sequence. See
    /// [`find_intersection`] for the algorithm and its preconditions.
    pub fn intersection(
        &self,
        token: &GhostToken<'brand>,
        head_a: Option<NodeRef<'brand>>,
        head_b: Option<NodeRef<'brand>>,
    ) -> Option<NodeRef<'brand>> {
        find_intersection(&self.view(token), head_a, head_b)
    }

    /// Intersection plus the prefix and shared-suffix lengths.
    ///
    /// A head from another store counts as an empty sequence.
    pub fn convergence(
        &self,
        token: &GhostToken<'brand>,
        head_a: Option<NodeRef<'brand>>,
        head_b: Option<NodeRef<'brand>>,
    ) -> Convergence<NodeRef<'brand>> {
        analyze_convergence(&self.view(token), head_a, head_b)
    }
}

impl<'brand, T> Default for ConvergingLists<'brand, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Token-holding read view of a [`ConvergingLists`] store.
pub struct ChainView<'a, 'brand, T> {
    lists: &'a ConvergingLists<'brand, T>,
    token: &'a GhostToken<'brand>,
}

impl<'a, 'brand, T> Clone for ChainView<'a, 'brand, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, 'brand, T> Copy for ChainView<'a, 'brand, T> {}

impl<'a, 'brand, T> ChainView<'a, 'brand, T> {
    /// Walks the node handles of the sequence starting at `head`.
    pub fn walk(&self, head: Option<NodeRef<'brand>>) -> Nodes<Self> {
        Nodes::new(*self, head)
    }

    /// Value stored in `node`.
    pub fn value(&self, node: NodeRef<'brand>) -> Option<&'a T> {
        self.lists.value(self.token, node)
    }
}

impl<'a, 'brand, T> ForwardChain for ChainView<'a, 'brand, T> {
    type Node = NodeRef<'brand>;

    #[inline]
    fn successor(&self, node: &NodeRef<'brand>) -> Option<NodeRef<'brand>> {
        self.lists.next(self.token, *node)
    }

    #[inline]
    fn same_node(&self, a: &NodeRef<'brand>, b: &NodeRef<'brand>) -> bool {
        a == b
    }

    #[inline]
    fn contains(&self, node: &NodeRef<'brand>) -> bool {
        self.lists.slot(self.token, *node).is_some()
    }
}

/// Iterator over the values of one sequence.
pub struct Iter<'a, 'brand, T> {
    slots: &'a [ListNode<'brand, T>],
    current: Option<NodeRef<'brand>>,
}

impl<'a, 'brand, T> Iterator for Iter<'a, 'brand, T> {
    type Item = &'a T;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.slots.get(self.current?.index)?;
        self.current = slot.next;
        Some(&slot.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_builds_in_order_and_attaches_tail() {
        GhostToken::new(|mut token| {
            let lists = ConvergingLists::new();
            let tail = lists.chain(&mut token, [8, 4, 5], None);
            let head = lists.chain(&mut token, [4, 1], tail);

            let values: Vec<_> = lists.iter(&token, head).copied().collect();
            assert_eq!(values, vec![4, 1, 8, 4, 5]);
            assert_eq!(lists.len(&token), 5);

            let empty = lists.chain(&mut token, Vec::<i32>::new(), tail);
            assert_eq!(empty, tail);
        });
    }

    #[test]
    fn handles_compare_by_identity() {
        GhostToken::new(|mut token| {
            let lists = ConvergingLists::new();
            let a = lists.push(&mut token, 7, None);
            let b = lists.push(&mut token, 7, None);

            assert_ne!(a, b);
            assert_eq!(lists.value(&token, a), lists.value(&token, b));
            assert_eq!(lists.intersection(&token, Some(a), Some(b)), None);
        });
    }

    #[test]
    fn set_next_rewires_successor() {
        GhostToken::new(|mut token| {
            let lists = ConvergingLists::with_capacity(3);
            let c = lists.push(&mut token, 'c', None);
            let b = lists.push(&mut token, 'b', None);
            let a = lists.push(&mut token, 'a', Some(b));

            assert_eq!(lists.set_next(&mut token, b, Some(c)), None);
            assert_eq!(lists.next(&token, b), Some(c));
            let word: String = lists.iter(&token, Some(a)).collect();
            assert_eq!(word, "abc");
        });
    }

    #[test]
    fn value_mut_does_not_change_identity() {
        GhostToken::new(|mut token| {
            let lists = ConvergingLists::new();
            let shared = lists.chain(&mut token, [1, 2], None);
            let a = lists.chain(&mut token, [10], shared);
            let b = lists.chain(&mut token, [20, 30], shared);

            if let Some(v) = lists.value_mut(&mut token, shared.unwrap()) {
                *v = 100;
            }
            assert_eq!(lists.intersection(&token, a, b), shared);
            assert_eq!(lists.value(&token, shared.unwrap()), Some(&100));
        });
    }

    #[test]
    fn nodes_and_walk_agree() {
        GhostToken::new(|mut token| {
            let lists = ConvergingLists::new();
            let head = lists.chain(&mut token, ["x", "y", "z"], None);

            let from_store: Vec<_> = lists.nodes(&token, head).collect();
            let view = lists.view(&token);
            let from_view: Vec<_> = view.walk(head).collect();
            assert_eq!(from_store, from_view);
            assert_eq!(from_store.iter().map(|n| n.index()).collect::<Vec<_>>(), vec![2, 1, 0]);
            assert_eq!(view.value(from_view[1]), Some(&"y"));
        });
    }

    #[test]
    fn stores_under_one_token_do_not_share_nodes() {
        GhostToken::new(|mut token| {
            let x = ConvergingLists::new();
            let y = ConvergingLists::new();
            let hx = x.chain(&mut token, [1, 2, 3], None);
            let hy = y.chain(&mut token, [9, 9, 9], None);

            // Same slot indices, different stores.
            assert_eq!(hx.map(NodeRef::index), hy.map(NodeRef::index));
            assert_ne!(hx, hy);
            assert!(x.owns(hx.unwrap()) && !x.owns(hy.unwrap()));

            assert_eq!(x.intersection(&token, hx, hy), None);
            assert_eq!(y.intersection(&token, hx, hy), None);
            assert!(x.convergence(&token, hx, hy).is_disjoint());
            assert_eq!(x.value(&token, hy.unwrap()), None);
            assert_eq!(x.next(&token, hy.unwrap()), None);
            assert_eq!(x.iter(&token, hy).count(), 0);
            assert_eq!(x.nodes(&token, hy).count(), 0);
        });
    }

    #[test]
    fn foreign_successors_are_not_linked() {
        GhostToken::new(|mut token| {
            let x = ConvergingLists::new();
            let y = ConvergingLists::new();
            let tail = y.push(&mut token, 5, None);

            let head = x.push(&mut token, 1, Some(tail));
            assert_eq!(x.next(&token, head), None);

            let other = x.push(&mut token, 2, None);
            assert_eq!(x.set_next(&mut token, other, Some(tail)), None);
            assert_eq!(x.next(&token, other), None);
            assert_eq!(y.set_next(&mut token, other, Some(tail)), None);
            assert_eq!(x.iter(&token, Some(head)).count(), 1);
        });
    }

    #[test]
    fn convergence_of_example_lists() {
        GhostToken::new(|mut token| {
            let lists = ConvergingLists::new();
            let shared = lists.chain(&mut token, [8, 4, 5], None);
            let a = lists.chain(&mut token, [4, 1], shared);
            let b = lists.chain(&mut token, [5, 6, 1], shared);

            let convergence = lists.convergence(&token, a, b);
            assert_eq!(convergence.node, shared);
            assert_eq!((convergence.prefix_a(), convergence.prefix_b()), (2, 3));
            assert_eq!(convergence.shared_len, 3);
        });
    }
}
