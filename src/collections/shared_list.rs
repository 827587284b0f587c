//! `SharedList` - persistent singly-linked lists with reference-counted tails.
//!
//! Prepending never copies: [`SharedList::cons`] allocates one node that
//! points at the existing tail, so any number of lists can converge onto the
//! same nodes. A shared tail lives as long as its longest-lived holder.
//!
//! Node identity is the allocation itself ([`Rc::ptr_eq`]).

use crate::algorithms::chain::{ForwardChain, Nodes};
use crate::algorithms::intersection::{analyze_convergence, find_intersection, sequence_len, Convergence};
use core::fmt;
use core::marker::PhantomData;
use std::rc::Rc;

/// Shared handle to one node.
pub type SharedNodeRef<T> = Rc<SharedNode<T>>;

/// One immutable node of a [`SharedList`].
pub struct SharedNode<T> {
    value: T,
    next: Option<SharedNodeRef<T>>,
}

impl<T> SharedNode<T> {
    /// Value stored in this node.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The following node, if any.
    #[inline]
    pub fn next(&self) -> Option<&SharedNodeRef<T>> {
        self.next.as_ref()
    }
}

impl<T> Drop for SharedNode<T> {
    // Unlink iteratively so dropping a long chain cannot overflow the stack.
    // Stops at the first node another list still holds.
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(node) = next {
            match Rc::try_unwrap(node) {
                Ok(mut node) => next = node.next.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedNode")
            .field("value", &self.value)
            .field("has_next", &self.next.is_some())
            .finish()
    }
}

/// A persistent singly-linked list whose tail may be shared with other lists.
pub struct SharedList<T> {
    head: Option<SharedNodeRef<T>>,
}

impl<T> SharedList<T> {
    /// The empty list.
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// Wraps an existing node (or `None`) as a list.
    pub fn from_head(head: Option<SharedNodeRef<T>>) -> Self {
        Self { head }
    }

    /// A new list holding `value` followed by all nodes of `tail`.
    pub fn cons(value: T, tail: &SharedList<T>) -> Self {
        Self {
            head: Some(Rc::new(SharedNode {
                value,
                next: tail.head.clone(),
            })),
        }
    }

    /// A new list holding `values` (in order) followed by all nodes of `tail`.
    pub fn from_values<I>(values: I, tail: &SharedList<T>) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: DoubleEndedIterator,
    {
        values
            .into_iter()
            .rev()
            .fold(tail.clone(), |list, value| Self::cons(value, &list))
    }

    /// First node, or `None` for the empty list.
    #[inline]
    pub fn head(&self) -> Option<&SharedNodeRef<T>> {
        self.head.as_ref()
    }

    /// The list without its first node. The empty list stays empty.
    pub fn tail(&self) -> Self {
        Self {
            head: self.head.as_ref().and_then(|node| node.next.clone()),
        }
    }

    /// Returns `true` if the list has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of nodes, counted by walking the list.
    pub fn len(&self) -> usize {
        sequence_len(&RcLinks::<T>::new(), self.head.clone())
    }

    /// Iterates over the values, head first.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            current: self.head.as_deref(),
        }
    }

    /// Iterates over the node handles, head first.
    pub fn nodes(&self) -> Nodes<RcLinks<T>> {
        Nodes::new(RcLinks::<T>::new(), self.head.clone())
    }

    /// First node this list shares with `other`.
    ///
    /// See [`find_intersection`] for the algorithm.
    pub fn intersection(&self, other: &SharedList<T>) -> Option<SharedNodeRef<T>> {
        find_intersection(&RcLinks::<T>::new(), self.head.clone(), other.head.clone())
    }

    /// Intersection plus the prefix and shared-suffix lengths.
    pub fn convergence(&self, other: &SharedList<T>) -> Convergence<SharedNodeRef<T>> {
        analyze_convergence(&RcLinks::<T>::new(), self.head.clone(), other.head.clone())
    }
}

impl<T> Clone for SharedList<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
        }
    }
}

impl<T> Default for SharedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for SharedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        Self::from_values(values, &Self::new())
    }
}

impl<'a, T> IntoIterator for &'a SharedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the values of a [`SharedList`].
pub struct Iter<'a, T> {
    current: Option<&'a SharedNode<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = node.next.as_deref();
        Some(&node.value)
    }
}

/// [`ForwardChain`] over reference-counted nodes.
///
/// Carries no state: each node already knows its successor.
pub struct RcLinks<T>(PhantomData<fn() -> T>);

impl<T> RcLinks<T> {
    /// Creates the (stateless) link view.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Clone for RcLinks<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RcLinks<T> {}

impl<T> Default for RcLinks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ForwardChain for RcLinks<T> {
    type Node = SharedNodeRef<T>;

    #[inline]
    fn successor(&self, node: &SharedNodeRef<T>) -> Option<SharedNodeRef<T>> {
        node.next.clone()
    }

    #[inline]
    fn same_node(&self, a: &SharedNodeRef<T>, b: &SharedNodeRef<T>) -> bool {
        Rc::ptr_eq(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cons_shares_the_tail() {
        let tail: SharedList<i32> = [8, 4, 5].into_iter().collect();
        let a = SharedList::from_values([4, 1], &tail);
        let b = SharedList::from_values([5, 6, 1], &tail);

        assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![4, 1, 8, 4, 5]);
        assert_eq!(b.len(), 6);
        // tail, a's second node, b's third node
        assert_eq!(tail.head().map(Rc::strong_count), Some(3));
    }

    #[test]
    fn intersection_is_by_pointer() {
        let tail: SharedList<i32> = [8, 4, 5].into_iter().collect();
        let a = SharedList::from_values([4, 1], &tail);
        let b = SharedList::from_values([5, 6, 1], &tail);

        let meet = a.intersection(&b).expect("lists share a tail");
        assert!(Rc::ptr_eq(&meet, tail.head().unwrap()));
        assert_eq!(*meet.value(), 8);

        // Equal values, separate allocations.
        let c: SharedList<i32> = [4, 1, 8, 4, 5].into_iter().collect();
        assert!(a.intersection(&c).is_none());
    }

    #[test]
    fn tail_and_nodes_walk_the_same_nodes() {
        let list: SharedList<char> = "abc".chars().collect();
        let rest = list.tail();

        let nodes: Vec<_> = list.nodes().collect();
        assert_eq!(nodes.len(), 3);
        assert!(Rc::ptr_eq(&nodes[1], rest.head().unwrap()));
        assert_eq!(nodes[2].next().map(|n| *n.value()), None);
        assert!(SharedList::<char>::new().tail().is_empty());
    }

    #[test]
    fn convergence_with_a_suffix_of_itself() {
        let list: SharedList<u8> = (0..6).collect();
        let suffix = list.tail().tail();

        let convergence = list.convergence(&suffix);
        assert!(Rc::ptr_eq(convergence.node.as_ref().unwrap(), suffix.head().unwrap()));
        assert_eq!(convergence.shared_len, 4);
        assert_eq!((convergence.prefix_a(), convergence.prefix_b()), (2, 0));
    }

    #[test]
    fn dropping_a_long_list_does_not_recurse() {
        let list: SharedList<u32> = (0..200_000).collect();
        let keep = list.tail().tail();
        drop(list);
        assert_eq!(keep.len(), 199_998);
        drop(keep);
    }

    #[test]
    fn debug_lists_values() {
        let list: SharedList<i32> = [1, 2].into_iter().collect();
        assert_eq!(format!("{list:?}"), "[1, 2]");
    }
}
