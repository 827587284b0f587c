//! `NodePool` - an append-only, token-gated node store.
//!
//! Linked structures that share tails need many handles pointing at the same
//! node. The pool owns every node in one contiguous buffer and hands out
//! slot indices. Slots are never freed or reused while the pool lives, so an
//! index is a stable identity for the node stored in it.
//!
//! # Features
//! - **Shared access**: allocation takes `&self` plus `&mut GhostToken`, so
//!   several builders can append into the same pool.
//! - **Token gated**: reads need `&GhostToken`, writes need `&mut GhostToken`.
//! - **Stable identity**: index `i` always names the `i`-th allocated node.

use crate::{GhostCell, GhostToken};

/// A branded, append-only pool of values of type `T`.
pub struct NodePool<'brand, T> {
    slots: GhostCell<'brand, Vec<T>>,
}

impl<'brand, T> NodePool<'brand, T> {
    /// Creates a new empty pool.
    pub fn new() -> Self {
        Self {
            slots: GhostCell::new(Vec::new()),
        }
    }

    /// Creates a new pool with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: GhostCell::new(Vec::with_capacity(capacity)),
        }
    }

    /// Appends `value` to the pool, returning its slot index.
    #[inline]
    pub fn alloc(&self, token: &mut GhostToken<'brand>, value: T) -> usize {
        let slots = self.slots.borrow_mut(token);
        let idx = slots.len();
        slots.push(value);
        idx
    }

    /// Returns a shared reference to the value at `index`.
    ///
    /// Returns `None` if `index` was never allocated.
    #[inline]
    pub fn get<'a>(&'a self, token: &'a GhostToken<'brand>, index: usize) -> Option<&'a T> {
        self.slots.borrow(token).get(index)
    }

    /// Returns a mutable reference to the value at `index`.
    #[inline]
    pub fn get_mut<'a>(
        &'a self,
        token: &'a mut GhostToken<'brand>,
        index: usize,
    ) -> Option<&'a mut T> {
        self.slots.borrow_mut(token).get_mut(index)
    }

    /// Returns a mutable reference to the value at `index` without a token.
    ///
    /// This requires exclusive access to the pool (`&mut self`).
    #[inline]
    pub fn get_mut_exclusive(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut().get_mut(index)
    }

    /// Number of allocated slots.
    pub fn len(&self, token: &GhostToken<'brand>) -> usize {
        self.slots.borrow(token).len()
    }

    /// Returns `true` if nothing has been allocated yet.
    pub fn is_empty(&self, token: &GhostToken<'brand>) -> bool {
        self.slots.borrow(token).is_empty()
    }

    /// All slots in allocation order.
    #[inline]
    pub fn as_slice<'a>(&'a self, token: &'a GhostToken<'brand>) -> &'a [T] {
        self.slots.borrow(token).as_slice()
    }

    /// Consumes the pool and returns its slots in allocation order.
    pub fn into_vec(self) -> Vec<T> {
        self.slots.into_inner()
    }
}

impl<'brand, T> Default for NodePool<'brand, T> {
    fn default() -> Self {
        Self::new()
    }
}
