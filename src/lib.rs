//! # `confluent` - converging singly-linked sequences
//!
//! Two singly-linked sequences *converge* when, from some node on, they walk
//! through exactly the same nodes. This crate stores such structures and
//! finds the node where they meet.
//!
//! ## Intersection search
//!
//! [`find_intersection`] measures both sequences, skips the length difference
//! on the longer one, and then walks both cursors in lock-step until they
//! name the same node. It runs in time linear in the total length and keeps
//! two cursors of extra state. Nodes are matched by **identity**: two
//! distinct nodes holding equal values are never an intersection.
//!
//! Both sequences must be acyclic. Cycles are not detected.
//!
//! ## Node representations
//!
//! The search is written once against the [`ForwardChain`] trait and runs
//! over three representations:
//!
//! 1. **Branded arena** ([`ConvergingLists`]): nodes live in a token-gated
//!    pool and are named by [`NodeRef`] handles. Handles are branded with the
//!    [`GhostToken`] lifetime, so a handle from one scope cannot be used with
//!    storage from another. Within one scope, each store tags its handles
//!    with its own id and ignores handles from other stores. Traversal borrows the token shared, mutation
//!    borrows it exclusively, so nothing can rewire nodes during a search.
//! 2. **Reference-counted lists** ([`SharedList`]): persistent cons lists;
//!    identity is the allocation ([`std::rc::Rc::ptr_eq`]).
//! 3. **Successor tables** ([`SuccessorTable`]): bare index tables.
//!
//! ## Utilities
//!
//! [`find_disappeared_numbers`] and [`word_pattern`] are two small,
//! independent helpers living alongside the list algorithms.
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events from the convergence search.
//! - `proptest`: export [`strategy`], proptest strategies for converging
//!   shapes.
//!
//! ## Example
//!
//! ```rust
//! use confluent::{ConvergingLists, GhostToken};
//!
//! GhostToken::new(|mut token| {
//!     let lists = ConvergingLists::new();
//!
//!     // Build the shared tail once, then attach two prefixes to it.
//!     let shared = lists.chain(&mut token, [8, 4, 5], None);
//!     let a = lists.chain(&mut token, [4, 1], shared);
//!     let b = lists.chain(&mut token, [5, 6, 1], shared);
//!
//!     let meet = lists.intersection(&token, a, b);
//!     assert_eq!(meet, shared);
//!     assert_eq!(lists.value(&token, meet.unwrap()), Some(&8));
//! });
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod algorithms;
pub mod alloc;
pub mod cell;
pub mod collections;
pub mod shape;
#[cfg(any(test, feature = "proptest"))]
pub mod strategy;
pub mod token;

pub use algorithms::{
    advance, analyze_convergence, find_disappeared_numbers, find_intersection, sequence_len,
    word_pattern, Convergence, ConvergenceStats, ForwardChain, Nodes, ValueOutOfRange,
};
pub use alloc::NodePool;
pub use cell::GhostCell;
pub use collections::{
    ChainView, ConvergingLists, NodeRef, RcLinks, SharedList, SharedNode, SharedNodeRef,
    SuccessorTable,
};
pub use shape::{ConvergingShape, Heads};
pub use token::GhostToken;

// Compile-time layout checks.
const _: () = {
    use core::mem;

    // Tokens are ZSTs.
    assert!(mem::size_of::<GhostToken<'static>>() == 0);

    // A handle is a store id and a slot index; the brand costs nothing.
    assert!(mem::size_of::<NodeRef<'static>>() == 2 * mem::size_of::<usize>());

    // `GhostCell` is a transparent wrapper.
    assert!(mem::size_of::<GhostCell<'static, Vec<u8>>>() == mem::size_of::<Vec<u8>>());
};
