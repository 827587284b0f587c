//! Algorithms over singly-linked sequences, plus two small array/string
//! utilities.
//!
//! - `chain`: the [`ForwardChain`] view shared by every node representation.
//! - `intersection`: where two converging sequences first meet.
//! - `disappeared`: values of `1..=n` missing from a slice of length `n`.
//! - `word_pattern`: bijection check between pattern letters and words.

pub mod chain;
pub mod disappeared;
pub mod intersection;
pub mod word_pattern;

pub use chain::{ForwardChain, Nodes};
pub use disappeared::{find_disappeared_numbers, ValueOutOfRange};
pub use intersection::{
    advance, analyze_convergence, find_intersection, sequence_len, Convergence, ConvergenceStats,
};
pub use word_pattern::word_pattern;
