//! Node representations for converging singly-linked sequences.
//!
//! Collections are organized by how nodes are owned:
//! - `converging_list`: token-branded arena, nodes named by `NodeRef` handles
//! - `shared_list`: reference-counted persistent lists
//! - `successor_table`: plain index tables without payloads
//!
//! Each one implements [`ForwardChain`](crate::ForwardChain), so the same
//! intersection search runs over all of them.

pub mod converging_list;
pub mod shared_list;
pub mod successor_table;

pub use converging_list::{ChainView, ConvergingLists, NodeRef};
pub use shared_list::{RcLinks, SharedList, SharedNode, SharedNodeRef};
pub use successor_table::SuccessorTable;
