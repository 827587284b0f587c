//! Node storage backing the branded collections.

pub mod node_pool;

pub use node_pool::NodePool;
