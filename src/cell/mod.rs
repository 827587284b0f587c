//! Token-branded interior mutability.
//!
//! [`GhostCell`] is the only cell the crate needs: node storage keeps its
//! whole state in one cell, so allocation and rewiring can go through `&self`
//! plus `&mut GhostToken` while any number of handles alias the storage.

pub mod ghost_cell;

pub use ghost_cell::GhostCell;
