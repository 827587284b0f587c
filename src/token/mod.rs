//! `GhostToken` - the capability that gates every node mutation.
//!
//! A token is a zero-sized value created by [`GhostToken::new`]. The closure
//! passed to `new` receives a token with a fresh, unnameable brand lifetime.
//! Node storage and node handles created inside that closure carry the same
//! brand, so handles can never be resolved against storage from another scope.
//!
//! ## Core invariant (linearity)
//!
//! `GhostToken<'brand>` is **not** `Copy`/`Clone`. Every API that rewires or
//! allocates nodes takes `&mut GhostToken<'brand>`, while traversal takes
//! `&GhostToken<'brand>`. The borrow checker therefore guarantees that no node
//! changes while a traversal (such as an intersection search) is in progress.

/// Invariant lifetime definitions for branding.
pub mod invariant;

pub use invariant::InvariantLifetime;

/// A zero-sized token that controls access to branded node storage.
#[derive(Debug)]
pub struct GhostToken<'brand>(InvariantLifetime<'brand>);

impl<'brand> GhostToken<'brand> {
    /// Creates a new token and executes a closure with it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use confluent::{ConvergingLists, GhostToken};
    ///
    /// let len = GhostToken::new(|mut token| {
    ///     let lists = ConvergingLists::new();
    ///     let head = lists.chain(&mut token, [1, 2, 3], None);
    ///     lists.iter(&token, head).count()
    /// });
    /// assert_eq!(len, 3);
    /// ```
    pub fn new<F, R>(f: F) -> R
    where
        F: for<'new_brand> FnOnce(GhostToken<'new_brand>) -> R,
    {
        f(GhostToken(InvariantLifetime::new()))
    }

    /// Runs `f` in a nested scope with its own, unrelated brand.
    ///
    /// Storage built inside the nested scope cannot be mixed with storage
    /// of the outer scope.
    #[inline(always)]
    pub fn with_scoped<F, R>(&self, f: F) -> R
    where
        F: for<'sub> FnOnce(GhostToken<'sub>) -> R,
    {
        Self::new(f)
    }
}

// The token carries no data. Sharing `&GhostToken` only enables reads, and
// mutation still needs `&mut GhostToken`, which cannot coexist with a shared
// borrow of the same token.
unsafe impl<'brand> Sync for GhostToken<'brand> {}
