use core::marker::PhantomData;

/// A marker that is invariant in its lifetime parameter `'id`.
///
/// Tokens and node handles embed this marker so the compiler can neither
/// shrink nor widen a brand. Two handles unify only when they come from the
/// same [`GhostToken::new`](crate::GhostToken::new) scope.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvariantLifetime<'id>(PhantomData<fn(&'id ()) -> &'id ()>);

impl<'id> InvariantLifetime<'id> {
    /// Creates a new invariant lifetime marker.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}
