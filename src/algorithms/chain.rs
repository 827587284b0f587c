//! `ForwardChain` - the read-only view every node representation exposes.
//!
//! The convergence algorithms only ever do two things with a node: follow its
//! successor and ask whether two nodes are the *same* node. Representations
//! decide what "same" means for them (slot index, pointer, table index), but
//! it is always identity and never payload equality.

/// A singly-linked successor relation over nodes of type [`Self::Node`].
///
/// Implementations must be pure: calling [`successor`](Self::successor) twice
/// on the same node yields the same node.
pub trait ForwardChain {
    /// Handle naming one node. Cloning a handle must not clone the node.
    type Node: Clone;

    /// Returns the node after `node`, or `None` at the end of the sequence.
    fn successor(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Returns `true` if `a` and `b` name the same node.
    fn same_node(&self, a: &Self::Node, b: &Self::Node) -> bool;

    /// Returns `true` if `node` is a node of this chain.
    ///
    /// Heads the chain does not hold are treated as the empty sequence.
    fn contains(&self, _node: &Self::Node) -> bool {
        true
    }
}

impl<C: ForwardChain + ?Sized> ForwardChain for &C {
    type Node = C::Node;

    #[inline]
    fn successor(&self, node: &Self::Node) -> Option<Self::Node> {
        (**self).successor(node)
    }

    #[inline]
    fn same_node(&self, a: &Self::Node, b: &Self::Node) -> bool {
        (**self).same_node(a, b)
    }

    #[inline]
    fn contains(&self, node: &Self::Node) -> bool {
        (**self).contains(node)
    }
}

/// Iterator over the nodes of one sequence, head first.
///
/// Pass `&chain` to walk a chain without giving it up.
pub struct Nodes<C: ForwardChain> {
    chain: C,
    cursor: Option<C::Node>,
}

impl<C: ForwardChain> Nodes<C> {
    /// Starts a walk at `head`. A head outside `chain` yields nothing.
    pub fn new(chain: C, head: Option<C::Node>) -> Self {
        let cursor = head.filter(|node| chain.contains(node));
        Self { chain, cursor }
    }
}

impl<C: ForwardChain> Iterator for Nodes<C> {
    type Item = C::Node;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cursor.take()?;
        self.cursor = self.chain.successor(&node);
        Some(node)
    }
}
