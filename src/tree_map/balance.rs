use crate::binary_tree::{LinkedBinaryTree, Position};

/// A balancing policy for `TreeMap<K, V, B>`.
///
/// The map performs every search and structural change itself and notifies the policy at fixed
/// points afterwards. Every hook defaults to doing nothing, which is exactly the behaviour of a
/// plain binary search tree. `Meta` is the per-node bookkeeping the policy needs; new nodes
/// start with `Meta::default()`.
///
/// Positions handed to the hooks always refer to live nodes of `tree`.
pub trait Balance {
    type Meta: Default;

    /// Called after a new node was linked in at `p`.
    fn rebalance_insert<T>(_tree: &mut LinkedBinaryTree<T, Self::Meta>, _p: Position) {}

    /// Called right before the node at `p`, which has at most one child, is spliced out.
    fn before_delete<T>(_tree: &mut LinkedBinaryTree<T, Self::Meta>, _p: Position) {}

    /// Called after a node was spliced out. `parent` is the former parent of the removed node, or
    /// `None` if the root was removed.
    fn rebalance_delete<T>(
        _tree: &mut LinkedBinaryTree<T, Self::Meta>,
        _parent: Option<Position>,
    ) {
    }

    /// Called when the node at `p` was found by a mutating operation without changing shape.
    fn rebalance_access<T>(_tree: &mut LinkedBinaryTree<T, Self::Meta>, _p: Position) {}
}

/// The policy of a plain, unbalanced binary search tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbalanced;

impl Balance for Unbalanced {
    type Meta = ();
}
