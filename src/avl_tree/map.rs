use crate::avl_tree::balance::Avl;
use crate::binary_tree::Position;
use crate::error::Result;
use crate::tree_map::TreeMap;

/// An ordered map implemented using an AVL tree.
///
/// An AVL tree is a self-balancing binary search tree where the heights of the two child
/// subtrees of any node differ by at most one. The height of a map with `n` entries is therefore
/// `O(log n)` regardless of the order in which keys are inserted or removed.
///
/// # Examples
///
/// ```
/// use positional_trees::avl_tree::AvlMap;
///
/// let mut map = AvlMap::new();
/// for key in 0..7 {
///     map.insert(key, key * 2);
/// }
///
/// assert_eq!(map.get(&3), Ok(&6));
/// assert_eq!(map.tree().height(None), Ok(2));
///
/// let root = map.tree().root().unwrap();
/// assert_eq!(map.key(root), Ok(&3));
/// assert_eq!(map.balance_factor(root), Ok(0));
/// ```
pub type AvlMap<K, V> = TreeMap<K, V, Avl>;

impl<K, V> TreeMap<K, V, Avl> {
    /// Returns the balance factor of the node at a position: the height of its left subtree minus
    /// the height of its right subtree.
    pub fn balance_factor(&self, p: Position) -> Result<i32> {
        self.tree().meta(p).map(|balance| *balance)
    }
}
