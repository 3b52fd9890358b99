use crate::arena::Slot;
use crate::binary_tree::{LinkedBinaryTree, Position, Side, DEFAULT_CHUNK_SIZE};
use crate::error::{Error, Result};
use crate::item::Item;
use crate::tree_map::balance::{Balance, Unbalanced};
use crate::tree_map::iter::{IntoIter, Iter, Keys, Range, Values};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using a linked binary search tree.
///
/// Every key-value pair lives at a position of the underlying `LinkedBinaryTree`, and an in-order
/// traversal of the tree visits the keys in ascending order. Besides the usual map operations, the
/// map hands out positions so callers can walk the map in sorted order (`first`, `after`, ...)
/// and delete at a known position without searching again.
///
/// The shape of the tree is maintained by the balancing policy `B`. With the default policy,
/// `Unbalanced`, the map is a plain binary search tree and its height depends on insertion order;
/// `AvlMap<K, V>` uses the `Avl` policy instead.
///
/// # Examples
///
/// ```
/// use positional_trees::tree_map::TreeMap;
///
/// let mut map: TreeMap<u32, &str> = TreeMap::new();
/// map.insert(10, "a");
/// map.insert(5, "b");
/// map.insert(15, "c");
///
/// assert_eq!(map[&5], "b");
/// assert_eq!(map.len(), 3);
///
/// assert_eq!(map.find_ge(&11), Some((&15, &"c")));
/// assert_eq!(map.find_lt(&5), None);
///
/// let ten = map.find_position(&10).unwrap();
/// let before = map.before(ten).unwrap().unwrap();
/// assert_eq!(map.key(before), Ok(&5));
///
/// assert_eq!(map.remove(&10), Ok((10, "a")));
/// assert_eq!(map.keys().collect::<Vec<&u32>>(), vec![&5, &15]);
/// ```
pub struct TreeMap<K, V, B = Unbalanced>
where
    B: Balance,
{
    tree: LinkedBinaryTree<Item<K, V>, B::Meta>,
}

impl<K, V, B> TreeMap<K, V, B>
where
    B: Balance,
{
    /// Constructs a new, empty `TreeMap<K, V, B>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::tree_map::TreeMap;
    ///
    /// let map: TreeMap<u32, u32> = TreeMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `TreeMap<K, V, B>` whose nodes are allocated `chunk_size` at a
    /// time.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::tree_map::TreeMap;
    ///
    /// let map: TreeMap<u32, u32> = TreeMap::with_chunk_size(64);
    /// assert!(map.is_empty());
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        TreeMap {
            tree: LinkedBinaryTree::empty(chunk_size),
        }
    }

    fn pair(&self, slot: Slot) -> (&K, &V) {
        let Item { ref key, ref value } = self.tree.node(slot).element;
        (key, value)
    }

    fn key_at(&self, slot: Slot) -> &K {
        &self.tree.node(slot).element.key
    }

    // Returns the node holding `key`, or the last node visited while looking for it.
    fn search<Q>(&self, key: &Q) -> Option<Slot>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut slot = self.tree.root_slot()?;
        loop {
            let node = self.tree.node(slot);
            let next = match key.cmp(node.element.key.borrow()) {
                Ordering::Equal => return Some(slot),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
            match next {
                Some(next) => slot = next,
                None => return Some(slot),
            }
        }
    }

    fn search_exact<Q>(&self, key: &Q) -> Option<Slot>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key)
            .filter(|slot| key.cmp(self.key_at(*slot).borrow()) == Ordering::Equal)
    }

    fn delete_slot(&mut self, slot: Slot) -> Item<K, V> {
        let node = self.tree.node(slot);
        match (node.left, node.right) {
            (Some(left), Some(_)) => {
                let replacement = self.tree.rightmost(left);
                let item = self.unlink(replacement);
                mem::replace(&mut self.tree.node_mut(slot).element, item)
            },
            _ => self.unlink(slot),
        }
    }

    // precondition: the node has at most one child
    fn unlink(&mut self, slot: Slot) -> Item<K, V> {
        let position = self.tree.make_position(slot);
        B::before_delete(&mut self.tree, position);
        let parent = self
            .tree
            .node(slot)
            .parent
            .map(|parent| self.tree.make_position(parent));
        let item = self.tree.delete_slot(slot);
        B::rebalance_delete(&mut self.tree, parent);
        item
    }

    /// Returns the underlying binary tree, for navigation and traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::tree_map::TreeMap;
    ///
    /// let mut map: TreeMap<u32, u32> = TreeMap::new();
    /// map.insert(2, 0);
    /// map.insert(1, 0);
    /// map.insert(3, 0);
    ///
    /// let tree = map.tree();
    /// let levels: Vec<u32> = tree.breadth_first().map(|p| tree.element(p).unwrap().key).collect();
    /// assert_eq!(levels, vec![2, 1, 3]);
    /// assert_eq!(tree.height(None), Ok(1));
    /// ```
    pub fn tree(&self) -> &LinkedBinaryTree<Item<K, V>, B::Meta> {
        &self.tree
    }

    /// Inserts a key-value pair into the map. If the key already exists, its value is replaced in
    /// place and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::tree_map::TreeMap;
    ///
    /// let mut map: TreeMap<u32, u32> = TreeMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Ok(&1));
    /// assert_eq!(map.insert(1, 2), Some(1));
    /// assert_eq!(map.get(&1), Ok(&2));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        let anchor = self.search(&key);
        let parent = match anchor {
            None => None,
            Some(anchor) => match key.cmp(self.key_at(anchor)) {
                Ordering::Equal => {
                    let old_value =
                        mem::replace(&mut self.tree.node_mut(anchor).element.value, value);
                    let position = self.tree.make_position(anchor);
                    B::rebalance_access(&mut self.tree, position);
                    return Some(old_value);
                },
                Ordering::Less => Some((anchor, Side::Left)),
                Ordering::Greater => Some((anchor, Side::Right)),
            },
        };

        let slot = self.tree.link_new(parent, Item::new(key, value));
        let position = self.tree.make_position(slot);
        B::rebalance_insert(&mut self.tree, position);
        None
    }

    /// Removes a key-value pair from the map and returns it. Returns `Err(Error::KeyNotFound)` if
    /// the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::tree_map::TreeMap;
    /// use positional_trees::Error;
    ///
    /// let mut map: TreeMap<u32, u32> = TreeMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Ok((1, 1)));
    /// assert_eq!(map.remove(&1), Err(Error::KeyNotFound));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Result<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let anchor = self.search(key).ok_or(Error::KeyNotFound)?;
        if key.cmp(self.key_at(anchor).borrow()) != Ordering::Equal {
            let position = self.tree.make_position(anchor);
            B::rebalance_access(&mut self.tree, position);
            return Err(Error::KeyNotFound);
        }
        Ok(self.delete_slot(anchor).into_pair())
    }

    /// Removes the key-value pair stored at a position and returns it.
    ///
    /// If the node at `p` has two children, the pair of its in-order predecessor is moved into it
    /// and the predecessor's node is removed instead, so `p` may remain valid afterwards and refer
    /// to the predecessor's pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::tree_map::TreeMap;
    /// use positional_trees::{Error, InvalidPosition};
    ///
    /// let mut map: TreeMap<u32, u32> = TreeMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let last = map.last().unwrap();
    /// assert_eq!(map.delete(last), Ok((2, 2)));
    /// assert_eq!(map.delete(last), Err(Error::InvalidPosition(InvalidPosition::Deleted)));
    /// ```
    pub fn delete(&mut self, p: Position) -> Result<(K, V)> {
        let slot = self.tree.validate(p)?;
        Ok(self.delete_slot(slot).into_pair())
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::tree_map::TreeMap;
    ///
    /// let mut map: TreeMap<u32, u32> = TreeMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search_exact(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a key. Returns
    /// `Err(Error::KeyNotFound)` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::tree_map::TreeMap;
    /// use positional_trees::Error;
    ///
    /// let mut map: TreeMap<u32, u32> = TreeMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), Err(Error::KeyNotFound));
    /// assert_eq!(map.get(&1), Ok(&1));
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search_exact(key)
            .map(|slot| &self.tree.node(slot).element.value)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with a key. Returns
    /// `Err(Error::KeyNotFound)` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::tree_map::TreeMap;
    ///
    /// let mut map: TreeMap<u32, u32> = TreeMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Ok(&2));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let slot = self.search_exact(key).ok_or(Error::KeyNotFound)?;
        Ok(&mut self.tree.node_mut(slot).element.value)
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the map, removing all values and invalidating all positions.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the key stored at a position.
    pub fn key(&self, p: Position) -> Result<&K> {
        self.tree.element(p).map(|item| &item.key)
    }

    /// Returns the value stored at a position.
    pub fn value(&self, p: Position) -> Result<&V> {
        self.tree.element(p).map(|item| &item.value)
    }

    /// Returns the key-value pair stored at a position.
    pub fn entry(&self, p: Position) -> Result<(&K, &V)> {
        let slot = self.tree.validate(p)?;
        Ok(self.pair(slot))
    }

    /// Returns the position holding `key`, or the position of the last node visited while
    /// searching for it. Returns `None` only if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::tree_map::TreeMap;
    ///
    /// let mut map: TreeMap<u32, u32> = TreeMap::new();
    /// assert_eq!(map.find_position(&1), None);
    ///
    /// map.insert(10, 0);
    /// map.insert(5, 0);
    /// let p = map.find_position(&7).unwrap();
    /// assert_eq!(map.key(p), Ok(&5));
    /// ```
    pub fn find_position<Q>(&self, key: &Q) -> Option<Position>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).map(|slot| self.tree.make_position(slot))
    }

    /// Returns the position of the minimum key, or `None` if the map is empty.
    pub fn first(&self) -> Option<Position> {
        self.tree
            .root_slot()
            .map(|root| self.tree.make_position(self.tree.leftmost(root)))
    }

    /// Returns the position of the maximum key, or `None` if the map is empty.
    pub fn last(&self) -> Option<Position> {
        self.tree
            .root_slot()
            .map(|root| self.tree.make_position(self.tree.rightmost(root)))
    }

    /// Returns the position just before `p` in key order, or `None` if `p` holds the minimum key.
    pub fn before(&self, p: Position) -> Result<Option<Position>> {
        let slot = self.tree.validate(p)?;
        Ok(self
            .tree
            .inorder_prev(slot)
            .map(|slot| self.tree.make_position(slot)))
    }

    /// Returns the position just after `p` in key order, or `None` if `p` holds the maximum key.
    pub fn after(&self, p: Position) -> Result<Option<Position>> {
        let slot = self.tree.validate(p)?;
        Ok(self
            .tree
            .inorder_next(slot)
            .map(|slot| self.tree.make_position(slot)))
    }

    /// Returns the key-value pair with the minimum key, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::tree_map::TreeMap;
    ///
    /// let mut map: TreeMap<u32, u32> = TreeMap::new();
    /// map.insert(3, 4);
    /// map.insert(1, 2);
    /// assert_eq!(map.find_min(), Some((&1, &2)));
    /// assert_eq!(map.find_max(), Some((&3, &4)));
    /// ```
    pub fn find_min(&self) -> Option<(&K, &V)> {
        self.tree
            .root_slot()
            .map(|root| self.pair(self.tree.leftmost(root)))
    }

    /// Returns the key-value pair with the maximum key, or `None` if the map is empty.
    pub fn find_max(&self) -> Option<(&K, &V)> {
        self.tree
            .root_slot()
            .map(|root| self.pair(self.tree.rightmost(root)))
    }

    /// Returns the key-value pair with the greatest key less than or equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::tree_map::TreeMap;
    ///
    /// let mut map: TreeMap<u32, u32> = TreeMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.find_le(&0), None);
    /// assert_eq!(map.find_le(&2), Some((&1, &1)));
    /// assert_eq!(map.find_le(&3), Some((&3, &3)));
    /// ```
    pub fn find_le<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let anchor = self.search(key)?;
        let slot = if key.cmp(self.key_at(anchor).borrow()) == Ordering::Less {
            self.tree.inorder_prev(anchor)?
        } else {
            anchor
        };
        Some(self.pair(slot))
    }

    /// Returns the key-value pair with the greatest key strictly less than `key`.
    pub fn find_lt<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let anchor = self.search(key)?;
        let slot = if key.cmp(self.key_at(anchor).borrow()) == Ordering::Greater {
            anchor
        } else {
            self.tree.inorder_prev(anchor)?
        };
        Some(self.pair(slot))
    }

    /// Returns the key-value pair with the least key greater than or equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::tree_map::TreeMap;
    ///
    /// let mut map: TreeMap<u32, u32> = TreeMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.find_ge(&2), Some((&3, &3)));
    /// assert_eq!(map.find_ge(&4), None);
    /// ```
    pub fn find_ge<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let anchor = self.search(key)?;
        let slot = if key.cmp(self.key_at(anchor).borrow()) == Ordering::Greater {
            self.tree.inorder_next(anchor)?
        } else {
            anchor
        };
        Some(self.pair(slot))
    }

    /// Returns the key-value pair with the least key strictly greater than `key`.
    pub fn find_gt<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let anchor = self.search(key)?;
        let slot = if key.cmp(self.key_at(anchor).borrow()) == Ordering::Less {
            anchor
        } else {
            self.tree.inorder_next(anchor)?
        };
        Some(self.pair(slot))
    }

    /// Returns an iterator over the key-value pairs with `start <= key < stop` in ascending order.
    /// A `None` bound leaves that side unbounded.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::tree_map::TreeMap;
    ///
    /// let mut map: TreeMap<u32, u32> = TreeMap::new();
    /// for key in &[2, 5, 7, 10, 12, 18] {
    ///     map.insert(*key, *key * 10);
    /// }
    ///
    /// let keys: Vec<&u32> = map.find_range(Some(&5), Some(&15)).map(|(key, _)| key).collect();
    /// assert_eq!(keys, vec![&5, &7, &10, &12]);
    ///
    /// let tail: Vec<&u32> = map.find_range(Some(&11), None).map(|(key, _)| key).collect();
    /// assert_eq!(tail, vec![&12, &18]);
    /// ```
    pub fn find_range<'a, Q>(
        &'a self,
        start: Option<&Q>,
        stop: Option<&'a Q>,
    ) -> Range<'a, K, V, B::Meta, Q>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let next = match start {
            None => self.tree.root_slot().map(|root| self.tree.leftmost(root)),
            Some(start) => self.search(start).and_then(|anchor| {
                if start.cmp(self.key_at(anchor).borrow()) == Ordering::Greater {
                    self.tree.inorder_next(anchor)
                } else {
                    Some(anchor)
                }
            }),
        };
        Range::new(&self.tree, next, stop)
    }

    /// Returns an iterator over the map. The iterator yields key-value pairs in ascending key
    /// order, and in descending order when reversed.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::tree_map::TreeMap;
    ///
    /// let mut map: TreeMap<u32, u32> = TreeMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<K, V, B::Meta> {
        let bounds = self
            .tree
            .root_slot()
            .map(|root| (self.tree.leftmost(root), self.tree.rightmost(root)));
        Iter::new(&self.tree, bounds, self.len())
    }

    /// Returns an iterator over the keys of the map in ascending order. Reverse it to visit the
    /// keys in descending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::tree_map::TreeMap;
    ///
    /// let mut map: TreeMap<u32, u32> = TreeMap::new();
    /// map.insert(2, 0);
    /// map.insert(1, 0);
    /// map.insert(3, 0);
    ///
    /// assert_eq!(map.keys().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// assert_eq!(map.keys().rev().collect::<Vec<&u32>>(), vec![&3, &2, &1]);
    /// ```
    pub fn keys(&self) -> Keys<K, V, B::Meta> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over the values of the map in ascending key order.
    pub fn values(&self) -> Values<K, V, B::Meta> {
        Values::new(self.iter())
    }
}

impl<K, V, B> IntoIterator for TreeMap<K, V, B>
where
    B: Balance,
{
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.tree.into_elements())
    }
}

impl<'a, K, V, B> IntoIterator for &'a TreeMap<K, V, B>
where
    K: 'a,
    V: 'a,
    B: Balance,
{
    type IntoIter = Iter<'a, K, V, B::Meta>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, B> Default for TreeMap<K, V, B>
where
    B: Balance,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, B> Extend<(K, V)> for TreeMap<K, V, B>
where
    K: Ord,
    B: Balance,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, B> FromIterator<(K, V)> for TreeMap<K, V, B>
where
    K: Ord,
    B: Balance,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, B> fmt::Debug for TreeMap<K, V, B>
where
    K: fmt::Debug,
    V: fmt::Debug,
    B: Balance,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, B> PartialEq for TreeMap<K, V, B>
where
    K: PartialEq,
    V: PartialEq,
    B: Balance,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<'a, K, V, B, Q> Index<&'a Q> for TreeMap<K, V, B>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
    B: Balance,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, K, V, B, Q> IndexMut<&'a Q> for TreeMap<K, V, B>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
    B: Balance,
{
    fn index_mut(&mut self, key: &Q) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

#[cfg(test)]
mod tests {
    use super::TreeMap;
    use crate::error::{Error, InvalidPosition};

    // Inserted in this order, the keys form a perfect tree rooted at 10.
    fn sample() -> TreeMap<u32, &'static str> {
        let mut map = TreeMap::new();
        for key in &[10, 5, 15, 2, 7, 12, 18] {
            map.insert(*key, "hi");
        }
        map
    }

    #[test]
    fn test_len_empty() {
        let map: TreeMap<u32, u32> = TreeMap::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.first(), None);
        assert_eq!(map.last(), None);
        assert_eq!(map.find_min(), None);
        assert_eq!(map.find_le(&1), None);
        assert_eq!(map.find_range(None, None).count(), 0);
    }

    #[test]
    fn test_get_empty() {
        let map: TreeMap<u32, u32> = TreeMap::new();
        assert_eq!(map.get(&0), Err(Error::KeyNotFound));
    }

    #[test]
    fn test_insert() {
        let mut map: TreeMap<u32, u32> = TreeMap::new();
        assert_eq!(map.insert(1, 1), None);
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Ok(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_insert_replace_keeps_shape() {
        let mut map = sample();
        let before: Vec<(u32, usize)> = map
            .tree()
            .preorder()
            .map(|p| (*map.key(p).unwrap(), map.tree().num_children(p).unwrap()))
            .collect();
        let root = map.tree().root().unwrap();

        assert_eq!(map.insert(7, "bye"), Some("hi"));
        assert_eq!(map.get(&7), Ok(&"bye"));
        assert_eq!(map.len(), 7);
        assert_eq!(map.tree().root(), Some(root));

        let after: Vec<(u32, usize)> = map
            .tree()
            .preorder()
            .map(|p| (*map.key(p).unwrap(), map.tree().num_children(p).unwrap()))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_before_after() {
        let map = sample();
        let ten = map.find_position(&10).unwrap();
        let before = map.before(ten).unwrap().unwrap();
        let after = map.after(ten).unwrap().unwrap();
        assert_eq!(map.key(before), Ok(&7));
        assert_eq!(map.key(after), Ok(&12));

        let first = map.first().unwrap();
        let last = map.last().unwrap();
        assert_eq!(map.before(first), Ok(None));
        assert_eq!(map.after(last), Ok(None));

        let seven = map.find_position(&7).unwrap();
        assert_eq!(map.after(seven), Ok(Some(ten)));
    }

    #[test]
    fn test_find_bounds() {
        let map = sample();
        assert_eq!(map.find_ge(&8), Some((&10, &"hi")));
        assert_eq!(map.find_ge(&11), Some((&12, &"hi")));
        assert_eq!(map.find_gt(&12), Some((&15, &"hi")));
        assert_eq!(map.find_le(&11), Some((&10, &"hi")));
        assert_eq!(map.find_lt(&10), Some((&7, &"hi")));
        assert_eq!(map.find_le(&1), None);
        assert_eq!(map.find_lt(&2), None);
        assert_eq!(map.find_ge(&19), None);
        assert_eq!(map.find_gt(&18), None);
        assert_eq!(map.find_min(), Some((&2, &"hi")));
        assert_eq!(map.find_max(), Some((&18, &"hi")));
    }

    #[test]
    fn test_find_position_anchor() {
        let map = sample();
        let anchor = map.find_position(&8).unwrap();
        assert_eq!(map.key(anchor), Ok(&7));
        let exact = map.find_position(&15).unwrap();
        assert_eq!(map.entry(exact), Ok((&15, &"hi")));
    }

    #[test]
    fn test_find_range() {
        let mut map: TreeMap<u32, u32> = TreeMap::new();
        for key in &[2, 5, 7, 10, 12, 18] {
            map.insert(*key, *key);
        }
        assert_eq!(
            map.find_range(Some(&5), Some(&15)).collect::<Vec<(&u32, &u32)>>(),
            vec![(&5, &5), (&7, &7), (&10, &10), (&12, &12)],
        );
        assert_eq!(
            map.find_range(None, Some(&7)).collect::<Vec<(&u32, &u32)>>(),
            vec![(&2, &2), (&5, &5)],
        );
        assert_eq!(map.find_range(Some(&19), None).count(), 0);
        assert_eq!(map.find_range(Some(&8), Some(&8)).count(), 0);
    }

    #[test]
    fn test_remove() {
        let mut map = sample();
        assert_eq!(map.remove(&10), Ok((10, "hi")));
        assert_eq!(map.remove(&10), Err(Error::KeyNotFound));
        assert_eq!(map.remove(&11), Err(Error::KeyNotFound));
        assert_eq!(
            map.keys().cloned().collect::<Vec<u32>>(),
            vec![2, 5, 7, 12, 15, 18],
        );
        // the predecessor moved into the root's node
        let root = map.tree().root().unwrap();
        assert_eq!(map.key(root), Ok(&7));
    }

    #[test]
    fn test_remove_all() {
        let mut map = sample();
        for key in &[10, 2, 18, 5, 15, 7, 12] {
            assert!(map.remove(key).is_ok());
        }
        assert!(map.is_empty());
        assert_eq!(map.tree().root(), None);
    }

    #[test]
    fn test_delete_position() {
        let mut map = sample();
        let leaf = map.find_position(&2).unwrap();
        assert_eq!(map.delete(leaf), Ok((2, "hi")));
        assert_eq!(
            map.delete(leaf),
            Err(Error::InvalidPosition(InvalidPosition::Deleted)),
        );

        let other = sample();
        let foreign = other.find_position(&5).unwrap();
        assert_eq!(
            map.delete(foreign),
            Err(Error::InvalidPosition(InvalidPosition::ForeignTree)),
        );
        assert_eq!(map.len(), 6);
    }

    #[test]
    fn test_get_mut() {
        let mut map = sample();
        *map.get_mut(&5).unwrap() = "bye";
        assert_eq!(map[&5], "bye");
        map[&7] = "again";
        assert_eq!(map.get(&7), Ok(&"again"));
        assert_eq!(map.get_mut(&6), Err(Error::KeyNotFound));
    }

    #[test]
    #[should_panic]
    fn test_index_missing() {
        let map = sample();
        let _ = map[&6];
    }

    #[test]
    fn test_clear() {
        let mut map = sample();
        let root = map.tree().root().unwrap();
        map.clear();
        assert!(map.is_empty());
        assert!(map.key(root).is_err());
    }

    #[test]
    fn test_iter() {
        let map = sample();
        assert_eq!(
            map.keys().cloned().collect::<Vec<u32>>(),
            vec![2, 5, 7, 10, 12, 15, 18],
        );
        assert_eq!(
            map.keys().rev().cloned().collect::<Vec<u32>>(),
            vec![18, 15, 12, 10, 7, 5, 2],
        );
        assert_eq!(map.values().count(), 7);
        assert_eq!(map.iter().len(), 7);

        let mut iter = map.iter();
        assert_eq!(iter.next(), Some((&2, &"hi")));
        assert_eq!(iter.next_back(), Some((&18, &"hi")));
        assert_eq!(iter.len(), 5);
    }

    #[test]
    fn test_into_iter() {
        let mut map: TreeMap<u32, u32> = TreeMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_from_iter_and_eq() {
        let map: TreeMap<u32, u32> = vec![(3, 3), (1, 1), (2, 2)].into_iter().collect();
        let mut other: TreeMap<u32, u32> = TreeMap::new();
        other.extend(vec![(1, 1), (2, 2), (3, 3)]);
        assert_eq!(map, other);
        assert_eq!(format!("{:?}", map), "{1: 1, 2: 2, 3: 3}");
    }
}
