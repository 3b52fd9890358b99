use crate::arena::Slot;
use crate::binary_tree::LinkedBinaryTree;
use crate::item::Item;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::vec;

/// An owning iterator for `TreeMap<K, V, B>`.
///
/// This iterator yields owned entries in ascending key order.
pub struct IntoIter<K, V> {
    items: vec::IntoIter<Item<K, V>>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(items: Vec<Item<K, V>>) -> Self {
        IntoIter {
            items: items.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(Item::into_pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back().map(Item::into_pair)
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// An iterator for `TreeMap<K, V, B>`.
///
/// This iterator walks the tree in-order from both ends and yields immutable references. It
/// follows parent links instead of keeping a stack.
pub struct Iter<'a, K, V, M>
where
    K: 'a,
    V: 'a,
    M: 'a,
{
    tree: &'a LinkedBinaryTree<Item<K, V>, M>,
    front: Option<Slot>,
    back: Option<Slot>,
    remaining: usize,
}

impl<'a, K, V, M> Iter<'a, K, V, M> {
    pub(crate) fn new(
        tree: &'a LinkedBinaryTree<Item<K, V>, M>,
        bounds: Option<(Slot, Slot)>,
        len: usize,
    ) -> Self {
        Iter {
            tree,
            front: bounds.map(|(first, _)| first),
            back: bounds.map(|(_, last)| last),
            remaining: len,
        }
    }

    fn pair(&self, slot: Slot) -> (&'a K, &'a V) {
        let tree = self.tree;
        let Item { ref key, ref value } = tree.node(slot).element;
        (key, value)
    }
}

impl<'a, K, V, M> Iterator for Iter<'a, K, V, M> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.front?;
        self.remaining -= 1;
        self.front = self.tree.inorder_next(slot);
        Some(self.pair(slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, M> DoubleEndedIterator for Iter<'a, K, V, M> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.back?;
        self.remaining -= 1;
        self.back = self.tree.inorder_prev(slot);
        Some(self.pair(slot))
    }
}

impl<'a, K, V, M> ExactSizeIterator for Iter<'a, K, V, M> {}

/// An iterator over the keys of a `TreeMap<K, V, B>` in ascending order.
pub struct Keys<'a, K, V, M>
where
    K: 'a,
    V: 'a,
    M: 'a,
{
    inner: Iter<'a, K, V, M>,
}

impl<'a, K, V, M> Keys<'a, K, V, M> {
    pub(crate) fn new(inner: Iter<'a, K, V, M>) -> Self {
        Keys { inner }
    }
}

impl<'a, K, V, M> Iterator for Keys<'a, K, V, M> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V, M> DoubleEndedIterator for Keys<'a, K, V, M> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<'a, K, V, M> ExactSizeIterator for Keys<'a, K, V, M> {}

/// An iterator over the values of a `TreeMap<K, V, B>` in ascending key order.
pub struct Values<'a, K, V, M>
where
    K: 'a,
    V: 'a,
    M: 'a,
{
    inner: Iter<'a, K, V, M>,
}

impl<'a, K, V, M> Values<'a, K, V, M> {
    pub(crate) fn new(inner: Iter<'a, K, V, M>) -> Self {
        Values { inner }
    }
}

impl<'a, K, V, M> Iterator for Values<'a, K, V, M> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V, M> DoubleEndedIterator for Values<'a, K, V, M> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<'a, K, V, M> ExactSizeIterator for Values<'a, K, V, M> {}

/// An iterator over a key range of a `TreeMap<K, V, B>`, created by `find_range`.
///
/// The iterator starts at the first key not less than the lower bound and stops before the first
/// key not less than the upper bound. Once it returns `None` it stays exhausted.
pub struct Range<'a, K, V, M, Q>
where
    K: 'a,
    V: 'a,
    M: 'a,
    Q: 'a + ?Sized,
{
    tree: &'a LinkedBinaryTree<Item<K, V>, M>,
    next: Option<Slot>,
    stop: Option<&'a Q>,
}

impl<'a, K, V, M, Q> Range<'a, K, V, M, Q>
where
    Q: ?Sized,
{
    pub(crate) fn new(
        tree: &'a LinkedBinaryTree<Item<K, V>, M>,
        next: Option<Slot>,
        stop: Option<&'a Q>,
    ) -> Self {
        Range { tree, next, stop }
    }
}

impl<'a, K, V, M, Q> Iterator for Range<'a, K, V, M, Q>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.next.take()?;
        let tree = self.tree;
        let Item { ref key, ref value } = tree.node(slot).element;
        if let Some(stop) = self.stop {
            if stop.cmp(key.borrow()) != Ordering::Greater {
                return None;
            }
        }
        self.next = tree.inorder_next(slot);
        Some((key, value))
    }
}
