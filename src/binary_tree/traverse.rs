//! Iterators over the positions of a `LinkedBinaryTree`.
//!
//! Each iterator keeps only the state needed to resume: a pending stack for the depth-first
//! orders and a FIFO queue for level order. They borrow the tree, so it cannot be restructured
//! while a traversal is in progress. None of them can be restarted once consumed.

use crate::arena::Slot;
use crate::binary_tree::tree::{LinkedBinaryTree, Position};
use std::collections::VecDeque;

/// An iterator over the (at most two) children of a node, left child first.
pub struct Children {
    left: Option<Position>,
    right: Option<Position>,
}

impl Children {
    pub(crate) fn new(left: Option<Position>, right: Option<Position>) -> Self {
        Children { left, right }
    }
}

impl Iterator for Children {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        self.left.take().or_else(|| self.right.take())
    }
}

/// An in-order iterator for `LinkedBinaryTree<T, M>`.
pub struct Inorder<'a, T, M>
where
    T: 'a,
    M: 'a,
{
    tree: &'a LinkedBinaryTree<T, M>,
    current: Option<Slot>,
    stack: Vec<Slot>,
}

impl<'a, T, M> Inorder<'a, T, M> {
    pub(crate) fn new(tree: &'a LinkedBinaryTree<T, M>, root: Option<Slot>) -> Self {
        Inorder {
            tree,
            current: root,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, M> Iterator for Inorder<'a, T, M> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.current {
            self.stack.push(slot);
            self.current = self.tree.node(slot).left;
        }
        self.stack.pop().map(|slot| {
            self.current = self.tree.node(slot).right;
            self.tree.make_position(slot)
        })
    }
}

/// A pre-order iterator for `LinkedBinaryTree<T, M>`.
pub struct Preorder<'a, T, M>
where
    T: 'a,
    M: 'a,
{
    tree: &'a LinkedBinaryTree<T, M>,
    stack: Vec<Slot>,
}

impl<'a, T, M> Preorder<'a, T, M> {
    pub(crate) fn new(tree: &'a LinkedBinaryTree<T, M>, root: Option<Slot>) -> Self {
        Preorder {
            tree,
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, T, M> Iterator for Preorder<'a, T, M> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        self.stack.pop().map(|slot| {
            let node = self.tree.node(slot);
            self.stack.extend(node.right);
            self.stack.extend(node.left);
            self.tree.make_position(slot)
        })
    }
}

/// A post-order iterator for `LinkedBinaryTree<T, M>`.
pub struct Postorder<'a, T, M>
where
    T: 'a,
    M: 'a,
{
    tree: &'a LinkedBinaryTree<T, M>,
    // the flag records whether the children of the slot have already been pushed
    stack: Vec<(Slot, bool)>,
}

impl<'a, T, M> Postorder<'a, T, M> {
    pub(crate) fn new(tree: &'a LinkedBinaryTree<T, M>, root: Option<Slot>) -> Self {
        Postorder {
            tree,
            stack: root.into_iter().map(|slot| (slot, false)).collect(),
        }
    }
}

impl<'a, T, M> Iterator for Postorder<'a, T, M> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((slot, expanded)) = self.stack.pop() {
            if expanded {
                return Some(self.tree.make_position(slot));
            }
            let node = self.tree.node(slot);
            self.stack.push((slot, true));
            self.stack.extend(node.right.map(|slot| (slot, false)));
            self.stack.extend(node.left.map(|slot| (slot, false)));
        }
        None
    }
}

/// A breadth-first iterator for `LinkedBinaryTree<T, M>`.
pub struct LevelOrder<'a, T, M>
where
    T: 'a,
    M: 'a,
{
    tree: &'a LinkedBinaryTree<T, M>,
    queue: VecDeque<Slot>,
}

impl<'a, T, M> LevelOrder<'a, T, M> {
    pub(crate) fn new(tree: &'a LinkedBinaryTree<T, M>, root: Option<Slot>) -> Self {
        LevelOrder {
            tree,
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, T, M> Iterator for LevelOrder<'a, T, M> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front().map(|slot| {
            let node = self.tree.node(slot);
            self.queue.extend(node.left);
            self.queue.extend(node.right);
            self.tree.make_position(slot)
        })
    }
}
