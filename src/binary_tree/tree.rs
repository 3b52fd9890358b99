use crate::arena::{Slot, TypedArena};
use crate::binary_tree::node::{Node, Side};
use crate::binary_tree::traverse::{Children, Inorder, LevelOrder, Postorder, Preorder};
use crate::error::{InvalidPosition, Result, StructuralViolation};
use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};

/// The number of nodes per arena chunk used by `LinkedBinaryTree::new`.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

static NEXT_TREE_ID: AtomicUsize = AtomicUsize::new(0);

/// An opaque handle to a node of a `LinkedBinaryTree`.
///
/// A position is bound to the tree that issued it. Every tree operation that accepts a position
/// first checks that it was issued by that tree and that its node has not been deleted since.
/// Two positions are equal exactly when they refer to the same node.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Position {
    tree: usize,
    slot: Slot,
}

impl Position {
    pub(crate) fn slot(self) -> Slot {
        self.slot
    }
}

/// A binary tree whose nodes live in an arena and are addressed through positions.
///
/// Every node stores an element of type `T` and balancing metadata of type `M`, which is `()`
/// for trees that are not balanced. The mutators keep parent and child links reciprocal.
///
/// # Examples
///
/// ```
/// use positional_trees::binary_tree::LinkedBinaryTree;
///
/// let mut tree = LinkedBinaryTree::new();
/// let root = tree.add_root(2).unwrap();
/// let left = tree.add_left(root, 1).unwrap();
/// tree.add_right(root, 3).unwrap();
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.parent(left), Ok(Some(root)));
/// assert_eq!(tree.height(None), Ok(1));
///
/// let elements: Vec<&u32> = tree.inorder().map(|p| tree.element(p).unwrap()).collect();
/// assert_eq!(elements, vec![&1, &2, &3]);
/// ```
pub struct LinkedBinaryTree<T, M = ()> {
    id: usize,
    arena: TypedArena<Node<T, M>>,
    root: Option<Slot>,
    len: usize,
}

impl<T> LinkedBinaryTree<T> {
    /// Constructs a new, empty `LinkedBinaryTree<T>`.
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `LinkedBinaryTree<T>` whose arena allocates `chunk_size` nodes at
    /// a time.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::binary_tree::LinkedBinaryTree;
    ///
    /// let tree: LinkedBinaryTree<u32> = LinkedBinaryTree::with_chunk_size(16);
    /// assert!(tree.is_empty());
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self::empty(chunk_size)
    }
}

impl<T, M> LinkedBinaryTree<T, M> {
    pub(crate) fn empty(chunk_size: usize) -> Self {
        LinkedBinaryTree {
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            arena: TypedArena::new(chunk_size),
            root: None,
            len: 0,
        }
    }

    pub(crate) fn make_position(&self, slot: Slot) -> Position {
        Position {
            tree: self.id,
            slot,
        }
    }

    pub(crate) fn validate(&self, p: Position) -> Result<Slot> {
        if p.tree != self.id {
            return Err(InvalidPosition::ForeignTree.into());
        }
        if self.arena.get(&p.slot).is_none() {
            return Err(InvalidPosition::Deleted.into());
        }
        Ok(p.slot)
    }

    pub(crate) fn node(&self, slot: Slot) -> &Node<T, M> {
        &self.arena[slot]
    }

    pub(crate) fn node_mut(&mut self, slot: Slot) -> &mut Node<T, M> {
        &mut self.arena[slot]
    }

    fn side_of(&self, parent: Slot, child: Slot) -> Side {
        if self.node(parent).left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    fn relink(&mut self, parent: Slot, child: Option<Slot>, side: Side) {
        *self.arena[parent].child_mut(side) = child;
        if let Some(child) = child {
            self.arena[child].parent = Some(parent);
        }
    }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the position of the root, or `None` if the tree is empty.
    pub fn root(&self) -> Option<Position> {
        self.root.map(|slot| self.make_position(slot))
    }

    /// Returns an immutable reference to the element stored at a position.
    pub fn element(&self, p: Position) -> Result<&T> {
        let slot = self.validate(p)?;
        Ok(&self.node(slot).element)
    }

    /// Returns a mutable reference to the element stored at a position.
    pub fn element_mut(&mut self, p: Position) -> Result<&mut T> {
        let slot = self.validate(p)?;
        Ok(&mut self.node_mut(slot).element)
    }

    /// Returns the balancing metadata stored at a position.
    pub fn meta(&self, p: Position) -> Result<&M> {
        let slot = self.validate(p)?;
        Ok(&self.node(slot).meta)
    }

    /// Returns the position of a node's parent, or `None` if the node is the root.
    pub fn parent(&self, p: Position) -> Result<Option<Position>> {
        let slot = self.validate(p)?;
        Ok(self.node(slot).parent.map(|slot| self.make_position(slot)))
    }

    /// Returns the position of a node's child on one side, or `None` if it has no such child.
    pub fn child(&self, p: Position, side: Side) -> Result<Option<Position>> {
        let slot = self.validate(p)?;
        Ok(self.node(slot).child(side).map(|slot| self.make_position(slot)))
    }

    /// Returns the position of a node's left child, or `None` if it has no left child.
    pub fn left(&self, p: Position) -> Result<Option<Position>> {
        self.child(p, Side::Left)
    }

    /// Returns the position of a node's right child, or `None` if it has no right child.
    pub fn right(&self, p: Position) -> Result<Option<Position>> {
        self.child(p, Side::Right)
    }

    /// Returns which child of its parent a node is, or `None` if the node is the root.
    pub fn side(&self, p: Position) -> Result<Option<Side>> {
        let slot = self.validate(p)?;
        Ok(self.node(slot).parent.map(|parent| self.side_of(parent, slot)))
    }

    /// Returns the position of a node's sibling, or `None` if it has no sibling.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::binary_tree::LinkedBinaryTree;
    ///
    /// let mut tree = LinkedBinaryTree::new();
    /// let root = tree.add_root(0).unwrap();
    /// let left = tree.add_left(root, 1).unwrap();
    /// assert_eq!(tree.sibling(left), Ok(None));
    ///
    /// let right = tree.add_right(root, 2).unwrap();
    /// assert_eq!(tree.sibling(left), Ok(Some(right)));
    /// assert_eq!(tree.sibling(root), Ok(None));
    /// ```
    pub fn sibling(&self, p: Position) -> Result<Option<Position>> {
        match (self.parent(p)?, self.side(p)?) {
            (Some(parent), Some(side)) => self.child(parent, side.opposite()),
            _ => Ok(None),
        }
    }

    /// Returns an iterator over the positions of a node's children, left child first.
    pub fn children(&self, p: Position) -> Result<Children> {
        Ok(Children::new(self.left(p)?, self.right(p)?))
    }

    /// Returns the number of children of a node.
    pub fn num_children(&self, p: Position) -> Result<usize> {
        let slot = self.validate(p)?;
        Ok(self.node(slot).num_children())
    }

    /// Returns `true` if a node has no children.
    pub fn is_leaf(&self, p: Position) -> Result<bool> {
        Ok(self.num_children(p)? == 0)
    }

    /// Returns `true` if a node is the root of the tree.
    pub fn is_root(&self, p: Position) -> Result<bool> {
        let slot = self.validate(p)?;
        Ok(self.root == Some(slot))
    }

    /// Returns the height of the subtree rooted at `p`, or of the whole tree if `p` is `None`. A
    /// leaf has height 0, as does an empty tree.
    ///
    /// The height is computed level by level, so deep degenerate trees do not exhaust the stack.
    pub fn height(&self, p: Option<Position>) -> Result<usize> {
        let start = match p {
            Some(p) => self.validate(p)?,
            None => match self.root {
                Some(root) => root,
                None => return Ok(0),
            },
        };

        let mut height = 0;
        let mut level = vec![start];
        loop {
            let next: Vec<Slot> = level
                .iter()
                .flat_map(|slot| {
                    let node = self.node(*slot);
                    node.left.into_iter().chain(node.right)
                })
                .collect();
            if next.is_empty() {
                return Ok(height);
            }
            height += 1;
            level = next;
        }
    }

    /// Returns an iterator over the positions of the tree using in-order traversal.
    pub fn inorder(&self) -> Inorder<T, M> {
        Inorder::new(self, self.root)
    }

    /// Returns an iterator over the positions of the tree using pre-order traversal.
    pub fn preorder(&self) -> Preorder<T, M> {
        Preorder::new(self, self.root)
    }

    /// Returns an iterator over the positions of the tree using post-order traversal.
    pub fn postorder(&self) -> Postorder<T, M> {
        Postorder::new(self, self.root)
    }

    /// Returns an iterator over the positions of the tree in level order.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::binary_tree::LinkedBinaryTree;
    ///
    /// let mut tree = LinkedBinaryTree::new();
    /// let root = tree.add_root('a').unwrap();
    /// let left = tree.add_left(root, 'b').unwrap();
    /// tree.add_right(root, 'c').unwrap();
    /// tree.add_left(left, 'd').unwrap();
    ///
    /// let order: String = tree.breadth_first().map(|p| *tree.element(p).unwrap()).collect();
    /// assert_eq!(order, "abcd");
    /// ```
    pub fn breadth_first(&self) -> LevelOrder<T, M> {
        LevelOrder::new(self, self.root)
    }

    /// Returns an iterator over the positions of the tree. Positions are reported in-order.
    pub fn positions(&self) -> Inorder<T, M> {
        self.inorder()
    }

    /// Replaces the element stored at a position and returns the old element.
    pub fn replace(&mut self, p: Position, element: T) -> Result<T> {
        let slot = self.validate(p)?;
        Ok(mem::replace(&mut self.node_mut(slot).element, element))
    }

    /// Deletes the node at a position, splicing its only child (if any) into its place, and
    /// returns the element it stored. Every position referring to the node becomes invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::binary_tree::LinkedBinaryTree;
    /// use positional_trees::{Error, InvalidPosition};
    ///
    /// let mut tree = LinkedBinaryTree::new();
    /// let root = tree.add_root(0).unwrap();
    /// let child = tree.add_left(root, 1).unwrap();
    ///
    /// assert_eq!(tree.delete(root), Ok(0));
    /// assert_eq!(tree.root(), Some(child));
    /// assert_eq!(tree.element(root), Err(Error::InvalidPosition(InvalidPosition::Deleted)));
    /// ```
    pub fn delete(&mut self, p: Position) -> Result<T> {
        let slot = self.validate(p)?;
        if self.node(slot).num_children() == 2 {
            return Err(StructuralViolation::TwoChildren.into());
        }
        Ok(self.delete_slot(slot))
    }

    // precondition: the node has at most one child
    pub(crate) fn delete_slot(&mut self, slot: Slot) -> T {
        let (parent, child) = {
            let node = self.node(slot);
            (node.parent, node.left.or(node.right))
        };

        if let Some(child) = child {
            self.node_mut(child).parent = parent;
        }
        match parent {
            None => self.root = child,
            Some(parent) => {
                let side = self.side_of(parent, slot);
                *self.node_mut(parent).child_mut(side) = child;
            },
        }

        self.len -= 1;
        debug!("deleted node {:?}, tree now holds {} elements", slot, self.len);
        self.arena.free(&slot).element
    }

    /// Rotates the node at `p` above its parent. The inner child of `p` moves across to the old
    /// parent, and the old parent becomes the child of `p` on the opposite side.
    ///
    /// ```text
    ///       y              x
    ///      / \            / \
    ///     x  t2    <->   t0  y
    ///    / \                / \
    ///   t0  t1             t1  t2
    /// ```
    pub fn rotate(&mut self, p: Position) -> Result<()> {
        let x = self.validate(p)?;
        if self.node(x).parent.is_none() {
            return Err(StructuralViolation::RotateRoot.into());
        }
        self.rotate_slot(x);
        Ok(())
    }

    // precondition: the node has a parent
    pub(crate) fn rotate_slot(&mut self, x: Slot) {
        let y = match self.node(x).parent {
            Some(parent) => parent,
            None => unreachable!(),
        };

        match self.node(y).parent {
            None => {
                self.root = Some(x);
                self.node_mut(x).parent = None;
            },
            Some(z) => {
                let side = self.side_of(z, y);
                self.relink(z, Some(x), side);
            },
        }

        if self.node(y).left == Some(x) {
            let inner = self.node(x).right;
            self.relink(y, inner, Side::Left);
            self.relink(x, Some(y), Side::Right);
        } else {
            let inner = self.node(x).left;
            self.relink(y, inner, Side::Right);
            self.relink(x, Some(y), Side::Left);
        }

        trace!("rotated {:?} above {:?}", x, y);
    }

    /// Performs a trinode restructure of `x`, its parent and its grandparent, and returns the
    /// position that ends up on top of the three.
    ///
    /// When `x` and its parent lean the same way, the parent is rotated once. Otherwise `x` is
    /// rotated twice.
    pub fn restructure(&mut self, x: Position) -> Result<Position> {
        let slot = self.validate(x)?;
        let has_grandparent = self
            .node(slot)
            .parent
            .map_or(false, |parent| self.node(parent).parent.is_some());
        if !has_grandparent {
            return Err(StructuralViolation::MissingGrandparent.into());
        }
        let top = self.restructure_slots(slot, Self::rotate_slot);
        Ok(self.make_position(top))
    }

    // precondition: the node has a grandparent
    pub(crate) fn restructure_slots<F>(&mut self, x: Slot, mut rotate: F) -> Slot
    where
        F: FnMut(&mut Self, Slot),
    {
        let y = match self.node(x).parent {
            Some(parent) => parent,
            None => unreachable!(),
        };
        let z = match self.node(y).parent {
            Some(grandparent) => grandparent,
            None => unreachable!(),
        };

        if self.side_of(y, x) == self.side_of(z, y) {
            trace!("single rotation of {:?}", y);
            rotate(self, y);
            y
        } else {
            trace!("double rotation of {:?}", x);
            rotate(self, x);
            rotate(self, x);
            x
        }
    }

    /// Removes every node, invalidating all outstanding positions.
    pub fn clear(&mut self) {
        let slots: Vec<Slot> = self.preorder().map(|p| p.slot).collect();
        for slot in slots {
            self.arena.free(&slot);
        }
        self.root = None;
        self.len = 0;
    }

    /// Consumes the tree and returns its elements in in-order.
    pub fn into_elements(mut self) -> Vec<T> {
        let slots: Vec<Slot> = self.inorder().map(|p| p.slot).collect();
        slots
            .into_iter()
            .map(|slot| self.arena.free(&slot).element)
            .collect()
    }

    pub(crate) fn root_slot(&self) -> Option<Slot> {
        self.root
    }

    pub(crate) fn leftmost(&self, mut slot: Slot) -> Slot {
        while let Some(left) = self.node(slot).left {
            slot = left;
        }
        slot
    }

    pub(crate) fn rightmost(&self, mut slot: Slot) -> Slot {
        while let Some(right) = self.node(slot).right {
            slot = right;
        }
        slot
    }

    /// Returns the node visited right after `slot` by an in-order traversal.
    pub(crate) fn inorder_next(&self, slot: Slot) -> Option<Slot> {
        self.inorder_neighbor(slot, Side::Right)
    }

    /// Returns the node visited right before `slot` by an in-order traversal.
    pub(crate) fn inorder_prev(&self, slot: Slot) -> Option<Slot> {
        self.inorder_neighbor(slot, Side::Left)
    }

    fn inorder_neighbor(&self, slot: Slot, side: Side) -> Option<Slot> {
        if let Some(child) = self.node(slot).child(side) {
            return Some(match side {
                Side::Left => self.rightmost(child),
                Side::Right => self.leftmost(child),
            });
        }

        let mut walk = slot;
        let mut above = self.node(slot).parent;
        while let Some(parent) = above {
            if self.node(parent).child(side) != Some(walk) {
                break;
            }
            walk = parent;
            above = self.node(parent).parent;
        }
        above
    }
}

impl<T, M> LinkedBinaryTree<T, M>
where
    M: Default,
{
    // precondition: the target slot (or the root, if `parent` is `None`) is vacant
    pub(crate) fn link_new(&mut self, parent: Option<(Slot, Side)>, element: T) -> Slot {
        let slot = self.arena.allocate(Node::new(element, parent.map(|(parent, _)| parent)));
        match parent {
            None => self.root = Some(slot),
            Some((parent, side)) => *self.node_mut(parent).child_mut(side) = Some(slot),
        }
        self.len += 1;
        slot
    }

    /// Places an element at the root of an empty tree and returns its position.
    pub fn add_root(&mut self, element: T) -> Result<Position> {
        if self.root.is_some() {
            return Err(StructuralViolation::RootExists.into());
        }
        let slot = self.link_new(None, element);
        Ok(self.make_position(slot))
    }

    /// Creates a new child of `p` on one side and returns its position.
    pub fn add_child(&mut self, p: Position, side: Side, element: T) -> Result<Position> {
        let parent = self.validate(p)?;
        if self.node(parent).child(side).is_some() {
            return Err(match side {
                Side::Left => StructuralViolation::LeftChildExists,
                Side::Right => StructuralViolation::RightChildExists,
            }
            .into());
        }
        let slot = self.link_new(Some((parent, side)), element);
        Ok(self.make_position(slot))
    }

    /// Creates a new left child of `p` and returns its position.
    pub fn add_left(&mut self, p: Position, element: T) -> Result<Position> {
        self.add_child(p, Side::Left, element)
    }

    /// Creates a new right child of `p` and returns its position.
    pub fn add_right(&mut self, p: Position, element: T) -> Result<Position> {
        self.add_child(p, Side::Right, element)
    }

    /// Attaches the whole of `left` and `right` as the left and right subtrees of the leaf `p`.
    /// Both source trees are left empty and their positions become invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::binary_tree::LinkedBinaryTree;
    ///
    /// let mut tree = LinkedBinaryTree::new();
    /// let root = tree.add_root(2).unwrap();
    ///
    /// let mut left = LinkedBinaryTree::new();
    /// left.add_root(1).unwrap();
    /// let mut right = LinkedBinaryTree::new();
    /// right.add_root(3).unwrap();
    ///
    /// tree.attach(root, &mut left, &mut right).unwrap();
    /// assert_eq!(tree.len(), 3);
    /// assert!(left.is_empty() && right.is_empty());
    /// ```
    pub fn attach(&mut self, p: Position, left: &mut Self, right: &mut Self) -> Result<()> {
        let slot = self.validate(p)?;
        if self.node(slot).num_children() != 0 {
            return Err(StructuralViolation::NotLeaf.into());
        }
        self.graft(slot, Side::Left, left);
        self.graft(slot, Side::Right, right);
        Ok(())
    }

    fn graft(&mut self, parent: Slot, side: Side, source: &mut Self) {
        let source_root = match source.root.take() {
            Some(root) => root,
            None => return,
        };

        let mut stack = vec![(source_root, parent, side)];
        while let Some((source_slot, parent, side)) = stack.pop() {
            let Node {
                element,
                left,
                right,
                meta,
                ..
            } = source.arena.free(&source_slot);
            let slot = self.arena.allocate(Node {
                element,
                parent: None,
                left: None,
                right: None,
                meta,
            });
            self.relink(parent, Some(slot), side);
            if let Some(right) = right {
                stack.push((right, slot, Side::Right));
            }
            if let Some(left) = left {
                stack.push((left, slot, Side::Left));
            }
        }

        debug!("grafted {} nodes under {:?}", source.len, parent);
        self.len += source.len;
        source.len = 0;
    }
}

impl<T, M> Default for LinkedBinaryTree<T, M> {
    fn default() -> Self {
        Self::empty(DEFAULT_CHUNK_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::LinkedBinaryTree;
    use crate::binary_tree::Side;
    use crate::error::{Error, InvalidPosition, StructuralViolation};

    //       1
    //      / \
    //     2   3
    //    / \   \
    //   4   5   6
    fn sample() -> LinkedBinaryTree<u32> {
        let mut tree = LinkedBinaryTree::new();
        let one = tree.add_root(1).unwrap();
        let two = tree.add_left(one, 2).unwrap();
        let three = tree.add_right(one, 3).unwrap();
        tree.add_left(two, 4).unwrap();
        tree.add_right(two, 5).unwrap();
        tree.add_right(three, 6).unwrap();
        tree
    }

    fn collect<I>(tree: &LinkedBinaryTree<u32>, positions: I) -> Vec<u32>
    where
        I: Iterator<Item = super::Position>,
    {
        positions.map(|p| *tree.element(p).unwrap()).collect()
    }

    #[test]
    fn test_empty() {
        let tree: LinkedBinaryTree<u32> = LinkedBinaryTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.height(None), Ok(0));
        assert_eq!(tree.inorder().count(), 0);
        assert_eq!(tree.breadth_first().count(), 0);
    }

    #[test]
    fn test_add_root_twice() {
        let mut tree = LinkedBinaryTree::new();
        tree.add_root(0).unwrap();
        assert_eq!(
            tree.add_root(1),
            Err(Error::StructuralViolation(StructuralViolation::RootExists)),
        );
    }

    #[test]
    fn test_add_occupied_child() {
        let mut tree = LinkedBinaryTree::new();
        let root = tree.add_root(0).unwrap();
        tree.add_left(root, 1).unwrap();
        tree.add_right(root, 2).unwrap();
        assert_eq!(
            tree.add_left(root, 3),
            Err(Error::StructuralViolation(StructuralViolation::LeftChildExists)),
        );
        assert_eq!(
            tree.add_right(root, 3),
            Err(Error::StructuralViolation(StructuralViolation::RightChildExists)),
        );
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_navigation() {
        let tree = sample();
        let root = tree.root().unwrap();
        let two = tree.left(root).unwrap().unwrap();
        let three = tree.right(root).unwrap().unwrap();

        assert_eq!(tree.is_root(root), Ok(true));
        assert_eq!(tree.is_root(two), Ok(false));
        assert_eq!(tree.sibling(two), Ok(Some(three)));
        assert_eq!(tree.side(three), Ok(Some(Side::Right)));
        assert_eq!(tree.num_children(two), Ok(2));
        assert_eq!(tree.num_children(three), Ok(1));
        assert_eq!(collect(&tree, tree.children(two).unwrap()), vec![4, 5]);

        let six = tree.right(three).unwrap().unwrap();
        assert_eq!(tree.is_leaf(six), Ok(true));
        assert_eq!(tree.sibling(six), Ok(None));
    }

    #[test]
    fn test_height() {
        let tree = sample();
        let root = tree.root().unwrap();
        let three = tree.right(root).unwrap().unwrap();
        let six = tree.right(three).unwrap().unwrap();

        assert_eq!(tree.height(None), Ok(2));
        assert_eq!(tree.height(Some(three)), Ok(1));
        assert_eq!(tree.height(Some(six)), Ok(0));
    }

    #[test]
    fn test_traversals() {
        let tree = sample();
        assert_eq!(collect(&tree, tree.inorder()), vec![4, 2, 5, 1, 3, 6]);
        assert_eq!(collect(&tree, tree.preorder()), vec![1, 2, 4, 5, 3, 6]);
        assert_eq!(collect(&tree, tree.postorder()), vec![4, 5, 2, 6, 3, 1]);
        assert_eq!(collect(&tree, tree.breadth_first()), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(collect(&tree, tree.positions()), vec![4, 2, 5, 1, 3, 6]);
    }

    #[test]
    fn test_replace() {
        let mut tree = sample();
        let root = tree.root().unwrap();
        assert_eq!(tree.replace(root, 10), Ok(1));
        assert_eq!(tree.element(root), Ok(&10));
    }

    #[test]
    fn test_delete() {
        let mut tree = sample();
        let root = tree.root().unwrap();
        let two = tree.left(root).unwrap().unwrap();
        let three = tree.right(root).unwrap().unwrap();

        assert_eq!(
            tree.delete(two),
            Err(Error::StructuralViolation(StructuralViolation::TwoChildren)),
        );
        assert_eq!(tree.delete(three), Ok(3));
        assert_eq!(tree.len(), 5);
        assert_eq!(collect(&tree, tree.breadth_first()), vec![1, 2, 6, 4, 5]);

        let six = tree.right(root).unwrap().unwrap();
        assert_eq!(tree.parent(six), Ok(Some(root)));
        assert_eq!(
            tree.parent(three),
            Err(Error::InvalidPosition(InvalidPosition::Deleted)),
        );
    }

    #[test]
    fn test_deleted_position_stays_invalid_after_reuse() {
        let mut tree = LinkedBinaryTree::new();
        let root = tree.add_root(0).unwrap();
        let leaf = tree.add_left(root, 1).unwrap();
        tree.delete(leaf).unwrap();

        let new_leaf = tree.add_left(root, 2).unwrap();
        assert_ne!(leaf, new_leaf);
        assert_eq!(
            tree.element(leaf),
            Err(Error::InvalidPosition(InvalidPosition::Deleted)),
        );
    }

    #[test]
    fn test_foreign_position() {
        let mut tree = LinkedBinaryTree::new();
        let mut other = LinkedBinaryTree::new();
        tree.add_root(0).unwrap();
        let foreign = other.add_root(0).unwrap();

        assert_eq!(
            tree.left(foreign),
            Err(Error::InvalidPosition(InvalidPosition::ForeignTree)),
        );
        assert_eq!(
            tree.delete(foreign),
            Err(Error::InvalidPosition(InvalidPosition::ForeignTree)),
        );
    }

    #[test]
    fn test_attach() {
        let mut tree = LinkedBinaryTree::new();
        let root = tree.add_root(1).unwrap();
        let mut left = sample();
        let stale = left.root().unwrap();
        let mut right = LinkedBinaryTree::new();

        tree.attach(root, &mut left, &mut right).unwrap();
        assert_eq!(tree.len(), 7);
        assert!(left.is_empty());
        assert_eq!(left.root(), None);
        assert!(left.element(stale).is_err());
        assert_eq!(collect(&tree, tree.preorder()), vec![1, 1, 2, 4, 5, 3, 6]);
        assert_eq!(tree.height(None), Ok(3));

        let mut more = sample();
        let mut empty = LinkedBinaryTree::new();
        assert_eq!(
            tree.attach(root, &mut more, &mut empty),
            Err(Error::StructuralViolation(StructuralViolation::NotLeaf)),
        );
        assert_eq!(more.len(), 6);
    }

    #[test]
    fn test_rotate() {
        // 3 - 2 - 1 as a left spine
        let mut tree = LinkedBinaryTree::new();
        let three = tree.add_root(3).unwrap();
        let two = tree.add_left(three, 2).unwrap();
        tree.add_left(two, 1).unwrap();

        assert_eq!(
            tree.rotate(three),
            Err(Error::StructuralViolation(StructuralViolation::RotateRoot)),
        );
        tree.rotate(two).unwrap();
        assert_eq!(tree.root(), Some(two));
        assert_eq!(tree.parent(three), Ok(Some(two)));
        assert_eq!(collect(&tree, tree.inorder()), vec![1, 2, 3]);
        assert_eq!(tree.height(None), Ok(1));
    }

    #[test]
    fn test_restructure_double_rotation() {
        //   1
        //    \
        //     3
        //    /
        //   2
        let mut tree = LinkedBinaryTree::new();
        let one = tree.add_root(1).unwrap();
        let three = tree.add_right(one, 3).unwrap();
        let two = tree.add_left(three, 2).unwrap();

        assert_eq!(
            tree.restructure(three),
            Err(Error::StructuralViolation(StructuralViolation::MissingGrandparent)),
        );
        assert_eq!(tree.restructure(two), Ok(two));
        assert_eq!(tree.root(), Some(two));
        assert_eq!(collect(&tree, tree.breadth_first()), vec![2, 1, 3]);
    }

    #[test]
    fn test_clear() {
        let mut tree = sample();
        let root = tree.root().unwrap();
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.element(root).is_err());
        tree.add_root(7).unwrap();
        assert!(tree.element(root).is_err());
    }

    #[test]
    fn test_into_elements() {
        assert_eq!(sample().into_elements(), vec![4, 2, 5, 1, 3, 6]);
    }
}
