use crate::arena::Slot;

/// Which child slot of its parent a node occupies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A struct representing a node of a linked binary tree. Links are arena slots of the same tree.
pub struct Node<T, M> {
    pub element: T,
    pub parent: Option<Slot>,
    pub left: Option<Slot>,
    pub right: Option<Slot>,
    pub meta: M,
}

impl<T, M> Node<T, M> {
    pub fn new(element: T, parent: Option<Slot>) -> Self
    where
        M: Default,
    {
        Node {
            element,
            parent,
            left: None,
            right: None,
            meta: M::default(),
        }
    }

    pub fn child(&self, side: Side) -> Option<Slot> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn child_mut(&mut self, side: Side) -> &mut Option<Slot> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn num_children(&self) -> usize {
        self.left.iter().count() + self.right.iter().count()
    }
}
