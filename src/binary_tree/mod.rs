//! Linked binary tree whose nodes are addressed through validated positions.

mod node;
mod traverse;
mod tree;

pub use self::node::Side;
pub use self::traverse::{Children, Inorder, LevelOrder, Postorder, Preorder};
pub use self::tree::{LinkedBinaryTree, Position, DEFAULT_CHUNK_SIZE};
