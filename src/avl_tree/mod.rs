//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one.

mod balance;
mod map;

pub use self::balance::Avl;
pub use self::map::AvlMap;
