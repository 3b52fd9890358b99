//! Linked binary trees addressed through validated positions, and ordered maps built on top of
//! them.
//!
//! `binary_tree::LinkedBinaryTree` stores its nodes in an arena and hands out `Position`s that
//! are checked on every use: a position from another tree, or one whose node has been deleted,
//! is rejected with `Error::InvalidPosition` instead of touching the wrong node.
//!
//! `tree_map::TreeMap` is an ordered map kept in such a tree. Its balancing policy is a type
//! parameter; `avl_tree::AvlMap` is the map with the AVL policy.
//!
//! # Examples
//!
//! ```
//! use positional_trees::avl_tree::AvlMap;
//! use positional_trees::{Error, InvalidPosition};
//!
//! let mut map = AvlMap::new();
//! map.insert("b", 2);
//! map.insert("a", 1);
//!
//! let first = map.first().unwrap();
//! assert_eq!(map.entry(first), Ok((&"a", &1)));
//!
//! let other: AvlMap<&str, u32> = AvlMap::new();
//! assert_eq!(
//!     other.key(first),
//!     Err(Error::InvalidPosition(InvalidPosition::ForeignTree)),
//! );
//! ```

#[macro_use]
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod arena;
pub mod avl_tree;
pub mod binary_tree;
mod error;
mod item;
pub mod tree_map;

pub use crate::avl_tree::{Avl, AvlMap};
pub use crate::error::{Error, InvalidPosition, Result, StructuralViolation};
pub use crate::item::Item;
pub use crate::tree_map::{Balance, TreeMap, Unbalanced};
