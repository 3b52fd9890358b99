//! Ordered map stored in a linked binary search tree, with a pluggable balancing policy.

mod balance;
mod iter;
mod map;
mod serialize;

pub use self::balance::{Balance, Unbalanced};
pub use self::iter::{IntoIter, Iter, Keys, Range, Values};
pub use self::map::TreeMap;
