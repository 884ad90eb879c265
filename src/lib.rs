//! # Skip List Set
//!
//! A sorted, duplicate-free set backed by a probabilistic skip list.
//!
//! ## Core idea
//! Keep every element in a sorted linked list (level 0), and stack
//! sparser sorted lists on top of it. Each element is promoted to the next
//! level with probability 1/2, so a search can skip over about half of the
//! remaining distance at every level. That gives expected O(log n)
//! search, insert and remove without any of the rotation or recoloring
//! a balanced tree needs.
//!
//! ```
//! use skiplist_set::SkipListSet;
//!
//! let mut set: SkipListSet<i32> = [5, 3, 8, 1].into_iter().collect();
//! assert!(set.remove(&3));
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 5, 8]);
//! assert_eq!(set.first(), Ok(&1));
//! ```

pub mod error;
pub mod options;
pub mod skiplist;
pub mod sorted_set;

// Public re-exports for the top-level API
pub use error::{Error, Result};
pub use options::Options;
pub use skiplist::{Cursor, IntoIter, Iter, SkipListSet};
pub use sorted_set::SortedSet;
