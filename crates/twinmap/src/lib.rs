//! Ordered bidirectional map over coupled AVL trees.
//!
//! [`TwinMap`] stores `(left, right)` pairs so that every left value and
//! every right value appears at most once. Each pair record is a member of
//! two height-balanced trees at the same time, one ordered by the left
//! comparator and one by the right, so the map supports ordered lookup,
//! insertion, and removal from either side in O(log n), and converts a
//! cursor in one ordering into the cursor over the identical pair in the
//! other ordering in O(1) (`flip`).
//!
//! The tree machinery lives in the `twin-forest` crate; this crate owns the
//! pair records (a slab of slots indexed by `u32`), the cursor types, and
//! the cross-uniqueness invariant.
//!
//! ```
//! use twinmap::TwinMap;
//!
//! let mut map = TwinMap::new();
//! map.insert(1, "a");
//! map.insert(2, "b");
//! map.insert(3, "c");
//!
//! assert_eq!(map.at_left(&2), Ok(&"b"));
//! // Duplicate on either side: rejected, nothing changes.
//! assert!(map.insert(2, "z").is_end());
//! assert_eq!(map.size(), 3);
//!
//! // A right-view cursor flips to the left view of the same pair.
//! let cur = map.find_right(&"b");
//! assert_eq!(map.left_at(cur.flip()), Some(&2));
//!
//! assert!(map.erase_left(&1));
//! assert!(map.find_right(&"a").is_end());
//! ```

pub mod cursor;
pub mod error;
pub mod map;
mod node;

pub use cursor::{LeftCursor, RightCursor};
pub use error::TwinMapError;
pub use map::{LeftIter, LeftRevIter, RightIter, RightRevIter, TwinMap};
