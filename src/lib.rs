//! An ordered multiset kept in a skip list whose height follows its size.
//!
//! # Quick Start
//!
//! ```
//! use capped_skiplist::SkipList;
//!
//! // Build from a non-empty batch
//! let mut list = SkipList::from_slice(&[5, 1, 3]).unwrap();
//! assert_eq!(list.to_string(), "1 3 5");
//!
//! // Insert, look up, erase
//! list.insert(4);
//! assert!(list.contains(&4));
//! assert_eq!(list.search(&3).map(|node| *node.value()), Some(3));
//! assert!(list.erase(&1));
//! assert!(!list.erase(&1));
//! assert_eq!(list.len(), 3);
//!
//! list.clear();
//! assert!(list.is_empty());
//! ```
//!
//! See [`skip_list`] for how levels, the root, and duplicates behave.

pub mod dump;
pub mod error;
pub mod height;
mod node;
pub mod skip_list;

pub use error::Error;
pub use skip_list::NodeRef;
pub use skip_list::SkipList;
