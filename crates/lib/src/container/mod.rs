//! Insertion-ordered containers with immutable value semantics.
//!
//! Every operation that looks like a mutation (`with`, `without`,
//! `with_entries`, `map_values`) returns a new container and leaves the
//! receiver untouched. Keys are compared by value equality, and a replaced
//! key keeps its original insertion position.
//!
//! # Core Types
//!
//! - [`Map`] - An insertion-ordered key-value container
//! - [`Set`] - An insertion-ordered membership container
//!
//! The backing storage is a plain `Vec` of entries. A table view holds at
//! most a few hundred visible rows, so linear key scans are cheaper than
//! maintaining a secondary index and keep the snapshot-copy semantics
//! trivial.

mod map;
mod set;

pub use map::Map;
pub use set::Set;
