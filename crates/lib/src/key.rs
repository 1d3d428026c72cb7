//! Row and cell identifier types used throughout the crate.
//!
//! A [`RowKey`] identifies one visible row; a [`ColumnId`] identifies one
//! column of the table schema; a [`CellKey`] addresses one cell by joining
//! the two with a fixed separator. The encoding is invertible for the row
//! side only, which is all the status aggregation needs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Separator between the row and column segments of a [`CellKey`].
///
/// Must never appear inside a [`ColumnId`]; behavior is undefined if it
/// does. A [`RowKey`] containing the separator survives the round trip
/// because extraction drops only the final segment.
pub const CELL_KEY_SEPARATOR: &str = "::";

/// An opaque identifier for a row, stable for the lifetime of the row in
/// the view.
///
/// For persisted records the caller derives it from the primary key
/// value(s). For rows that have not been persisted yet,
/// [`RowKey::placeholder`] generates a locally unique stand-in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct RowKey(String);

impl RowKey {
    /// Creates a row key from any string-like input.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Generates a placeholder key for a row that has no primary key yet.
    ///
    /// Each call returns a distinct key.
    pub fn placeholder() -> Self {
        Self(format!("unsaved-{}", Uuid::new_v4()))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An opaque identifier for a column, stable for the lifetime of the
/// table schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ColumnId(String);

impl ColumnId {
    /// Creates a column id from any string-like input.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An identifier for one cell, derived from its row key and column id.
///
/// # Examples
///
/// ```
/// use gridmeta::key::{CellKey, ColumnId, RowKey};
///
/// let row = RowKey::new("17");
/// let cell = CellKey::new(&row, &ColumnId::new("name"));
///
/// assert_eq!(cell.as_str(), "17::name");
/// assert_eq!(cell.row_key(), row);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellKey(String);

impl CellKey {
    /// Derives the key for the cell at (`row`, `column`).
    pub fn new(row: &RowKey, column: &ColumnId) -> Self {
        Self(format!(
            "{}{CELL_KEY_SEPARATOR}{}",
            row.as_str(),
            column.as_str()
        ))
    }

    /// Recovers the row key this cell belongs to.
    ///
    /// Splits on the separator and rejoins every segment except the last,
    /// so a row key that itself contains the separator is preserved
    /// intact. The column id is not recoverable.
    pub fn row_key(&self) -> RowKey {
        let segments: Vec<&str> = self.0.split(CELL_KEY_SEPARATOR).collect();
        RowKey::new(segments[..segments.len() - 1].join(CELL_KEY_SEPARATOR))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_string_key_conversions {
    ($name:ident) => {
        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

impl_string_key_conversions!(RowKey);
impl_string_key_conversions!(ColumnId);
impl_string_key_conversions!(CellKey);
