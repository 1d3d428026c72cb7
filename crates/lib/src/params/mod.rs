//! View-parameter value objects and their compact persisted forms.
//!
//! The four parameters (pagination, sorting, grouping, filtering) decide
//! which records a table view fetches. Each is an immutable value object
//! with a documented default and a compact positional encoding; the
//! [`ViewParams`] aggregate combines them and round-trips through
//! [`CompactViewParams`] for session persistence.
//!
//! The compact forms are positional tuples rather than keyed objects, so
//! persisted bytes depend on field order staying stable. That order is a
//! compatibility contract: fields must never be reordered, only appended.

pub mod errors;

pub use errors::ParamsError;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::container::Map;
use crate::key::ColumnId;

/// Which page of records to fetch.
///
/// Pages are 1-based. Defaults to the first page with
/// [`Pagination::DEFAULT_PAGE_SIZE`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: u64,
    /// Records per page.
    pub size: u64,
}

impl Pagination {
    pub const DEFAULT_PAGE_SIZE: u64 = 500;

    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.size
    }

    /// Number of records to fetch.
    pub fn limit(&self) -> u64 {
        self.size
    }

    pub fn compact(&self) -> CompactPagination {
        CompactPagination(self.page, self.size)
    }

    /// A zero page or size falls back to the default value.
    pub fn from_compact(compact: CompactPagination) -> Self {
        let defaults = Self::default();
        Self {
            page: if compact.0 == 0 {
                defaults.page
            } else {
                compact.0
            },
            size: if compact.1 == 0 {
                defaults.size
            } else {
                compact.1
            },
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Compact form of [`Pagination`]: `[page, size]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactPagination(pub u64, pub u64);

/// Sort order for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn compact(&self) -> &'static str {
        match self {
            Self::Ascending => "a",
            Self::Descending => "d",
        }
    }

    /// An unrecognized token falls back to ascending.
    pub fn from_compact(token: &str) -> Self {
        match token {
            "d" => Self::Descending,
            _ => Self::Ascending,
        }
    }
}

/// The ordered set of column sort terms.
///
/// Term order matters (earlier columns sort first), so the entries live in
/// an insertion-ordered [`Map`]. Updates return a new `Sorting`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sorting {
    entries: Map<ColumnId, SortDirection>,
}

impl Sorting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new sorting with `column` sorted in `direction`. An
    /// already-sorted column keeps its precedence position.
    pub fn with_entry(&self, column: ColumnId, direction: SortDirection) -> Self {
        Self {
            entries: self.entries.with(column, direction),
        }
    }

    /// Returns a new sorting without a term for `column`.
    pub fn without_entry(&self, column: &ColumnId) -> Self {
        Self {
            entries: self.entries.without(column),
        }
    }

    /// The direction `column` sorts in, if it participates.
    pub fn get(&self, column: &ColumnId) -> Option<SortDirection> {
        self.entries.get(column).copied()
    }

    /// Iterates over terms in precedence order.
    pub fn entries(&self) -> impl Iterator<Item = (&ColumnId, &SortDirection)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn compact(&self) -> CompactSorting {
        CompactSorting(
            self.entries
                .iter()
                .map(|(column, direction)| (column.clone(), direction.compact().to_string()))
                .collect(),
        )
    }

    pub fn from_compact(compact: CompactSorting) -> Self {
        Self {
            entries: compact
                .0
                .into_iter()
                .map(|(column, token)| (column, SortDirection::from_compact(&token)))
                .collect(),
        }
    }
}

/// Compact form of [`Sorting`]: `[[column, "a" | "d"], ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactSorting(pub Vec<(ColumnId, String)>);

/// The ordered list of columns records are grouped by.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grouping {
    pub columns: Vec<ColumnId>,
}

impl Grouping {
    pub fn new(columns: Vec<ColumnId>) -> Self {
        Self { columns }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn compact(&self) -> CompactGrouping {
        CompactGrouping(self.columns.clone())
    }

    pub fn from_compact(compact: CompactGrouping) -> Self {
        Self { columns: compact.0 }
    }
}

/// Compact form of [`Grouping`]: `[column, ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactGrouping(pub Vec<ColumnId>);

/// How multiple filter conditions combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterCombination {
    #[default]
    And,
    Or,
}

impl FilterCombination {
    pub fn compact(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// An unrecognized token falls back to `And`.
    pub fn from_compact(token: &str) -> Self {
        match token {
            "or" => Self::Or,
            _ => Self::And,
        }
    }
}

/// One filter condition on one column.
///
/// The operation is an opaque identifier understood by the record-fetching
/// collaborator; the value is whatever JSON the operation expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub column: ColumnId,
    pub operation: String,
    pub value: serde_json::Value,
}

/// The record filter: a combination of conditions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filtering {
    pub combination: FilterCombination,
    pub conditions: Vec<FilterCondition>,
}

impl Filtering {
    pub fn new(combination: FilterCombination, conditions: Vec<FilterCondition>) -> Self {
        Self {
            combination,
            conditions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn compact(&self) -> CompactFiltering {
        CompactFiltering(
            self.combination.compact().to_string(),
            self.conditions
                .iter()
                .map(|c| (c.column.clone(), c.operation.clone(), c.value.clone()))
                .collect(),
        )
    }

    pub fn from_compact(compact: CompactFiltering) -> Self {
        Self {
            combination: FilterCombination::from_compact(&compact.0),
            conditions: compact
                .1
                .into_iter()
                .map(|(column, operation, value)| FilterCondition {
                    column,
                    operation,
                    value,
                })
                .collect(),
        }
    }
}

/// Compact form of [`Filtering`]:
/// `["and" | "or", [[column, operation, value], ...]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactFiltering(pub String, pub Vec<(ColumnId, String, serde_json::Value)>);

/// The aggregate of the four view parameters.
///
/// Constructed with struct-update syntax over [`Default`], so any subset
/// of parameters can be supplied:
///
/// ```
/// use gridmeta::params::{Pagination, ViewParams};
///
/// let params = ViewParams {
///     pagination: Pagination::new(3, 100),
///     ..ViewParams::default()
/// };
/// assert!(params.sorting.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewParams {
    pub pagination: Pagination,
    pub sorting: Sorting,
    pub grouping: Grouping,
    pub filtering: Filtering,
}

impl ViewParams {
    pub fn compact(&self) -> CompactViewParams {
        CompactViewParams(
            self.pagination.compact(),
            self.sorting.compact(),
            self.grouping.compact(),
            self.filtering.compact(),
        )
    }

    /// Exact left inverse of [`ViewParams::compact`] for well-formed
    /// input. Malformed member values fall back to that member's default.
    pub fn from_compact(compact: CompactViewParams) -> Self {
        Self {
            pagination: Pagination::from_compact(compact.0),
            sorting: Sorting::from_compact(compact.1),
            grouping: Grouping::from_compact(compact.2),
            filtering: Filtering::from_compact(compact.3),
        }
    }

    /// Encodes the compact form as a JSON blob for the session-persistence
    /// subsystem, which stores it opaquely and hands it back unchanged.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.compact())?)
    }

    /// Decodes a blob produced by [`ViewParams::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        let compact: CompactViewParams =
            serde_json::from_str(json).map_err(|e| ParamsError::DeserializationFailed {
                reason: format!("not a valid compact parameter tuple: {e}"),
            })?;
        Ok(Self::from_compact(compact))
    }
}

/// Compact form of [`ViewParams`]: the fixed-order 4-tuple
/// `[pagination, sorting, grouping, filtering]`.
///
/// Positional encoding is the persisted-format contract; never reorder
/// the fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactViewParams(
    pub CompactPagination,
    pub CompactSorting,
    pub CompactGrouping,
    pub CompactFiltering,
);
