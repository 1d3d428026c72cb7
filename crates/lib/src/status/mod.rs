//! Request outcome tracking and per-row status reconciliation.
//!
//! Collaborators report one [`RequestStatus`] per cell edit, row creation,
//! or row deletion. [`reconcile`] merges the three resulting maps into one
//! row-keyed view model, [`RowStatus`], which is what a rendering layer
//! subscribes to for row background color and the error indicator.
//!
//! A failure is data here, never a thrown error: it travels through the
//! same channel as success and is rendered, not propagated.


use serde::{Deserialize, Serialize};

use crate::container::{Map, Set};
use crate::key::{CellKey, RowKey};

/// The bare outcome tag of a request attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    Processing,
    Success,
    Failure,
}

/// The outcome of exactly one request attempt.
///
/// A new attempt for the same key overwrites the prior entry atomically;
/// no history is retained, and overwriting is the only way a prior
/// logical request is superseded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RequestStatus {
    /// The request is in flight.
    Processing,
    /// The request completed successfully.
    Success,
    /// The request failed, carrying the error messages in report order.
    Failure { errors: Vec<String> },
}

impl RequestStatus {
    /// Builds a failure from any collection of messages.
    pub fn failure<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Failure {
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }

    /// Projects the outcome tag.
    pub fn state(&self) -> RequestState {
        match self {
            Self::Processing => RequestState::Processing,
            Self::Success => RequestState::Success,
            Self::Failure { .. } => RequestState::Failure,
        }
    }

    /// Returns the error messages, empty unless this is a failure.
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Failure { errors } => errors,
            _ => &[],
        }
    }

    /// Returns true if this is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

/// The row-level message standing in for any number of failed cells.
///
/// Per-cell error text is deliberately not surfaced at the row level; a
/// detail view queries the cell status container directly.
pub const CELL_ERROR_MESSAGE: &str = "This row contains a cell with an error.";

/// The consolidated, read-only status of one row.
///
/// The two fields are independent: `whole_row_state` can be
/// [`RequestState::Success`] while `errors` is non-empty, because a
/// successfully created row can still have a cell edit that failed
/// afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowStatus {
    /// The state of the most recent creation or deletion request for the
    /// row. Absent if neither has ever been requested.
    pub whole_row_state: Option<RequestState>,
    /// Human-readable messages from the whole-row request and from failed
    /// cells, in order. Empty when none apply.
    pub errors: Vec<String>,
}

/// A [`RowStatus`] under construction, with every field still optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PartialRowStatus {
    whole_row_state: Option<RequestState>,
    errors: Option<Vec<String>>,
}

/// Combines two partial statuses field by field. A field present on
/// `second` wins over the same field on `first`; an absent field falls
/// through.
fn merge_partial(first: &PartialRowStatus, second: &PartialRowStatus) -> PartialRowStatus {
    PartialRowStatus {
        whole_row_state: second.whole_row_state.or(first.whole_row_state),
        errors: second.errors.clone().or_else(|| first.errors.clone()),
    }
}

fn complete(partial: &PartialRowStatus) -> RowStatus {
    RowStatus {
        whole_row_state: partial.whole_row_state,
        errors: partial.errors.clone().unwrap_or_default(),
    }
}

/// Merges the three status streams into one row-keyed view model.
///
/// - Every cell entry whose status is a failure contributes its row (via
///   [`CellKey::row_key`]) to the output with the fixed
///   [`CELL_ERROR_MESSAGE`]; a row with several failing cells appears
///   once.
/// - Every creation or deletion entry contributes its row with that
///   request's state tag. A row is never simultaneously being created and
///   deleted; if both maps carry the same key anyway, the deletion entry
///   wins because deletions are merged second.
/// - Rows with neither a cell failure nor any creation/deletion entry do
///   not appear in the output at all; consumers treat "no entry" as the
///   idle state.
///
/// The function is pure and recomputes from whole snapshots; callers
/// re-run it against the latest snapshot of all three inputs whenever any
/// of them changes.
pub fn reconcile(
    cell_modification_status: &Map<CellKey, RequestStatus>,
    row_deletion_status: &Map<RowKey, RequestStatus>,
    row_creation_status: &Map<RowKey, RequestStatus>,
) -> Map<RowKey, RowStatus> {
    let rows_with_cell_errors: Set<RowKey> = cell_modification_status
        .iter()
        .filter(|(_, status)| status.is_failure())
        .map(|(cell_key, _)| cell_key.row_key())
        .collect();

    let status_from_cells: Map<RowKey, PartialRowStatus> = rows_with_cell_errors
        .iter()
        .map(|row_key| {
            (
                row_key.clone(),
                PartialRowStatus {
                    whole_row_state: None,
                    errors: Some(vec![CELL_ERROR_MESSAGE.to_string()]),
                },
            )
        })
        .collect();

    let status_from_row_requests: Map<RowKey, PartialRowStatus> = row_creation_status
        .with_entries(
            row_deletion_status
                .iter()
                .map(|(key, status)| (key.clone(), status.clone())),
        )
        .map_values(|status| PartialRowStatus {
            whole_row_state: Some(status.state()),
            errors: None,
        });

    status_from_cells
        .with_entries_merged(status_from_row_requests, merge_partial)
        .map_values(complete)
}
