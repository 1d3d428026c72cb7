//! The per-view state aggregate.
//!
//! One [`ViewState`] instance is created when a table view is opened,
//! mutated throughout the session by request-completion callbacks and
//! user selection actions, and discarded when the view is closed (only
//! the view parameters survive, through their compact form). The instance
//! is explicitly constructed and explicitly owned; hand it by reference
//! to the components that need it instead of stashing it in a global.

use crate::container::{Map, Set};
use crate::key::{CellKey, RowKey};
use crate::params::{Filtering, Grouping, Pagination, Sorting, ViewParams};
use crate::reactive::{Observable, ObservableMap, Readable, derived};
use crate::status::{RequestStatus, RowStatus, reconcile};

/// State for one open table view.
///
/// Collaborators report request outcomes into the status maps, always
/// overwriting any prior entry for the same key; the rendering layer
/// subscribes to [`row_status`](ViewState::row_status) and never to the
/// raw inputs. Entries are never expired implicitly; remove a row's
/// entries when the row leaves the view.
///
/// Every container is exclusively owned by one instance per table view.
/// Two collaborators racing writes to the same key is the caller's
/// responsibility to avoid.
///
/// # Examples
///
/// ```
/// use gridmeta::key::RowKey;
/// use gridmeta::status::RequestStatus;
/// use gridmeta::view::ViewState;
///
/// let view = ViewState::default();
/// let row = RowKey::new("7");
///
/// view.row_creation_status.set(row.clone(), RequestStatus::Success);
/// let statuses = view.row_status().get();
/// assert!(statuses.get(&row).is_some());
/// ```
pub struct ViewState {
    /// Which page of records the view shows.
    pub pagination: Observable<Pagination>,
    /// How the records are ordered.
    pub sorting: Observable<Sorting>,
    /// How the records are grouped.
    pub grouping: Observable<Grouping>,
    /// Which records are shown at all.
    pub filtering: Observable<Filtering>,

    /// Client-side validation messages per cell, reported and cleared by
    /// the editing layer before any request is made.
    pub cell_client_errors: ObservableMap<CellKey, Vec<String>>,

    /// For each cell, the status of the most recent request to update it.
    /// No entry means no request has ever been made.
    pub cell_modification_status: ObservableMap<CellKey, RequestStatus>,

    /// For each row, the status of the most recent request to delete it.
    /// No entry means no request has ever been made.
    pub row_deletion_status: ObservableMap<RowKey, RequestStatus>,

    /// For each newly added row, the status of the most recent request to
    /// create it. Rows that were fetched from the server never have
    /// entries here.
    pub row_creation_status: ObservableMap<RowKey, RequestStatus>,

    selected_records: Observable<Set<String>>,
    row_status: Readable<Map<RowKey, RowStatus>>,
    saved_params: Readable<ViewParams>,
    request_params: Readable<ViewParams>,
}

impl ViewState {
    /// Creates the state for a freshly opened view.
    pub fn new(params: ViewParams) -> Self {
        tracing::debug!("initializing view state");

        let pagination = Observable::new(params.pagination);
        let sorting = Observable::new(params.sorting);
        let grouping = Observable::new(params.grouping);
        let filtering = Observable::new(params.filtering);

        let cell_client_errors = ObservableMap::new();
        let cell_modification_status = ObservableMap::new();
        let row_deletion_status = ObservableMap::new();
        let row_creation_status = ObservableMap::new();

        let row_status = derived(
            (
                cell_modification_status.observable(),
                row_deletion_status.observable(),
                row_creation_status.observable(),
            ),
            |(cells, deletions, creations)| reconcile(&cells, &deletions, &creations),
        )
        .read_only();

        // Two separate composites over the same inputs: one feeds session
        // persistence, the other feeds record fetching. They are identical
        // in shape today but owned by different consumers.
        let saved_params = derived(
            (
                pagination.clone(),
                sorting.clone(),
                grouping.clone(),
                filtering.clone(),
            ),
            |(pagination, sorting, grouping, filtering)| ViewParams {
                pagination,
                sorting,
                grouping,
                filtering,
            },
        )
        .read_only();
        let request_params = derived(
            (
                pagination.clone(),
                sorting.clone(),
                grouping.clone(),
                filtering.clone(),
            ),
            |(pagination, sorting, grouping, filtering)| ViewParams {
                pagination,
                sorting,
                grouping,
                filtering,
            },
        )
        .read_only();

        Self {
            pagination,
            sorting,
            grouping,
            filtering,
            cell_client_errors,
            cell_modification_status,
            row_deletion_status,
            row_creation_status,
            selected_records: Observable::new(Set::new()),
            row_status,
            saved_params,
            request_params,
        }
    }

    /// The consolidated per-row status view model.
    ///
    /// Recomputed against fresh snapshots of all three status maps
    /// whenever any of them changes. Rows without any recorded request or
    /// cell failure have no entry; treat "no entry" as idle.
    pub fn row_status(&self) -> Readable<Map<RowKey, RowStatus>> {
        self.row_status.clone()
    }

    /// The parameter composite to persist across sessions. Rebuild the
    /// view later with [`ViewState::new`] and
    /// [`ViewParams::from_compact`](crate::params::ViewParams::from_compact).
    pub fn saved_params(&self) -> Readable<ViewParams> {
        self.saved_params.clone()
    }

    /// The parameter composite the record-fetching collaborator watches
    /// to know when a re-fetch is needed.
    pub fn request_params(&self) -> Readable<ViewParams> {
        self.request_params.clone()
    }

    /// The currently selected records, by primary key value.
    pub fn selected_records(&self) -> Readable<Set<String>> {
        self.selected_records.clone().read_only()
    }

    /// Adds a record to the selection. A no-op (no publish) if the record
    /// is already selected.
    pub fn select_record(&self, primary_key: impl Into<String>) {
        let primary_key = primary_key.into();
        if self.selected_records.get().contains(&primary_key) {
            return;
        }
        tracing::trace!(%primary_key, "selecting record");
        self.selected_records.update(|set| set.with(primary_key));
    }

    /// Removes a record from the selection. A no-op (no publish) if the
    /// record is not selected.
    pub fn deselect_record(&self, primary_key: impl Into<String>) {
        let primary_key = primary_key.into();
        if !self.selected_records.get().contains(&primary_key) {
            return;
        }
        tracing::trace!(%primary_key, "deselecting record");
        self.selected_records.update(|set| set.without(&primary_key));
    }

    /// Empties the selection.
    pub fn clear_selected_records(&self) {
        self.selected_records.set(Set::new());
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ViewParams::default())
    }
}
