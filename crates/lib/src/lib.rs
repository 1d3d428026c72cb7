//!
//! Gridmeta: client-side status aggregation and view-parameter state for
//! interactive data-grid views.
//!
//! This library tracks, for every visible row and cell of a data grid, the
//! outcome of in-flight and completed create/update/delete requests, and
//! derives one consolidated status per row for rendering. It also owns the
//! view parameters that decide which records get fetched, with a compact
//! serializable form for persistence across sessions.
//!
//! ## Core Concepts
//!
//! * **Containers (`container::Map`, `container::Set`)**: insertion-ordered
//!   associative containers with immutable value semantics; every update
//!   returns a new container.
//! * **Observables (`reactive`)**: writable cells and derived cells with
//!   synchronous, ordered, unbatched publish to subscribers, plus the
//!   [`reactive::ObservableMap`] wrapper publishing whole-map snapshots.
//! * **Keys (`key`)**: [`key::RowKey`], [`key::ColumnId`], and the derived
//!   [`key::CellKey`] that joins them with a fixed separator, invertible on
//!   the row side.
//! * **Statuses (`status`)**: the [`status::RequestStatus`] outcome of one
//!   request attempt and the pure [`status::reconcile`] merge of the cell,
//!   creation, and deletion streams into per-row [`status::RowStatus`].
//! * **Parameters (`params`)**: pagination, sorting, grouping, and
//!   filtering value objects and the [`params::ViewParams`] aggregate with
//!   its positional compact form.
//! * **View state (`view`)**: the explicitly owned [`view::ViewState`]
//!   aggregate wiring all of the above together for one open table view.
//!
//! Everything is synchronous and single-threaded: request execution and
//! rendering live outside this crate and talk to it through plain method
//! calls and subscriptions.

pub mod container;
pub mod key;
pub mod params;
pub mod reactive;
pub mod status;
pub mod view;

/// Re-export of the per-view aggregate for easier access.
pub use view::ViewState;

/// Result type used throughout the gridmeta library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the gridmeta library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured view-parameter errors from the params module
    #[error(transparent)]
    Params(params::ParamsError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Serialize(_) => "serialize",
            Error::Params(_) => "params",
        }
    }

    /// Check if this error is related to deserialization of persisted
    /// view parameters.
    pub fn is_deserialization_error(&self) -> bool {
        match self {
            Error::Params(params_err) => params_err.is_deserialization_failed(),
            _ => false,
        }
    }
}
