//! End-to-end behavior of the ViewState aggregate.

use std::cell::RefCell;
use std::rc::Rc;

use gridmeta::container::Map;
use gridmeta::key::RowKey;
use gridmeta::params::{Pagination, SortDirection, Sorting, ViewParams};
use gridmeta::status::{CELL_ERROR_MESSAGE, RequestState, RequestStatus, RowStatus};
use gridmeta::view::ViewState;

use crate::helpers::{PublishCounter, cell_key, failure};

#[test]
fn row_status_updates_when_a_cell_failure_is_reported() {
    let view = ViewState::default();
    let last: Rc<RefCell<Map<RowKey, RowStatus>>> = Rc::new(RefCell::new(Map::new()));

    let sink = last.clone();
    let _sub = view
        .row_status()
        .subscribe(move |statuses| *sink.borrow_mut() = statuses.clone());
    assert!(last.borrow().is_empty());

    view.cell_modification_status
        .set(cell_key("row1", "col1"), failure(&["bad value"]));

    let statuses = last.borrow();
    let status = statuses.get(&RowKey::new("row1")).unwrap();
    assert_eq!(status.whole_row_state, None);
    assert_eq!(status.errors, vec![CELL_ERROR_MESSAGE.to_string()]);
}

#[test]
fn row_status_combines_all_three_streams() {
    let view = ViewState::default();
    let created = RowKey::new("new-row");
    let deleted = RowKey::new("old-row");

    view.row_creation_status
        .set(created.clone(), RequestStatus::Success);
    view.row_deletion_status
        .set(deleted.clone(), RequestStatus::Processing);
    view.cell_modification_status
        .set(cell_key("new-row", "col1"), failure(&["nope"]));

    let statuses = view.row_status().get();
    assert_eq!(statuses.len(), 2);
    assert_eq!(
        statuses.get(&created),
        Some(&RowStatus {
            whole_row_state: Some(RequestState::Success),
            errors: vec![CELL_ERROR_MESSAGE.to_string()],
        })
    );
    assert_eq!(
        statuses.get(&deleted),
        Some(&RowStatus {
            whole_row_state: Some(RequestState::Processing),
            errors: vec![],
        })
    );
}

#[test]
fn removing_a_status_entry_clears_the_row_from_the_output() {
    let view = ViewState::default();
    let key = cell_key("row1", "col1");

    view.cell_modification_status.set(key.clone(), failure(&["x"]));
    assert_eq!(view.row_status().get().len(), 1);

    view.cell_modification_status.delete(&key);
    assert!(view.row_status().get().is_empty());
}

#[test]
fn superseding_a_status_overwrites_the_prior_attempt() {
    let view = ViewState::default();
    let key = cell_key("row1", "col1");

    view.cell_modification_status
        .set(key.clone(), RequestStatus::Processing);
    view.cell_modification_status.set(key.clone(), failure(&["x"]));
    assert_eq!(view.row_status().get().len(), 1);

    // A retry that succeeds replaces the failure entirely.
    view.cell_modification_status
        .set(key.clone(), RequestStatus::Success);
    assert!(view.row_status().get().is_empty());
    assert_eq!(
        view.cell_modification_status.get(&key),
        Some(RequestStatus::Success)
    );
}

#[test]
fn selection_is_idempotent_and_publishes_only_on_change() {
    let view = ViewState::default();
    let counter = PublishCounter::new();
    let _sub = view.selected_records().subscribe(counter.callback());
    assert_eq!(counter.get(), 1); // immediate call

    view.select_record("pk-1");
    view.select_record("pk-1");
    assert_eq!(counter.get(), 2);
    assert!(view.selected_records().get().contains(&"pk-1".to_string()));

    view.deselect_record("pk-2"); // not selected, no publish
    assert_eq!(counter.get(), 2);

    view.deselect_record("pk-1");
    assert_eq!(counter.get(), 3);
    assert!(view.selected_records().get().is_empty());

    view.clear_selected_records();
    assert_eq!(counter.get(), 4);
}

#[test]
fn parameter_composites_follow_parameter_changes() {
    let view = ViewState::default();
    let counter = PublishCounter::new();
    let _sub = view.request_params().subscribe(counter.callback());

    view.pagination.set(Pagination::new(4, 25));
    assert_eq!(counter.get(), 2);
    assert_eq!(view.request_params().get().pagination, Pagination::new(4, 25));

    view.sorting.update(|s| {
        s.with_entry(
            gridmeta::key::ColumnId::new("name"),
            SortDirection::Descending,
        )
    });
    assert_eq!(counter.get(), 3);
    assert_eq!(view.request_params().get().sorting.len(), 1);

    // Both composites see the same data.
    assert_eq!(view.saved_params().get(), view.request_params().get());
}

#[test]
fn view_state_round_trips_through_persisted_parameters() {
    let view = ViewState::new(ViewParams {
        pagination: Pagination::new(2, 50),
        sorting: Sorting::new().with_entry(
            gridmeta::key::ColumnId::new("title"),
            SortDirection::Ascending,
        ),
        ..ViewParams::default()
    });

    let blob = view.saved_params().get().to_json().unwrap();
    let reopened = ViewState::new(ViewParams::from_json(&blob).unwrap());

    assert_eq!(
        reopened.request_params().get(),
        view.request_params().get()
    );
}

#[test]
fn client_side_errors_live_alongside_request_statuses() {
    let view = ViewState::default();
    let key = cell_key("row1", "col1");

    view.cell_client_errors
        .set(key.clone(), vec!["required".to_string()]);

    // Pre-request validation messages do not feed the row status output.
    assert!(view.row_status().get().is_empty());
    assert_eq!(
        view.cell_client_errors.get(&key),
        Some(vec!["required".to_string()])
    );

    view.cell_client_errors.delete(&key);
    assert!(view.cell_client_errors.is_empty());
}
