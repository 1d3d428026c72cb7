//! Round-trip and defaulting behavior of the view parameters.

use gridmeta::key::ColumnId;
use gridmeta::params::{
    CompactFiltering, CompactGrouping, CompactPagination, CompactSorting, CompactViewParams,
    FilterCombination, FilterCondition, Filtering, Grouping, Pagination, SortDirection, Sorting,
    ViewParams,
};

fn sample_params() -> ViewParams {
    ViewParams {
        pagination: Pagination::new(3, 100),
        sorting: Sorting::new()
            .with_entry(ColumnId::new("name"), SortDirection::Descending)
            .with_entry(ColumnId::new("age"), SortDirection::Ascending),
        grouping: Grouping::new(vec![ColumnId::new("city")]),
        filtering: Filtering::new(
            FilterCombination::Or,
            vec![
                FilterCondition {
                    column: ColumnId::new("age"),
                    operation: "greater".to_string(),
                    value: serde_json::json!(21),
                },
                FilterCondition {
                    column: ColumnId::new("name"),
                    operation: "contains".to_string(),
                    value: serde_json::json!("smith"),
                },
            ],
        ),
    }
}

#[test]
fn compact_round_trip_preserves_everything() {
    let params = sample_params();
    let rebuilt = ViewParams::from_compact(params.compact());
    assert_eq!(rebuilt, params);
}

#[test]
fn json_round_trip_preserves_everything() {
    let params = sample_params();
    let blob = params.to_json().unwrap();
    let rebuilt = ViewParams::from_json(&blob).unwrap();
    assert_eq!(rebuilt, params);
}

#[test]
fn default_round_trip() {
    let params = ViewParams::default();
    let rebuilt = ViewParams::from_json(&params.to_json().unwrap()).unwrap();
    assert_eq!(rebuilt, params);
}

#[test]
fn compact_form_is_a_fixed_order_positional_tuple() {
    let blob = sample_params().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();

    let tuple = value.as_array().expect("compact form must be an array");
    assert_eq!(tuple.len(), 4);
    assert_eq!(tuple[0], serde_json::json!([3, 100]));
    assert_eq!(tuple[1], serde_json::json!([["name", "d"], ["age", "a"]]));
    assert_eq!(tuple[2], serde_json::json!(["city"]));
    assert_eq!(tuple[3][0], serde_json::json!("or"));
}

#[test]
fn omitted_parameters_take_their_defaults() {
    let params = ViewParams {
        pagination: Pagination::new(2, 50),
        ..ViewParams::default()
    };

    assert_eq!(params.pagination.offset(), 50);
    assert!(params.sorting.is_empty());
    assert!(params.grouping.is_empty());
    assert!(params.filtering.is_empty());
    assert_eq!(params.filtering.combination, FilterCombination::And);
}

#[test]
fn malformed_blob_reports_a_deserialization_error() {
    let err = ViewParams::from_json("{\"not\": \"a tuple\"}").unwrap_err();
    assert!(err.is_deserialization_error());
    assert_eq!(err.module(), "params");
}

#[test]
fn malformed_member_tokens_fall_back_to_defaults() {
    let compact = CompactViewParams(
        CompactPagination(0, 0),
        CompactSorting(vec![(ColumnId::new("name"), "sideways".to_string())]),
        CompactGrouping(vec![]),
        CompactFiltering("maybe".to_string(), vec![]),
    );

    let params = ViewParams::from_compact(compact);
    assert_eq!(params.pagination, Pagination::default());
    assert_eq!(
        params.sorting.get(&ColumnId::new("name")),
        Some(SortDirection::Ascending)
    );
    assert_eq!(params.filtering.combination, FilterCombination::And);
}
