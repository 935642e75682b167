//! Filter Predicate Invariant Tests
//!
//! Tests for selection invariants:
//! - Selection is a subset of the store in original order
//! - A multi-criterion predicate equals the intersection of its parts
//! - Date bounds are inclusive; inverted bounds are rejected before any scan
//! - "all" and empty parameters impose no restriction

use chrono::{Duration, NaiveDate};
use salesdb::filter::{FilterErrorCode, FilterParams, FilterPredicate};
use salesdb::store::{RecordStore, Transaction, TransactionBuilder, TransactionId};
use std::collections::HashSet;

// =============================================================================
// Helper Functions
// =============================================================================

const BRANCHES: [&str; 3] = ["A", "B", "C"];
const PRODUCT_LINES: [&str; 4] = [
    "Health and beauty",
    "Electronic accessories",
    "Food and beverages",
    "Sports and travel",
];
const CUSTOMER_TYPES: [&str; 2] = ["Member", "Normal"];

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()
}

/// 90 records cycling through every category and 30 days
fn cycled_store() -> RecordStore {
    (0..90u64)
        .map(|i| {
            let n = i as usize;
            TransactionBuilder::new(BRANCHES[n % 3], 10.0 + i as f64)
                .id(i)
                .product_line(PRODUCT_LINES[n % 4])
                .customer_type(CUSTOMER_TYPES[(n / 3) % 2])
                .date(start() + Duration::days((n % 30) as i64))
                .rating(4.0 + (n % 7) as f64)
                .build()
        })
        .collect()
}

fn ids(records: &[&Transaction]) -> Vec<TransactionId> {
    records.iter().map(|t| t.id).collect()
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

// =============================================================================
// Subset and Order
// =============================================================================

/// Unrestricted predicate selects every record in store order.
#[test]
fn test_unrestricted_selects_all() {
    let store = cycled_store();
    let selection = FilterPredicate::all().apply(&store);

    assert_eq!(selection.len(), store.len());
    assert_eq!(selection.scanned(), store.len());
    let expected: Vec<_> = store.iter().map(|t| t.id).collect();
    assert_eq!(ids(selection.records()), expected);
}

/// Every selected record matches, and ids stay ascending.
#[test]
fn test_selection_is_ordered_subset() {
    let store = cycled_store();
    let predicate = FilterPredicate::all()
        .with_branch("B")
        .with_customer_type("Member");
    let selection = predicate.apply(&store);

    assert!(!selection.is_empty());
    assert!(selection.iter().all(|t| predicate.matches(t)));

    let selected = ids(selection.records());
    assert!(selected.windows(2).all(|w| w[0] < w[1]));

    let matching = store.iter().filter(|t| predicate.matches(t)).count();
    assert_eq!(selection.len(), matching);
}

// =============================================================================
// Conjunction
// =============================================================================

/// Combined predicate equals the intersection of single-criterion predicates.
#[test]
fn test_conjunction_equals_intersection() {
    let store = cycled_store();
    let from = Some(date("2019-01-05"));
    let to = Some(date("2019-01-20"));

    let parts = [
        FilterPredicate::all().with_branch("A"),
        FilterPredicate::all().with_product_line("Food and beverages"),
        FilterPredicate::all().with_customer_type("Normal"),
        FilterPredicate::all().with_date_range(from, to).unwrap(),
    ];
    let combined = FilterPredicate::all()
        .with_branch("A")
        .with_product_line("Food and beverages")
        .with_customer_type("Normal")
        .with_date_range(from, to)
        .unwrap();

    let mut intersection: HashSet<TransactionId> = store.iter().map(|t| t.id).collect();
    for part in &parts {
        let selected: HashSet<_> = part.apply(&store).iter().map(|t| t.id).collect();
        intersection = intersection.intersection(&selected).copied().collect();
    }

    let combined_ids: HashSet<_> = combined.apply(&store).iter().map(|t| t.id).collect();
    assert_eq!(combined_ids, intersection);
}

/// A value absent from the data selects nothing.
#[test]
fn test_unknown_category_selects_nothing() {
    let store = cycled_store();
    let selection = FilterPredicate::all().with_branch("Z").apply(&store);

    assert!(selection.is_empty());
    assert_eq!(selection.scanned(), store.len());
}

// =============================================================================
// Date Bounds
// =============================================================================

/// Both bounds are inclusive.
#[test]
fn test_date_bounds_inclusive() {
    let store = cycled_store();
    let day = date("2019-01-10");
    let selection = FilterPredicate::all()
        .with_date_range(Some(day), Some(day))
        .unwrap()
        .apply(&store);

    assert_eq!(selection.len(), 3);
    assert!(selection.iter().all(|t| t.date == day));
}

/// Open-ended ranges restrict one side only.
#[test]
fn test_open_ended_date_range() {
    let store = cycled_store();
    let from = date("2019-01-28");
    let selection = FilterPredicate::all()
        .with_date_range(Some(from), None)
        .unwrap()
        .apply(&store);

    assert_eq!(selection.len(), 9);
    assert!(selection.iter().all(|t| t.date >= from));
}

/// from > to is rejected when the predicate is built.
#[test]
fn test_inverted_range_rejected() {
    let err = FilterPredicate::all()
        .with_date_range(Some(date("2019-03-01")), Some(date("2019-01-01")))
        .unwrap_err();

    assert_eq!(err.code(), FilterErrorCode::SalesInvalidDateBound);
}

// =============================================================================
// Parameter Conversion
// =============================================================================

/// "all" and empty strings mean no restriction.
#[test]
fn test_params_all_and_empty_are_unrestricted() {
    let params = FilterParams {
        branch: Some("all".into()),
        product_line: Some(String::new()),
        customer_type: None,
        date_from: Some(String::new()),
        date_to: None,
    };
    let predicate = params.to_predicate().unwrap();

    assert!(predicate.is_unrestricted());
    assert_eq!(predicate.apply(&cycled_store()).len(), 90);
}

/// Parameters and the builder produce the same selection.
#[test]
fn test_params_match_builder() {
    let store = cycled_store();
    let params = FilterParams {
        branch: Some("C".into()),
        product_line: None,
        customer_type: Some("Member".into()),
        date_from: Some("2019-01-03".into()),
        date_to: Some("2019-01-25".into()),
    };
    let built = FilterPredicate::all()
        .with_branch("C")
        .with_customer_type("Member")
        .with_date_range(Some(date("2019-01-03")), Some(date("2019-01-25")))
        .unwrap();

    let from_params = params.to_predicate().unwrap();
    assert_eq!(
        ids(from_params.apply(&store).records()),
        ids(built.apply(&store).records())
    );
}

/// Unparseable dates name the offending parameter.
#[test]
fn test_params_bad_date_names_field() {
    let params = FilterParams {
        date_to: Some("01/31/2019".into()),
        ..Default::default()
    };
    let err = params.to_predicate().unwrap_err();

    assert_eq!(err.code(), FilterErrorCode::SalesInvalidDateBound);
    assert_eq!(err.field(), Some("date_to"));
}

/// Inverted parameter bounds are rejected.
#[test]
fn test_params_inverted_range_rejected() {
    let params = FilterParams {
        date_from: Some("2019-03-01".into()),
        date_to: Some("2019-01-01".into()),
        ..Default::default()
    };

    assert!(params.to_predicate().is_err());
}
