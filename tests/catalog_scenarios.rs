//! Query Catalog Scenario Tests
//!
//! Tests for view semantics over small known datasets:
//! - Branch sales and summary over three records
//! - Sums are additive across groups
//! - Days without sales are omitted from the daily series
//! - Rounded metrics stay within 0.005 of the raw values
//! - JSON shapes of the serialized views

use std::io::Write;

use chrono::NaiveDate;
use salesdb::aggregation::{group_by, GroupKey, NumericAttribute, ReduceSpec, Reducer};
use salesdb::catalog::{self, View};
use salesdb::filter::FilterPredicate;
use salesdb::ingestion::CsvLoader;
use salesdb::store::{RecordStore, TransactionBuilder};
use tempfile::NamedTempFile;

// =============================================================================
// Helper Functions
// =============================================================================

const HEADER: &str = "Invoice ID,Branch,City,Customer type,Gender,Product line,Unit price,Quantity,Tax 5%,Total,Date,Time,Payment,cogs,gross margin percentage,gross income,Rating";

const ROWS: [&str; 8] = [
    "750-67-8428,A,Yangon,Member,Female,Health and beauty,74.69,7,26.1415,548.9715,1/5/2019,13:08,Ewallet,522.83,4.761904762,26.1415,9.1",
    "226-31-3081,C,Naypyitaw,Normal,Female,Electronic accessories,15.28,5,3.82,80.22,3/8/2019,10:29,Cash,76.4,4.761904762,3.82,9.6",
    "631-41-3108,A,Yangon,Normal,Male,Home and lifestyle,46.33,7,16.2155,340.5255,3/3/2019,13:23,Credit card,324.31,4.761904762,16.2155,7.4",
    "123-19-1176,A,Yangon,Member,Male,Health and beauty,58.22,8,23.288,489.048,1/27/2019,20:33,Ewallet,465.76,4.761904762,23.288,8.4",
    "373-73-7910,A,Yangon,Normal,Male,Sports and travel,86.31,7,30.2085,634.3785,2/8/2019,10:37,Ewallet,604.17,4.761904762,30.2085,5.3",
    "699-14-3026,C,Naypyitaw,Normal,Male,Electronic accessories,85.39,7,29.8865,627.6165,3/25/2019,18:30,Ewallet,597.73,4.761904762,29.8865,4.1",
    "355-53-5943,A,Yangon,Member,Female,Electronic accessories,68.84,6,20.652,433.692,2/25/2019,14:36,Ewallet,413.04,4.761904762,20.652,5.8",
    "315-22-5665,C,Naypyitaw,Normal,Female,Home and lifestyle,73.56,10,36.78,772.38,2/24/2019,11:38,Ewallet,735.6,4.761904762,36.78,8.0",
];

fn csv_fixture() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in ROWS {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}

fn loaded_store() -> RecordStore {
    let file = csv_fixture();
    CsvLoader::load_path(file.path()).unwrap()
}

fn three_records() -> RecordStore {
    vec![
        TransactionBuilder::new("A", 10.0).id(0).rating(8.0).build(),
        TransactionBuilder::new("A", 5.0).id(1).rating(6.0).build(),
        TransactionBuilder::new("B", 7.0).id(2).rating(9.0).build(),
    ]
    .into_iter()
    .collect()
}

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, m, d).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================================
// Three-Record Scenarios
// =============================================================================

/// Branch sales and summary over the whole store.
#[test]
fn test_three_records_unfiltered() {
    let store = three_records();
    let all = FilterPredicate::all();

    let by_branch: Vec<_> = catalog::sales_by_branch(&store, &all)
        .iter()
        .map(|(k, v)| (k.clone(), *v))
        .collect();
    assert_eq!(by_branch, vec![("A".to_string(), 15.0), ("B".to_string(), 7.0)]);

    let summary = catalog::summary(&store, &all);
    assert_eq!(summary.total_sales, 22.0);
    assert_eq!(summary.total_customers, 3);
    let rating = summary.average_rating.unwrap();
    assert!((rating - 7.667).abs() < 0.001);
}

/// Filtering to one branch drops the other entirely.
#[test]
fn test_three_records_branch_filter() {
    let store = three_records();
    let by_branch = catalog::sales_by_branch(&store, &FilterPredicate::all().with_branch("A"));

    assert_eq!(by_branch.len(), 1);
    assert_eq!(by_branch.get(&"A".to_string()), Some(&15.0));
    assert_eq!(by_branch.get(&"B".to_string()), None);
}

// =============================================================================
// Additivity
// =============================================================================

/// Every sales breakdown sums to the summary total.
#[test]
fn test_breakdowns_sum_to_summary_total() {
    let store = loaded_store();
    let predicates = [
        FilterPredicate::all(),
        FilterPredicate::all().with_customer_type("Normal"),
        FilterPredicate::all()
            .with_date_range(Some(day(2, 1)), Some(day(3, 31)))
            .unwrap(),
    ];

    for predicate in &predicates {
        let total = catalog::summary(&store, predicate).total_sales;

        let branch: f64 = catalog::sales_by_branch(&store, predicate).values().sum();
        let product: f64 = catalog::sales_by_product_line(&store, predicate).values().sum();
        let payment: f64 = catalog::sales_by_payment(&store, predicate).values().sum();
        let hourly: f64 = catalog::time_analysis(&store, predicate).values().sum();
        let daily: f64 = catalog::sales_over_time(&store, predicate).iter().map(|(_, v)| v).sum();

        for grouped in [branch, product, payment, hourly, daily] {
            assert!(
                (grouped - total).abs() < 1e-6,
                "grouped {} vs total {}",
                grouped,
                total
            );
        }
    }
}

/// Group counts add up to the selection size.
#[test]
fn test_group_counts_partition_selection() {
    let store = loaded_store();
    let selection = FilterPredicate::all().apply(&store);
    let counts = group_by(selection.iter(), |t| t.product_line.clone()).count();

    assert_eq!(counts.values().sum::<u64>(), store.len() as u64);
}

// =============================================================================
// Daily Series
// =============================================================================

/// A day without sales between two sales days is absent.
#[test]
fn test_sales_over_time_skips_empty_day() {
    let store: RecordStore = vec![
        TransactionBuilder::new("A", 12.5).id(0).date(day(1, 3)).build(),
        TransactionBuilder::new("B", 4.0).id(1).date(day(1, 1)).build(),
        TransactionBuilder::new("A", 1.5).id(2).date(day(1, 3)).build(),
    ]
    .into_iter()
    .collect();

    let daily = catalog::sales_over_time(&store, &FilterPredicate::all());
    let rows: Vec<_> = daily.iter().map(|(d, t)| (*d, *t)).collect();

    assert_eq!(rows, vec![(day(1, 1), 4.0), (day(1, 3), 14.0)]);
}

// =============================================================================
// Rounding
// =============================================================================

/// Rounded performance metrics stay within 0.005 of the raw aggregates.
#[test]
fn test_product_performance_rounding_bound() {
    let store = loaded_store();
    let all = FilterPredicate::all();
    let rounded = catalog::product_performance(&store, &all);

    let raw_spec = ReduceSpec::new()
        .field("Total", Reducer::Sum(NumericAttribute::Total))
        .field("Quantity", Reducer::Sum(NumericAttribute::Quantity))
        .field("gross income", Reducer::Sum(NumericAttribute::GrossIncome))
        .field("Rating", Reducer::Mean(NumericAttribute::Rating));
    let selection = all.apply(&store);
    let raw = group_by(selection.iter(), |t| t.product_line.clone()).reduce(&raw_spec);

    assert_eq!(rounded.len(), raw.len());
    for (line, metrics) in rounded.iter() {
        let unrounded = raw.get(line).unwrap();
        for (name, value) in metrics.iter() {
            let r = value.as_number().unwrap();
            let u = unrounded.number(name).unwrap();
            assert!((r - u).abs() <= 0.005 + 1e-12, "{} {}: {} vs {}", line, name, r, u);
        }
    }
}

// =============================================================================
// Loaded Dataset
// =============================================================================

/// Views over the CSV fixture agree with hand-computed values.
#[test]
fn test_loaded_dataset_views() {
    let store = loaded_store();
    let all = FilterPredicate::all();

    assert_eq!(store.len(), 8);

    let by_branch = catalog::sales_by_branch(&store, &all);
    let keys: Vec<_> = by_branch.keys().cloned().collect();
    assert_eq!(keys, vec!["A", "C"]);
    assert!(close(
        *by_branch.get(&"C".to_string()).unwrap(),
        80.22 + 627.6165 + 772.38
    ));

    let summary = catalog::summary(&store, &all);
    assert_eq!(summary.product_lines, 4);

    let hourly = catalog::time_analysis(&store, &all);
    let hours: Vec<_> = hourly.keys().copied().collect();
    assert_eq!(hours, vec![10, 11, 13, 14, 18, 20]);

    let options = catalog::filter_options(&store);
    assert_eq!(options.date_from, Some(day(1, 5)));
    assert_eq!(options.date_to, Some(day(3, 25)));
}

// =============================================================================
// Serialized Shapes
// =============================================================================

/// Daily sales serialize as a list of {Date, Total} rows.
#[test]
fn test_sales_over_time_json_shape() {
    let store = loaded_store();
    let json = serde_json::to_value(View::SalesOverTime.evaluate(&store, &FilterPredicate::all()))
        .unwrap();

    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 8);
    assert_eq!(rows[0]["Date"], "2019-01-05");
    assert!(rows[0]["Total"].is_number());
}

/// Segments are keyed by "customer type|gender".
#[test]
fn test_customer_segments_json_keys() {
    let store = loaded_store();
    let json =
        serde_json::to_value(View::CustomerSegments.evaluate(&store, &FilterPredicate::all()))
            .unwrap();

    let segments = json.as_object().unwrap();
    assert!(segments.contains_key("Member|Female"));
    assert!(segments.contains_key("Normal|Male"));
    assert_eq!(segments["Member|Female"]["Quantity"], 13);
    assert!(segments["Member|Female"]["Quantity"].is_u64());
}

/// Empty selection: zero totals and a null mean rating.
#[test]
fn test_empty_summary_json() {
    let store = loaded_store();
    let predicate = FilterPredicate::all().with_branch("B");
    let json = serde_json::to_value(View::Summary.evaluate(&store, &predicate)).unwrap();

    assert_eq!(json["total_sales"], 0.0);
    assert_eq!(json["total_customers"], 0);
    assert!(json["average_rating"].is_null());
}

/// Ratings of `0` and `-0` fall into one distribution bucket.
#[test]
fn test_zero_ratings_share_distribution_bucket() {
    let data = format!(
        "{}\n{}\n{}\n",
        HEADER,
        "x,B,Mandalay,Normal,Male,Sports and travel,10,1,0.5,10.5,1/1/2019,10:00,Cash,10,4.76,0.5,0",
        "y,B,Mandalay,Normal,Male,Sports and travel,10,1,0.5,10.5,1/2/2019,11:00,Cash,10,4.76,0.5,-0",
    );
    let store = CsvLoader::load_reader(data.as_bytes()).unwrap();

    let ratings = catalog::ratings_analysis(&store, &FilterPredicate::all());
    let distribution: Vec<_> = ratings
        .rating_distribution
        .iter()
        .map(|(k, c)| (k.label(), *c))
        .collect();
    assert_eq!(distribution, vec![("0.0".to_string(), 2)]);

    let json = serde_json::to_value(&ratings).unwrap();
    assert_eq!(json["rating_distribution"], serde_json::json!({"0.0": 2}));
}

/// Mean ratings over an empty product line are absent, not NaN.
#[test]
fn test_ratings_analysis_json_has_no_nan() {
    let store = loaded_store();
    let json = serde_json::to_string(&View::RatingsAnalysis.evaluate(
        &store,
        &FilterPredicate::all().with_product_line("Health and beauty"),
    ))
    .unwrap();

    assert!(!json.contains("NaN"));
    assert!(json.contains("\"average_by_branch\""));
}
