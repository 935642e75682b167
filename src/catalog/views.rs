//! Catalog views
//!
//! Each view filters the store once, then runs a fixed group-by / reduce
//! composition. Views are pure functions of (store, predicate).

use crate::aggregation::{
    group_by, reduce, CategoryAttribute, NumericAttribute, RatingValue, ReduceSpec,
    Reducer,
};
use crate::filter::FilterPredicate;
use crate::store::RecordStore;

use super::result::{
    DailySales, Demographics, FilterOptions, HourlySales, Performance, RatingsAnalysis,
    SalesBreakdown, Summary,
};

/// Total sales, mean rating, transaction count and distinct product lines
pub fn summary(store: &RecordStore, predicate: &FilterPredicate) -> Summary {
    let selection = predicate.apply(store);
    let spec = ReduceSpec::new()
        .field("total_sales", Reducer::Sum(NumericAttribute::Total))
        .field("average_rating", Reducer::Mean(NumericAttribute::Rating))
        .field("total_customers", Reducer::Count)
        .field(
            "product_lines",
            Reducer::DistinctCount(CategoryAttribute::ProductLine),
        );
    let metrics = reduce(selection.records(), &spec);

    Summary {
        total_sales: metrics.number("total_sales").unwrap_or_default(),
        average_rating: metrics.number("average_rating"),
        total_customers: metrics.count("total_customers").unwrap_or_default(),
        product_lines: metrics.count("product_lines").unwrap_or_default(),
    }
}

fn sales_by(
    store: &RecordStore,
    predicate: &FilterPredicate,
    attr: CategoryAttribute,
) -> SalesBreakdown {
    let selection = predicate.apply(store);
    group_by(selection.iter(), |t| attr.extract(t).to_string()).sum(NumericAttribute::Total)
}

pub fn sales_by_branch(store: &RecordStore, predicate: &FilterPredicate) -> SalesBreakdown {
    sales_by(store, predicate, CategoryAttribute::Branch)
}

pub fn sales_by_product_line(store: &RecordStore, predicate: &FilterPredicate) -> SalesBreakdown {
    sales_by(store, predicate, CategoryAttribute::ProductLine)
}

pub fn sales_by_payment(store: &RecordStore, predicate: &FilterPredicate) -> SalesBreakdown {
    sales_by(store, predicate, CategoryAttribute::Payment)
}

pub fn demographics(store: &RecordStore, predicate: &FilterPredicate) -> Demographics {
    let selection = predicate.apply(store);
    let spec = ReduceSpec::new()
        .field("gender", Reducer::Frequency(CategoryAttribute::Gender))
        .field(
            "customer_type",
            Reducer::Frequency(CategoryAttribute::CustomerType),
        );
    let metrics = reduce(selection.records(), &spec);

    Demographics {
        gender: metrics.frequency("gender").cloned().unwrap_or_default(),
        customer_type: metrics.frequency("customer_type").cloned().unwrap_or_default(),
    }
}

/// Daily revenue; days without transactions are absent
pub fn sales_over_time(store: &RecordStore, predicate: &FilterPredicate) -> DailySales {
    let selection = predicate.apply(store);
    DailySales(
        group_by(selection.iter(), |t| t.date)
            .sorted()
            .sum(NumericAttribute::Total),
    )
}

pub fn ratings_analysis(store: &RecordStore, predicate: &FilterPredicate) -> RatingsAnalysis {
    let selection = predicate.apply(store);
    let mean_rating = Reducer::Mean(NumericAttribute::Rating);

    RatingsAnalysis {
        average_by_branch: group_by(selection.iter(), |t| t.branch.clone())
            .reduce_with(mean_rating),
        average_by_product: group_by(selection.iter(), |t| t.product_line.clone())
            .reduce_with(mean_rating),
        rating_distribution: group_by(selection.iter(), |t| RatingValue(t.rating))
            .sorted()
            .count(),
    }
}

/// Revenue per hour of day; empty hours are absent
pub fn time_analysis(store: &RecordStore, predicate: &FilterPredicate) -> HourlySales {
    let selection = predicate.apply(store);
    group_by(selection.iter(), |t| t.hour())
        .sorted()
        .sum(NumericAttribute::Total)
}

pub fn product_performance(
    store: &RecordStore,
    predicate: &FilterPredicate,
) -> Performance<String> {
    let selection = predicate.apply(store);
    let spec = ReduceSpec::new()
        .field("Total", Reducer::Sum(NumericAttribute::Total))
        .field("Quantity", Reducer::Tally(NumericAttribute::Quantity))
        .field("gross income", Reducer::Sum(NumericAttribute::GrossIncome))
        .field("Rating", Reducer::Mean(NumericAttribute::Rating))
        .rounded();

    group_by(selection.iter(), |t| t.product_line.clone()).reduce(&spec)
}

pub fn branch_comparison(store: &RecordStore, predicate: &FilterPredicate) -> Performance<String> {
    let selection = predicate.apply(store);
    let spec = ReduceSpec::new()
        .field("Total", Reducer::Sum(NumericAttribute::Total))
        .field("Rating", Reducer::Mean(NumericAttribute::Rating))
        .field("gross income", Reducer::Sum(NumericAttribute::GrossIncome))
        .field("Quantity", Reducer::Tally(NumericAttribute::Quantity))
        .rounded();

    group_by(selection.iter(), |t| t.branch.clone()).reduce(&spec)
}

/// Metrics per (customer type, gender) segment
pub fn customer_segments(
    store: &RecordStore,
    predicate: &FilterPredicate,
) -> Performance<(String, String)> {
    let selection = predicate.apply(store);
    let spec = ReduceSpec::new()
        .field("Total", Reducer::Sum(NumericAttribute::Total))
        .field("Rating", Reducer::Mean(NumericAttribute::Rating))
        .field("Quantity", Reducer::Tally(NumericAttribute::Quantity))
        .rounded();

    group_by(selection.iter(), |t| {
        (t.customer_type.clone(), t.gender.clone())
    })
    .reduce(&spec)
}

/// Distinct filter choices over the whole store, in first-occurrence order
pub fn filter_options(store: &RecordStore) -> FilterOptions {
    let all = || store.iter();
    let distinct = |attr: CategoryAttribute| -> Vec<String> {
        group_by(all(), |t| attr.extract(t).to_string())
            .keys()
            .cloned()
            .collect()
    };

    FilterOptions {
        branches: distinct(CategoryAttribute::Branch),
        product_lines: distinct(CategoryAttribute::ProductLine),
        customer_types: distinct(CategoryAttribute::CustomerType),
        date_from: all().map(|t| t.date).min(),
        date_to: all().map(|t| t.date).max(),
    }
}
