//! CSV dataset loader
//!
//! Reads the supermarket-sales export, coerces every column to its typed
//! form and assigns ids in source order. Any malformed row aborts the load;
//! the store never sees partial data.

use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::observability::{log_event_with_fields, Event};
use crate::store::{RecordStore, Transaction, TransactionId};

use super::errors::{IngestError, IngestResult};

const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];
const TIME_FORMATS: [&str; 4] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M:%S %p"];

/// One CSV row as it appears in the source file
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Invoice ID", default)]
    invoice_id: String,
    #[serde(rename = "Branch")]
    branch: String,
    #[serde(rename = "City", default)]
    city: String,
    #[serde(rename = "Customer type")]
    customer_type: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Product line")]
    product_line: String,
    #[serde(rename = "Unit price")]
    unit_price: f64,
    #[serde(rename = "Quantity")]
    quantity: f64,
    #[serde(rename = "Tax 5%")]
    tax: f64,
    #[serde(rename = "Total")]
    total: f64,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Payment")]
    payment: String,
    #[serde(rename = "cogs", default)]
    cogs: f64,
    #[serde(rename = "gross income")]
    gross_income: f64,
    #[serde(rename = "Rating")]
    rating: f64,
}

/// Loads transactions from CSV
pub struct CsvLoader;

impl CsvLoader {
    /// Loads the dataset at `path`
    pub fn load_path(path: &Path) -> IngestResult<RecordStore> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|source| IngestError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        let store = Self::load_records(reader)?;
        let shown = path.display().to_string();
        let count = store.len().to_string();
        log_event_with_fields(
            Event::DatasetLoaded,
            &[("path", shown.as_str()), ("records", count.as_str())],
        );
        Ok(store)
    }

    /// Loads from any reader (used for tests and stdin)
    pub fn load_reader<R: Read>(input: R) -> IngestResult<RecordStore> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(input);
        Self::load_records(reader)
    }

    fn load_records<R: Read>(mut reader: csv::Reader<R>) -> IngestResult<RecordStore> {
        let mut records = Vec::new();

        for (index, row) in reader.deserialize::<RawRow>().enumerate() {
            // Row numbers are 1-based and skip the header line
            let row_number = index + 2;
            let raw = row?;
            records.push(Self::convert(index as u64, row_number, raw)?);
        }

        Ok(RecordStore::new(records))
    }

    fn convert(id: u64, row: usize, raw: RawRow) -> IngestResult<Transaction> {
        let date = parse_date(&raw.date)
            .ok_or_else(|| IngestError::invalid_row(row, format!("bad date '{}'", raw.date)))?;
        let time_of_day = parse_time(&raw.time)
            .ok_or_else(|| IngestError::invalid_row(row, format!("bad time '{}'", raw.time)))?;

        if !(0.0..=10.0).contains(&raw.rating) {
            return Err(IngestError::invalid_row(
                row,
                format!("rating {} outside [0, 10]", raw.rating),
            ));
        }

        let amounts = [
            ("Unit price", raw.unit_price),
            ("Quantity", raw.quantity),
            ("Tax 5%", raw.tax),
            ("Total", raw.total),
            ("cogs", raw.cogs),
            ("gross income", raw.gross_income),
        ];
        if let Some((column, value)) = amounts
            .iter()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
        {
            return Err(IngestError::invalid_row(
                row,
                format!("{} must be a non-negative number, got {}", column, value),
            ));
        }

        Ok(Transaction {
            id: TransactionId(id),
            invoice_id: raw.invoice_id,
            branch: raw.branch,
            city: raw.city,
            customer_type: raw.customer_type,
            gender: raw.gender,
            product_line: raw.product_line,
            payment: raw.payment,
            date,
            time_of_day,
            unit_price: raw.unit_price,
            quantity: raw.quantity,
            tax: raw.tax,
            total: raw.total,
            cogs: raw.cogs,
            gross_income: raw.gross_income,
            // Adding zero turns a `-0` rating into `0`
            rating: raw.rating + 0.0,
        })
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}
