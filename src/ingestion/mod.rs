//! Ingestion Loader
//!
//! Parses the source CSV into a [`RecordStore`](crate::store::RecordStore).
//! Type coercion, date normalization and row validation all happen here so
//! the core can assume well-formed records.

mod errors;
mod loader;

pub use errors::{IngestError, IngestResult};
pub use loader::CsvLoader;
