//! CLI module for salesdb
//!
//! Provides command-line interface for:
//! - serve: load the dataset and serve the query gateway
//! - query: one-shot view evaluation over a CSV file
//! - views: list the catalog

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, FilterArgs};
pub use commands::{query, run, run_command, serve, view_listing, views, Config, ViewInfo};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{envelope, write_response};
