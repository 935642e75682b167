//! CLI argument definitions using clap
//!
//! Commands:
//! - salesdb serve [--config <path>] [--data <csv>] [--host <host>] [--port <port>]
//! - salesdb query <view> --data <csv> [filter flags]
//! - salesdb views

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::filter::FilterParams;

/// salesdb - filterable aggregation over retail transactions
#[derive(Parser, Debug)]
#[command(name = "salesdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the dataset and serve the query gateway
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// CSV dataset (overrides `data_path` from the config file)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Evaluate a single view and print it as JSON
    Query {
        /// View name, e.g. `sales-by-branch`
        view: String,

        /// CSV dataset
        #[arg(long)]
        data: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// List the available views
    Views,
}

/// Filter flags shared with the HTTP query parameters
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long)]
    pub branch: Option<String>,

    #[arg(long)]
    pub product_line: Option<String>,

    #[arg(long)]
    pub customer_type: Option<String>,

    /// Inclusive lower date bound (YYYY-MM-DD)
    #[arg(long)]
    pub date_from: Option<String>,

    /// Inclusive upper date bound (YYYY-MM-DD)
    #[arg(long)]
    pub date_to: Option<String>,
}

impl From<FilterArgs> for FilterParams {
    fn from(args: FilterArgs) -> Self {
        FilterParams {
            branch: args.branch,
            product_line: args.product_line,
            customer_type: args.customer_type,
            date_from: args.date_from,
            date_to: args.date_to,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
