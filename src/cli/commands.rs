//! CLI command implementations
//!
//! `serve` binds the gateway before the dataset is in; the readiness gate
//! opens once the loader finishes, and queries answer 503 until then.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::View;
use crate::filter::FilterParams;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::ingestion::CsvLoader;
use crate::observability::{log_event, log_event_with_fields, Event, MetricsRegistry};
use crate::store::StoreGate;

use super::args::{Cli, Command, FilterArgs};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// CSV dataset (required)
    pub data_path: PathBuf,

    #[serde(flatten)]
    pub server: HttpServerConfig,
}

impl Config {
    /// Config with defaults for everything but the dataset
    pub fn with_data(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            server: HttpServerConfig::default(),
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolve the serve configuration from an optional file plus flag overrides
    pub fn resolve(
        config: Option<&Path>,
        data: Option<PathBuf>,
        host: Option<String>,
        port: Option<u16>,
    ) -> CliResult<Self> {
        let mut resolved = match (config, data) {
            (Some(path), data) => {
                let mut loaded = Self::load(path)?;
                if let Some(data) = data {
                    loaded.data_path = data;
                }
                loaded
            }
            (None, Some(data)) => Self::with_data(data),
            (None, None) => {
                return Err(CliError::config_error(
                    "no dataset: pass --data or --config",
                ))
            }
        };

        if let Some(host) = host {
            resolved.server.host = host;
        }
        if let Some(port) = port {
            resolved.server.port = port;
        }

        resolved.validate()?;
        Ok(resolved)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(CliError::config_error("data_path must not be empty"));
        }

        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }

        if self.server.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        Ok(())
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            data,
            host,
            port,
        } => {
            let config = Config::resolve(config.as_deref(), data, host, port)?;
            serve(config)
        }
        Command::Query {
            view,
            data,
            filter,
            pretty,
        } => query(&view, &data, filter, pretty),
        Command::Views => views(),
    }
}

/// Serve the query gateway over the dataset in `config`
pub fn serve(config: Config) -> CliResult<()> {
    log_event(Event::BootStart);
    let shown = config.data_path.display().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("data_path", shown.as_str()), ("addr", config.server.socket_addr().as_str())],
    );

    let gate = Arc::new(StoreGate::new());
    let metrics = Arc::new(MetricsRegistry::new());
    let server = HttpServer::new(config.server.clone(), gate.clone(), metrics.clone());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async move {
        let server_task = tokio::spawn(server.start());

        let data_path = config.data_path.clone();
        let loaded = tokio::task::spawn_blocking(move || CsvLoader::load_path(&data_path))
            .await
            .map_err(|e| CliError::boot_failed(format!("Loader task failed: {}", e)))?;

        let store = match loaded {
            Ok(store) => store,
            Err(e) => {
                let reason = e.to_string();
                log_event_with_fields(Event::DatasetLoadFailed, &[("reason", reason.as_str())]);
                return Err(CliError::dataset_error(reason));
            }
        };

        let count = store.len();
        metrics.set_records_loaded(count as u64);
        gate.set(store)
            .map_err(|e| CliError::boot_failed(e.message().to_string()))?;

        let count = count.to_string();
        log_event_with_fields(Event::BootComplete, &[("records", count.as_str())]);

        server_task
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server task failed: {}", e)))?
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Evaluate one view over a CSV file and print the result
pub fn query(view: &str, data: &Path, filter: FilterArgs, pretty: bool) -> CliResult<()> {
    let view: View = view
        .parse()
        .map_err(|e: crate::catalog::UnknownView| CliError::query_error(e.to_string()))?;

    // Validate filters before touching the dataset
    let predicate = FilterParams::from(filter)
        .to_predicate()
        .map_err(|e| CliError::query_error(e.message().to_string()))?;

    let store =
        CsvLoader::load_path(data).map_err(|e| CliError::dataset_error(e.to_string()))?;

    let result = view.evaluate(&store, &predicate);
    write_response(&result, pretty)
}

/// Entry in the `views` listing
#[derive(Debug, Serialize)]
pub struct ViewInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Every view name with a one-line description
pub fn view_listing() -> Vec<ViewInfo> {
    View::ALL
        .iter()
        .map(|view| ViewInfo {
            name: view.name(),
            description: view.description(),
        })
        .collect()
}

/// List the catalog
pub fn views() -> CliResult<()> {
    write_response(&view_listing(), false)
}
