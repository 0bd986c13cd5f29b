mod args;
mod commands;
mod console;
mod render;
mod shell;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use hanami_api::JikanClient;
use hanami_core::config::AppConfig;
use hanami_core::error::HanamiError;
use hanami_core::storage::{JsonFileStorage, MemoryStorage, WatchlistStorage};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Command};
use crate::commands::App;
use crate::console::Console;

const DEFAULT_LOG_FILTER: &str = "hanami=warn";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.log_file.as_deref());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr, or to `log_file` when given. Keep the guard alive
/// until exit so buffered file output is flushed.
fn init_logging(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let file = log_file.and_then(|path| Some((path.parent()?, path.file_name()?)));
    match file {
        Some((dir, name)) => {
            let dir = if dir.as_os_str().is_empty() {
                Path::new(".")
            } else {
                dir
            };
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

async fn run(cli: Cli) -> Result<(), HanamiError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }

    let storage: Box<dyn WatchlistStorage> = if cli.ephemeral {
        Box::new(MemoryStorage::new())
    } else {
        let storage = JsonFileStorage::new(config.data_dir(), &config.storage.key);
        tracing::debug!(path = %storage.path().display(), "Watchlist storage");
        Box::new(storage)
    };

    let catalog = JikanClient::with_base_url(config.catalog.base_url.clone());
    let mut app = App::new(config, catalog, storage);
    let mut console = Console::stdio();

    match cli.command {
        Command::Shell => shell::run(&mut app, &mut console).await,
        command => app.dispatch(command, &mut console).await,
    }
}
