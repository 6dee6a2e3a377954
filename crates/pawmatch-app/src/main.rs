//! pawmatch: find and match with shelter dogs from the terminal.

mod command;
mod render;
mod shell;
mod views;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use pawmatch_client::{ClientConfig, FetchGateway};
use pawmatch_core::{defaults, Route, SessionStore};

use crate::shell::Shell;

#[derive(Parser)]
#[command(name = "pawmatch")]
#[command(author, version, about = "Find and match with shelter dogs")]
struct Cli {
    /// Base URL of the dog service (overrides PAWMATCH_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides PAWMATCH_TIMEOUT_SECS)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Dogs per catalog page
    #[arg(
        long,
        env = defaults::ENV_PAGE_SIZE,
        default_value_t = defaults::PAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    page_size: u32,

    /// Path to open first: "/", "/search" or "/match"
    #[arg(long, default_value = "/")]
    route: String,
}

/// Initialize tracing with configurable output.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
///   RUST_LOG    - standard env filter (default: "pawmatch=warn")
///
/// Console output goes to stderr so it does not interleave with the shell.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pawmatch=warn".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("pawmatch.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false)); // no ANSI in files by default
            registry.with(layer).init();
        }
        Some(guard)
    } else if log_format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
        None
    } else {
        let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        if let Some(ansi) = log_ansi {
            layer = layer.with_ansi(ansi);
        }
        registry.with(layer).init();
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stderr)"),
        "Logging initialized"
    );
    guard
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let _log_guard = init_tracing();

    let mut config = ClientConfig::from_env().context("Invalid gateway configuration")?;
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    if let Some(secs) = cli.timeout {
        config.timeout_seconds = Some(secs);
    }
    let gateway = FetchGateway::new(config).context("Failed to create dog service gateway")?;

    let route = Route::parse(&cli.route);
    info!(
        base_url = %gateway.config().base_url,
        page_size = cli.page_size,
        route = %route,
        "Starting pawmatch"
    );

    let mut shell = Shell::new(Arc::new(gateway), SessionStore::new(), cli.page_size);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    shell
        .run(route, stdin, tokio::io::stdout())
        .await
        .context("Terminal I/O failed")?;

    Ok(())
}
