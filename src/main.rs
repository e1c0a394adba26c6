//! Studyboard - learning dashboard for the curriculum platform
//!
//! A CLI tool that gathers the signed-in user's profile, curriculums,
//! summaries, AI feedback and follow statistics from the platform API and
//! renders them as a single best-effort dashboard.
//!
//! Exit codes:
//!   0 - Dashboard rendered (possibly with some sources defaulted)
//!   1 - Runtime error (config, output file, client setup)
//!   2 - Authentication required (no user id)
//!   130 - Cancelled by Ctrl-C

mod api;
mod cli;
mod config;
mod dashboard;
mod models;
mod report;

use anyhow::{Context, Result};
use api::HttpApiClient;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use dashboard::{Aggregator, DashboardError};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

const EXIT_AUTH_REQUIRED: i32 = 2;
const EXIT_CANCELLED: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Studyboard v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_dashboard(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Dashboard failed: {}", e);
            eprintln!("\nError: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .studyboard.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to set the API URL, token and page sizes.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so the rendered dashboard can be piped from stdout.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load and render the dashboard. Returns the process exit code.
async fn run_dashboard(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate()?;

    info!("Platform API: {}", config.api.base_url);

    let client = HttpApiClient::new(config.client_config())?;
    let aggregator = Aggregator::new(Arc::new(client), config.dashboard_settings());

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let dashboard = match aggregator
        .load_dashboard_cancellable(args.user_id.as_deref(), cancel)
        .await
    {
        Ok(dashboard) => dashboard,
        Err(DashboardError::AuthenticationRequired) => {
            eprintln!("Authentication required: pass --user-id or set STUDYBOARD_USER_ID.");
            return Ok(EXIT_AUTH_REQUIRED);
        }
        Err(DashboardError::Cancelled) => {
            eprintln!("Cancelled.");
            return Ok(EXIT_CANCELLED);
        }
    };

    let defaulted = dashboard.sources.defaulted();
    if !defaulted.is_empty() {
        warn!("{} source(s) shown with default values", defaulted.len());
    }

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&dashboard)?,
        OutputFormat::Markdown => report::generate_markdown_report(&dashboard),
    };

    if config.general.output.is_empty() {
        println!("{}", output);
    } else {
        std::fs::write(&config.general.output, &output)
            .with_context(|| format!("Failed to write dashboard to {}", config.general.output))?;
        info!("Dashboard saved to {}", config.general.output);
    }

    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
