//! Mythogen — procedural religion generator service.
//!
//! Usage:
//!   mythogen serve               Run the HTTP API
//!   mythogen generate [opts]     One-shot generation to stdout

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

use mythogen::backend::GenaiClient;
use mythogen::config;
use mythogen::generator::ReligionGenerator;
use mythogen::server::{self, AppState};
use mythogen::store::ReligionStore;
use mythogen::types::GenerateRequest;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "mythogen")]
#[command(version)]
#[command(about = "LLM-backed procedural religion generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file.
    #[arg(long, default_value = "~/.mythogen/mythogen.toml")]
    config: String,

    /// Log level (debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server.
    Serve,

    /// Generate one religion and print it as JSON.
    Generate {
        #[arg(long)]
        theme: Option<String>,

        #[arg(long)]
        culture: Option<String>,

        /// simple, medium or complex.
        #[arg(long)]
        complexity: Option<String>,

        /// monotheistic, polytheistic, pantheistic or animistic.
        #[arg(long)]
        deity_type: Option<String>,

        #[arg(long)]
        language: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config_path = config::resolve_path(&cli.config);

    match cli.command {
        Commands::Serve => cmd_serve(&config_path).await,
        Commands::Generate {
            theme,
            culture,
            complexity,
            deity_type,
            language,
        } => cmd_generate(&config_path, theme, culture, complexity, deity_type, language).await,
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

async fn cmd_serve(config_path: &PathBuf) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    if !cfg.has_api_key() {
        bail!(
            "No backend API key configured. Set MYTHOGEN_API_KEY (or GEMINI_API_KEY), \
             or add backend_api_key to {}",
            config_path.display()
        );
    }

    let state = build_state(&cfg)?;

    println!(
        "{} Starting mythogen on {} (model: {})",
        ">>>".green().bold(),
        cfg.listen_addr,
        cfg.model,
    );

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n{} Shutting down gracefully...", "<<<".red().bold());
            signal_cancel.cancel();
        }
    });

    server::serve(&cfg, state, cancel).await
}

async fn cmd_generate(
    config_path: &PathBuf,
    theme: Option<String>,
    culture: Option<String>,
    complexity: Option<String>,
    deity_type: Option<String>,
    language: Option<String>,
) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    if !cfg.has_api_key() {
        bail!("No backend API key configured. Set MYTHOGEN_API_KEY (or GEMINI_API_KEY).");
    }

    let state = build_state(&cfg)?;
    let request = GenerateRequest {
        theme,
        culture,
        complexity: complexity.unwrap_or_else(|| cfg.default_complexity.clone()),
        deity_type,
        language: language.unwrap_or_else(|| cfg.default_language.clone()),
    };

    info!("Generating religion: {:?}", request);
    let religion = state
        .generator
        .generate(&request)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!("{}", serde_json::to_string_pretty(&religion)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Wire the backend client, generator and store into shared state.
fn build_state(cfg: &config::MythogenConfig) -> Result<AppState> {
    let backend = Arc::new(GenaiClient::new(
        &cfg.backend_api_url,
        &cfg.backend_api_key,
        &cfg.model,
        cfg.max_output_tokens,
        cfg.temperature,
        Duration::from_secs(cfg.request_timeout_secs),
    )?);
    Ok(AppState {
        store: Arc::new(ReligionStore::new()),
        generator: Arc::new(ReligionGenerator::new(backend, &cfg.default_language)),
    })
}
