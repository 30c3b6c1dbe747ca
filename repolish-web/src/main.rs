//! Repolish - Web front-end for AI-assisted review rewriting
//!
//! Serves a single page where a user submits a product review and a
//! rewriting style; the review is rewritten through an OpenAI-compatible
//! chat-completion API.

mod page;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use clap::{Parser, Subcommand};
use repolish_core::{secrets::API_KEY_ENV, Config, ReviewClient, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Repolish: rewrite product reviews in a chosen style
#[derive(Parser, Debug)]
#[command(name = "repolish")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a config file (overrides the default location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Socket address to bind (overrides config and env)
    #[arg(long, global = true, env = "REPOLISH_BIND")]
    bind: Option<String>,

    /// Model to use (overrides config and env)
    #[arg(long, global = true, env = "REPOLISH_MODEL")]
    model: Option<String>,

    /// Base URL of the completion API (overrides config and env)
    #[arg(long, global = true, env = "REPOLISH_API_BASE")]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Start the web server (default)
    Serve,

    /// Show current configuration
    Config,

    /// Create a secrets file template
    InitSecrets,
}

/// Shared state behind the request handlers
pub struct AppState {
    client: ReviewClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(
        cli.config.clone(),
        cli.api_base.clone(),
        cli.model.clone(),
        cli.bind.clone(),
    )?;

    if cli.verbose {
        tracing::info!(
            api_base = %config.provider.api_base,
            model = %config.provider.model,
            bind = %config.server.bind,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("repolish {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Config) => {
            println!("Repolish Configuration");
            println!("======================");
            println!();
            println!("Provider Settings:");
            println!("  api_base: {}", config.provider.api_base);
            println!("  model: {}", config.provider.model);
            println!();
            println!("Server Settings:");
            println!("  bind: {}", config.server.bind);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        Some(Commands::InitSecrets) => {
            let path = Secrets::create_template()?;
            println!("Created secrets template at {}", path.display());
        }
        Some(Commands::Serve) | None => {
            serve(config).await?;
        }
    }

    Ok(())
}

/// Run the web server until the process is stopped
async fn serve(config: Config) -> anyhow::Result<()> {
    let secrets = Secrets::load()?;
    let api_key = secrets.api_key().with_context(|| {
        format!(
            "API key not found. Set {} or run `repolish init-secrets` \
             and fill in the template",
            API_KEY_ENV
        )
    })?;

    let client = ReviewClient::new(&config.provider, api_key, config.retry.clone())?;
    let state = Arc::new(AppState { client });

    let app = Router::new()
        .route("/", get(routes::index).post(routes::improve))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;

    tracing::info!(bind = %config.server.bind, "Repolish listening");

    axum::serve(listener, app).await?;

    Ok(())
}
