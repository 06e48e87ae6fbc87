//! catalog CLI - product catalog service
//!
//! Entry point for the catalog HTTP server:
//! - `serve`: run the `/product` API against PostgreSQL
//! - `migrate`: create the products table and exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "catalog",
    author,
    version,
    about = "Product catalog service: CRUD, stock management and statistics over HTTP"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the database schema and exit
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so .env values feed the clap env fallbacks
    let dotenv = config::load_dotenv();

    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    match &dotenv {
        Some(path) => tracing::info!("Loaded configuration from {}", path.display()),
        None => tracing::debug!("No .env file found, using environment variables only"),
    }

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Migrate(args) => commands::migrate::run_migrate(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
