//! HTTP server command
//!
//! Connects to the store, applies the schema and serves the `/product` API.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use catalog_server::db::{create_pool, migrations, PgProductRepo, Store};
use catalog_server::{run_server, DbConfig, ProductService, ServerConfig};

use crate::config::{DbArgs, HttpArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub http: HttpArgs,

    #[command(flatten)]
    pub db: DbArgs,

    /// Do not create the products table on startup
    #[arg(long)]
    pub skip_migrations: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_config = DbConfig::from(args.db);
    let server_config = ServerConfig::from(args.http);

    tracing::info!("Starting catalog server on {}", server_config.bind_addr);

    let pool = create_pool(&db_config)
        .await
        .with_context(|| format!("Failed to connect to {}", db_config.display_target()))?;

    if !args.skip_migrations {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let repo = PgProductRepo::new(Store::new(pool));
    let service = ProductService::new(Arc::new(repo));

    // Run server (blocks until shutdown)
    run_server(service, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
