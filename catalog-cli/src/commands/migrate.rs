//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use catalog_server::db::{create_pool, migrations};
use catalog_server::DbConfig;

use crate::config::DbArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

/// Create the products table and exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let db_config = DbConfig::from(args.db);
    let pool = create_pool(&db_config)
        .await
        .with_context(|| format!("Failed to connect to {}", db_config.display_target()))?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    Ok(())
}
