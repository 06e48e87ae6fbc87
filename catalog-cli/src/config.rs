//! Environment-sourced configuration
//!
//! Every option can come from a flag, an environment variable, or a `.env`
//! file in the current directory (loaded before argument parsing).

use std::net::SocketAddr;
use std::path::PathBuf;

use catalog_server::{DbConfig, ServerConfig};
use clap::Args;

/// Load `./.env` if present. Variables already set in the environment win.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Store connection options
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Full connection string, overrides the individual --db-* options
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "CATALOG_DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "CATALOG_DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "CATALOG_DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "CATALOG_DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub db_password: String,

    /// Database name
    #[arg(long, env = "CATALOG_DB_NAME", default_value = "postgres")]
    pub db_name: String,

    /// Maximum pooled connections
    #[arg(long, env = "CATALOG_DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub db_max_connections: u32,
}

impl From<DbArgs> for DbConfig {
    fn from(args: DbArgs) -> Self {
        Self {
            url: args.database_url.filter(|url| !url.is_empty()),
            host: args.db_host,
            port: args.db_port,
            user: args.db_user,
            password: args.db_password,
            database: args.db_name,
            max_connections: args.db_max_connections,
        }
    }
}

/// HTTP listener options
#[derive(Args, Debug, Clone)]
pub struct HttpArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "CATALOG_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long, env = "CATALOG_CORS_PERMISSIVE")]
    pub cors_permissive: bool,

    /// Request timeout in seconds
    #[arg(long, env = "CATALOG_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout: u64,
}

impl From<HttpArgs> for ServerConfig {
    fn from(args: HttpArgs) -> Self {
        Self {
            bind_addr: args.bind,
            cors_permissive: args.cors_permissive,
            timeout_secs: args.timeout,
        }
    }
}
