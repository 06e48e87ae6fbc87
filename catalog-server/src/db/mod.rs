//! Database layer - connection pool, scoped store access and repositories
//!
//! # Design Principles
//!
//! - Connection pool built once from DbConfig, the only process-wide value
//! - Every statement runs in its own transaction: commit on success, rollback on error
//! - Rely on single guarded statements, not check-then-write

pub mod migrations;
pub mod pool;
pub mod repos;
pub mod store;

pub use pool::{create_pool, DbConfig};
pub use repos::*;
pub use store::Store;
