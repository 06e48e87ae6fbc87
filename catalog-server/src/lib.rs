//! catalog-server: product catalog HTTP service
//!
//! Layers, each a thin pass-through to the one below:
//! - `http`: axum routes, status mapping
//! - `service`: orchestration and the stock rule
//! - `db`: repositories, scoped store access, pool and schema

pub mod db;
pub mod http;
pub mod models;
pub mod service;

pub use db::{DbConfig, DbError, PgProductRepo, ProductRepository, Store};
pub use http::{run_server, ServerConfig, ServerError};
pub use service::{ProductService, ServiceError};
