//! HTTP server layer
//!
//! Axum server with:
//! - `/product` routes mapped onto ProductService
//! - CORS (localhost only by default)
//! - Request tracing and timeouts
//! - Graceful shutdown
//! - JSON error responses

pub mod server;
pub mod error;
pub mod extractors;
pub mod routes;

pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use error::ApiError;
