//! Domain models with validation at the request boundary
//!
//! Request payloads are checked before they reach the store.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod product;
pub mod stock;
pub mod statistics;

pub use validation::ValidationError;
pub use product::{Product, ProductInput};
pub use stock::{StockAdjustment, StockOperation};
pub use statistics::ProductStatistics;
