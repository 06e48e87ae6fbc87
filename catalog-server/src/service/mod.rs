//! Product service - orchestrates repository calls and the stock rule

pub mod error;
pub mod products;

pub use error::ServiceError;
pub use products::{ProductService, StockChange};
