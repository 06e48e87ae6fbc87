//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One method per data operation, typed outcomes instead of sentinels
//! - Partial updates via COALESCE (no read-modify-write)
//! - Stock changes as a single guarded increment

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Product, ProductInput, ProductStatistics};

pub mod products;

#[cfg(test)]
pub mod memory;

pub use super::store::DbError;
pub use products::PgProductRepo;

/// Result of a guarded stock adjustment
#[derive(Debug, Clone, PartialEq)]
pub enum StockOutcome {
    /// Delta applied, carries the updated row
    Adjusted(Product),
    /// No product with this id
    NotFound,
    /// Applying the delta would leave stock below zero; nothing was written
    WouldGoNegative { current: i64 },
}

/// Storage contract for products
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product; the store assigns the id.
    async fn create(&self, input: &ProductInput) -> Result<Product, DbError>;

    /// Fetch one product, `None` when the id is absent.
    async fn get(&self, id: Uuid) -> Result<Option<Product>, DbError>;

    /// Every product in store order. Empty is not an error.
    async fn list(&self) -> Result<Vec<Product>, DbError>;

    /// Overwrite only the fields set in `input`.
    ///
    /// Returns `DbError::NotFound` when no row matches.
    async fn update(&self, id: Uuid, input: &ProductInput) -> Result<Product, DbError>;

    /// Remove a product, `true` when a row was actually deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, DbError>;

    /// Add a signed delta to stock unless the result would go negative.
    async fn adjust_stock(&self, id: Uuid, delta: i64) -> Result<StockOutcome, DbError>;

    /// Aggregates over all products in one pass.
    async fn statistics(&self) -> Result<ProductStatistics, DbError>;

    /// Check that the store answers.
    async fn ping(&self) -> Result<(), DbError>;
}
