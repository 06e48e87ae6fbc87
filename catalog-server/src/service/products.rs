//! Product use cases
//!
//! The service holds no product state between calls; the store is the only
//! source of truth.

use std::sync::Arc;

use uuid::Uuid;

use super::ServiceError;
use crate::db::{ProductRepository, StockOutcome};
use crate::models::{
    Product, ProductInput, ProductStatistics, StockAdjustment, StockOperation, ValidationError,
};

/// Result of a successful stock adjustment
#[derive(Debug, Clone, PartialEq)]
pub struct StockChange {
    pub operation: StockOperation,
    pub product: Product,
}

impl StockChange {
    pub fn message(&self) -> &'static str {
        match self.operation {
            StockOperation::Plus => "Product stock has been successfully increased.",
            StockOperation::Minus => "Product stock has been successfully decreased.",
        }
    }
}

/// Product service
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_product(&self, input: ProductInput) -> Result<Product, ServiceError> {
        input.validate()?;
        Ok(self.repo.create(&input).await?)
    }

    /// All products. An empty catalog is `Ok(vec![])`, distinct from a store failure.
    pub async fn get_products(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get_product_by_id(&self, id: Uuid) -> Result<Product, ServiceError> {
        let product = self.repo.get(id).await?;
        tracing::debug!(%id, found = product.is_some(), "product lookup");
        product.ok_or(ServiceError::NotFound { id })
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        input: ProductInput,
    ) -> Result<Product, ServiceError> {
        input.validate()?;
        Ok(self.repo.update(id, &input).await?)
    }

    /// `true` when a row was removed, `false` when the id did not exist.
    pub async fn delete_product(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.repo.delete(id).await?)
    }

    /// Adjust stock by `plus`/`minus` a non-negative amount.
    ///
    /// Validation of the tag and amount happens before the store is touched.
    /// The non-negativity check runs store-side in the same statement as the
    /// write, so a rejected call leaves stock unchanged.
    pub async fn manage_stock(
        &self,
        id: Uuid,
        adjustment: StockAdjustment,
    ) -> Result<StockChange, ServiceError> {
        let operation: StockOperation = adjustment
            .operation
            .parse()
            .map_err(|_| ServiceError::InvalidOperation(adjustment.operation.clone()))?;
        if adjustment.stock < 0 {
            return Err(ValidationError::Negative { field: "stock" }.into());
        }

        let delta = operation.signed(adjustment.stock);
        match self.repo.adjust_stock(id, delta).await? {
            StockOutcome::Adjusted(product) => {
                tracing::info!(%id, %operation, amount = adjustment.stock, stock = ?product.stock, "stock adjusted");
                Ok(StockChange { operation, product })
            }
            StockOutcome::NotFound => Err(ServiceError::NotFound { id }),
            StockOutcome::WouldGoNegative { current } => {
                tracing::warn!(%id, current, delta, "stock adjustment rejected");
                Err(ServiceError::NegativeStock {
                    current,
                    requested: delta,
                })
            }
        }
    }

    pub async fn get_product_statistic(&self) -> Result<ProductStatistics, ServiceError> {
        Ok(self.repo.statistics().await?)
    }

    /// Store reachability for health checks.
    pub async fn store_ready(&self) -> bool {
        self.repo.ping().await.is_ok()
    }
}
