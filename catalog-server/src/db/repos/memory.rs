//! In-memory product repository for unit tests
//!
//! Mirrors the SQL semantics of `PgProductRepo`: COALESCE updates, guarded
//! stock increments, NULL aggregates on an empty table.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::{DbError, ProductRepository, StockOutcome};
use crate::models::{Product, ProductInput, ProductStatistics};

#[derive(Default)]
pub struct MemoryProductRepo {
    rows: Mutex<Vec<Product>>,
    failing: AtomicBool,
}

impl MemoryProductRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail like a lost connection.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DbError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepo {
    async fn create(&self, input: &ProductInput) -> Result<Product, DbError> {
        self.check()?;
        let product = Product {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            stock: input.stock,
        };
        self.rows.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, DbError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, DbError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn update(&self, id: Uuid, input: &ProductInput) -> Result<Product, DbError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DbError::NotFound {
                resource: "product",
                id: id.to_string(),
            })?;
        *row = input.clone().coalesce(row.clone());
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DbError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() < before)
    }

    async fn adjust_stock(&self, id: Uuid, delta: i64) -> Result<StockOutcome, DbError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(StockOutcome::NotFound);
        };
        let current = row.stock.unwrap_or(0);
        if current + delta < 0 {
            return Ok(StockOutcome::WouldGoNegative { current });
        }
        row.stock = Some(current + delta);
        Ok(StockOutcome::Adjusted(row.clone()))
    }

    async fn statistics(&self) -> Result<ProductStatistics, DbError> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        let prices: Vec<f64> = rows.iter().filter_map(|p| p.price).collect();
        let stocks: Vec<i64> = rows.iter().filter_map(|p| p.stock).collect();

        let mean = |sum: f64, n: usize| (n > 0).then(|| sum / n as f64);

        Ok(ProductStatistics {
            product_sum: rows.len() as i64,
            max_price: prices.iter().copied().reduce(f64::max),
            min_price: prices.iter().copied().reduce(f64::min),
            average_price: mean(prices.iter().sum(), prices.len()),
            total_stock: (!stocks.is_empty()).then(|| stocks.iter().sum()),
            average_stock: mean(stocks.iter().sum::<i64>() as f64, stocks.len()),
        })
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.check()
    }
}
