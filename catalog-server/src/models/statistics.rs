//! Aggregate snapshot over the whole catalog

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Recomputed on every request, never persisted.
///
/// JSON keys are part of the public contract, including the trailing colon
/// on `"average price:"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductStatistics {
    #[serde(rename = "product sum")]
    pub product_sum: i64,
    #[serde(rename = "max price")]
    pub max_price: Option<f64>,
    #[serde(rename = "min price")]
    pub min_price: Option<f64>,
    #[serde(rename = "average price:")]
    pub average_price: Option<f64>,
    #[serde(rename = "total stock")]
    pub total_stock: Option<i64>,
    #[serde(rename = "average stock")]
    pub average_stock: Option<f64>,
}
