//! Product endpoints, mounted under `/product`

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::ProductId;
use crate::http::server::AppState;
use crate::models::{Product, ProductInput, ProductStatistics, StockAdjustment};

/// Message plus the affected product
#[derive(Serialize)]
pub struct ProductMessage {
    pub message: String,
    pub product: Product,
}

/// Bare confirmation message
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Statistics envelope
#[derive(Serialize)]
pub struct StatisticsResponse {
    pub statistics: ProductStatistics,
}

/// POST /product/new - create a product
async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ProductInput>,
) -> Result<Json<ProductMessage>, ApiError> {
    let product = state.products.create_product(input).await?;

    let name = product.name.as_deref().unwrap_or("unnamed");
    let price = product
        .price
        .map(|p| p.to_string())
        .unwrap_or_else(|| "n/a".into());

    Ok(Json(ProductMessage {
        message: format!(
            "Product: {} has been successfully created with price: {}€",
            name, price
        ),
        product,
    }))
}

/// GET /product/all - list every product
async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.products.get_products().await?;
    if products.is_empty() {
        return Err(ApiError::NotFound {
            message: "Products not found".into(),
        });
    }
    Ok(Json(products))
}

/// GET /product/{id} - get a single product
async fn get_product(
    State(state): State<Arc<AppState>>,
    ProductId(id): ProductId,
) -> Result<Json<Product>, ApiError> {
    tracing::debug!(%id, "fetching product");
    let product = state.products.get_product_by_id(id).await?;
    Ok(Json(product))
}

/// PUT /product/update/{id} - partial update
async fn update_product(
    State(state): State<Arc<AppState>>,
    ProductId(id): ProductId,
    Json(input): Json<ProductInput>,
) -> Result<Json<ProductMessage>, ApiError> {
    let product = state.products.update_product(id, input).await?;
    Ok(Json(ProductMessage {
        message: format!("Product (with id: {}) has been successfully updated", id),
        product,
    }))
}

/// DELETE /product/delete/{id} - remove a product
async fn delete_product(
    State(state): State<Arc<AppState>>,
    ProductId(id): ProductId,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::debug!(%id, "deleting product");
    if !state.products.delete_product(id).await? {
        return Err(ApiError::Internal {
            message: "Failed to delete product".into(),
        });
    }
    Ok(Json(MessageResponse {
        message: format!("Product with ID: {} has been successfully deleted.", id),
    }))
}

/// PUT /product/manage/{id} - adjust stock by plus/minus
async fn manage_stock(
    State(state): State<Arc<AppState>>,
    ProductId(id): ProductId,
    Json(adjustment): Json<StockAdjustment>,
) -> Result<Json<ProductMessage>, ApiError> {
    let change = state.products.manage_stock(id, adjustment).await?;
    Ok(Json(ProductMessage {
        message: change.message().to_string(),
        product: change.product,
    }))
}

/// GET /product/products/statistics - aggregate snapshot
async fn statistics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatisticsResponse>, ApiError> {
    let statistics = state.products.get_product_statistic().await?;
    Ok(Json(StatisticsResponse { statistics }))
}

/// Product routes, relative to the `/product` prefix
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/new", post(create_product))
        .route("/all", get(list_products))
        .route("/update/{id}", put(update_product))
        .route("/delete/{id}", delete(delete_product))
        .route("/manage/{id}", put(manage_stock))
        .route("/products/statistics", get(statistics))
        .route("/{id}", get(get_product))
}
