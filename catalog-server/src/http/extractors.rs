//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use super::error::ApiError;

/// Product id taken from the `{id}` path segment.
///
/// A segment that is not a UUID cannot name a stored product, so it is
/// rejected as not found.
pub struct ProductId(pub Uuid);

impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound {
                message: "Product not found".into(),
            })?;

        let id = Uuid::parse_str(&raw).map_err(|_| ApiError::NotFound {
            message: format!("Product (with ID: {}) not found", raw),
        })?;

        Ok(Self(id))
    }
}
