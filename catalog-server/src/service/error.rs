//! Service error taxonomy

use uuid::Uuid;

use crate::db::DbError;
use crate::models::ValidationError;

/// Outcome of a failed service call.
///
/// Not-found and validation signals stay typed so the HTTP layer can map
/// them to 404 / 400 instead of a generic 500.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Product (with ID: {id}) not found")]
    NotFound { id: Uuid },

    #[error("Invalid operation '{0}'. Must be 'plus' or 'minus'")]
    InvalidOperation(String),

    #[error("Stock cannot be negative (current: {current}, requested change: {requested})")]
    NegativeStock { current: i64, requested: i64 },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Database(DbError),
}

impl From<DbError> for ServiceError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { id, .. } => match id.parse() {
                Ok(id) => Self::NotFound { id },
                Err(_) => Self::Database(DbError::NotFound {
                    resource: "product",
                    id,
                }),
            },
            other => Self::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_not_found_becomes_typed_signal() {
        let id = Uuid::new_v4();
        let err = ServiceError::from(DbError::NotFound {
            resource: "product",
            id: id.to_string(),
        });
        assert!(matches!(err, ServiceError::NotFound { id: got } if got == id));
    }

    #[test]
    fn sqlx_error_stays_database() {
        let err = ServiceError::from(DbError::Sqlx(sqlx::Error::PoolClosed));
        assert!(matches!(err, ServiceError::Database(_)));
    }
}
