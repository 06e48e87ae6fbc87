//! Scoped store access
//!
//! Every call acquires a pooled connection, opens a transaction, runs its
//! statement(s) and commits. Any error rolls the transaction back before the
//! connection goes back to the pool. Errors are logged here and returned,
//! never swallowed.

use futures::future::BoxFuture;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, Transaction};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

/// Pool handle with commit-or-rollback scoping
#[derive(Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run a statement and discard its rows, returning the affected row count.
    pub async fn execute<'q>(
        &self,
        op: &'static str,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Result<u64, DbError> {
        let mut tx = self.begin(op).await?;
        let result = query
            .execute(&mut *tx)
            .await
            .map(|done| done.rows_affected());
        finish(op, tx, result).await
    }

    /// Run a statement returning at most one row.
    pub async fn fetch_optional<'q, O>(
        &self,
        op: &'static str,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> Result<Option<O>, DbError>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        let mut tx = self.begin(op).await?;
        let result = query.fetch_optional(&mut *tx).await;
        finish(op, tx, result).await
    }

    /// Run a statement returning every row, in store order.
    pub async fn fetch_all<'q, O>(
        &self,
        op: &'static str,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> Result<Vec<O>, DbError>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        let mut tx = self.begin(op).await?;
        let result = query.fetch_all(&mut *tx).await;
        finish(op, tx, result).await
    }

    /// Run several statements on one connection inside a single transaction.
    ///
    /// ```ignore
    /// let n = store
    ///     .transaction("count", |conn| Box::pin(async move {
    ///         let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
    ///             .fetch_one(&mut *conn)
    ///             .await?;
    ///         Ok::<_, sqlx::Error>(n)
    ///     }))
    ///     .await?;
    /// ```
    pub async fn transaction<T, F>(&self, op: &'static str, f: F) -> Result<T, DbError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, sqlx::Error>> + Send,
    {
        let mut tx = self.begin(op).await?;
        let result = f(&mut *tx).await;
        finish(op, tx, result).await
    }

    /// Round-trip check used by the health endpoint.
    pub async fn ping(&self) -> Result<(), DbError> {
        self.execute("ping", sqlx::query("SELECT 1")).await.map(|_| ())
    }

    async fn begin(&self, op: &'static str) -> Result<Transaction<'static, Postgres>, DbError> {
        self.pool.begin().await.map_err(|e| {
            tracing::error!(op, error = %e, "failed to open database connection");
            DbError::Sqlx(e)
        })
    }
}

/// Commit on success, roll back on error. The connection is released when
/// `tx` drops at the end of either branch.
async fn finish<T>(
    op: &'static str,
    tx: Transaction<'static, Postgres>,
    result: Result<T, sqlx::Error>,
) -> Result<T, DbError> {
    match result {
        Ok(value) => {
            tx.commit().await.map_err(|e| {
                tracing::error!(op, error = %e, "commit failed");
                DbError::Sqlx(e)
            })?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!(op, error = %rollback, "rollback failed");
            }
            tracing::error!(op, error = %e, "statement failed, transaction rolled back");
            Err(DbError::Sqlx(e))
        }
    }
}
