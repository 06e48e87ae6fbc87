//! Schema setup for the products table

use sqlx::PgPool;

/// Create the `products` table if it does not exist yet.
///
/// `gen_random_uuid()` is built into PostgreSQL 13+.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running catalog migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT,
            description TEXT,
            price DOUBLE PRECISION CHECK (price >= 0),
            stock BIGINT CHECK (stock >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Catalog migrations complete");
    Ok(())
}
