//! Product repository backed by PostgreSQL
//!
//! All statements go through `Store`, so each call is its own transaction.

use async_trait::async_trait;
use uuid::Uuid;

use super::{DbError, ProductRepository, StockOutcome};
use crate::db::Store;
use crate::models::{Product, ProductInput, ProductStatistics};

/// Product repository
#[derive(Clone)]
pub struct PgProductRepo {
    store: Store,
}

impl PgProductRepo {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepo {
    async fn create(&self, input: &ProductInput) -> Result<Product, DbError> {
        let product = self
            .store
            .fetch_optional(
                "create_product",
                sqlx::query_as::<_, Product>(
                    r#"
                    INSERT INTO products (name, description, price, stock)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id, name, description, price, stock
                    "#,
                )
                .bind(input.name.as_deref())
                .bind(input.description.as_deref())
                .bind(input.price)
                .bind(input.stock),
            )
            .await?
            // INSERT ... RETURNING always yields the new row
            .ok_or(DbError::Sqlx(sqlx::Error::RowNotFound))?;

        tracing::debug!(id = %product.id, "product created");
        Ok(product)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, DbError> {
        let product = self
            .store
            .fetch_optional(
                "get_product",
                sqlx::query_as::<_, Product>(
                    "SELECT id, name, description, price, stock FROM products WHERE id = $1",
                )
                .bind(id),
            )
            .await?;

        tracing::debug!(%id, found = product.is_some(), "fetched product");
        Ok(product)
    }

    async fn list(&self) -> Result<Vec<Product>, DbError> {
        self.store
            .fetch_all(
                "list_products",
                sqlx::query_as::<_, Product>(
                    "SELECT id, name, description, price, stock FROM products",
                ),
            )
            .await
    }

    async fn update(&self, id: Uuid, input: &ProductInput) -> Result<Product, DbError> {
        self.store
            .fetch_optional(
                "update_product",
                sqlx::query_as::<_, Product>(
                    r#"
                    UPDATE products SET
                        name = COALESCE($1, name),
                        description = COALESCE($2, description),
                        price = COALESCE($3, price),
                        stock = COALESCE($4, stock)
                    WHERE id = $5
                    RETURNING id, name, description, price, stock
                    "#,
                )
                .bind(input.name.as_deref())
                .bind(input.description.as_deref())
                .bind(input.price)
                .bind(input.stock)
                .bind(id),
            )
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "product",
                id: id.to_string(),
            })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DbError> {
        let removed = self
            .store
            .execute(
                "delete_product",
                sqlx::query("DELETE FROM products WHERE id = $1").bind(id),
            )
            .await?;

        tracing::debug!(%id, removed, "delete query finished");
        Ok(removed > 0)
    }

    /// The guard in the WHERE clause makes check and write one statement, so
    /// concurrent decrements cannot pass on a stale read. A NULL stock counts
    /// as zero.
    async fn adjust_stock(&self, id: Uuid, delta: i64) -> Result<StockOutcome, DbError> {
        self.store
            .transaction("adjust_stock", move |conn| {
                Box::pin(async move {
                    let updated: Option<Product> = sqlx::query_as(
                        r#"
                        UPDATE products
                        SET stock = COALESCE(stock, 0) + $1
                        WHERE id = $2 AND COALESCE(stock, 0) + $1 >= 0
                        RETURNING id, name, description, price, stock
                        "#,
                    )
                    .bind(delta)
                    .bind(id)
                    .fetch_optional(&mut *conn)
                    .await?;

                    if let Some(product) = updated {
                        return Ok(StockOutcome::Adjusted(product));
                    }

                    // Guard rejected or row missing: tell the two apart
                    let current: Option<(Option<i64>,)> =
                        sqlx::query_as("SELECT stock FROM products WHERE id = $1")
                            .bind(id)
                            .fetch_optional(&mut *conn)
                            .await?;

                    Ok::<_, sqlx::Error>(match current {
                        None => StockOutcome::NotFound,
                        Some((stock,)) => StockOutcome::WouldGoNegative {
                            current: stock.unwrap_or(0),
                        },
                    })
                })
            })
            .await
    }

    async fn statistics(&self) -> Result<ProductStatistics, DbError> {
        // COUNT(*) always yields a row; the other aggregates are NULL on an empty table
        self.store
            .fetch_optional(
                "product_statistics",
                sqlx::query_as::<_, ProductStatistics>(
                    r#"
                    SELECT
                        COUNT(*) AS product_sum,
                        MAX(price) AS max_price,
                        MIN(price) AS min_price,
                        AVG(price) AS average_price,
                        SUM(stock)::BIGINT AS total_stock,
                        AVG(stock)::DOUBLE PRECISION AS average_stock
                    FROM products
                    "#,
                ),
            )
            .await
            .map(Option::unwrap_or_default)
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations, DbConfig};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p catalog-server -- --ignored

    async fn repo() -> PgProductRepo {
        let config = DbConfig {
            url: Some(std::env::var("DATABASE_URL").expect("DATABASE_URL required")),
            ..Default::default()
        };
        let pool = create_pool(&config).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        PgProductRepo::new(Store::new(pool))
    }

    fn lamp() -> ProductInput {
        ProductInput {
            name: Some("Lamp".into()),
            description: Some("Desk lamp".into()),
            price: Some(12.5),
            stock: Some(5),
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_get() {
        let repo = repo().await;
        let created = repo.create(&lamp()).await.unwrap();
        assert_eq!(created.name.as_deref(), Some("Lamp"));

        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(fetched, Some(created.clone()));

        assert!(repo.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_coalesces_missing_fields() {
        let repo = repo().await;
        let created = repo.create(&lamp()).await.unwrap();

        let patch = ProductInput {
            price: Some(19.99),
            ..Default::default()
        };
        let updated = repo.update(created.id, &patch).await.unwrap();
        assert_eq!(updated.price, Some(19.99));
        assert_eq!(updated.stock, Some(5));
        assert_eq!(updated.description.as_deref(), Some("Desk lamp"));

        repo.delete(created.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_missing_row_is_not_found() {
        let repo = repo().await;
        let err = repo
            .update(Uuid::new_v4(), &ProductInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn guarded_stock_adjustment() {
        let repo = repo().await;
        let created = repo.create(&lamp()).await.unwrap();

        let outcome = repo.adjust_stock(created.id, -10).await.unwrap();
        assert_eq!(outcome, StockOutcome::WouldGoNegative { current: 5 });

        let outcome = repo.adjust_stock(created.id, 10).await.unwrap();
        assert!(matches!(outcome, StockOutcome::Adjusted(p) if p.stock == Some(15)));

        let outcome = repo.adjust_stock(Uuid::new_v4(), 1).await.unwrap();
        assert_eq!(outcome, StockOutcome::NotFound);

        repo.delete(created.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_decrements_never_go_negative() {
        let repo = repo().await;
        let created = repo.create(&lamp()).await.unwrap();
        let id = created.id;

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.adjust_stock(id, -1).await })
            })
            .collect();

        let mut adjusted = 0;
        for handle in handles {
            if let StockOutcome::Adjusted(_) = handle.await.unwrap().unwrap() {
                adjusted += 1;
            }
        }

        assert_eq!(adjusted, 5);
        let after = repo.get(id).await.unwrap().unwrap();
        assert_eq!(after.stock, Some(0));

        repo.delete(id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_missing_row_returns_false() {
        let repo = repo().await;
        assert!(!repo.delete(Uuid::new_v4()).await.unwrap());
    }
}
