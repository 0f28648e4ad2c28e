//! Repository for the `inventory` table.

use sqlx::PgPool;
use vitacart_core::types::DbId;

use crate::models::inventory::{InventoryAdjustment, InventoryLevel, InventoryListing};

/// Column list for `inventory` queries.
const COLUMNS: &str = "product_id, quantity, created_at, updated_at";

/// Provides stock-level reads and writes.
pub struct InventoryRepo;

impl InventoryRepo {
    /// Find the stock level for a product.
    pub async fn find(pool: &PgPool, product_id: DbId) -> Result<Option<InventoryLevel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inventory WHERE product_id = $1");
        sqlx::query_as::<_, InventoryLevel>(&query)
            .bind(product_id)
            .fetch_optional(pool)
            .await
    }

    /// List stock levels joined with product names.
    ///
    /// With `below`, only rows whose quantity is strictly lower are returned.
    pub async fn list(
        pool: &PgPool,
        below: Option<i32>,
    ) -> Result<Vec<InventoryListing>, sqlx::Error> {
        sqlx::query_as::<_, InventoryListing>(
            "SELECT i.product_id, p.name AS product_name, p.slug AS product_slug, \
                    p.is_active, i.quantity, i.updated_at \
             FROM inventory i \
             JOIN products p ON p.id = i.product_id \
             WHERE ($1::INTEGER IS NULL OR i.quantity < $1) \
             ORDER BY i.quantity, p.name",
        )
        .bind(below)
        .fetch_all(pool)
        .await
    }

    /// Set an absolute stock level, creating the row if needed.
    pub async fn set(
        pool: &PgPool,
        product_id: DbId,
        quantity: i32,
    ) -> Result<InventoryLevel, sqlx::Error> {
        let query = format!(
            "INSERT INTO inventory (product_id, quantity) VALUES ($1, $2) \
             ON CONFLICT (product_id) DO UPDATE SET quantity = EXCLUDED.quantity \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InventoryLevel>(&query)
            .bind(product_id)
            .bind(quantity)
            .fetch_one(pool)
            .await
    }

    /// Atomically add `delta` (which may be negative) to the stock level.
    ///
    /// The update only applies if the result stays non-negative.
    pub async fn adjust(
        pool: &PgPool,
        product_id: DbId,
        delta: i32,
    ) -> Result<InventoryAdjustment, sqlx::Error> {
        let query = format!(
            "UPDATE inventory SET quantity = quantity + $2 \
             WHERE product_id = $1 AND quantity + $2 >= 0 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, InventoryLevel>(&query)
            .bind(product_id)
            .bind(delta)
            .fetch_optional(pool)
            .await?;

        if let Some(level) = updated {
            return Ok(InventoryAdjustment::Applied(level));
        }

        Ok(match Self::find(pool, product_id).await? {
            Some(level) => InventoryAdjustment::WouldGoNegative {
                available: level.quantity,
            },
            None => InventoryAdjustment::NotFound,
        })
    }
}
