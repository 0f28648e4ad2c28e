//! Repository for the `product_images` table.
//!
//! A product has at most one primary image (`uq_product_images_primary`);
//! promoting an image demotes the previous primary in the same transaction.

use sqlx::PgPool;
use vitacart_core::types::DbId;

use crate::models::product_image::{CreateProductImage, ProductImage, UpdateProductImage};

/// Column list for `product_images` queries.
const COLUMNS: &str = "id, product_id, storage_path, url, alt_text, sort_order, \
    is_primary, created_at, updated_at";

/// Provides CRUD operations for product images.
pub struct ProductImageRepo;

impl ProductImageRepo {
    /// Register an uploaded image. The first image of a product becomes
    /// primary unless the caller says otherwise.
    pub async fn create(
        pool: &PgPool,
        product_id: DbId,
        input: &CreateProductImage,
        url: &str,
    ) -> Result<ProductImage, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM product_images WHERE product_id = $1")
                .bind(product_id)
                .fetch_one(&mut *tx)
                .await?;
        let is_primary = input.is_primary.unwrap_or(existing == 0);

        if is_primary {
            Self::clear_primary(&mut tx, product_id).await?;
        }

        let query = format!(
            "INSERT INTO product_images \
                (product_id, storage_path, url, alt_text, sort_order, is_primary) \
             VALUES ($1, $2, $3, $4, COALESCE($5, $6), $7) \
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_id)
            .bind(&input.storage_path)
            .bind(url)
            .bind(&input.alt_text)
            .bind(input.sort_order)
            .bind(i32::try_from(existing).unwrap_or(i32::MAX))
            .bind(is_primary)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// List a product's images, primary first, then by sort order.
    pub async fn list_for_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_images WHERE product_id = $1 \
             ORDER BY is_primary DESC, sort_order, id"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Find one image belonging to `product_id`.
    pub async fn find(
        pool: &PgPool,
        product_id: DbId,
        image_id: DbId,
    ) -> Result<Option<ProductImage>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM product_images WHERE id = $1 AND product_id = $2");
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(image_id)
            .bind(product_id)
            .fetch_optional(pool)
            .await
    }

    /// Update an image's metadata. Only non-`None` fields are applied.
    ///
    /// Returns `None` if the image does not exist for this product.
    pub async fn update(
        pool: &PgPool,
        product_id: DbId,
        image_id: DbId,
        input: &UpdateProductImage,
    ) -> Result<Option<ProductImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_primary == Some(true) {
            Self::clear_primary(&mut tx, product_id).await?;
        }

        let query = format!(
            "UPDATE product_images SET \
                alt_text = COALESCE($3, alt_text), \
                sort_order = COALESCE($4, sort_order), \
                is_primary = COALESCE($5, is_primary) \
             WHERE id = $1 AND product_id = $2 \
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, ProductImage>(&query)
            .bind(image_id)
            .bind(product_id)
            .bind(&input.alt_text)
            .bind(input.sort_order)
            .bind(input.is_primary)
            .fetch_optional(&mut *tx)
            .await?;

        // Nothing matched: roll back so a demoted primary is restored.
        if image.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(image)
    }

    /// Delete an image row, returning it so the caller can remove the object.
    pub async fn delete(
        pool: &PgPool,
        product_id: DbId,
        image_id: DbId,
    ) -> Result<Option<ProductImage>, sqlx::Error> {
        let query = format!(
            "DELETE FROM product_images WHERE id = $1 AND product_id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(image_id)
            .bind(product_id)
            .fetch_optional(pool)
            .await
    }

    /// Storage paths of every image of a product (used before deleting it).
    pub async fn storage_paths(pool: &PgPool, product_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT storage_path FROM product_images WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_all(pool)
        .await
    }

    async fn clear_primary(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        product_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE product_images SET is_primary = false \
             WHERE product_id = $1 AND is_primary",
        )
        .bind(product_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
