//! Repository for the `products` table.

use sqlx::PgPool;
use vitacart_core::types::DbId;

use crate::models::product::{
    CreateProduct, Product, ProductDetail, ProductFilter, ProductListing, UpdateProduct,
};
use crate::repositories::{CategoryRepo, InventoryRepo, ProductImageRepo};

/// Column list for `products` queries.
const COLUMNS: &str = "id, category_id, name, slug, description, price_cents, \
    distributor_price_cents, is_active, created_at, updated_at";

/// Prefixed column list plus stock and primary image, for listing queries.
const LISTING_COLUMNS: &str = "\
    p.id, p.category_id, p.name, p.slug, p.description, p.price_cents, \
    p.distributor_price_cents, p.is_active, p.created_at, p.updated_at, \
    COALESCE(i.quantity, 0) AS stock_quantity, \
    (SELECT pi.url FROM product_images pi \
      WHERE pi.product_id = p.id \
      ORDER BY pi.is_primary DESC, pi.sort_order, pi.id \
      LIMIT 1) AS primary_image_url";

/// Provides CRUD and catalog queries for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product and its inventory row in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProduct,
        slug: &str,
    ) -> Result<Product, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO products \
                (category_id, name, slug, description, price_cents, \
                 distributor_price_cents, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, true)) \
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&insert_query)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.description)
            .bind(input.price_cents)
            .bind(input.distributor_price_cents)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO inventory (product_id, quantity) VALUES ($1, COALESCE($2, 0))")
            .bind(product.id)
            .bind(input.initial_stock)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(product)
    }

    /// Find a product by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a product with its category, images, and stock level.
    ///
    /// With `active_only`, an inactive product is reported as missing.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
        active_only: bool,
    ) -> Result<Option<ProductDetail>, sqlx::Error> {
        let Some(product) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        if active_only && !product.is_active {
            return Ok(None);
        }

        let category = match product.category_id {
            Some(category_id) => CategoryRepo::find_by_id(pool, category_id).await?,
            None => None,
        };
        let images = ProductImageRepo::list_for_product(pool, product.id).await?;
        let stock_quantity = InventoryRepo::find(pool, product.id)
            .await?
            .map(|level| level.quantity)
            .unwrap_or(0);

        Ok(Some(ProductDetail {
            product,
            category,
            images,
            stock_quantity,
            in_stock: stock_quantity > 0,
        }))
    }

    /// List products matching `filter`, ordered by name.
    pub async fn list(
        pool: &PgPool,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductListing>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS} \
             FROM products p \
             LEFT JOIN inventory i ON i.product_id = p.id \
             WHERE ($1::BIGINT IS NULL OR p.category_id = $1) \
               AND ($2::TEXT IS NULL OR p.name ILIKE $2 OR p.description ILIKE $2) \
               AND (NOT $3 OR p.is_active) \
             ORDER BY p.name, p.id \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, ProductListing>(&query)
            .bind(filter.category_id)
            .bind(&filter.search_pattern)
            .bind(filter.active_only)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Update a product. Only non-`None` fields are applied.
    ///
    /// The `ck_products_prices` constraint re-checks the resulting price pair.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                category_id = COALESCE($2, category_id), \
                name = COALESCE($3, name), \
                slug = COALESCE($4, slug), \
                description = COALESCE($5, description), \
                price_cents = COALESCE($6, price_cents), \
                distributor_price_cents = COALESCE($7, distributor_price_cents), \
                is_active = COALESCE($8, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.price_cents)
            .bind(input.distributor_price_cents)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product. Images, inventory, and cart lines cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
