//! Product models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vitacart_core::types::{Cents, DbId, Timestamp};

use crate::models::category::Category;
use crate::models::product_image::ProductImage;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub category_id: Option<DbId>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price_cents: Cents,
    pub distributor_price_cents: Cents,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product row enriched with its stock level and primary image, as shown
/// in catalog listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub product: Product,
    pub stock_quantity: i32,
    pub primary_image_url: Option<String>,
}

/// A product with its category, images, and stock level.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<Category>,
    pub images: Vec<ProductImage>,
    pub stock_quantity: i32,
    pub in_stock: bool,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a product. The slug is derived from `name` when omitted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    pub category_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub slug: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub price_cents: Cents,
    pub distributor_price_cents: Cents,
    pub is_active: Option<bool>,
    /// Starting stock level, checked like any other stock level.
    pub initial_stock: Option<i32>,
}

/// DTO for partially updating a product.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProduct {
    pub category_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub slug: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub price_cents: Option<Cents>,
    pub distributor_price_cents: Option<Cents>,
    pub is_active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Query filters
// ---------------------------------------------------------------------------

/// Filters for catalog listings. Limits are expected to be clamped already.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<DbId>,
    /// An `ILIKE` pattern matched against name and description.
    pub search_pattern: Option<String>,
    pub active_only: bool,
    pub limit: i64,
    pub offset: i64,
}
