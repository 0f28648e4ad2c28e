//! Product image models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vitacart_core::types::{DbId, Timestamp};

/// A row from the `product_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductImage {
    pub id: DbId,
    pub product_id: DbId,
    pub storage_path: String,
    pub url: String,
    pub alt_text: Option<String>,
    pub sort_order: i32,
    pub is_primary: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering an image after it has been uploaded to storage.
///
/// When `is_primary` is omitted the first image of a product becomes primary.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductImage {
    #[validate(length(min = 1, max = 500))]
    pub storage_path: String,
    #[validate(length(max = 300))]
    pub alt_text: Option<String>,
    pub sort_order: Option<i32>,
    pub is_primary: Option<bool>,
}

/// DTO for partially updating an image's metadata.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProductImage {
    #[validate(length(max = 300))]
    pub alt_text: Option<String>,
    pub sort_order: Option<i32>,
    pub is_primary: Option<bool>,
}
