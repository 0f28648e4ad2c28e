//! Admin handlers for product images.
//!
//! Upload flow: request a signed URL, `PUT` the file to it, then register
//! the object path with `POST .../images`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vitacart_cloud::storage::{product_image_path, product_image_prefix};
use vitacart_core::error::CoreError;
use vitacart_core::types::DbId;
use vitacart_core::validation::validate_image_content_type;
use vitacart_db::models::product_image::{CreateProductImage, UpdateProductImage};
use vitacart_db::repositories::{ProductImageRepo, ProductRepo};

use crate::error::{validate_input, AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST .../images/upload-url`.
#[derive(Debug, Deserialize)]
pub struct UploadUrlRequest {
    pub content_type: String,
}

/// Where and how to upload a new product image.
#[derive(Debug, Serialize)]
pub struct UploadTarget {
    /// Object path to send back when registering the image.
    pub path: String,
    pub signed_url: String,
    pub token: String,
    /// URL the image will be served from once uploaded.
    pub public_url: String,
}

/// POST /api/v1/admin/products/{id}/images/upload-url
pub async fn create_upload_url(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    Json(input): Json<UploadUrlRequest>,
) -> AppResult<impl IntoResponse> {
    let extension = validate_image_content_type(&input.content_type)?;
    ensure_product(&state, product_id).await?;

    let path = product_image_path(product_id, &Uuid::new_v4().simple().to_string(), extension);
    let upload = state.storage.create_signed_upload_url(&path).await?;

    tracing::info!(product_id, path = %upload.path, user_id = %admin.user_id, "Signed upload URL issued");

    Ok(Json(DataResponse {
        data: UploadTarget {
            public_url: state.storage.public_url(&upload.path),
            path: upload.path,
            signed_url: upload.signed_url,
            token: upload.token,
        },
    }))
}

/// GET /api/v1/admin/products/{id}/images
pub async fn list_images(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_product(&state, product_id).await?;
    let images = ProductImageRepo::list_for_product(&state.pool, product_id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /api/v1/admin/products/{id}/images
///
/// Register an uploaded object. The path must belong to this product.
pub async fn create_image(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    Json(input): Json<CreateProductImage>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let prefix = product_image_prefix(product_id);
    if !input.storage_path.starts_with(&prefix) || input.storage_path.contains("..") {
        return Err(AppError::Core(CoreError::Validation(format!(
            "storage_path must be under '{prefix}'"
        ))));
    }
    ensure_product(&state, product_id).await?;

    let url = state.storage.public_url(&input.storage_path);
    let image = ProductImageRepo::create(&state.pool, product_id, &input, &url).await?;

    tracing::info!(
        product_id,
        image_id = image.id,
        is_primary = image.is_primary,
        user_id = %admin.user_id,
        "Product image registered",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// PUT /api/v1/admin/products/{id}/images/{image_id}
///
/// Update alt text, ordering, or promote to primary.
pub async fn update_image(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((product_id, image_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateProductImage>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    let image = ProductImageRepo::update(&state.pool, product_id, image_id, &input)
        .await?
        .ok_or(image_not_found(image_id))?;

    tracing::info!(product_id, image_id, user_id = %admin.user_id, "Product image updated");

    Ok(Json(DataResponse { data: image }))
}

/// DELETE /api/v1/admin/products/{id}/images/{image_id}
///
/// Removes the row, then the stored object. A storage failure is logged.
pub async fn delete_image(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((product_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let image = ProductImageRepo::delete(&state.pool, product_id, image_id)
        .await?
        .ok_or(image_not_found(image_id))?;

    if let Err(e) = state.storage.remove(&[image.storage_path.clone()]).await {
        tracing::warn!(
            product_id,
            image_id,
            path = %image.storage_path,
            error = %e,
            "Failed to remove image object",
        );
    }

    tracing::info!(product_id, image_id, user_id = %admin.user_id, "Product image deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_product(state: &AppState, product_id: DbId) -> AppResult<()> {
    ProductRepo::find_by_id(&state.pool, product_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))?;
    Ok(())
}

fn image_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ProductImage",
        id,
    })
}
