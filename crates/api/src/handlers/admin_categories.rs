//! Admin handlers for category management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vitacart_core::error::CoreError;
use vitacart_core::types::DbId;
use vitacart_core::validation::{resolve_slug, validate_slug};
use vitacart_db::models::category::{CreateCategory, UpdateCategory};
use vitacart_db::repositories::CategoryRepo;

use crate::error::{validate_input, AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/categories
pub async fn list_categories(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/admin/categories
///
/// Create a category. The slug is derived from the name when omitted.
pub async fn create_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let slug = resolve_slug(input.slug.as_deref(), &input.name)?;

    let category = CategoryRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(
        category_id = category.id,
        slug = %category.slug,
        user_id = %admin.user_id,
        "Category created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/admin/categories/{id}
pub async fn get_category(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .ok_or(not_found(category_id))?;

    Ok(Json(DataResponse { data: category }))
}

/// PUT /api/v1/admin/categories/{id}
///
/// Partially update a category.
pub async fn update_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    if let Some(slug) = input.slug.as_deref() {
        validate_slug(slug)?;
    }

    let category = CategoryRepo::update(&state.pool, category_id, &input)
        .await?
        .ok_or(not_found(category_id))?;

    tracing::info!(category_id, user_id = %admin.user_id, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/admin/categories/{id}
///
/// Categories that still hold products cannot be deleted (409).
pub async fn delete_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CategoryRepo::delete(&state.pool, category_id).await?;

    if !deleted {
        return Err(not_found(category_id));
    }

    tracing::info!(category_id, user_id = %admin.user_id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}
