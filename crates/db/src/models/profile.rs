//! Profile models and DTOs.
//!
//! A profile mirrors one hosted-identity user and carries the role used for
//! admin gating.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vitacart_core::types::{Timestamp, UserId};

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a user updating their own profile.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
}

/// DTO for an admin changing a profile's role.
#[derive(Debug, Clone, Deserialize)]
pub struct SetProfileRole {
    pub role: String,
}
