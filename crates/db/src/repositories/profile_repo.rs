//! Repository for the `profiles` table.

use sqlx::PgPool;
use vitacart_core::types::UserId;

use crate::models::profile::{Profile, UpdateProfile};

/// Column list for `profiles` queries.
const COLUMNS: &str = "id, email, full_name, role, created_at, updated_at";

/// Provides data access for user profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find a profile by the identity service's user id.
    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Return the profile for `id`, creating a `customer` profile on first sight.
    pub async fn ensure(pool: &PgPool, id: UserId, email: &str) -> Result<Profile, sqlx::Error> {
        sqlx::query("INSERT INTO profiles (id, email) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
            .bind(id)
            .bind(email)
            .execute(pool)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Apply a user's own profile changes.
    pub async fn update(
        pool: &PgPool,
        id: UserId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET full_name = COALESCE($2, full_name) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(&input.full_name)
            .fetch_optional(pool)
            .await
    }

    /// Change a profile's role. The role must satisfy `ck_profiles_role`.
    pub async fn set_role(
        pool: &PgPool,
        id: UserId,
        role: &str,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("UPDATE profiles SET role = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// List profiles, newest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profiles ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
