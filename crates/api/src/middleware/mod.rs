//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a Bearer access token.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.
//! - [`rbac::RequireAdmin`] -- Requires a profile with the `admin` role.

pub mod auth;
pub mod rbac;
