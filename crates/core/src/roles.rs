//! Well-known profile role names.
//!
//! These must match the `ck_profiles_role` check constraint.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CUSTOMER: &str = "customer";

/// Every role a profile may hold.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_CUSTOMER];

/// Returns `true` if `role` is one of [`VALID_ROLES`].
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}
