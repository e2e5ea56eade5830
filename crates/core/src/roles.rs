//! Well-known role name constants.
//!
//! These must match the `role` claim issued by the authentication service.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPER_ADMIN: &str = "super_admin";
pub const ROLE_USER: &str = "user";

/// Roles allowed to review, curate and publish media.
pub const OPERATOR_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_SUPER_ADMIN];

/// Whether `role` may act as a media operator.
pub fn is_operator(role: &str) -> bool {
    OPERATOR_ROLES.contains(&role)
}
