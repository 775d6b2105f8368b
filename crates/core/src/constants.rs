//! Shared numeric limits and field length caps.
//!
//! These mirror the database CHECK constraints so input can be rejected
//! before a round trip.

/// Minimum value for ingredient amounts and cooking time (minutes).
pub const MIN_POSITIVE_VALUE: i32 = 1;

/// Maximum value for ingredient amounts and cooking time (minutes).
pub const MAX_POSITIVE_VALUE: i32 = 32_000;

/// Maximum length of a recipe name.
pub const MAX_RECIPE_NAME_LEN: usize = 256;

/// Maximum length of an ingredient name.
pub const MAX_INGREDIENT_NAME_LEN: usize = 128;

/// Maximum length of an ingredient measurement unit.
pub const MAX_MEASUREMENT_UNIT_LEN: usize = 64;

/// Maximum length of a username, first name, or last name.
pub const MAX_USER_NAME_LEN: usize = 150;

/// Minimum password length accepted at registration and password change.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Length of a recipe short-link code.
pub const SHORT_LINK_LEN: usize = 6;

/// Default page size for paginated list endpoints.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Maximum page size for paginated list endpoints.
pub const MAX_PAGE_LIMIT: i64 = 100;
