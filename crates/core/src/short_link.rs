//! Recipe short-link code generation and validation.
//!
//! A short link is the first six hex characters of a UUIDv4. Collisions are
//! possible but rare at expected data volumes; the database enforces
//! uniqueness and callers retry on conflict.

use uuid::Uuid;

use crate::constants::SHORT_LINK_LEN;

/// Generate a new six-character lowercase hex short-link code.
pub fn generate_short_link() -> String {
    Uuid::new_v4().simple().to_string()[..SHORT_LINK_LEN].to_string()
}

/// Check that an incoming code has the expected shape before hitting the
/// database.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == SHORT_LINK_LEN && code.chars().all(|c| c.is_ascii_hexdigit())
}
