//! Subscription (follower -> author) model.

use sqlx::FromRow;

use cookbook_core::types::{DbId, Timestamp};

/// A subscription row from the `subscriptions` table.
///
/// `user_id` follows `author_id`; the pair is unique and self-subscription
/// is rejected both here and by a CHECK constraint.
#[derive(Debug, Clone, FromRow)]
pub struct Subscription {
    pub id: DbId,
    pub user_id: DbId,
    pub author_id: DbId,
    pub created_at: Timestamp,
}
