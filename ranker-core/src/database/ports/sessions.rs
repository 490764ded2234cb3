use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::session::SessionRecord;
use crate::domain::user::UserId;
use crate::error::Result;

/// Server-side login sessions keyed by token hash.
#[async_trait]
pub trait SessionsRepository: Send + Sync {
    async fn create_session(
        &self,
        token_hash: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<SessionRecord>;
    async fn get_session(&self, token_hash: &str) -> Result<Option<SessionRecord>>;
    /// Returns whether a session was removed.
    async fn delete_session(&self, token_hash: &str) -> Result<bool>;
    /// Remove sessions whose expiry is at or before `now`.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64>;
}
