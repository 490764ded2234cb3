use async_trait::async_trait;

use crate::domain::user::{User, UserId, UserSummary, Username};
use crate::error::Result;

#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Look up a user by name, creating it on first sight. The flag reports
    /// whether a new row was inserted.
    async fn find_or_create_user(&self, username: &Username) -> Result<(User, bool)>;
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    /// Every user with their vote count, ordered by username.
    async fn list_users(&self) -> Result<Vec<UserSummary>>;
    /// Delete a user together with their votes and sessions.
    async fn delete_user(&self, id: UserId) -> Result<bool>;
}
