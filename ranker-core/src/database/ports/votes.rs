use async_trait::async_trait;

use crate::domain::user::UserId;
use crate::domain::vote::{UserVote, Vote, VoteOutcome, WorkVote};
use crate::domain::work::WorkId;
use crate::error::Result;

/// Storage for votes.
///
/// `record_vote` must be atomic with respect to the `(user, work)` uniqueness
/// constraint: concurrent calls for the same pair yield exactly one
/// `VoteOutcome::Recorded`.
#[async_trait]
pub trait VotesRepository: Send + Sync {
    async fn find_vote(&self, user_id: UserId, work_id: WorkId) -> Result<Option<Vote>>;
    async fn record_vote(&self, user_id: UserId, work_id: WorkId) -> Result<VoteOutcome>;
    /// Votes on a work, newest first.
    async fn votes_for_work(&self, work_id: WorkId) -> Result<Vec<WorkVote>>;
    /// Votes cast by a user, newest first.
    async fn votes_by_user(&self, user_id: UserId) -> Result<Vec<UserVote>>;
    async fn count_votes(&self) -> Result<i64>;
}
