use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    user::UserId,
    work::{Category, WorkId},
};

pub type VoteId = i64;

/// One endorsement of a work by one user. The `(user_id, work_id)` pair is
/// unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub user_id: UserId,
    pub work_id: WorkId,
    pub created_at: DateTime<Utc>,
}

/// Result of attempting to record a vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    Recorded(Vote),
    AlreadyVoted,
}

impl VoteOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, VoteOutcome::Recorded(_))
    }
}

/// A vote on a work, with the voter's username, as listed on a work page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkVote {
    pub vote_id: VoteId,
    pub user_id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// A vote cast by a user, with the work it targets, as listed on a user page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserVote {
    pub vote_id: VoteId,
    pub work_id: WorkId,
    pub title: String,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}
