use std::sync::Arc;

use tracing::{debug, info};

use super::unit_of_work::AppUnitOfWork;
use crate::domain::user::User;
use crate::domain::vote::{Vote, VoteOutcome};
use crate::domain::work::WorkId;
use crate::error::{RankerError, Result};

/// What an upvote attempt amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpvoteOutcome {
    /// No authenticated actor; nothing was looked up or changed.
    NotLoggedIn,
    Recorded(Vote),
    AlreadyVoted,
}

#[derive(Clone, Debug)]
pub struct VotingService {
    uow: Arc<AppUnitOfWork>,
}

impl VotingService {
    pub fn new(uow: Arc<AppUnitOfWork>) -> Self {
        Self { uow }
    }

    /// Record `actor`'s vote on `work_id`. Repeating an upvote is a no-op.
    pub async fn upvote(
        &self,
        actor: Option<&User>,
        work_id: WorkId,
    ) -> Result<UpvoteOutcome> {
        let Some(actor) = actor else {
            return Ok(UpvoteOutcome::NotLoggedIn);
        };

        if self.uow.works.get_work(work_id).await?.is_none() {
            return Err(RankerError::work_not_found(work_id));
        }

        if self.uow.votes.find_vote(actor.id, work_id).await?.is_some() {
            debug!(user_id = actor.id, work_id, "already voted");
            return Ok(UpvoteOutcome::AlreadyVoted);
        }

        match self.uow.votes.record_vote(actor.id, work_id).await? {
            VoteOutcome::Recorded(vote) => {
                info!(user_id = actor.id, work_id, "upvote recorded");
                Ok(UpvoteOutcome::Recorded(vote))
            }
            VoteOutcome::AlreadyVoted => Ok(UpvoteOutcome::AlreadyVoted),
        }
    }

    pub async fn vote_count(&self) -> Result<i64> {
        self.uow.votes.count_votes().await
    }
}
