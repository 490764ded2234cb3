use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;

use super::super::{db_error, is_foreign_key_violation, violated_constraint};
use crate::database::ports::votes::VotesRepository;
use crate::domain::user::UserId;
use crate::domain::vote::{UserVote, Vote, VoteOutcome, WorkVote};
use crate::domain::work::WorkId;
use crate::error::{RankerError, Result};

const USER_FK_CONSTRAINT: &str = "votes_user_id_fkey";

#[derive(Debug, FromRow)]
struct VoteRow {
    id: i64,
    user_id: i64,
    work_id: i64,
    created_at: DateTime<Utc>,
}

impl From<VoteRow> for Vote {
    fn from(row: VoteRow) -> Self {
        Vote {
            id: row.id,
            user_id: row.user_id,
            work_id: row.work_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct WorkVoteRow {
    vote_id: i64,
    user_id: i64,
    username: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct UserVoteRow {
    vote_id: i64,
    work_id: i64,
    title: String,
    category: String,
    created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct PostgresVotesRepository {
    pool: PgPool,
}

impl PostgresVotesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl VotesRepository for PostgresVotesRepository {
    async fn find_vote(&self, user_id: UserId, work_id: WorkId) -> Result<Option<Vote>> {
        let row = sqlx::query_as::<_, VoteRow>(
            "SELECT id, user_id, work_id, created_at FROM votes WHERE user_id = $1 AND work_id = $2",
        )
        .bind(user_id)
        .bind(work_id)
        .fetch_optional(self.pool())
        .await
        .map_err(db_error("find vote"))?;

        Ok(row.map(Vote::from))
    }

    async fn record_vote(&self, user_id: UserId, work_id: WorkId) -> Result<VoteOutcome> {
        // The unique constraint arbitrates concurrent upvotes for the same pair.
        let row = sqlx::query_as::<_, VoteRow>(
            r#"
            INSERT INTO votes (user_id, work_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, work_id) DO NOTHING
            RETURNING id, user_id, work_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(work_id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            if !is_foreign_key_violation(&e) {
                db_error("record vote")(e)
            } else if violated_constraint(&e).as_deref() == Some(USER_FK_CONSTRAINT) {
                RankerError::user_not_found(user_id)
            } else {
                RankerError::work_not_found(work_id)
            }
        })?;

        match row {
            Some(row) => Ok(VoteOutcome::Recorded(row.into())),
            None => {
                debug!(user_id, work_id, "Duplicate vote ignored");
                Ok(VoteOutcome::AlreadyVoted)
            }
        }
    }

    async fn votes_for_work(&self, work_id: WorkId) -> Result<Vec<WorkVote>> {
        let rows = sqlx::query_as::<_, WorkVoteRow>(
            r#"
            SELECT v.id AS vote_id, v.user_id, u.username, v.created_at
            FROM votes v
            JOIN users u ON u.id = v.user_id
            WHERE v.work_id = $1
            ORDER BY v.created_at DESC, v.id DESC
            "#,
        )
        .bind(work_id)
        .fetch_all(self.pool())
        .await
        .map_err(db_error("list votes for work"))?;

        Ok(rows
            .into_iter()
            .map(|row| WorkVote {
                vote_id: row.vote_id,
                user_id: row.user_id,
                username: row.username,
                created_at: row.created_at,
            })
            .collect())
    }

    async fn votes_by_user(&self, user_id: UserId) -> Result<Vec<UserVote>> {
        let rows = sqlx::query_as::<_, UserVoteRow>(
            r#"
            SELECT v.id AS vote_id, v.work_id, w.title, w.category, v.created_at
            FROM votes v
            JOIN works w ON w.id = v.work_id
            WHERE v.user_id = $1
            ORDER BY v.created_at DESC, v.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await
        .map_err(db_error("list votes by user"))?;

        rows.into_iter()
            .map(|row| {
                let category = row.category.parse().map_err(|_| {
                    RankerError::Internal(format!(
                        "work {} has unknown category '{}'",
                        row.work_id, row.category
                    ))
                })?;
                Ok(UserVote {
                    vote_id: row.vote_id,
                    work_id: row.work_id,
                    title: row.title,
                    category,
                    created_at: row.created_at,
                })
            })
            .collect()
    }

    async fn count_votes(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM votes")
            .fetch_one(self.pool())
            .await
            .map_err(db_error("count votes"))
    }
}
