use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use super::super::db_error;
use crate::database::ports::users::UsersRepository;
use crate::domain::user::{User, UserId, UserSummary, Username};
use crate::error::Result;

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct UserSummaryRow {
    #[sqlx(flatten)]
    user: UserRow,
    vote_count: i64,
}

#[derive(Clone, Debug)]
pub struct PostgresUsersRepository {
    pool: PgPool,
}

impl PostgresUsersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UsersRepository for PostgresUsersRepository {
    async fn find_or_create_user(&self, username: &Username) -> Result<(User, bool)> {
        let inserted = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username)
            VALUES ($1)
            ON CONFLICT (username) DO NOTHING
            RETURNING id, username, created_at
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(self.pool())
        .await
        .map_err(db_error("create user"))?;

        if let Some(row) = inserted {
            info!(user_id = row.id, "Created user");
            return Ok((row.into(), true));
        }

        let existing = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, created_at FROM users WHERE username = $1",
        )
        .bind(username.as_str())
        .fetch_one(self.pool())
        .await
        .map_err(db_error("load user by username"))?;

        Ok((existing.into(), false))
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(db_error("get user"))?;

        Ok(row.map(User::from))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool())
        .await
        .map_err(db_error("get user by username"))?;

        Ok(row.map(User::from))
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>> {
        let rows = sqlx::query_as::<_, UserSummaryRow>(
            r#"
            SELECT u.id, u.username, u.created_at, COUNT(v.id) AS vote_count
            FROM users u
            LEFT JOIN votes v ON v.user_id = u.id
            GROUP BY u.id
            ORDER BY u.username
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(db_error("list users"))?;

        Ok(rows
            .into_iter()
            .map(|row| UserSummary {
                user: row.user.into(),
                vote_count: row.vote_count,
            })
            .collect())
    }

    async fn delete_user(&self, id: UserId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(db_error("delete user"))?;

        Ok(result.rows_affected() > 0)
    }
}
