use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use super::super::{db_error, violated_constraint};
use crate::database::ports::works::WorksRepository;
use crate::domain::catalog::RankedWork;
use crate::domain::validation::ValidationError;
use crate::domain::work::{Category, NewWork, Work, WorkChanges, WorkId};
use crate::error::{RankerError, Result};

const TITLE_CONSTRAINT: &str = "works_category_title_key";

#[derive(Debug, FromRow)]
struct WorkRow {
    id: i64,
    title: String,
    creator: Option<String>,
    description: Option<String>,
    publication_year: Option<i32>,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct RankedWorkRow {
    #[sqlx(flatten)]
    work: WorkRow,
    vote_count: i64,
}

impl TryFrom<WorkRow> for Work {
    type Error = RankerError;

    fn try_from(row: WorkRow) -> Result<Self> {
        let category: Category = row.category.parse().map_err(|_| {
            RankerError::Internal(format!(
                "work {} has unknown category '{}'",
                row.id, row.category
            ))
        })?;

        Ok(Work {
            id: row.id,
            title: row.title,
            creator: row.creator,
            description: row.description,
            publication_year: row.publication_year,
            category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL-backed implementation of the `WorksRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresWorksRepository {
    pool: PgPool,
}

impl PostgresWorksRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn map_write_error(
    title: &str,
    category: Category,
    action: &'static str,
) -> impl FnOnce(sqlx::Error) -> RankerError {
    move |e| {
        if violated_constraint(&e).as_deref() == Some(TITLE_CONSTRAINT) {
            return ValidationError::DuplicateTitle {
                title: title.to_string(),
                category,
            }
            .into();
        }
        db_error(action)(e)
    }
}

#[async_trait]
impl WorksRepository for PostgresWorksRepository {
    async fn create_work(&self, work: &NewWork) -> Result<Work> {
        let row = sqlx::query_as::<_, WorkRow>(
            r#"
            INSERT INTO works (title, creator, description, publication_year, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, creator, description, publication_year,
                      category, created_at, updated_at
            "#,
        )
        .bind(&work.title)
        .bind(&work.creator)
        .bind(&work.description)
        .bind(work.publication_year)
        .bind(work.category.as_str())
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error(&work.title, work.category, "create work"))?;

        let created = Work::try_from(row)?;
        info!(work_id = created.id, category = %created.category, "Created work");
        Ok(created)
    }

    async fn get_work(&self, id: WorkId) -> Result<Option<Work>> {
        let row = sqlx::query_as::<_, WorkRow>(
            r#"
            SELECT id, title, creator, description, publication_year,
                   category, created_at, updated_at
            FROM works
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(db_error("get work"))?;

        row.map(Work::try_from).transpose()
    }

    async fn find_work_by_title(
        &self,
        category: Category,
        title: &str,
    ) -> Result<Option<Work>> {
        let row = sqlx::query_as::<_, WorkRow>(
            r#"
            SELECT id, title, creator, description, publication_year,
                   category, created_at, updated_at
            FROM works
            WHERE category = $1 AND title = $2
            "#,
        )
        .bind(category.as_str())
        .bind(title)
        .fetch_optional(self.pool())
        .await
        .map_err(db_error("find work by title"))?;

        row.map(Work::try_from).transpose()
    }

    async fn update_work(&self, id: WorkId, changes: &WorkChanges) -> Result<Option<Work>> {
        let mut tx = self.pool().begin().await.map_err(db_error("start transaction"))?;

        let current = sqlx::query_as::<_, WorkRow>(
            r#"
            SELECT id, title, creator, description, publication_year,
                   category, created_at, updated_at
            FROM works
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("load work for update"))?;

        let Some(current) = current else {
            return Ok(None);
        };

        let mut work = Work::try_from(current)?;
        changes.apply_to(&mut work);

        let row = sqlx::query_as::<_, WorkRow>(
            r#"
            UPDATE works
            SET title = $2, creator = $3, description = $4,
                publication_year = $5, category = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, creator, description, publication_year,
                      category, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&work.title)
        .bind(&work.creator)
        .bind(&work.description)
        .bind(work.publication_year)
        .bind(work.category.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error(&work.title, work.category, "update work"))?;

        tx.commit().await.map_err(db_error("commit work update"))?;

        Work::try_from(row).map(Some)
    }

    async fn delete_work(&self, id: WorkId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM works WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(db_error("delete work"))?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(work_id = id, "Deleted work");
        }
        Ok(deleted)
    }

    async fn list_ranked(&self) -> Result<Vec<RankedWork>> {
        let rows = sqlx::query_as::<_, RankedWorkRow>(
            r#"
            SELECT w.id, w.title, w.creator, w.description, w.publication_year,
                   w.category, w.created_at, w.updated_at,
                   COUNT(v.id) AS vote_count
            FROM works w
            LEFT JOIN votes v ON v.work_id = w.id
            GROUP BY w.id
            ORDER BY w.id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(db_error("list works"))?;

        rows.into_iter()
            .map(|row| {
                Ok(RankedWork {
                    work: Work::try_from(row.work)?,
                    vote_count: row.vote_count,
                })
            })
            .collect()
    }

    async fn count_works(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM works")
            .fetch_one(self.pool())
            .await
            .map_err(db_error("count works"))
    }
}
