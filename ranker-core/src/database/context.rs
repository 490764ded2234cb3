use std::fmt;
use std::sync::Arc;

use crate::application::unit_of_work::AppUnitOfWork;
use crate::database::{InMemoryDatabase, PostgresDatabase};
use crate::error::{RankerError, Result};

/// Bundles the storage backend with the application-facing unit of work.
///
/// Callers grab the repository ports they need through `AppUnitOfWork`. The
/// raw Postgres adapter stays reachable for migrations and health checks.
#[derive(Clone)]
pub struct DatabaseContext {
    postgres: Option<Arc<PostgresDatabase>>,
    unit_of_work: Arc<AppUnitOfWork>,
}

impl fmt::Debug for DatabaseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseContext")
            .field("backend", &self.backend_name())
            .field("unit_of_work_ptr", &Arc::as_ptr(&self.unit_of_work))
            .finish()
    }
}

impl DatabaseContext {
    /// Establish a PostgreSQL connection and compose the default unit of work.
    pub async fn connect_postgres(
        connection_string: &str,
        max_connections: u32,
    ) -> Result<Self> {
        let postgres = Arc::new(
            PostgresDatabase::with_max_connections(
                connection_string,
                max_connections,
            )
            .await?,
        );
        Self::from_postgres(postgres)
    }

    /// Compose a database context from an existing Postgres adapter.
    pub fn from_postgres(postgres: Arc<PostgresDatabase>) -> Result<Self> {
        let unit_of_work = Arc::new(
            AppUnitOfWork::from_postgres(postgres.clone())
                .map_err(RankerError::Internal)?,
        );

        Ok(Self {
            postgres: Some(postgres),
            unit_of_work,
        })
    }

    /// Context over a fresh in-memory store. Used by tests and `--in-memory`
    /// development runs.
    pub fn in_memory(db: &InMemoryDatabase) -> Result<Self> {
        let unit_of_work = Arc::new(
            AppUnitOfWork::in_memory(db).map_err(RankerError::Internal)?,
        );

        Ok(Self {
            postgres: None,
            unit_of_work,
        })
    }

    pub fn unit_of_work(&self) -> Arc<AppUnitOfWork> {
        Arc::clone(&self.unit_of_work)
    }

    pub fn postgres(&self) -> Option<Arc<PostgresDatabase>> {
        self.postgres.clone()
    }

    pub fn backend_name(&self) -> &'static str {
        if self.postgres.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }

    /// Verify the backend is reachable.
    pub async fn ping(&self) -> Result<()> {
        match &self.postgres {
            Some(postgres) => postgres.ping().await,
            None => Ok(()),
        }
    }
}
