use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use crate::database::ports::{
    sessions::SessionsRepository, users::UsersRepository,
    votes::VotesRepository, works::WorksRepository,
};
use crate::database::{
    InMemoryDatabase,
    infrastructure::postgres::{
        PostgresDatabase, PostgresSessionsRepository, PostgresUsersRepository,
        PostgresVotesRepository, PostgresWorksRepository,
    },
};

/// Aggregates all repository ports used by application services.
#[derive(Clone)]
pub struct AppUnitOfWork {
    pub works: Arc<dyn WorksRepository>,
    pub votes: Arc<dyn VotesRepository>,
    pub users: Arc<dyn UsersRepository>,
    pub sessions: Arc<dyn SessionsRepository>,
}

impl fmt::Debug for AppUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWork")
            .field("works", &type_name_of_val(self.works.as_ref()))
            .field("votes", &type_name_of_val(self.votes.as_ref()))
            .field("users", &type_name_of_val(self.users.as_ref()))
            .field("sessions", &type_name_of_val(self.sessions.as_ref()))
            .finish()
    }
}

#[derive(Default)]
pub struct AppUnitOfWorkBuilder {
    works: Option<Arc<dyn WorksRepository>>,
    votes: Option<Arc<dyn VotesRepository>>,
    users: Option<Arc<dyn UsersRepository>>,
    sessions: Option<Arc<dyn SessionsRepository>>,
}

impl fmt::Debug for AppUnitOfWorkBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWorkBuilder")
            .field("works", &self.works.is_some())
            .field("votes", &self.votes.is_some())
            .field("users", &self.users.is_some())
            .field("sessions", &self.sessions.is_some())
            .finish()
    }
}

impl AppUnitOfWorkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_works(mut self, repo: Arc<dyn WorksRepository>) -> Self {
        self.works = Some(repo);
        self
    }

    pub fn with_votes(mut self, repo: Arc<dyn VotesRepository>) -> Self {
        self.votes = Some(repo);
        self
    }

    pub fn with_users(mut self, repo: Arc<dyn UsersRepository>) -> Self {
        self.users = Some(repo);
        self
    }

    pub fn with_sessions(mut self, repo: Arc<dyn SessionsRepository>) -> Self {
        self.sessions = Some(repo);
        self
    }

    /// Populate the builder with Postgres-backed repository adapters.
    pub fn with_postgres(self, db: Arc<PostgresDatabase>) -> Self {
        let pool = db.pool().clone();
        self.with_works(Arc::new(PostgresWorksRepository::new(pool.clone())))
            .with_votes(Arc::new(PostgresVotesRepository::new(pool.clone())))
            .with_users(Arc::new(PostgresUsersRepository::new(pool.clone())))
            .with_sessions(Arc::new(PostgresSessionsRepository::new(pool)))
    }

    /// Populate the builder with adapters sharing one in-memory store.
    pub fn with_in_memory(self, db: &InMemoryDatabase) -> Self {
        self.with_works(Arc::new(db.works()))
            .with_votes(Arc::new(db.votes()))
            .with_users(Arc::new(db.users()))
            .with_sessions(Arc::new(db.sessions()))
    }

    pub fn build(self) -> Result<AppUnitOfWork, String> {
        Ok(AppUnitOfWork {
            works: self
                .works
                .ok_or_else(|| "missing WorksRepository".to_string())?,
            votes: self
                .votes
                .ok_or_else(|| "missing VotesRepository".to_string())?,
            users: self
                .users
                .ok_or_else(|| "missing UsersRepository".to_string())?,
            sessions: self
                .sessions
                .ok_or_else(|| "missing SessionsRepository".to_string())?,
        })
    }
}

impl AppUnitOfWork {
    /// Convenience helper to compose all Postgres-backed repositories into a unit of work.
    pub fn from_postgres(db: Arc<PostgresDatabase>) -> Result<Self, String> {
        AppUnitOfWorkBuilder::new().with_postgres(db).build()
    }

    pub fn in_memory(db: &InMemoryDatabase) -> Result<Self, String> {
        AppUnitOfWorkBuilder::new().with_in_memory(db).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_reports_the_first_missing_port() {
        let db = InMemoryDatabase::new();
        let err = AppUnitOfWorkBuilder::new()
            .with_works(Arc::new(db.works()))
            .build()
            .expect_err("incomplete builder");
        assert_eq!(err, "missing VotesRepository");
    }
}
