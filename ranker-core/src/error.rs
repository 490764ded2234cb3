use thiserror::Error;

use crate::domain::validation::ValidationError;

#[derive(Error, Debug)]
pub enum RankerError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RankerError {
    pub fn work_not_found(id: i64) -> Self {
        Self::NotFound(format!("work {id}"))
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound(format!("user {id}"))
    }
}

pub type Result<T> = std::result::Result<T, RankerError>;
