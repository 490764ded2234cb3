pub mod health;
pub mod root;
pub mod sessions;
pub mod users;
pub mod votes;
pub mod works;

use axum::extract::{Path, rejection::PathRejection};

use crate::infra::errors::{AppError, AppResult};

/// Identifiers that do not parse can never name a record, so they are
/// reported the same way as absent ones.
pub(crate) fn path_id(path: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    path.map(|Path(id)| id)
        .map_err(|rejection| AppError::not_found(rejection.body_text()))
}
