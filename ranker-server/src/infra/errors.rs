use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use ranker_core::error::RankerError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

impl From<RankerError> for AppError {
    fn from(err: RankerError) -> Self {
        match err {
            RankerError::Validation(err) => Self::bad_request(err.to_string()),
            RankerError::NotFound(msg) => Self::not_found(msg),
            RankerError::Conflict(msg) => Self::conflict(msg),
            RankerError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                Self::internal("Internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranker_core::domain::validation::ValidationError;

    #[test]
    fn core_errors_map_to_statuses() {
        let cases = [
            (
                RankerError::Validation(ValidationError::MissingTitle),
                StatusCode::BAD_REQUEST,
            ),
            (RankerError::work_not_found(9), StatusCode::NOT_FOUND),
            (RankerError::Conflict("taken".into()), StatusCode::CONFLICT),
            (
                RankerError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status, status);
        }
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let err = AppError::from(RankerError::Internal("pool timed out".into()));
        assert!(!err.message.contains("pool"));
    }
}
