use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use rusqlite::ErrorCode;
use serde_json::json;
use thiserror::Error;

use crate::domain::RuleViolation;

/// Per-request failures. None of them is fatal to the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("authentication required")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to the client.
    fn public_message(&self) -> String {
        match self {
            AppError::Internal(_) => "Internal server error.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        if is_constraint_violation(&err) {
            log::warn!("Constraint violation: {:#}", err);
            return AppError::Conflict("A conflicting record already exists.".to_string());
        }
        AppError::Internal(err)
    }
}

impl From<RuleViolation> for AppError {
    fn from(err: RuleViolation) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Internal(anyhow::Error::new(err).context("Failed to get database connection from pool"))
    }
}

/// True when a SQLite constraint (unique, foreign key, check) rejected the write.
pub fn is_constraint_violation(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<rusqlite::Error>())
        .any(|sqlite| sqlite.sqlite_error_code() == Some(ErrorCode::ConstraintViolation))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(err) = &self {
            log::error!("Request failed: {:?}", err);
        }
        let body = Json(json!({ "error": self.public_message() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn constraint_error() -> anyhow::Error {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();
        conn.execute("INSERT INTO t VALUES ('a')", [])
            .context("Failed to insert")
            .unwrap_err()
    }

    #[test]
    fn test_constraint_violation_becomes_conflict() {
        let err = AppError::from(constraint_error());
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_other_errors_are_internal_and_hidden() {
        let err = AppError::from(anyhow::anyhow!("disk on fire at /var/db"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal server error.");
    }

    #[test]
    fn test_rule_violation_is_bad_request() {
        let err = AppError::from(RuleViolation::ScoreOutOfRange(11));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
