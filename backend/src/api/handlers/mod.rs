use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequestParts, Path,
    },
    http::request::Parts,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::database::{self, DbConn, DbPool, StoryLover};
use crate::errors::{AppError, AppResult};
use crate::services::rubrics::RubricService;

pub mod film_logs;
pub mod films;
pub mod profile;
pub mod rubrics;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        Self { pool, config }
    }

    pub fn connection(&self) -> AppResult<DbConn> {
        Ok(self.pool.get()?)
    }

    pub fn rubric_service(&self) -> RubricService {
        RubricService::new(self.config.rubric.clone())
    }
}

/// The authenticated identity forwarded by the upstream auth layer.
#[derive(Debug, Clone, Copy)]
pub struct Identity(pub i64);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(state.config.server.user_header)
            .and_then(|h| h.to_str().ok())
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(Identity)
            .ok_or(AppError::Unauthorized)
    }
}

/// The caller's profile. Rejects with 404 when the identity never signed up.
pub struct CurrentStoryLover(pub StoryLover);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentStoryLover {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let Identity(user_id) = Identity::from_request_parts(parts, state).await?;
        let conn = state.connection()?;

        match database::story_lovers::find_by_user_id(&conn, user_id)? {
            Some(story_lover) => Ok(CurrentStoryLover(story_lover)),
            None => {
                log::error!("StoryLover not found for user ID: {}", user_id);
                Err(AppError::not_found("User not found."))
            }
        }
    }
}

/// Unwraps a JSON body, turning axum's rejection into a 400.
pub fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            log::warn!("Rejected request body: {}", rejection.body_text());
            Err(AppError::validation("Invalid request body."))
        }
    }
}

/// Unwraps a path parameter, turning a malformed id into a JSON 400.
pub fn parse_path<T>(path: Result<Path<T>, PathRejection>) -> AppResult<T> {
    match path {
        Ok(Path(value)) => Ok(value),
        Err(rejection) => {
            log::warn!("Rejected path parameter: {}", rejection.body_text());
            Err(AppError::validation("Invalid path parameter."))
        }
    }
}

/// Reads a required integer that may arrive as a JSON number or a numeric string.
pub fn required_integer(field: &str, value: Option<&Value>) -> AppResult<i64> {
    let value = value.filter(|v| !v.is_null()).ok_or_else(|| {
        log::warn!("Missing data: {}", field);
        AppError::validation("Missing data.")
    })?;
    integer(field, value)
}

pub fn optional_integer(field: &str, value: Option<&Value>) -> AppResult<Option<i64>> {
    match value.filter(|v| !v.is_null()) {
        Some(value) => integer(field, value).map(Some),
        None => Ok(None),
    }
}

fn integer(field: &str, value: &Value) -> AppResult<i64> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        log::warn!("Invalid {} value: {}", field, value);
        AppError::validation(format!("Invalid {} value.", field))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_accepts_numbers_and_numeric_strings() {
        assert_eq!(required_integer("rating", Some(&json!(7))).unwrap(), 7);
        assert_eq!(required_integer("rating", Some(&json!(" 7 "))).unwrap(), 7);
    }

    #[test]
    fn test_integer_rejects_other_shapes() {
        for bad in [json!(7.5), json!("seven"), json!(true), json!([7])] {
            assert!(matches!(required_integer("rating", Some(&bad)), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn test_missing_and_null_are_missing() {
        assert!(required_integer("film_id", None).is_err());
        assert!(required_integer("film_id", Some(&Value::Null)).is_err());
        assert_eq!(optional_integer("rating", Some(&Value::Null)).unwrap(), None);
    }
}
