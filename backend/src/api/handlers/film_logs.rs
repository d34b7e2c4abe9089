use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::warn;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::models::{
    CreateFilmLogRequest, CreatedFilmLog, FilmLogDetail, FilmLogListItem, FilmLogListResponse, RateCategoryRequest,
    RubricRatingCreated, UpdateFilmLogRequest, UpdatedFilmLog,
};
use crate::database;
use crate::domain::Mood;
use crate::errors::{AppError, AppResult};
use crate::services::diary::{self, EntryChanges, NewEntry};
use super::{optional_integer, parse_body, parse_path, required_integer, AppState, CurrentStoryLover};

pub async fn create_film_log(
    State(state): State<Arc<AppState>>,
    CurrentStoryLover(story_lover): CurrentStoryLover,
    payload: Result<Json<CreateFilmLogRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let body = parse_body(payload)?;

    let film_id = required_integer("film_id", body.film_id.as_ref())?;
    let rating = required_integer("rating", body.rating.as_ref())?;
    let mood = parse_mood(story_lover.user_id, body.mood.as_deref())?;

    let entry = NewEntry {
        film_id,
        rating: Some(rating),
        review: body.review.unwrap_or_default(),
        mood,
    };

    let mut conn = state.connection()?;
    let log = diary::create_film_log(&mut conn, story_lover.id, &entry)?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedFilmLog {
            status: "success",
            id: log.id,
            watched_at: log.watched_at,
        }),
    ))
}

pub async fn list_film_logs(
    State(state): State<Arc<AppState>>,
    CurrentStoryLover(story_lover): CurrentStoryLover,
) -> AppResult<Json<FilmLogListResponse>> {
    let conn = state.connection()?;
    let rows = database::film_logs::list_with_films(&conn, story_lover.id)?;

    Ok(Json(FilmLogListResponse {
        film_logs: rows.into_iter().map(FilmLogListItem::from).collect(),
    }))
}

pub async fn get_film_log(
    State(state): State<Arc<AppState>>,
    CurrentStoryLover(story_lover): CurrentStoryLover,
    log_id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<FilmLogDetail>> {
    let log_id = parse_path(log_id)?;
    let conn = state.connection()?;
    let detail = diary::entry_detail(&conn, story_lover.id, log_id)?;
    Ok(Json(detail.into()))
}

pub async fn update_film_log(
    State(state): State<Arc<AppState>>,
    CurrentStoryLover(story_lover): CurrentStoryLover,
    log_id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateFilmLogRequest>, JsonRejection>,
) -> AppResult<Json<UpdatedFilmLog>> {
    let log_id = parse_path(log_id)?;
    let body = parse_body(payload)?;

    // Fields left out of the body keep their stored values.
    let changes = EntryChanges {
        rating: optional_integer("rating", body.rating.as_ref())?,
        review: body.review,
        mood: body
            .mood
            .as_deref()
            .map(|raw| parse_mood(story_lover.user_id, Some(raw)))
            .transpose()?,
    };

    let conn = state.connection()?;
    let updated = diary::update_film_log(&conn, story_lover.id, log_id, &changes)?;
    Ok(Json(updated.into()))
}

pub async fn delete_film_log(
    State(state): State<Arc<AppState>>,
    CurrentStoryLover(story_lover): CurrentStoryLover,
    log_id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<StatusCode> {
    let log_id = parse_path(log_id)?;
    let conn = state.connection()?;
    diary::delete_film_log(&conn, story_lover.id, log_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn rate_category(
    State(state): State<Arc<AppState>>,
    CurrentStoryLover(story_lover): CurrentStoryLover,
    log_id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<RateCategoryRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let log_id = parse_path(log_id)?;
    let body = parse_body(payload)?;
    let category_id = required_integer("category_id", body.category_id.as_ref())?;
    let rating = required_integer("rating", body.rating.as_ref())?;

    let mut conn = state.connection()?;
    let (saved, weighted_score) = diary::rate_category(&mut conn, story_lover.id, log_id, category_id, rating)?;

    Ok((
        StatusCode::CREATED,
        Json(RubricRatingCreated {
            id: saved.id,
            category_id: saved.category_id,
            rating: saved.rating,
            weighted_score,
        }),
    ))
}

fn parse_mood(user_id: i64, raw: Option<&str>) -> AppResult<Option<Mood>> {
    Mood::parse_optional(raw).map_err(|e| {
        warn!("Invalid mood from user {}: {}", user_id, e);
        AppError::validation("Invalid mood value.")
    })
}
