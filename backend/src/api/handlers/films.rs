use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{FilmRequest, FilmSearchParams, FilmSearchResponse, FilmSummary};
use crate::database::{self, FilmFields};
use crate::errors::AppResult;
use crate::services::catalog;
use super::{parse_body, parse_path, AppState};

pub async fn search_films(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilmSearchParams>,
) -> AppResult<Json<FilmSearchResponse>> {
    let query = params.q.unwrap_or_default();
    let conn = state.connection()?;
    let films = database::films::search_by_title(&conn, query.trim())?;

    Ok(Json(FilmSearchResponse {
        films: films.into_iter().map(FilmSummary::from).collect(),
    }))
}

pub async fn create_film(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FilmRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let body = parse_body(payload)?;
    let conn = state.connection()?;
    let film = catalog::create_film(&conn, body.into())?;
    Ok((StatusCode::CREATED, Json(FilmSummary::from(film))))
}

pub async fn update_film(
    State(state): State<Arc<AppState>>,
    film_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<FilmRequest>, JsonRejection>,
) -> AppResult<Json<FilmSummary>> {
    let film_id = parse_path(film_id)?;
    let body = parse_body(payload)?;
    let conn = state.connection()?;
    let film = catalog::update_film(&conn, film_id, body.into())?;
    Ok(Json(film.into()))
}

impl From<FilmRequest> for FilmFields {
    fn from(body: FilmRequest) -> Self {
        FilmFields {
            title: body.title,
            director: body.director,
            year: body.year,
            genre: body.genre,
            country: body.country,
            tmdb_id: body.tmdb_id,
            poster_url: body.poster_url,
        }
    }
}
