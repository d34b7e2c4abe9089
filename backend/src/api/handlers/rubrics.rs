use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{CategoryItem, CategoryRequest, CreateRubricRequest, RubricItem, RubricListResponse};
use crate::errors::AppResult;
use crate::services::rubrics::{NewCategory, NewRubric};
use super::{parse_body, parse_path, AppState, CurrentStoryLover};

pub async fn list_rubrics(
    State(state): State<Arc<AppState>>,
    CurrentStoryLover(story_lover): CurrentStoryLover,
) -> AppResult<Json<RubricListResponse>> {
    let conn = state.connection()?;
    let views = state.rubric_service().list_rubrics(&conn, story_lover.id)?;

    Ok(Json(RubricListResponse {
        rubrics: views.into_iter().map(RubricItem::from).collect(),
    }))
}

pub async fn create_rubric(
    State(state): State<Arc<AppState>>,
    CurrentStoryLover(story_lover): CurrentStoryLover,
    payload: Result<Json<CreateRubricRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let body = parse_body(payload)?;
    let new = NewRubric {
        name: body.name,
        description: body.description,
        is_default: body.is_default,
        categories: body.categories.into_iter().map(NewCategory::from).collect(),
    };

    let mut conn = state.connection()?;
    let view = state.rubric_service().create_rubric(&mut conn, story_lover.id, &new)?;
    Ok((StatusCode::CREATED, Json(RubricItem::from(view))))
}

pub async fn add_category(
    State(state): State<Arc<AppState>>,
    CurrentStoryLover(story_lover): CurrentStoryLover,
    rubric_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let rubric_id = parse_path(rubric_id)?;
    let body = parse_body(payload)?;
    let conn = state.connection()?;
    let category = state
        .rubric_service()
        .add_category(&conn, story_lover.id, rubric_id, &NewCategory::from(body))?;
    Ok((StatusCode::CREATED, Json(CategoryItem::from(category))))
}

pub async fn set_default(
    State(state): State<Arc<AppState>>,
    CurrentStoryLover(story_lover): CurrentStoryLover,
    rubric_id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<RubricItem>> {
    let rubric_id = parse_path(rubric_id)?;
    let mut conn = state.connection()?;
    let view = state.rubric_service().set_default(&mut conn, story_lover.id, rubric_id)?;
    Ok(Json(view.into()))
}

pub async fn delete_rubric(
    State(state): State<Arc<AppState>>,
    CurrentStoryLover(story_lover): CurrentStoryLover,
    rubric_id: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let rubric_id = parse_path(rubric_id)?;
    let conn = state.connection()?;
    state.rubric_service().delete_rubric(&conn, story_lover.id, rubric_id)?;
    Ok(StatusCode::NO_CONTENT)
}

impl From<CategoryRequest> for NewCategory {
    fn from(body: CategoryRequest) -> Self {
        NewCategory {
            name: body.name,
            weight: body.weight,
            order: body.order,
        }
    }
}
