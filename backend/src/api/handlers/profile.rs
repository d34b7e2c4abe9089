use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;
use std::sync::Arc;

use crate::api::models::{Profile, ProfileRequest};
use crate::database::{self, ProfileFields};
use crate::domain::rules;
use crate::errors::{AppError, AppResult};
use super::{parse_body, AppState, CurrentStoryLover, Identity};

const MAX_DISPLAY_NAME_CHARS: usize = 100;

pub async fn create_profile(
    State(state): State<Arc<AppState>>,
    Identity(user_id): Identity,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let fields = profile_fields(parse_body(payload)?)?;
    let conn = state.connection()?;

    let created = database::story_lovers::insert_story_lover(&conn, user_id, &fields).map_err(|err| {
        match AppError::from(err) {
            AppError::Conflict(_) => AppError::Conflict("A profile already exists for this user.".to_string()),
            other => other,
        }
    })?;
    info!("Created story lover {} for user {}", created.id, user_id);

    Ok((StatusCode::CREATED, Json(Profile::from(created))))
}

pub async fn get_profile(CurrentStoryLover(story_lover): CurrentStoryLover) -> Json<Profile> {
    Json(story_lover.into())
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    CurrentStoryLover(story_lover): CurrentStoryLover,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> AppResult<Json<Profile>> {
    let fields = profile_fields(parse_body(payload)?)?;
    let conn = state.connection()?;

    database::story_lovers::update_profile(&conn, story_lover.id, &fields)?
        .map(|updated| Json(updated.into()))
        .ok_or_else(|| AppError::not_found("User not found."))
}

pub async fn delete_profile(
    State(state): State<Arc<AppState>>,
    CurrentStoryLover(story_lover): CurrentStoryLover,
) -> AppResult<StatusCode> {
    let conn = state.connection()?;
    database::story_lovers::delete(&conn, story_lover.id)?;
    info!("Deleted story lover {} for user {}", story_lover.id, story_lover.user_id);
    Ok(StatusCode::NO_CONTENT)
}

fn profile_fields(body: ProfileRequest) -> AppResult<ProfileFields> {
    let display_name = rules::check_not_blank("display_name", &body.display_name)?.to_string();
    if display_name.chars().count() > MAX_DISPLAY_NAME_CHARS {
        return Err(AppError::validation(format!(
            "display_name must be at most {MAX_DISPLAY_NAME_CHARS} characters"
        )));
    }

    Ok(ProfileFields {
        display_name,
        bio: body.bio,
        avatar_url: body.avatar_url.trim().to_string(),
        website_url: body.website_url.trim().to_string(),
        youtube_url: body.youtube_url.trim().to_string(),
        podcast_url: body.podcast_url.trim().to_string(),
        instagram_url: body.instagram_url.trim().to_string(),
    })
}
