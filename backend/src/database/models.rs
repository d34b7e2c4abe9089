use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct StoryLover {
    pub id: Uuid,
    pub user_id: i64,
    pub display_name: String,
    pub bio: String,
    pub avatar_url: String,
    pub website_url: String,
    pub youtube_url: String,
    pub podcast_url: String,
    pub instagram_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable profile fields, shared by signup and profile edits.
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub display_name: String,
    pub bio: String,
    pub avatar_url: String,
    pub website_url: String,
    pub youtube_url: String,
    pub podcast_url: String,
    pub instagram_url: String,
}

#[derive(Debug, Clone)]
pub struct Film {
    pub id: i64,
    pub title: String,
    pub director: String,
    pub year: i64,
    pub genre: String,
    pub country: String,
    pub decade: String,
    pub tmdb_id: Option<i64>,
    pub poster_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog fields a caller supplies; `decade` is always derived from `year`.
#[derive(Debug, Clone, Default)]
pub struct FilmFields {
    pub title: String,
    pub director: String,
    pub year: i64,
    pub genre: String,
    pub country: String,
    pub tmdb_id: Option<i64>,
    pub poster_url: String,
}

#[derive(Debug, Clone)]
pub struct Rubric {
    pub id: i64,
    pub story_lover_id: Uuid,
    pub name: String,
    pub description: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RubricCategory {
    pub id: i64,
    pub rubric_id: i64,
    pub name: String,
    pub weight: i64,
    pub order: i64,
}

#[derive(Debug, Clone)]
pub struct FilmLog {
    pub id: Uuid,
    pub story_lover_id: Uuid,
    pub film_id: i64,
    pub rating: Option<i64>,
    pub review: String,
    pub mood: String,
    pub watched_at: DateTime<Utc>,
    pub is_new_director: bool,
    pub is_rewatch: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFilmLog {
    pub story_lover_id: Uuid,
    pub film_id: i64,
    pub rating: Option<i64>,
    pub review: String,
    pub mood: String,
    pub is_new_director: bool,
    pub is_rewatch: bool,
}

#[derive(Debug, Clone)]
pub struct RubricRating {
    pub id: i64,
    pub film_log_id: Uuid,
    pub category_id: i64,
    pub rating: i64,
}

// DTOs for joined queries
#[derive(Debug, Clone)]
pub struct FilmLogWithFilm {
    pub id: Uuid,
    pub title: String,
    pub director: String,
    pub year: i64,
    pub country: String,
    pub rating: Option<i64>,
    pub review: String,
    pub mood: String,
    pub watched_at: DateTime<Utc>,
}
