use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::database::{Film, FilmLog, FilmLogWithFilm, RubricCategory, StoryLover};
use crate::services::diary::EntryDetail;
use crate::services::rubrics::RubricView;

// --- Requests ---

/// Numeric fields arrive as raw JSON so that missing, malformed and
/// out-of-range values can be told apart.
#[derive(Debug, Deserialize)]
pub struct CreateFilmLogRequest {
    pub film_id: Option<Value>,
    pub rating: Option<Value>,
    pub review: Option<String>,
    pub mood: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFilmLogRequest {
    pub rating: Option<Value>,
    pub review: Option<String>,
    pub mood: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RateCategoryRequest {
    pub category_id: Option<Value>,
    pub rating: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct FilmSearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FilmRequest {
    pub title: String,
    pub director: String,
    pub year: i64,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub country: String,
    pub tmdb_id: Option<i64>,
    #[serde(default)]
    pub poster_url: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub weight: i64,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateRubricRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub categories: Vec<CategoryRequest>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub website_url: String,
    #[serde(default)]
    pub youtube_url: String,
    #[serde(default)]
    pub podcast_url: String,
    #[serde(default)]
    pub instagram_url: String,
}

// --- Responses ---

#[derive(Debug, Serialize)]
pub struct CreatedFilmLog {
    pub status: &'static str,
    pub id: Uuid,
    pub watched_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct FilmLogListItem {
    pub id: Uuid,
    pub title: String,
    pub rating: Option<i64>,
    pub review: String,
    pub mood: String,
    pub watched_at: DateTime<Utc>,
    pub country: String,
    pub director: String,
    pub year: i64,
}

impl From<FilmLogWithFilm> for FilmLogListItem {
    fn from(row: FilmLogWithFilm) -> Self {
        Self {
            id: row.id,
            title: row.title,
            rating: row.rating,
            review: row.review,
            mood: row.mood,
            watched_at: row.watched_at,
            country: row.country,
            director: row.director,
            year: row.year,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FilmLogListResponse {
    pub film_logs: Vec<FilmLogListItem>,
}

#[derive(Debug, Serialize)]
pub struct FilmLogDetail {
    pub id: Uuid,
    pub film: FilmSummary,
    pub rating: Option<i64>,
    pub review: String,
    pub mood: String,
    pub watched_at: DateTime<Utc>,
    pub is_new_director: bool,
    pub is_rewatch: bool,
    pub weighted_score: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

impl From<EntryDetail> for FilmLogDetail {
    fn from(detail: EntryDetail) -> Self {
        let EntryDetail { log, film, weighted_score } = detail;
        Self {
            id: log.id,
            film: film.into(),
            rating: log.rating,
            review: log.review,
            mood: log.mood,
            watched_at: log.watched_at,
            is_new_director: log.is_new_director,
            is_rewatch: log.is_rewatch,
            weighted_score,
            updated_at: log.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdatedFilmLog {
    pub id: Uuid,
    pub rating: Option<i64>,
    pub review: String,
    pub mood: String,
    pub is_new_director: bool,
    pub is_rewatch: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<FilmLog> for UpdatedFilmLog {
    fn from(log: FilmLog) -> Self {
        Self {
            id: log.id,
            rating: log.rating,
            review: log.review,
            mood: log.mood,
            is_new_director: log.is_new_director,
            is_rewatch: log.is_rewatch,
            updated_at: log.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RubricRatingCreated {
    pub id: i64,
    pub category_id: i64,
    pub rating: i64,
    pub weighted_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct FilmSummary {
    pub id: i64,
    pub title: String,
    pub director: String,
    pub country: String,
    pub year: i64,
    pub genre: String,
    pub decade: String,
}

impl From<Film> for FilmSummary {
    fn from(film: Film) -> Self {
        Self {
            id: film.id,
            title: film.title,
            director: film.director,
            country: film.country,
            year: film.year,
            genre: film.genre,
            decade: film.decade,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FilmSearchResponse {
    pub films: Vec<FilmSummary>,
}

#[derive(Debug, Serialize)]
pub struct CategoryItem {
    pub id: i64,
    pub name: String,
    pub weight: i64,
    pub order: i64,
}

impl From<RubricCategory> for CategoryItem {
    fn from(category: RubricCategory) -> Self {
        Self {
            id: category.id,
            name: category.name,
            weight: category.weight,
            order: category.order,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RubricItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub is_default: bool,
    pub total_weight: i64,
    pub is_valid: bool,
    pub categories: Vec<CategoryItem>,
}

impl From<RubricView> for RubricItem {
    fn from(view: RubricView) -> Self {
        Self {
            id: view.rubric.id,
            name: view.rubric.name,
            description: view.rubric.description,
            is_default: view.rubric.is_default,
            total_weight: view.total_weight,
            is_valid: view.is_valid,
            categories: view.categories.into_iter().map(CategoryItem::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RubricListResponse {
    pub rubrics: Vec<RubricItem>,
}

#[derive(Debug, Serialize)]
pub struct Profile {
    pub id: Uuid,
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

impl From<StoryLover> for Profile {
    fn from(sl: StoryLover) -> Self {
        Self {
            id: sl.id,
            display_name: sl.display_name,
            bio: sl.bio,
            avatar_url: sl.avatar_url,
            website_url: sl.website_url,
            youtube_url: sl.youtube_url,
            podcast_url: sl.podcast_url,
            instagram_url: sl.instagram_url,
            created_at: sl.created_at,
            updated_at: sl.updated_at,
        }
    }
}
