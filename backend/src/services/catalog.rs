use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;
use serde::Deserialize;

use crate::database::{self, Film, FilmFields};
use crate::domain::rules;
use crate::errors::{AppError, AppResult};

const SEED_FILMS_JSON: &str = include_str!("../../data/films_2025.json");

#[derive(Debug, Deserialize)]
struct SeedFilm {
    title: String,
    director: String,
    year: i64,
    #[serde(default)]
    genre: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    tmdb_id: Option<i64>,
    #[serde(default)]
    poster_url: String,
}

impl From<SeedFilm> for FilmFields {
    fn from(seed: SeedFilm) -> Self {
        FilmFields {
            title: seed.title,
            director: seed.director,
            year: seed.year,
            genre: seed.genre,
            country: seed.country,
            tmdb_id: seed.tmdb_id,
            poster_url: seed.poster_url,
        }
    }
}

/// Trims text fields and checks the required ones.
pub fn normalize(fields: FilmFields) -> AppResult<FilmFields> {
    let title = rules::check_not_blank("title", &fields.title)?.to_string();
    let director = rules::check_not_blank("director", &fields.director)?.to_string();
    let year = rules::check_year(fields.year)?;
    if let Some(tmdb_id) = fields.tmdb_id.filter(|id| *id <= 0) {
        return Err(AppError::validation(format!("tmdb_id {tmdb_id} must be positive")));
    }

    Ok(FilmFields {
        title,
        director,
        year,
        genre: fields.genre.trim().to_string(),
        country: fields.country.trim().to_string(),
        tmdb_id: fields.tmdb_id,
        poster_url: fields.poster_url.trim().to_string(),
    })
}

pub fn create_film(conn: &Connection, fields: FilmFields) -> AppResult<Film> {
    let fields = normalize(fields)?;
    let film = database::films::insert_film(conn, &fields).map_err(tmdb_conflict)?;
    info!("Added film {} '{}' ({})", film.id, film.title, film.decade);
    Ok(film)
}

pub fn update_film(conn: &Connection, id: i64, fields: FilmFields) -> AppResult<Film> {
    let fields = normalize(fields)?;
    database::films::update_film(conn, id, &fields)
        .map_err(tmdb_conflict)?
        .ok_or_else(|| AppError::not_found("Film not found."))
}

fn tmdb_conflict(err: anyhow::Error) -> AppError {
    match AppError::from(err) {
        AppError::Conflict(_) => AppError::Conflict("A film with this tmdb_id already exists.".to_string()),
        other => other,
    }
}

/// Loads the bundled release catalog, skipping films already present.
pub struct CatalogService;

impl CatalogService {
    pub fn new() -> Self {
        Self
    }

    pub fn seed(&self, conn: &mut Connection) -> Result<usize> {
        info!("=== Seeding Film Catalog ===");

        let films = self.load_seed_films()?;
        info!("  → Loaded {} films from bundled catalog", films.len());

        let tx = conn.transaction().context("Failed to start seed transaction")?;
        let mut inserted = 0;
        for seed in films {
            if database::films::find_by_title_and_year(&tx, &seed.title, seed.year)?.is_some() {
                continue;
            }
            let film = database::films::insert_film(&tx, &FilmFields::from(seed))?;
            info!("  ✓ Created: {}", film.title);
            inserted += 1;
        }
        tx.commit().context("Failed to commit seeded films")?;

        info!("=== Seeding Complete: {} new films ===", inserted);
        Ok(inserted)
    }

    fn load_seed_films(&self) -> Result<Vec<SeedFilm>> {
        serde_json::from_str(SEED_FILMS_JSON).context("Failed to parse bundled film catalog")
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}
