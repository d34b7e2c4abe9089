use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{Film, FilmFields};
use crate::domain::decade_for_year;

const COLUMNS: &str = "id, title, director, year, genre, country, decade, tmdb_id, poster_url, created_at, updated_at";

pub fn insert_film(conn: &Connection, fields: &FilmFields) -> Result<Film> {
    let now = Utc::now();
    let sql = format!(
        "INSERT INTO films (title, director, year, genre, country, decade, tmdb_id, poster_url, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9) RETURNING {COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            fields.title,
            fields.director,
            fields.year,
            fields.genre,
            fields.country,
            decade_for_year(fields.year),
            fields.tmdb_id,
            fields.poster_url,
            now
        ],
        parse_film_row,
    )
    .context("Failed to insert film")
}

/// Rewrites every catalog field and recomputes the decade from the new year.
pub fn update_film(conn: &Connection, id: i64, fields: &FilmFields) -> Result<Option<Film>> {
    let sql = format!(
        "UPDATE films SET title = ?2, director = ?3, year = ?4, genre = ?5, country = ?6, decade = ?7, tmdb_id = ?8, poster_url = ?9, updated_at = ?10 WHERE id = ?1 RETURNING {COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            id,
            fields.title,
            fields.director,
            fields.year,
            fields.genre,
            fields.country,
            decade_for_year(fields.year),
            fields.tmdb_id,
            fields.poster_url,
            Utc::now()
        ],
        parse_film_row,
    )
    .optional()
    .context("Failed to update film")
}

fn parse_film_row(row: &rusqlite::Row) -> rusqlite::Result<Film> {
    Ok(Film {
        id: row.get(0)?,
        title: row.get(1)?,
        director: row.get(2)?,
        year: row.get(3)?,
        genre: row.get(4)?,
        country: row.get(5)?,
        decade: row.get(6)?,
        tmdb_id: row.get(7)?,
        poster_url: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Film>> {
    let sql = format!("SELECT {COLUMNS} FROM films WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_film_row)
        .optional()
        .context("Failed to query film by id")
}

pub fn find_by_title_and_year(conn: &Connection, title: &str, year: i64) -> Result<Option<Film>> {
    let sql = format!("SELECT {COLUMNS} FROM films WHERE title = ?1 AND year = ?2");

    conn.query_row(&sql, params![title, year], parse_film_row)
        .optional()
        .context("Failed to query film by title and year")
}

/// Case-insensitive substring match on title, newest release first.
///
/// Both sides are lowercased with Unicode rules (`unicode_lower` is registered
/// in `connection::configure`), and `instr` keeps `%` and `_` literal.
pub fn search_by_title(conn: &Connection, query: &str) -> Result<Vec<Film>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM films WHERE instr(unicode_lower(title), ?1) > 0 ORDER BY year DESC, title"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![query.to_lowercase()], parse_film_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to search films by title")?;

    Ok(rows)
}
