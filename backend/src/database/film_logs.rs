use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::models::{FilmLog, FilmLogWithFilm, NewFilmLog};
use crate::domain::PriorViewing;

const COLUMNS: &str = "id, story_lover_id, film_id, rating, review, mood, watched_at, is_new_director, is_rewatch, created_at, updated_at";

pub fn insert_film_log(conn: &Connection, log: &NewFilmLog) -> Result<FilmLog> {
    let now = Utc::now();
    let sql = format!(
        "INSERT INTO film_logs ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?7, ?7) RETURNING {COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            Uuid::new_v4(),
            log.story_lover_id,
            log.film_id,
            log.rating,
            log.review,
            log.mood,
            now,
            log.is_new_director,
            log.is_rewatch
        ],
        parse_film_log_row,
    )
    .context("Failed to insert film log")
}

fn parse_film_log_row(row: &rusqlite::Row) -> rusqlite::Result<FilmLog> {
    Ok(FilmLog {
        id: row.get(0)?,
        story_lover_id: row.get(1)?,
        film_id: row.get(2)?,
        rating: row.get(3)?,
        review: row.get(4)?,
        mood: row.get(5)?,
        watched_at: row.get(6)?,
        is_new_director: row.get(7)?,
        is_rewatch: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

/// Every film this owner has logged so far, with its director.
pub fn prior_viewings(conn: &Connection, story_lover_id: Uuid) -> Result<Vec<PriorViewing>> {
    let sql = "SELECT l.film_id, f.director FROM film_logs l JOIN films f ON f.id = l.film_id WHERE l.story_lover_id = ?1";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![story_lover_id], |row| {
            Ok(PriorViewing {
                film_id: row.get(0)?,
                director: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to load prior viewings")?;

    Ok(rows)
}

pub fn find_owned(conn: &Connection, story_lover_id: Uuid, id: Uuid) -> Result<Option<FilmLog>> {
    let sql = format!("SELECT {COLUMNS} FROM film_logs WHERE id = ?1 AND story_lover_id = ?2");

    conn.query_row(&sql, params![id, story_lover_id], parse_film_log_row)
        .optional()
        .context("Failed to query film log by id")
}

/// The owner's diary, newest viewing first.
pub fn list_with_films(conn: &Connection, story_lover_id: Uuid) -> Result<Vec<FilmLogWithFilm>> {
    let sql = "
        SELECT l.id, f.title, f.director, f.year, f.country, l.rating, l.review, l.mood, l.watched_at
        FROM film_logs l
        JOIN films f ON f.id = l.film_id
        WHERE l.story_lover_id = ?1
        ORDER BY l.watched_at DESC, l.rowid DESC
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![story_lover_id], |row| {
            Ok(FilmLogWithFilm {
                id: row.get(0)?,
                title: row.get(1)?,
                director: row.get(2)?,
                year: row.get(3)?,
                country: row.get(4)?,
                rating: row.get(5)?,
                review: row.get(6)?,
                mood: row.get(7)?,
                watched_at: row.get(8)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list film logs")?;

    Ok(rows)
}

/// Edits the viewer-supplied fields only; creation-time flags are left alone.
pub fn update_entry(
    conn: &Connection,
    id: Uuid,
    rating: Option<i64>,
    review: &str,
    mood: &str,
) -> Result<FilmLog> {
    let sql = format!(
        "UPDATE film_logs SET rating = ?2, review = ?3, mood = ?4, updated_at = ?5 WHERE id = ?1 RETURNING {COLUMNS}"
    );

    conn.query_row(&sql, params![id, rating, review, mood, Utc::now()], parse_film_log_row)
        .context("Failed to update film log")
}

pub fn delete_owned(conn: &Connection, story_lover_id: Uuid, id: Uuid) -> Result<bool> {
    let affected = conn
        .execute(
            "DELETE FROM film_logs WHERE id = ?1 AND story_lover_id = ?2",
            params![id, story_lover_id],
        )
        .context("Failed to delete film log")?;
    Ok(affected > 0)
}
