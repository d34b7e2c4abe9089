use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::models::RubricRating;
use crate::domain::WeightedRating;

pub fn insert_rating(conn: &Connection, film_log_id: Uuid, category_id: i64, rating: i64) -> Result<RubricRating> {
    let sql = "INSERT INTO rubric_ratings (film_log_id, category_id, rating) VALUES (?1, ?2, ?3) RETURNING id, film_log_id, category_id, rating";

    conn.query_row(sql, params![film_log_id, category_id, rating], |row| {
        Ok(RubricRating {
            id: row.get(0)?,
            film_log_id: row.get(1)?,
            category_id: row.get(2)?,
            rating: row.get(3)?,
        })
    })
    .context("Failed to insert rubric rating")
}

/// Ratings on a log joined with their category's rubric and weight, in insertion order.
pub fn list_weighted(conn: &Connection, film_log_id: Uuid) -> Result<Vec<WeightedRating>> {
    let sql = "
        SELECT c.rubric_id, rr.rating, c.weight
        FROM rubric_ratings rr
        JOIN rubric_categories c ON c.id = rr.category_id
        WHERE rr.film_log_id = ?1
        ORDER BY rr.id
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![film_log_id], |row| {
            Ok(WeightedRating {
                rubric_id: row.get(0)?,
                rating: row.get(1)?,
                weight: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to load rubric ratings")?;

    Ok(rows)
}
