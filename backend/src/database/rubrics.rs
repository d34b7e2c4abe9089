use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::models::{Rubric, RubricCategory};

const RUBRIC_COLUMNS: &str = "id, story_lover_id, name, description, is_default, created_at, updated_at";
const CATEGORY_COLUMNS: &str = "id, rubric_id, name, weight, \"order\"";

/// Plain insert. Callers that pass `is_default = true` must clear the owner's
/// previous default in the same transaction.
pub fn insert_rubric(
    conn: &Connection,
    story_lover_id: Uuid,
    name: &str,
    description: &str,
    is_default: bool,
) -> Result<Rubric> {
    let sql = format!(
        "INSERT INTO rubrics (story_lover_id, name, description, is_default, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5) RETURNING {RUBRIC_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![story_lover_id, name, description, is_default, Utc::now()],
        parse_rubric_row,
    )
    .context("Failed to insert rubric")
}

fn parse_rubric_row(row: &rusqlite::Row) -> rusqlite::Result<Rubric> {
    Ok(Rubric {
        id: row.get(0)?,
        story_lover_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        is_default: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

pub fn find_owned(conn: &Connection, story_lover_id: Uuid, rubric_id: i64) -> Result<Option<Rubric>> {
    let sql = format!("SELECT {RUBRIC_COLUMNS} FROM rubrics WHERE id = ?1 AND story_lover_id = ?2");

    conn.query_row(&sql, params![rubric_id, story_lover_id], parse_rubric_row)
        .optional()
        .context("Failed to query rubric by id")
}

/// Default rubric first, then alphabetical.
pub fn list_by_owner(conn: &Connection, story_lover_id: Uuid) -> Result<Vec<Rubric>> {
    let sql = format!(
        "SELECT {RUBRIC_COLUMNS} FROM rubrics WHERE story_lover_id = ?1 ORDER BY is_default DESC, name"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![story_lover_id], parse_rubric_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn clear_defaults(conn: &Connection, story_lover_id: Uuid) -> Result<usize> {
    conn.execute(
        "UPDATE rubrics SET is_default = 0, updated_at = ?2 WHERE story_lover_id = ?1 AND is_default = 1",
        params![story_lover_id, Utc::now()],
    )
    .context("Failed to clear default rubrics")
}

pub fn mark_default(conn: &Connection, rubric_id: i64) -> Result<Rubric> {
    let sql = format!(
        "UPDATE rubrics SET is_default = 1, updated_at = ?2 WHERE id = ?1 RETURNING {RUBRIC_COLUMNS}"
    );

    conn.query_row(&sql, params![rubric_id, Utc::now()], parse_rubric_row)
        .context("Failed to mark rubric as default")
}

pub fn delete_owned(conn: &Connection, story_lover_id: Uuid, rubric_id: i64) -> Result<bool> {
    let affected = conn
        .execute(
            "DELETE FROM rubrics WHERE id = ?1 AND story_lover_id = ?2",
            params![rubric_id, story_lover_id],
        )
        .context("Failed to delete rubric")?;
    Ok(affected > 0)
}

pub fn insert_category(conn: &Connection, rubric_id: i64, name: &str, weight: i64, order: i64) -> Result<RubricCategory> {
    let sql = format!(
        "INSERT INTO rubric_categories (rubric_id, name, weight, \"order\") VALUES (?1, ?2, ?3, ?4) RETURNING {CATEGORY_COLUMNS}"
    );

    conn.query_row(&sql, params![rubric_id, name, weight, order], parse_category_row)
        .context("Failed to insert rubric category")
}

fn parse_category_row(row: &rusqlite::Row) -> rusqlite::Result<RubricCategory> {
    Ok(RubricCategory {
        id: row.get(0)?,
        rubric_id: row.get(1)?,
        name: row.get(2)?,
        weight: row.get(3)?,
        order: row.get(4)?,
    })
}

/// Categories in display order: explicit `order`, then creation.
pub fn list_categories(conn: &Connection, rubric_id: i64) -> Result<Vec<RubricCategory>> {
    let sql = format!(
        "SELECT {CATEGORY_COLUMNS} FROM rubric_categories WHERE rubric_id = ?1 ORDER BY \"order\", id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![rubric_id], parse_category_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// A category, provided its rubric belongs to `story_lover_id`.
pub fn find_owned_category(conn: &Connection, story_lover_id: Uuid, category_id: i64) -> Result<Option<RubricCategory>> {
    let sql = "SELECT c.id, c.rubric_id, c.name, c.weight, c.\"order\" FROM rubric_categories c JOIN rubrics r ON r.id = c.rubric_id WHERE c.id = ?1 AND r.story_lover_id = ?2";

    conn.query_row(sql, params![category_id, story_lover_id], parse_category_row)
        .optional()
        .context("Failed to query rubric category by id")
}
