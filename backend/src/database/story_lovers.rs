use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::models::{ProfileFields, StoryLover};

const COLUMNS: &str = "id, user_id, display_name, bio, avatar_url, website_url, youtube_url, podcast_url, instagram_url, created_at, updated_at";

pub fn insert_story_lover(conn: &Connection, user_id: i64, fields: &ProfileFields) -> Result<StoryLover> {
    let now = Utc::now();
    let sql = format!(
        "INSERT INTO story_lovers ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10) RETURNING {COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            Uuid::new_v4(),
            user_id,
            fields.display_name,
            fields.bio,
            fields.avatar_url,
            fields.website_url,
            fields.youtube_url,
            fields.podcast_url,
            fields.instagram_url,
            now
        ],
        parse_story_lover_row,
    )
    .context("Failed to insert story lover")
}

fn parse_story_lover_row(row: &rusqlite::Row) -> rusqlite::Result<StoryLover> {
    Ok(StoryLover {
        id: row.get(0)?,
        user_id: row.get(1)?,
        display_name: row.get(2)?,
        bio: row.get(3)?,
        avatar_url: row.get(4)?,
        website_url: row.get(5)?,
        youtube_url: row.get(6)?,
        podcast_url: row.get(7)?,
        instagram_url: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

pub fn find_by_user_id(conn: &Connection, user_id: i64) -> Result<Option<StoryLover>> {
    let sql = format!("SELECT {COLUMNS} FROM story_lovers WHERE user_id = ?1");

    conn.query_row(&sql, params![user_id], parse_story_lover_row)
        .optional()
        .context("Failed to query story lover by user_id")
}

pub fn find_by_id(conn: &Connection, id: Uuid) -> Result<Option<StoryLover>> {
    let sql = format!("SELECT {COLUMNS} FROM story_lovers WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_story_lover_row)
        .optional()
        .context("Failed to query story lover by id")
}

pub fn update_profile(conn: &Connection, id: Uuid, fields: &ProfileFields) -> Result<Option<StoryLover>> {
    let sql = format!(
        "UPDATE story_lovers SET display_name = ?2, bio = ?3, avatar_url = ?4, website_url = ?5, youtube_url = ?6, podcast_url = ?7, instagram_url = ?8, updated_at = ?9 WHERE id = ?1 RETURNING {COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            id,
            fields.display_name,
            fields.bio,
            fields.avatar_url,
            fields.website_url,
            fields.youtube_url,
            fields.podcast_url,
            fields.instagram_url,
            Utc::now()
        ],
        parse_story_lover_row,
    )
    .optional()
    .context("Failed to update story lover profile")
}

/// Removes the profile; rubrics and film logs go with it.
pub fn delete(conn: &Connection, id: Uuid) -> Result<bool> {
    let affected = conn
        .execute("DELETE FROM story_lovers WHERE id = ?1", params![id])
        .context("Failed to delete story lover")?;
    Ok(affected > 0)
}
