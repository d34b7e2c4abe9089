use anyhow::Context;
use log::{info, warn};
use rusqlite::{Connection, TransactionBehavior};
use uuid::Uuid;

use crate::database::{self, Film, FilmLog, NewFilmLog, RubricRating};
use crate::domain::{self, rules, Mood};
use crate::errors::{AppError, AppResult};

/// A viewing as submitted by its owner, already shape-checked.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub film_id: i64,
    pub rating: Option<i64>,
    pub review: String,
    pub mood: Option<Mood>,
}

/// Fields a viewer chose to change on an existing log. `None` keeps the stored
/// value; `mood: Some(None)` clears the mood.
#[derive(Debug, Clone, Default)]
pub struct EntryChanges {
    pub rating: Option<i64>,
    pub review: Option<String>,
    pub mood: Option<Option<Mood>>,
}

#[derive(Debug, Clone)]
pub struct EntryDetail {
    pub log: FilmLog,
    pub film: Film,
    pub weighted_score: Option<f64>,
}

/// Logs a viewing. The new-director and rewatch flags are computed from the
/// owner's earlier logs inside the same write transaction as the insert.
/// The film must exist before the rating range is looked at.
pub fn create_film_log(conn: &mut Connection, story_lover_id: Uuid, entry: &NewEntry) -> AppResult<FilmLog> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .context("Failed to start film log transaction")?;

    let film = database::films::find_by_id(&tx, entry.film_id)?.ok_or_else(|| {
        warn!("Film not found with ID: {}", entry.film_id);
        AppError::not_found("Film not found.")
    })?;
    if let Some(rating) = entry.rating {
        rules::check_score(rating).map_err(|e| {
            warn!("Invalid rating value for story lover {}: {}", story_lover_id, e);
            AppError::validation("Invalid rating value.")
        })?;
    }

    let prior = database::film_logs::prior_viewings(&tx, story_lover_id)?;
    let flags = domain::classify_on_create(&prior, film.id, &film.director);

    let log = database::film_logs::insert_film_log(
        &tx,
        &NewFilmLog {
            story_lover_id,
            film_id: film.id,
            rating: entry.rating,
            review: entry.review.clone(),
            mood: mood_code(entry.mood),
            is_new_director: flags.is_new_director,
            is_rewatch: flags.is_rewatch,
        },
    )?;

    tx.commit().context("Failed to commit film log")?;
    info!(
        "Logged film {} for story lover {} (new director: {}, rewatch: {})",
        film.id, story_lover_id, flags.is_new_director, flags.is_rewatch
    );
    Ok(log)
}

pub fn entry_detail(conn: &Connection, story_lover_id: Uuid, log_id: Uuid) -> AppResult<EntryDetail> {
    let log = find_owned_log(conn, story_lover_id, log_id)?;
    let film = database::films::find_by_id(conn, log.film_id)?
        .ok_or_else(|| AppError::not_found("Film not found."))?;
    let weighted_score = weighted_score(conn, log.id)?;

    Ok(EntryDetail { log, film, weighted_score })
}

/// Applies the supplied changes over the stored log. The viewing flags stay as
/// they were at creation.
pub fn update_film_log(
    conn: &Connection,
    story_lover_id: Uuid,
    log_id: Uuid,
    changes: &EntryChanges,
) -> AppResult<FilmLog> {
    if let Some(rating) = changes.rating {
        rules::check_score(rating)?;
    }
    let log = find_owned_log(conn, story_lover_id, log_id)?;

    let rating = changes.rating.or(log.rating);
    let review = changes.review.as_deref().unwrap_or(&log.review);
    let mood = match changes.mood {
        Some(mood) => mood_code(mood),
        None => log.mood.clone(),
    };

    let updated = database::film_logs::update_entry(conn, log.id, rating, review, &mood)?;
    Ok(updated)
}

pub fn delete_film_log(conn: &Connection, story_lover_id: Uuid, log_id: Uuid) -> AppResult<()> {
    if database::film_logs::delete_owned(conn, story_lover_id, log_id)? {
        Ok(())
    } else {
        Err(AppError::not_found("Film log not found."))
    }
}

/// Scores one rubric category on a log and returns the log's refreshed weighted score.
pub fn rate_category(
    conn: &mut Connection,
    story_lover_id: Uuid,
    log_id: Uuid,
    category_id: i64,
    rating: i64,
) -> AppResult<(RubricRating, Option<f64>)> {
    rules::check_score(rating)?;

    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .context("Failed to start rubric rating transaction")?;

    let log = find_owned_log(&tx, story_lover_id, log_id)?;
    let category = database::rubrics::find_owned_category(&tx, story_lover_id, category_id)?
        .ok_or_else(|| AppError::not_found("Rubric category not found."))?;

    let saved = database::rubric_ratings::insert_rating(&tx, log.id, category.id, rating).map_err(|err| {
        match AppError::from(err) {
            AppError::Conflict(_) => {
                AppError::Conflict(format!("Category '{}' is already rated for this log.", category.name))
            }
            other => other,
        }
    })?;
    let score = weighted_score(&tx, log.id)?;

    tx.commit().context("Failed to commit rubric rating")?;
    Ok((saved, score))
}

pub fn weighted_score(conn: &Connection, log_id: Uuid) -> AppResult<Option<f64>> {
    let ratings = database::rubric_ratings::list_weighted(conn, log_id)?;
    Ok(domain::weighted_score(&ratings))
}

fn find_owned_log(conn: &Connection, story_lover_id: Uuid, log_id: Uuid) -> AppResult<FilmLog> {
    database::film_logs::find_owned(conn, story_lover_id, log_id)?
        .ok_or_else(|| AppError::not_found("Film log not found."))
}

fn mood_code(mood: Option<Mood>) -> String {
    mood.map(|m| m.as_str().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{FilmFields, ProfileFields};
    use crate::database::setup::test_connection;
    use crate::database::{films, rubrics, story_lovers};

    fn story_lover(conn: &Connection, user_id: i64) -> Uuid {
        let fields = ProfileFields {
            display_name: format!("viewer {user_id}"),
            ..Default::default()
        };
        story_lovers::insert_story_lover(conn, user_id, &fields).unwrap().id
    }

    fn film(conn: &Connection, title: &str, director: &str) -> i64 {
        let fields = FilmFields {
            title: title.to_string(),
            director: director.to_string(),
            year: 2023,
            ..Default::default()
        };
        films::insert_film(conn, &fields).unwrap().id
    }

    fn watch(film_id: i64) -> NewEntry {
        NewEntry {
            film_id,
            rating: None,
            review: String::new(),
            mood: None,
        }
    }

    #[test]
    fn test_is_new_director_detection() {
        let mut conn = test_connection();
        let me = story_lover(&conn, 1);
        let first = film(&conn, "Film 1", "Director A");
        let second = film(&conn, "Film 2", "Director A");
        let third = film(&conn, "Film 3", "Director B");

        assert!(create_film_log(&mut conn, me, &watch(first)).unwrap().is_new_director);
        assert!(!create_film_log(&mut conn, me, &watch(second)).unwrap().is_new_director);
        assert!(create_film_log(&mut conn, me, &watch(third)).unwrap().is_new_director);
    }

    #[test]
    fn test_new_director_is_per_story_lover() {
        let mut conn = test_connection();
        let me = story_lover(&conn, 1);
        let you = story_lover(&conn, 2);
        let heat = film(&conn, "Heat", "Michael Mann");

        create_film_log(&mut conn, me, &watch(heat)).unwrap();
        let yours = create_film_log(&mut conn, you, &watch(heat)).unwrap();
        assert!(yours.is_new_director);
        assert!(!yours.is_rewatch);
    }

    #[test]
    fn test_is_rewatch_detection() {
        let mut conn = test_connection();
        let me = story_lover(&conn, 1);
        let heat = film(&conn, "Heat", "Michael Mann");

        let first = create_film_log(&mut conn, me, &watch(heat)).unwrap();
        let second = create_film_log(&mut conn, me, &watch(heat)).unwrap();
        let third = create_film_log(&mut conn, me, &watch(heat)).unwrap();
        assert!(!first.is_rewatch);
        assert!(second.is_rewatch);
        assert!(third.is_rewatch);
    }

    #[test]
    fn test_missing_film_is_not_found() {
        let mut conn = test_connection();
        let me = story_lover(&conn, 1);
        let err = create_film_log(&mut conn, me, &watch(42)).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_missing_film_wins_over_bad_rating() {
        let mut conn = test_connection();
        let me = story_lover(&conn, 1);
        let entry = NewEntry { rating: Some(11), ..watch(42) };
        let err = create_film_log(&mut conn, me, &entry).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_rating_bounds_on_create() {
        let mut conn = test_connection();
        let me = story_lover(&conn, 1);
        let heat = film(&conn, "Heat", "Michael Mann");

        for bad in [0, 11] {
            let entry = NewEntry { rating: Some(bad), ..watch(heat) };
            assert!(matches!(create_film_log(&mut conn, me, &entry), Err(AppError::Validation(_))));
        }
        for good in [1, 10] {
            let entry = NewEntry { rating: Some(good), ..watch(heat) };
            assert_eq!(create_film_log(&mut conn, me, &entry).unwrap().rating, Some(good));
        }
    }

    #[test]
    fn test_update_does_not_recompute_flags() {
        let mut conn = test_connection();
        let me = story_lover(&conn, 1);
        let heat = film(&conn, "Heat", "Michael Mann");
        let first = create_film_log(&mut conn, me, &watch(heat)).unwrap();
        create_film_log(&mut conn, me, &watch(heat)).unwrap();

        let changes = EntryChanges {
            rating: Some(9),
            review: Some("still great".to_string()),
            mood: Some(Some(Mood::Thrilled)),
        };
        let updated = update_film_log(&conn, me, first.id, &changes).unwrap();
        assert!(updated.is_new_director);
        assert!(!updated.is_rewatch);
        assert_eq!(updated.mood, "thrilled");
    }

    #[test]
    fn test_update_keeps_fields_left_out() {
        let mut conn = test_connection();
        let me = story_lover(&conn, 1);
        let heat = film(&conn, "Heat", "Michael Mann");
        let entry = NewEntry {
            rating: Some(7),
            review: "Tense".to_string(),
            mood: Some(Mood::Thrilled),
            ..watch(heat)
        };
        let log = create_film_log(&mut conn, me, &entry).unwrap();

        let rated = EntryChanges { rating: Some(9), ..Default::default() };
        let updated = update_film_log(&conn, me, log.id, &rated).unwrap();
        assert_eq!(updated.rating, Some(9));
        assert_eq!(updated.review, "Tense");
        assert_eq!(updated.mood, "thrilled");

        let reviewed = EntryChanges { review: Some("Even better".to_string()), ..Default::default() };
        let updated = update_film_log(&conn, me, log.id, &reviewed).unwrap();
        assert_eq!(updated.rating, Some(9));
        assert_eq!(updated.review, "Even better");

        let cleared = EntryChanges { mood: Some(None), ..Default::default() };
        assert_eq!(update_film_log(&conn, me, log.id, &cleared).unwrap().mood, "");
    }

    #[test]
    fn test_update_rejects_out_of_range_rating() {
        let mut conn = test_connection();
        let me = story_lover(&conn, 1);
        let heat = film(&conn, "Heat", "Michael Mann");
        let log = create_film_log(&mut conn, me, &watch(heat)).unwrap();

        let changes = EntryChanges { rating: Some(11), ..Default::default() };
        assert!(matches!(update_film_log(&conn, me, log.id, &changes), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_weighted_score_calculation() {
        let mut conn = test_connection();
        let me = story_lover(&conn, 1);
        let heat = film(&conn, "Heat", "Michael Mann");
        let rubric = rubrics::insert_rubric(&conn, me, "Test Rubric", "", false).unwrap();
        let direction = rubrics::insert_category(&conn, rubric.id, "Direction", 40, 0).unwrap();
        let acting = rubrics::insert_category(&conn, rubric.id, "Acting", 30, 1).unwrap();
        let log = create_film_log(&mut conn, me, &watch(heat)).unwrap();

        assert_eq!(weighted_score(&conn, log.id).unwrap(), None);

        let (_, partial) = rate_category(&mut conn, me, log.id, direction.id, 10).unwrap();
        assert_eq!(partial, Some(10.0));
        let (_, score) = rate_category(&mut conn, me, log.id, acting.id, 8).unwrap();
        assert_eq!(score, Some(9.1));

        let detail = entry_detail(&conn, me, log.id).unwrap();
        assert_eq!(detail.weighted_score, Some(9.1));
        assert_eq!(detail.film.title, "Heat");
    }

    #[test]
    fn test_unique_rating_per_film_log_category() {
        let mut conn = test_connection();
        let me = story_lover(&conn, 1);
        let heat = film(&conn, "Heat", "Michael Mann");
        let rubric = rubrics::insert_rubric(&conn, me, "Test Rubric", "", false).unwrap();
        let direction = rubrics::insert_category(&conn, rubric.id, "Direction", 30, 0).unwrap();
        let log = create_film_log(&mut conn, me, &watch(heat)).unwrap();

        rate_category(&mut conn, me, log.id, direction.id, 7).unwrap();
        let err = rate_category(&mut conn, me, log.id, direction.id, 9).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_cannot_rate_with_someone_elses_category() {
        let mut conn = test_connection();
        let me = story_lover(&conn, 1);
        let you = story_lover(&conn, 2);
        let heat = film(&conn, "Heat", "Michael Mann");
        let rubric = rubrics::insert_rubric(&conn, you, "Yours", "", false).unwrap();
        let category = rubrics::insert_category(&conn, rubric.id, "Direction", 30, 0).unwrap();
        let log = create_film_log(&mut conn, me, &watch(heat)).unwrap();

        let err = rate_category(&mut conn, me, log.id, category.id, 7).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_logs_are_private_to_owner() {
        let mut conn = test_connection();
        let me = story_lover(&conn, 1);
        let you = story_lover(&conn, 2);
        let heat = film(&conn, "Heat", "Michael Mann");
        let log = create_film_log(&mut conn, me, &watch(heat)).unwrap();

        assert!(matches!(entry_detail(&conn, you, log.id), Err(AppError::NotFound(_))));
        assert!(matches!(delete_film_log(&conn, you, log.id), Err(AppError::NotFound(_))));
        delete_film_log(&conn, me, log.id).unwrap();
    }
}
