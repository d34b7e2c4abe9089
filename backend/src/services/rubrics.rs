use anyhow::Context;
use log::info;
use rusqlite::{Connection, TransactionBehavior};
use uuid::Uuid;

use crate::config::settings::RubricSettings;
use crate::database::{self, Rubric, RubricCategory};
use crate::domain::{rubric, rules};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub weight: i64,
    pub order: i64,
}

#[derive(Debug, Clone)]
pub struct NewRubric {
    pub name: String,
    pub description: String,
    pub is_default: bool,
    pub categories: Vec<NewCategory>,
}

/// A rubric with its categories and the derived weight totals.
#[derive(Debug, Clone)]
pub struct RubricView {
    pub rubric: Rubric,
    pub categories: Vec<RubricCategory>,
    pub total_weight: i64,
    pub is_valid: bool,
}

pub struct RubricService {
    settings: RubricSettings,
}

impl RubricService {
    pub fn new(settings: RubricSettings) -> Self {
        Self { settings }
    }

    /// Creates the rubric and its categories in one transaction. A new default
    /// clears the owner's previous default first.
    pub fn create_rubric(&self, conn: &mut Connection, story_lover_id: Uuid, new: &NewRubric) -> AppResult<RubricView> {
        let name = rules::check_not_blank("name", &new.name)?;
        for category in &new.categories {
            self.check_category(category)?;
        }

        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to start rubric transaction")?;

        if new.is_default {
            database::rubrics::clear_defaults(&tx, story_lover_id)?;
        }
        let created = database::rubrics::insert_rubric(&tx, story_lover_id, name, &new.description, new.is_default)
            .map_err(|err| conflict_as(err, format!("A rubric named '{}' already exists.", name)))?;

        for category in &new.categories {
            database::rubrics::insert_category(&tx, created.id, category.name.trim(), category.weight, category.order)
                .map_err(|err| {
                    conflict_as(err, format!("Category '{}' appears more than once.", category.name.trim()))
                })?;
        }

        let view = self.view(&tx, created)?;
        tx.commit().context("Failed to commit rubric")?;
        info!(
            "Created rubric {} for story lover {} (total weight {})",
            view.rubric.id, story_lover_id, view.total_weight
        );
        Ok(view)
    }

    pub fn add_category(
        &self,
        conn: &Connection,
        story_lover_id: Uuid,
        rubric_id: i64,
        category: &NewCategory,
    ) -> AppResult<RubricCategory> {
        self.check_category(category)?;
        let owned = find_owned(conn, story_lover_id, rubric_id)?;
        let name = category.name.trim();

        database::rubrics::insert_category(conn, owned.id, name, category.weight, category.order)
            .map_err(|err| conflict_as(err, format!("Category '{}' already exists in this rubric.", name)))
    }

    /// Makes `rubric_id` the owner's only default. The read-clear-set sequence
    /// runs under one write lock, so concurrent calls serialize and the last one wins.
    pub fn set_default(&self, conn: &mut Connection, story_lover_id: Uuid, rubric_id: i64) -> AppResult<RubricView> {
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to start default rubric transaction")?;

        let owned = find_owned(&tx, story_lover_id, rubric_id)?;
        database::rubrics::clear_defaults(&tx, story_lover_id)?;
        let updated = database::rubrics::mark_default(&tx, owned.id)?;

        let view = self.view(&tx, updated)?;
        tx.commit().context("Failed to commit default rubric")?;
        info!("Rubric {} is now the default for story lover {}", rubric_id, story_lover_id);
        Ok(view)
    }

    pub fn list_rubrics(&self, conn: &Connection, story_lover_id: Uuid) -> AppResult<Vec<RubricView>> {
        database::rubrics::list_by_owner(conn, story_lover_id)?
            .into_iter()
            .map(|r| self.view(conn, r))
            .collect()
    }

    pub fn rubric(&self, conn: &Connection, story_lover_id: Uuid, rubric_id: i64) -> AppResult<RubricView> {
        let owned = find_owned(conn, story_lover_id, rubric_id)?;
        self.view(conn, owned)
    }

    pub fn delete_rubric(&self, conn: &Connection, story_lover_id: Uuid, rubric_id: i64) -> AppResult<()> {
        if database::rubrics::delete_owned(conn, story_lover_id, rubric_id)? {
            Ok(())
        } else {
            Err(AppError::not_found("Rubric not found."))
        }
    }

    fn view(&self, conn: &Connection, record: Rubric) -> AppResult<RubricView> {
        let categories = database::rubrics::list_categories(conn, record.id)?;
        let weights: Vec<i64> = categories.iter().map(|c| c.weight).collect();

        Ok(RubricView {
            total_weight: rubric::total_weight(&weights),
            is_valid: rubric::is_valid(&weights, &self.settings),
            rubric: record,
            categories,
        })
    }

    fn check_category(&self, category: &NewCategory) -> AppResult<()> {
        rules::check_not_blank("category name", &category.name)?;
        rubric::check_category_weight(category.weight, &self.settings)?;
        if category.order < 0 {
            return Err(AppError::validation("category order must not be negative"));
        }
        Ok(())
    }
}

fn find_owned(conn: &Connection, story_lover_id: Uuid, rubric_id: i64) -> AppResult<Rubric> {
    database::rubrics::find_owned(conn, story_lover_id, rubric_id)?
        .ok_or_else(|| AppError::not_found("Rubric not found."))
}

fn conflict_as(err: anyhow::Error, message: String) -> AppError {
    match AppError::from(err) {
        AppError::Conflict(_) => AppError::Conflict(message),
        other => other,
    }
}
