use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use crate::api::handlers::{film_logs, films, profile, rubrics, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/profile",
            get(profile::get_profile)
                .post(profile::create_profile)
                .put(profile::update_profile)
                .delete(profile::delete_profile),
        )
        .route("/films", get(films::search_films).post(films::create_film))
        .route("/films/:id", put(films::update_film))
        .route("/film-logs", get(film_logs::list_film_logs).post(film_logs::create_film_log))
        .route(
            "/film-logs/:id",
            get(film_logs::get_film_log)
                .put(film_logs::update_film_log)
                .delete(film_logs::delete_film_log),
        )
        .route("/film-logs/:id/rubric-ratings", post(film_logs::rate_category))
        .route("/rubrics", get(rubrics::list_rubrics).post(rubrics::create_rubric))
        .route("/rubrics/:id", axum::routing::delete(rubrics::delete_rubric))
        .route("/rubrics/:id/categories", post(rubrics::add_category))
        .route("/rubrics/:id/default", put(rubrics::set_default))
        .with_state(state)
}
