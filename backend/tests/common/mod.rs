#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use cinevous::api::create_router;
use cinevous::api::handlers::AppState;
use cinevous::config::settings::AppConfig;
use cinevous::database::{self, DbPool, FilmFields, ProfileFields};

pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
    _dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut config = AppConfig::new();
        config.database.path = dir.path().join("cinevous-test.db").to_string_lossy().into_owned();
        config.database.pool_size = 4;

        let pool = database::create_pool(&config.database).expect("pool");
        {
            let conn = database::get_connection(&pool).expect("connection");
            database::setup::initialize_schema(&conn).expect("schema");
        }

        let state = Arc::new(AppState::new(pool.clone(), config));
        Self {
            router: create_router(state),
            pool,
            _dir: dir,
        }
    }

    pub fn story_lover(&self, user_id: i64, display_name: &str) {
        let conn = database::get_connection(&self.pool).unwrap();
        let fields = ProfileFields {
            display_name: display_name.to_string(),
            ..Default::default()
        };
        database::story_lovers::insert_story_lover(&conn, user_id, &fields).unwrap();
    }

    pub fn film(&self, title: &str, director: &str, year: i64) -> i64 {
        let conn = database::get_connection(&self.pool).unwrap();
        let fields = FilmFields {
            title: title.to_string(),
            director: director.to_string(),
            year,
            country: "USA".to_string(),
            genre: "Drama".to_string(),
            ..Default::default()
        };
        database::films::insert_film(&conn, &fields).unwrap().id
    }

    pub async fn send(&self, method: &str, uri: &str, user_id: Option<i64>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user_id) = user_id {
            builder = builder.header("x-user-id", user_id.to_string());
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.dispatch(request).await
    }

    pub async fn send_raw(&self, method: &str, uri: &str, user_id: i64, raw: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-user-id", user_id.to_string())
            .header("content-type", "application/json")
            .body(Body::from(raw))
            .unwrap();
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
