mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn test_search_films_case_insensitive() {
    let app = TestApp::new();
    app.film("The Gorge", "Scott Derrickson", 2025);
    app.film("Gorgeous", "Vincent Kok", 1999);
    app.film("Elio", "Domee Shi", 2025);

    let (status, body) = app.send("GET", "/films?q=gORge", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let films = body["films"].as_array().unwrap();
    assert_eq!(films.len(), 2);
    assert_eq!(films[0]["title"], "The Gorge");
    assert_eq!(films[0]["decade"], "2020s");
    assert_eq!(films[0]["director"], "Scott Derrickson");
    assert_eq!(films[0]["genre"], "Drama");
    assert_eq!(films[1]["decade"], "1990s");
}

#[tokio::test]
async fn test_search_films_folds_accented_titles() {
    let app = TestApp::new();
    app.film("Élite Squad", "José Padilha", 2007);
    app.film("Elio", "Domee Shi", 2025);

    // ?q=élite
    let (status, body) = app.send("GET", "/films?q=%C3%A9lite", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let films = body["films"].as_array().unwrap();
    assert_eq!(films.len(), 1);
    assert_eq!(films[0]["title"], "Élite Squad");
}

#[tokio::test]
async fn test_malformed_film_id_is_a_json_bad_request() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            "PUT",
            "/films/abc",
            None,
            Some(json!({"title": "Heat", "director": "Michael Mann", "year": 1995})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid path parameter.");
}

#[tokio::test]
async fn test_empty_query_lists_catalog() {
    let app = TestApp::new();
    app.film("Elio", "Domee Shi", 2025);
    app.film("Heat", "Michael Mann", 1995);

    let (_, body) = app.send("GET", "/films", None, None).await;
    assert_eq!(body["films"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_and_update_film_recomputes_decade() {
    let app = TestApp::new();

    let (status, created) = app
        .send("POST", "/films", None, Some(json!({"title": "Sinners", "director": "Ryan Coogler", "year": 2019, "tmdb_id": 1233413})))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["decade"], "2010s");

    let uri = format!("/films/{}", created["id"]);
    let (status, updated) = app
        .send("PUT", &uri, None, Some(json!({"title": "Sinners", "director": "Ryan Coogler", "year": 2025})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["decade"], "2020s");
}

#[tokio::test]
async fn test_duplicate_tmdb_id_is_conflict() {
    let app = TestApp::new();
    let body = json!({"title": "Elio", "director": "Domee Shi", "year": 2025, "tmdb_id": 1022787});

    let (status, _) = app.send("POST", "/films", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app.send("POST", "/films", None, Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}
