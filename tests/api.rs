//! End-to-end exercises of the REST surface through the full router.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use blind_test_back::{config::AppConfig, dao, routes, state::AppState};

fn test_config() -> AppConfig {
    AppConfig {
        client_id: "test-client".into(),
        client_secret: "test-secret".into(),
        database_url: "sqlite::memory:".into(),
        upload_dir: std::env::temp_dir()
            .join("blind-test-uploads")
            .to_string_lossy()
            .into_owned(),
        frontend_url: "http://127.0.0.1:3000".into(),
        redirect_uri: "http://127.0.0.1:8080/api/spotify/auth/callback".into(),
        authorize_url: "http://127.0.0.1:1/authorize".into(),
        token_url: "http://127.0.0.1:1/api/token".into(),
        api_base_url: "http://127.0.0.1:1/v1".into(),
    }
}

async fn test_app() -> Router {
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database");
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("enable foreign keys");
    dao::migrate(&pool).await.expect("run migrations");
    routes::router(AppState::new(pool, test_config()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

fn send_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse json body")
}

#[tokio::test]
async fn healthcheck_reports_healthy() {
    let app = test_app().await;

    let response = app.oneshot(get("/healthcheck")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn enrollment_is_idempotent_and_dies_with_the_game() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/players", json!({ "name": "Alice" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let player = json_body(response).await;
    let player_id = player["player_id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/games", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let game = json_body(response).await;
    let game_id = game["game_id"].as_i64().unwrap();

    let enroll = json!({ "game_id": game_id, "player_id": player_id, "seat_number": 1 });
    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/participants", enroll.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let participant = json_body(response).await;
    let participant_id = participant["participant_id"].as_i64().unwrap();

    // Enrolling the same player again returns the original row.
    let repeat = json!({ "game_id": game_id, "player_id": player_id, "seat_number": 7 });
    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/participants", repeat))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let duplicate = json_body(response).await;
    assert_eq!(duplicate["participant_id"].as_i64().unwrap(), participant_id);
    assert_eq!(duplicate["seat_number"].as_i64().unwrap(), 1);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/games/{game_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The cascade removed the enrollment.
    let response = app
        .oneshot(get(&format!("/api/participants/{participant_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_rows_produce_json_error_bodies() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/players/9999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("9999"));
}

#[tokio::test]
async fn game_full_view_composes_participants_and_rounds() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/players", json!({ "name": "Bob" })))
        .await
        .unwrap();
    let player_id = json_body(response).await["player_id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/games", json!({})))
        .await
        .unwrap();
    let game_id = json_body(response).await["game_id"].as_i64().unwrap();

    let enroll = json!({ "game_id": game_id, "player_id": player_id, "seat_number": 1 });
    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/participants", enroll))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let round = json!({ "game_id": game_id, "round_number": 1 });
    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/rounds", round))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/games/{game_id}/full")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["participants"].as_array().unwrap().len(), 1);
    assert_eq!(body["rounds"].as_array().unwrap().len(), 1);
    assert_eq!(body["participants"][0]["player"]["name"], "Bob");

    // The freshly created round is the active one.
    let response = app
        .oneshot(get(&format!("/api/games/{game_id}/active-round")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let active = json_body(response).await;
    assert_eq!(active["round_number"].as_i64().unwrap(), 1);
}

#[tokio::test]
async fn settings_create_rejects_duplicates_but_upsert_overwrites() {
    let app = test_app().await;

    let payload = json!({ "key": "round_length", "value": "10" });
    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/settings", payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/settings", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/settings/round_length/upsert?value=12")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/settings/round_length")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["value"], "12");
}

#[tokio::test]
async fn spotify_proxy_rejects_unauthenticated_requests() {
    let app = test_app().await;

    let response = app.clone().oneshot(get("/api/spotify/me")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The auth flow itself stays reachable.
    let response = app.oneshot(get("/api/spotify/auth/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["authenticated"], false);
}
