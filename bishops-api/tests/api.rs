//! HTTP endpoint tests using the Router::oneshot pattern.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bishops_core::{GameSettings, SolverSettings};
use serde_json::{json, Value};
use tower::ServiceExt;

const ROOT_4X5: &str = "b---wb---wb---wb---w";

fn test_router() -> Router {
    let state = bishops_api::app_state(GameSettings::default(), SolverSettings::default()).unwrap();
    bishops_api::router(state)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let app = test_router();
    let (status, body) = call(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_root_state() {
    let app = test_router();
    let (status, body) = call(&app, "GET", &format!("/states/{ROOT_4X5}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["distance"], 0);
    assert_eq!(body["summary"]["total_pieces"], 8);
    assert_eq!(body["board"]["squares"].as_array().unwrap().len(), 20);
    assert_eq!(body["board"]["squares"][0]["occupant"], "black");
    assert_eq!(body["board"]["squares"][0]["options"][0]["kind"], "valid");
}

#[tokio::test]
async fn test_unknown_state_is_404() {
    let app = test_router();
    let (status, body) = call(&app, "GET", "/states/--------------------", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("Unknown state"));
}

#[tokio::test]
async fn test_move_then_prior_connected() {
    let app = test_router();
    let (status, body) = call(
        &app,
        "POST",
        &format!("/states/{ROOT_4X5}/moves"),
        Some(json!({"moves": [{"from": [0, 0], "to": [1, 1]}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"].as_array().unwrap().len(), 1);
    assert_eq!(body["connections"][0]["label"], "d5 → c4");

    let (_, root) = call(&app, "GET", &format!("/states/{ROOT_4X5}"), None).await;
    assert_eq!(root["board"]["squares"][0]["options"][0]["kind"], "prior-connected");
    assert_eq!(root["summary"]["options"]["explored"], 1);

    let (_, child) = call(&app, "GET", "/states/----wb---wb---wb---w", None).await;
    assert_eq!(child["summary"]["distance"], 1);
}

#[tokio::test]
async fn test_illegal_move_is_400() {
    let app = test_router();
    let (status, body) = call(
        &app,
        "POST",
        &format!("/states/{ROOT_4X5}/moves"),
        Some(json!({"moves": [{"from": [0, 0], "to": [2, 2]}]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().starts_with("Illegal move"));

    let (_, states) = call(&app, "GET", "/states", None).await;
    assert_eq!(states.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_expand_all_remaining() {
    let app = test_router();
    let (status, body) = call(&app, "POST", &format!("/states/{ROOT_4X5}/expand"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reached"].as_array().unwrap().len(), 8);

    let (_, connections) = call(&app, "GET", "/connections", None).await;
    assert_eq!(connections.as_array().unwrap().len(), 8);

    let (_, body) = call(&app, "POST", &format!("/states/{ROOT_4X5}/expand"), None).await;
    assert!(body["reached"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_new_game_and_solve() {
    let app = test_router();
    let (status, body) = call(
        &app,
        "POST",
        "/game",
        Some(json!({"rows": 3, "cols": 5, "pieces": "white"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let root = body["root"]["summary"]["hash"].as_str().unwrap().to_string();
    assert_eq!(root, "-----b---w-----");

    let (status, body) = call(
        &app,
        "POST",
        &format!("/states/{root}/solve"),
        Some(json!({"hint": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["status"], "solved");
    assert_eq!(body["outcome"]["moves"].as_array().unwrap().len(), 6);
    assert_eq!(body["committed"].as_array().unwrap().len(), 1);

    let (_, body) = call(
        &app,
        "POST",
        &format!("/states/{root}/solve"),
        Some(json!({"commit": true})),
    )
    .await;
    assert_eq!(body["committed"].as_array().unwrap().len(), 6);

    let (_, states) = call(&app, "GET", "/states", None).await;
    let solved = states
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["solved_pieces"] == s["total_pieces"])
        .count();
    assert_eq!(solved, 1);
}

#[tokio::test]
async fn test_solve_with_zero_deadline() {
    let app = test_router();
    let (status, body) = call(
        &app,
        "POST",
        &format!("/states/{ROOT_4X5}/solve"),
        Some(json!({"deadline_secs": 0.0, "commit": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["status"], "time-expired");
    assert!(body["committed"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_bad_settings_rejected() {
    let app = test_router();
    let (status, _) = call(&app, "POST", "/game", Some(json!({"rows": 4, "cols": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, "GET", &format!("/states/{ROOT_4X5}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_huge_deadline_is_clamped() {
    let app = test_router();
    let (status, body) = call(
        &app,
        "POST",
        &format!("/states/{ROOT_4X5}/solve"),
        Some(json!({"deadline_secs": 1e300})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["status"], "solved");
    assert_eq!(body["outcome"]["moves"].as_array().unwrap().len(), 36);
    assert!(body["committed"].as_array().unwrap().is_empty());

    let (status, body) = call(
        &app,
        "POST",
        &format!("/states/{ROOT_4X5}/solve"),
        Some(json!({"deadline_secs": -5.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["status"], "time-expired");
}
