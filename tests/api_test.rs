//! End-to-end tests of the HTTP API.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tictac::{AppState, Difficulty, SESSION_COOKIE, SESSION_HEADER, SessionManager, router};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(SessionManager::new(Difficulty::Unbeatable)))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(req).await.expect("infallible");
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes()
        .to_vec();
    (status, body)
}

async fn post_json(app: &Router, uri: &str, session: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(SESSION_HEADER, session)
        .body(Body::from(body.to_string()))
        .expect("request");
    let (status, bytes) = send(app, req).await;
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

#[tokio::test]
async fn test_homepage_serves_board() {
    let app = app();
    let req = Request::get("/").body(Body::empty()).expect("request");
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).expect("utf8");
    assert!(html.contains("Tic-Tac-Toe"));
    assert!(html.contains("id=\"board\""));
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let req = Request::get("/health").body(Body::empty()).expect("request");
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_reset_with_player_first() {
    let app = app();
    let (status, state) = post_json(&app, "/reset", "s1", json!({ "firstPlayer": "X" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["board"], json!([" ", " ", " ", " ", " ", " ", " ", " ", " "]));
    assert_eq!(state["currentPlayer"], "X");
    assert_eq!(state["gameOver"], false);
    assert_eq!(state["winner"], Value::Null);
}

#[tokio::test]
async fn test_reset_with_computer_first() {
    let app = app();
    let (status, state) = post_json(&app, "/reset", "s1", json!({ "firstPlayer": "O" })).await;

    assert_eq!(status, StatusCode::OK);
    let marks = state["board"].as_array().expect("board array");
    assert_eq!(marks.iter().filter(|cell| *cell == "O").count(), 1);
    assert_eq!(state["currentPlayer"], "X");
    assert!(state["computerMove"].is_u64());
}

#[tokio::test]
async fn test_move_gets_computer_reply() {
    let app = app();
    post_json(&app, "/reset", "s1", json!({ "firstPlayer": "X" })).await;
    let (status, state) = post_json(&app, "/move", "s1", json!({ "index": 0 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["board"][0], "X");
    assert_eq!(state["board"][4], "O");
    assert_eq!(state["computerMove"], 4);
    assert_eq!(state["currentPlayer"], "X");
}

#[tokio::test]
async fn test_occupied_square_is_bad_request() {
    let app = app();
    post_json(&app, "/reset", "s1", json!({ "firstPlayer": "X" })).await;
    post_json(&app, "/move", "s1", json!({ "index": 0 })).await;

    let (status, body) = post_json(&app, "/move", "s1", json!({ "index": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("message").contains("occupied"));

    let (status, _) = post_json(&app, "/move", "s1", json!({ "index": 12 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = app();
    let req = Request::post("/move")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"index\": \"zero\"}"))
        .expect("request");
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).expect("json body");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_sessions_do_not_share_boards() {
    let app = app();
    post_json(&app, "/reset", "alice", json!({ "firstPlayer": "X" })).await;
    post_json(&app, "/reset", "bob", json!({ "firstPlayer": "X" })).await;
    post_json(&app, "/move", "alice", json!({ "index": 8 })).await;

    let req = Request::get("/state")
        .header(SESSION_HEADER, "bob")
        .body(Body::empty())
        .expect("request");
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let state: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(state["board"][8], " ");
    assert_eq!(state["board"][4], " ");
}

#[tokio::test]
async fn test_reset_can_change_difficulty() {
    let app = app();
    let (status, state) = post_json(
        &app,
        "/reset",
        "s1",
        json!({ "firstPlayer": "X", "difficulty": "casual" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["difficulty"], "casual");
}

/// Loads the page without a session and returns the cookie it hands out.
async fn visit(app: &Router) -> String {
    let req = Request::get("/").body(Body::empty()).expect("request");
    let response = app.clone().oneshot(req).await.expect("infallible");
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .expect("ascii cookie");
    let pair = cookie.split(';').next().expect("cookie pair").to_string();
    assert!(pair.starts_with(&format!("{}=", SESSION_COOKIE)));
    pair
}

async fn post_with_cookie(app: &Router, uri: &str, cookie: &str, body: Value) -> Value {
    let req = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .expect("request");
    let (status, bytes) = send(app, req).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn test_browsers_without_header_get_separate_games() {
    let app = app();
    let alice = visit(&app).await;
    let bob = visit(&app).await;
    assert_ne!(alice, bob);

    post_with_cookie(&app, "/reset", &alice, json!({ "firstPlayer": "X" })).await;
    post_with_cookie(&app, "/move", &alice, json!({ "index": 0 })).await;
    post_with_cookie(&app, "/reset", &bob, json!({ "firstPlayer": "X" })).await;
    let state = post_with_cookie(&app, "/move", &alice, json!({ "index": 8 })).await;

    assert_eq!(state["board"][0], "X");
    assert_eq!(state["board"][8], "X");
}

#[tokio::test]
async fn test_returning_visitor_keeps_cookie() {
    let app = app();
    let cookie = visit(&app).await;
    let req = Request::get("/")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(req).await.expect("infallible");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_page_load_in_other_tab_keeps_game() {
    let app = app();
    post_json(&app, "/reset", "tab-1", json!({ "firstPlayer": "X" })).await;
    post_json(&app, "/move", "tab-1", json!({ "index": 0 })).await;

    let req = Request::get("/")
        .header(SESSION_HEADER, "tab-2")
        .body(Body::empty())
        .expect("request");
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let (_, state) = post_json(&app, "/move", "tab-1", json!({ "index": 8 })).await;
    assert_eq!(state["board"][0], "X");
}
