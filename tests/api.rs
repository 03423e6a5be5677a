use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use futures::StreamExt;
use serde_json::Value;
use tokio::time::sleep;
use tower::ServiceExt;

use lift_off::{create_router, AppState, CountdownConfig, CountdownController};

fn app() -> Router {
    let controller = CountdownController::new(CountdownConfig::new(
        Duration::from_secs(10),
        Duration::from_millis(10),
    ));
    create_router(Arc::new(AppState::new(controller, 0, "127.0.0.1".to_string())))
}

async fn call(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = call(&app(), "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn idle_status_shows_full_clock() {
    let (status, body) = call(&app(), "GET", "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "idle");
    assert_eq!(body["duration_seconds"], 10);
    assert_eq!(body["countdown"]["seconds_remaining"], 10);
    assert_eq!(body["display"]["title"], "10 Second Countdown");
    assert_eq!(body["display"]["show_start_button"], true);
    assert!(body["last_start"].is_null());
}

#[tokio::test(start_paused = true)]
async fn launch_sequence_over_http() {
    let app = app();

    let (status, body) = call(&app, "POST", "/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["countdown"]["seconds_remaining"], 10);
    assert_eq!(body["countdown"]["is_running"], true);
    assert_eq!(body["countdown"]["is_finished"], false);

    sleep(Duration::from_millis(3500)).await;
    let (_, body) = call(&app, "GET", "/status").await;
    assert_eq!(body["phase"], "running");
    assert_eq!(body["display"]["text"], "7");
    assert_eq!(body["display"]["show_start_button"], false);
    assert!(body["last_start"].is_string());

    sleep(Duration::from_secs(7)).await;
    let (_, body) = call(&app, "GET", "/status").await;
    assert_eq!(body["phase"], "finished");
    assert_eq!(body["countdown"]["seconds_remaining"], 0);
    assert_eq!(body["display"]["text"], "Lift off!");
    assert_eq!(body["display"]["show_rocket"], true);

    let (_, body) = call(&app, "POST", "/start").await;
    assert_eq!(body["countdown"]["seconds_remaining"], 10);
    assert_eq!(body["countdown"]["is_finished"], false);
}

#[tokio::test]
async fn events_open_with_current_state() {
    let request = Request::builder().uri("/events").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/event-stream");

    let mut frames = response.into_body().into_data_stream();
    let first = frames.next().await.unwrap().unwrap();
    let text = String::from_utf8(first.to_vec()).unwrap();
    assert!(text.contains("event: countdown"));
    assert!(text.contains("\"seconds_remaining\":10"));
    assert!(text.contains("\"is_running\":false"));
}
