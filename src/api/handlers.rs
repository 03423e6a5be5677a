//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{debug, info, warn};

use crate::state::AppState;
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /start - Start or restart the launch sequence
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let previous = state.controller.phase();
    let (run, countdown) = state.start_countdown();
    info!("Start endpoint called - run {} replaces a {:?} countdown", run, previous);

    Json(ApiResponse::new(
        format!("Launch sequence started: {}s", countdown.seconds_remaining),
        countdown,
    ))
}

/// Handle GET /status - Return the countdown and what the screen shows
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let countdown = state.controller.snapshot();
    let config = state.controller.config();

    Json(StatusResponse {
        countdown,
        phase: countdown.phase(),
        display: state.controller.display(),
        duration_seconds: config.total_seconds(),
        last_start: state.last_start(),
        uptime: state.get_uptime(),
    })
}

/// Handle GET /events - Stream the current state, then every change, as SSE
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Events subscriber connected");
    let rx = state.controller.subscribe();

    let events = stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let countdown = *rx.borrow_and_update();

        let event = match Event::default().event("countdown").json_data(countdown) {
            Ok(event) => event,
            Err(e) => {
                warn!("Failed to encode countdown event: {}", e);
                Event::default().event("error").data(e.to_string())
            }
        };
        Some((Ok(event), (rx, false)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
