//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    http::header,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Json,
    },
};
use futures::stream::{self, Stream, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::state::AppState;
use super::responses::{render_index, HealthResponse, StatusResponse};

const UPDATE_TIMER_JS: &str = include_str!("../../static/js/update_timer.js");

/// Handle GET / - Render the timer display page
pub async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let snapshot = state.get_timer_snapshot();
    Html(render_index(&snapshot.message))
}

/// Handle GET /static/js/update_timer.js - Display polling script
pub async fn update_timer_script_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript")], UPDATE_TIMER_JS)
}

/// Handle GET /status - Return the current timer snapshot
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let snapshot = state.get_timer_snapshot();
    Json(StatusResponse::new(
        snapshot,
        state.get_uptime(),
        state.port,
        state.host.clone(),
    ))
}

/// Handle GET /events - Stream every published snapshot
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // Subscribe before reading so no publish falls between the two
    let rx = state.subscribe_timer();
    let current = state.get_timer_snapshot();
    debug!("Snapshot subscriber connected");

    let initial = stream::once(async move { current });
    let updates = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(snapshot) => return Some((snapshot, rx)),
                Err(RecvError::Lagged(skipped)) => {
                    debug!("Snapshot subscriber lagged, skipped {}", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    let events = initial.chain(updates).filter_map(|snapshot| async move {
        match Event::default().event("snapshot").json_data(&snapshot) {
            Ok(event) => Some(Ok::<_, Infallible>(event)),
            Err(e) => {
                warn!("Failed to encode snapshot event: {}", e);
                None
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
