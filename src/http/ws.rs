//! Realtime insert-event fan-out.
//!
//! # Responsibilities
//! - Upgrade `/ws?state=CC` connections
//! - Forward each appended record to subscribers, filtered by state
//!
//! # Design Decisions
//! - Backed by the monitor's broadcast channel; a slow consumer only loses
//!   its own backlog (lagged receivers resubscribe implicitly by skipping)
//! - Records are sent as the same JSON shape the REST endpoints use

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;

use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct WsParams {
    /// Optional state filter; absent means every insert-event.
    pub state: Option<String>,
}

pub async fn upgrade(
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
    ws: WebSocketUpgrade,
) -> Response {
    let filter = params.state;
    ws.on_upgrade(move |socket| stream_events(socket, state, filter))
}

async fn stream_events(socket: WebSocket, state: AppState, filter: Option<String>) {
    let mut events = state.monitor.subscribe();
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => {
                let record = match event {
                    Ok(record) => record,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "WebSocket subscriber lagged");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                if let Some(wanted) = &filter {
                    if &record.state != wanted {
                        continue;
                    }
                }
                let payload = match serde_json::to_string(&record) {
                    Ok(json) => json,
                    Err(error) => {
                        tracing::error!(error = %error, "Failed to serialize record for fan-out");
                        continue;
                    }
                };
                if sender.send(Message::Text(payload.into())).await.is_err() {
                    break;
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // Pings are answered by axum; other frames are ignored.
                    Some(Ok(_)) => {}
                }
            }
        }
    }
}
