//! Server-push MCP sessions.
//!
//! `GET /sse` opens a session and announces where to post messages for it.
//! Each `POST /messages?sessionId=..` is handled in the background and its
//! response is pushed on that session's stream only.

use super::ErrorResponse;
use crate::config::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures::Stream;
use hostmcp_mcp::protocol::JsonRpcResponse;
use serde::Deserialize;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

type SessionSender = mpsc::UnboundedSender<JsonRpcResponse>;

/// Open SSE sessions, keyed by session id.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, SessionSender>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session. It stays open until the returned guard drops.
    pub fn open(
        self: &Arc<Self>,
    ) -> (SessionGuard, mpsc::UnboundedReceiver<JsonRpcResponse>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().insert(id, tx);

        let guard = SessionGuard {
            id,
            registry: Arc::clone(self),
        };
        (guard, rx)
    }

    pub fn sender(&self, id: &Uuid) -> Option<SessionSender> {
        self.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn close(&self, id: &Uuid) {
        self.lock().remove(id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, SessionSender>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Removes its session from the registry when dropped.
pub struct SessionGuard {
    id: Uuid,
    registry: Arc<SessionRegistry>,
}

impl SessionGuard {
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.registry.close(&self.id);
        info!(session = %self.id, "SSE session closed");
    }
}

/// `GET /sse`
pub async fn open_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (guard, mut rx) = state.sessions.open();
    let endpoint = format!("/messages?sessionId={}", guard.id());
    info!(session = %guard.id(), open = state.sessions.len(), "SSE session opened");

    let stream = async_stream::stream! {
        let _guard = guard;
        yield Ok::<Event, Infallible>(Event::default().event("endpoint").data(endpoint));

        while let Some(response) = rx.recv().await {
            match Event::default().event("message").json_data(&response) {
                Ok(event) => yield Ok::<Event, Infallible>(event),
                Err(e) => warn!(error = %e, "Failed to encode SSE message"),
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// `POST /messages?sessionId=<id>`
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessageQuery>,
    body: String,
) -> Response {
    let Some(raw_id) = query.session_id else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing sessionId query parameter")),
        )
            .into_response();
    };

    let Some(tx) = Uuid::parse_str(&raw_id)
        .ok()
        .and_then(|id| state.sessions.sender(&id))
    else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::with_details(
                "Unknown session",
                format!("No open session with id {}", raw_id),
            )),
        )
            .into_response();
    };

    let mcp = state.mcp.clone();
    tokio::spawn(async move {
        if let Some(response) = mcp.handle_message(&body).await {
            if tx.send(response).is_err() {
                debug!(session = %raw_id, "Session closed before response was delivered");
            }
        }
    });

    (StatusCode::ACCEPTED, "Accepted").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_router;
    use crate::api::test_support::*;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// Read the next complete SSE event from `body`, buffering partial frames.
    async fn next_event(body: &mut Body, buf: &mut String) -> String {
        loop {
            if let Some(end) = buf.find("\n\n") {
                let event = buf[..end].to_string();
                buf.drain(..end + 2);
                return event;
            }
            let frame = tokio::time::timeout(Duration::from_secs(5), body.frame())
                .await
                .expect("timed out waiting for SSE event")
                .expect("SSE stream ended")
                .unwrap();
            if let Ok(data) = frame.into_data() {
                buf.push_str(std::str::from_utf8(&data).unwrap());
            }
        }
    }

    fn data_line(event: &str) -> &str {
        event
            .lines()
            .find_map(|line| line.strip_prefix("data: "))
            .expect("event has no data line")
    }

    async fn open_session(router: &axum::Router) -> (Body, String, String) {
        let response = router.clone().oneshot(get("/sse")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "text/event-stream"
        );

        let mut body = response.into_body();
        let mut buf = String::new();
        let event = next_event(&mut body, &mut buf).await;
        assert!(event.contains("event: endpoint"));
        let endpoint = data_line(&event).to_string();
        (body, buf, endpoint)
    }

    #[tokio::test]
    async fn test_response_is_pushed_to_its_own_session() {
        let state = test_state();
        let router = create_router(state.clone());

        let (mut body_a, mut buf_a, endpoint_a) = open_session(&router).await;
        let (mut body_b, mut buf_b, _endpoint_b) = open_session(&router).await;
        assert_eq!(state.sessions.len(), 2);
        assert!(endpoint_a.starts_with("/messages?sessionId="));

        let accepted = router
            .clone()
            .oneshot(post_json(
                &endpoint_a,
                r#"{"jsonrpc":"2.0","id":11,"method":"tools/call","params":{"name":"get_vps","arguments":{"vps_id":"42"}}}"#,
            ))
            .await
            .unwrap();
        assert_eq!(accepted.status(), StatusCode::ACCEPTED);

        let event = next_event(&mut body_a, &mut buf_a).await;
        assert!(event.contains("event: message"));
        let response: JsonRpcResponse = serde_json::from_str(data_line(&event)).unwrap();
        assert_eq!(response.id, serde_json::json!(11));
        let text = response.result().unwrap()["content"][0]["text"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(text.starts_with("VPS details: "));
        assert!(text.contains("/api/vps/v1/virtual-machines/42"));

        let other = tokio::time::timeout(
            Duration::from_millis(100),
            next_event(&mut body_b, &mut buf_b),
        )
        .await;
        assert!(other.is_err(), "session B must not see session A's response");
    }

    #[tokio::test]
    async fn test_session_handshake_over_sse() {
        let router = create_router(test_state());
        let (mut body, mut buf, endpoint) = open_session(&router).await;

        let accepted = router
            .clone()
            .oneshot(post_json(
                &endpoint,
                r#"{"jsonrpc":"2.0","id":0,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test","version":"1"}}}"#,
            ))
            .await
            .unwrap();
        assert_eq!(accepted.status(), StatusCode::ACCEPTED);

        let event = next_event(&mut body, &mut buf).await;
        let response: JsonRpcResponse = serde_json::from_str(data_line(&event)).unwrap();
        assert_eq!(response.result().unwrap()["serverInfo"]["name"], "hostmcp");
    }

    #[tokio::test]
    async fn test_dropping_stream_closes_session() {
        let state = test_state();
        let router = create_router(state.clone());

        let (body, _buf, endpoint) = open_session(&router).await;
        assert_eq!(state.sessions.len(), 1);

        drop(body);
        assert_eq!(state.sessions.len(), 0);

        let response = router
            .oneshot(post_json(&endpoint, r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_without_session_id_is_400() {
        let response = create_router(test_state())
            .oneshot(post_json("/messages", r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Missing sessionId query parameter");
    }

    #[tokio::test]
    async fn test_post_to_unknown_session_is_404() {
        let uri = format!("/messages?sessionId={}", Uuid::new_v4());
        let response = create_router(test_state())
            .oneshot(post_json(&uri, r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_registry_guard_removes_session() {
        let registry = Arc::new(SessionRegistry::new());
        let (guard, _rx) = registry.open();
        let id = guard.id();

        assert!(registry.sender(&id).is_some());
        drop(guard);
        assert!(registry.sender(&id).is_none());
        assert_eq!(registry.len(), 0);
    }
}
