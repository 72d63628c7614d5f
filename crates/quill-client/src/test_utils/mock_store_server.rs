// src/test_utils/mock_store_server.rs
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;

/// One request as observed by the mock server, captured before any routing
/// so tests can assert on exactly what went over the wire.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub api_key: Option<String>,
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub body: String,
}

/// A canned reply: HTTP status plus raw body text.
pub type CannedResponse = (u16, String);

#[derive(Clone)]
struct MockServerState {
    responses: Arc<Mutex<VecDeque<CannedResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockServerState {
    fn new(responses: Vec<CannedResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

fn header_value(parts: &axum::http::request::Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

async fn capture_handler(
    State(state): State<MockServerState>,
    request: Request,
) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    let recorded = RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(|q| q.to_string()),
        api_key: header_value(&parts, "x-api-key"),
        content_type: header_value(&parts, "content-type"),
        accept: header_value(&parts, "accept"),
        body: String::from_utf8_lossy(&bytes).to_string(),
    };
    log::debug!("mock store server received {} {}", recorded.method, recorded.path);
    state.requests.lock().unwrap().push(recorded);

    let canned = state.responses.lock().unwrap().pop_front();
    let (status, body_text) = match canned {
        Some(canned) => canned,
        None => {
            log::error!("mock store server ran out of responses!");
            (503, "mock store server ran out of responses".to_string())
        }
    };

    Response::builder()
        .status(StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR))
        .header("content-type", "application/json")
        .body(Body::from(body_text))
        .unwrap()
}

/// In-process stand-in for a quill content server.
///
/// Every request matches a single fallback route, is recorded, and is
/// answered with the next canned response in order, so tests control the
/// transcript completely — including deliberately malformed bodies and
/// non-2xx statuses.
pub struct MockStoreServer {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    pub recorded_requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockStoreServer {
    pub async fn start(responses: Vec<CannedResponse>) -> Self {
        let state = MockServerState::new(responses);
        let recorded_requests = state.requests.clone();

        let app = Router::new().fallback(capture_handler).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap_or_else(|e| {
            panic!("Failed to bind mock store server to 127.0.0.1:0. Error: {}", e);
        });
        let addr = listener.local_addr().unwrap();
        log::info!("mock store server listening on {}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap_or_else(|e| {
                    log::error!("mock store server error: {}", e);
                });
        });

        MockStoreServer {
            addr,
            shutdown_tx,
            recorded_requests,
        }
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub async fn shutdown(self) {
        if self.shutdown_tx.send(()).is_err() {
            log::warn!("mock store server shutdown signal already sent or receiver dropped");
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.recorded_requests.lock().unwrap().clone()
    }
}
