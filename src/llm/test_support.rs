//! In-process mock of the generation service for tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

/// Request bodies and authorization headers seen by the mock.
#[derive(Clone, Default)]
pub struct Recorded {
    pub bodies: Arc<Mutex<Vec<Value>>>,
    pub auth: Arc<Mutex<Vec<Option<String>>>>,
}

/// Serve `router` on an ephemeral port from a background runtime.
pub fn spawn_mock(router: Router) -> SocketAddr {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, router).await.unwrap();
        });
    });
    rx.recv().unwrap()
}

/// Mock whose `/api/generate` always answers `reply` with `status`.
pub fn mock_generate(reply: Value, status: StatusCode) -> (SocketAddr, Recorded) {
    let recorded = Recorded::default();
    let router = Router::new()
        .route(
            "/api/generate",
            post(
                move |State(recorded): State<Recorded>, headers: HeaderMap, Json(body): Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        recorded.bodies.lock().unwrap().push(body);
                        recorded.auth.lock().unwrap().push(
                            headers
                                .get("authorization")
                                .and_then(|v| v.to_str().ok())
                                .map(str::to_string),
                        );
                        (status, Json(reply))
                    }
                },
            ),
        )
        .route("/api/version", get(|| async { Json(json!({"version": "0.5.0"})) }))
        .with_state(recorded.clone());
    (spawn_mock(router), recorded)
}
