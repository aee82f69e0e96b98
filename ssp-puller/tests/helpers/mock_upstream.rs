//! In-process stand-in for the upstream JSON API
//!
//! Serves scripted (status, body) pairs per request path and records every
//! path it was asked for. Unscripted paths get the default status.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::Router;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct MockState {
    routes: Arc<Mutex<HashMap<String, (StatusCode, String)>>>,
    hits: Arc<Mutex<Vec<String>>>,
    default_status: StatusCode,
}

pub struct MockUpstream {
    addr: SocketAddr,
    state: MockState,
}

impl MockUpstream {
    /// Bind to an ephemeral port and serve in the background
    pub async fn start(default_status: StatusCode) -> Self {
        let state = MockState {
            routes: Arc::new(Mutex::new(HashMap::new())),
            hits: Arc::new(Mutex::new(Vec::new())),
            default_status,
        };

        let app = Router::new().fallback(respond).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// `host:port` to configure as the upstream host
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    pub fn script(&self, path: &str, status: StatusCode, body: &str) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.to_string()));
    }

    pub fn hits(&self) -> Vec<String> {
        self.state.hits.lock().unwrap().clone()
    }

    pub fn hit_count(&self) -> usize {
        self.state.hits.lock().unwrap().len()
    }
}

async fn respond(State(state): State<MockState>, uri: Uri) -> (StatusCode, String) {
    let path = uri.path().to_string();
    state.hits.lock().unwrap().push(path.clone());

    let scripted = state.routes.lock().unwrap().get(&path).cloned();
    match scripted {
        Some(response) => response,
        None if state.default_status == StatusCode::OK => (StatusCode::OK, "{}".to_string()),
        None => (
            state.default_status,
            format!(r#"{{"error":{{"code":{}}}}}"#, state.default_status.as_u16()),
        ),
    }
}
