//! An in-memory stand-in for the event settings resources of the
//! Instana Web REST API, served over HTTP for integration tests.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode, Uri},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

pub const API_TOKEN: &str = "test-api-token";

#[derive(Default)]
struct Inner {
    // Stored objects, keyed on their percent-encoded request path.
    objects: BTreeMap<String, Value>,
    // Log of received requests, as "METHOD /path".
    requests: Vec<String>,
}

type Shared = Arc<Mutex<Inner>>;

/// TestServer is a running mock of the Instana API.
/// The server stops when the TestServer is dropped.
pub struct TestServer {
    addr: std::net::SocketAddr,
    inner: Shared,
    _shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let inner = Shared::default();
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let resource = get(get_object).put(put_object).delete(delete_object);
        let router = Router::new()
            .route(
                "/api/events/settings/event-specifications/custom/{id}",
                resource.clone(),
            )
            .route("/api/events/settings/alertingChannels/{id}", resource)
            .with_state(inner.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test server");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    _ = shutdown_rx.await;
                })
                .await
                .expect("server error");
        });

        TestServer {
            addr,
            inner,
            _shutdown_tx: shutdown_tx,
        }
    }

    /// Get the base URL for the test server.
    pub fn base_url(&self) -> url::Url {
        format!("http://{}", self.addr).parse().expect("valid URL")
    }

    /// Fetch the object stored at `path`, if any.
    pub fn object(&self, path: &str) -> Option<Value> {
        self.inner.lock().unwrap().objects.get(path).cloned()
    }

    /// Store `object` at `path`, as if it had been created out-of-band.
    pub fn insert(&self, path: &str, object: Value) {
        self.inner
            .lock()
            .unwrap()
            .objects
            .insert(path.to_string(), object);
    }

    /// Requests received so far, as "METHOD /path".
    pub fn requests(&self) -> Vec<String> {
        self.inner.lock().unwrap().requests.clone()
    }
}

fn authorize(inner: &Shared, method: &str, headers: &HeaderMap, uri: &Uri) -> Result<(), StatusCode> {
    inner
        .lock()
        .unwrap()
        .requests
        .push(format!("{method} {}", uri.path()));

    let expect = format!("apiToken {API_TOKEN}");
    match headers.get(AUTHORIZATION) {
        Some(value) if value.as_bytes() == expect.as_bytes() => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn get_object(
    State(inner): State<Shared>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Json<Value>, StatusCode> {
    authorize(&inner, "GET", &headers, &uri)?;

    let inner = inner.lock().unwrap();
    inner
        .objects
        .get(uri.path())
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn put_object(
    State(inner): State<Shared>,
    headers: HeaderMap,
    uri: Uri,
    Json(object): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&inner, "PUT", &headers, &uri)?;

    inner
        .lock()
        .unwrap()
        .objects
        .insert(uri.path().to_string(), object.clone());
    Ok(Json(object))
}

async fn delete_object(
    State(inner): State<Shared>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<StatusCode, StatusCode> {
    authorize(&inner, "DELETE", &headers, &uri)?;

    match inner.lock().unwrap().objects.remove(uri.path()) {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(StatusCode::NOT_FOUND),
    }
}
