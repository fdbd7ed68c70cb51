#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use reelbook_api::config::ServerConfig;
use reelbook_api::router::build_app_router;
use reelbook_api::state::AppState;
use reelbook_db::DataStore;
use reelbook_textgen::{TextGenError, TextGenerator};
use tempfile::TempDir;
use tower::ServiceExt;

/// Text generator that records prompts and replies with a fixed answer.
#[derive(Default)]
pub struct StubTextGen {
    pub prompts: Mutex<Vec<String>>,
    pub fail: bool,
}

impl StubTextGen {
    pub fn failing() -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl TextGenerator for StubTextGen {
    async fn complete(&self, prompt: &str) -> Result<String, TextGenError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(TextGenError::ApiError {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(format!("stub reply ({} chars)", prompt.len()))
    }
}

/// Build a test `ServerConfig` whose directories live inside `root`.
pub fn test_config(root: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_dir: root.path().join("data"),
        upload_dir: root.path().join("uploads"),
        assets_dir: root.path().join("assets"),
        max_upload_bytes: 10 * 1024 * 1024,
        max_datasets: 2,
    }
}

/// A router over a fresh temporary data directory.
///
/// The returned `TempDir` must outlive the router.
pub struct TestApp {
    pub root: TempDir,
    pub textgen: Arc<StubTextGen>,
    state: AppState,
    config: ServerConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_textgen(StubTextGen::default())
    }

    pub fn with_textgen(textgen: StubTextGen) -> Self {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(&root);
        let store = DataStore::open(&config.data_dir).unwrap();
        let textgen = Arc::new(textgen);
        let state = AppState::new(store, config.clone(), textgen.clone());
        Self {
            root,
            textgen,
            state,
            config,
        }
    }

    /// The full application router, sharing state across calls.
    pub fn router(&self) -> Router {
        build_app_router(self.state.clone(), &self.config)
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "PUT", uri, body).await
}

async fn send_json(app: Router, method: &str, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// One part of a multipart body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    /// field name, file name, content type, bytes
    File(&'a str, &'a str, Option<&'a str>, &'a [u8]),
}

const BOUNDARY: &str = "reelbook-test-boundary";

pub async fn post_multipart(app: Router, uri: &str, parts: &[Part<'_>]) -> Response<Body> {
    let mut body: Vec<u8> = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File(name, file_name, content_type, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
                    )
                    .as_bytes(),
                );
                if let Some(ct) = content_type {
                    body.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
                }
                body.extend_from_slice(b"\r\n");
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}
