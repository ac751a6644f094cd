//! Common test utilities for remit-client integration tests
//!
//! Provides a scriptable mock transport and wire-shape helpers so the
//! dispatcher can be exercised without a real server.

use async_trait::async_trait;
use remit_client::Transport;
use remit_core::TransportResult;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

type HandlerFuture = Pin<Box<dyn Future<Output = TransportResult<Option<String>>> + Send>>;

/// Mock transport driven by a handler function
///
/// The handler receives each serialized request and decides the raw
/// response body (or failure). Every request is also recorded so tests
/// can assert on the exact wire text.
pub struct MockTransport {
    handler: Box<dyn Fn(String) -> HandlerFuture + Send + Sync>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Create a mock transport with a custom handler
    pub fn with_handler<F, Fut>(handler: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = TransportResult<Option<String>>> + Send + 'static,
    {
        Self {
            handler: Box::new(move |req| Box::pin(handler(req))),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock transport that returns the same body every time
    #[allow(dead_code)]
    pub fn fixed(body: Option<String>) -> Self {
        Self::with_handler(move |_| {
            let body = body.clone();
            async move { Ok(body) }
        })
    }

    /// Requests recorded so far, in send order
    #[allow(dead_code)]
    pub fn sent(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &str) -> TransportResult<Option<String>> {
        self.requests.lock().unwrap().push(request.to_string());
        (self.handler)(request.to_string()).await
    }
}

/// Parse the id out of a serialized request
#[allow(dead_code)]
pub fn request_id(request: &str) -> i64 {
    let value: serde_json::Value = serde_json::from_str(request).unwrap();
    value["id"].as_i64().unwrap()
}

/// Build a success response body
#[allow(dead_code)]
pub fn mock_response(id: i64, result: serde_json::Value) -> String {
    serde_json::json!({
        "id": id,
        "result": result
    })
    .to_string()
}

/// Build an error response body
#[allow(dead_code)]
pub fn mock_error_response(id: i64, code: i32, message: &str) -> String {
    serde_json::json!({
        "id": id,
        "error": {
            "code": code,
            "message": message,
            "data": null
        }
    })
    .to_string()
}
