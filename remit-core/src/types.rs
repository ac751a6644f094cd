//! Wire envelope types for the remit dispatcher
//!
//! This module defines the three JSON shapes that cross the transport:
//! requests, responses, and error objects. The dialect is JSON-RPC 2.0
//! style but deliberately minimal, matching the broker this client was
//! written against:
//!
//! - There is no `jsonrpc` version field on either envelope.
//! - Request `params` are always a positional array, present even when
//!   empty.
//! - Request ids are small positive integers handed out by the caller's
//!   id allocator and recycled once the call completes.
//!
//! # Wire Layout
//!
//! ```json
//! {"id": 1, "method": "Calculator.add", "params": [2, 3]}
//! {"id": 1, "result": 5}
//! {"id": 1, "error": {"code": -32601, "message": "Method not found", "data": null}}
//! ```
//!
//! A transport may also return no body at all, which the pipeline treats
//! as notification semantics (no result, no error).

use crate::error::JsonRpcErrorData;
use serde::{Deserialize, Serialize};

/// JSON-RPC request envelope
///
/// A request names the fully-qualified remote method and carries its
/// arguments as a positional array. The `id` correlates the eventual
/// response; it is unique among all requests currently in flight on one
/// dispatcher instance.
///
/// # Examples
///
/// ```rust
/// use remit_core::JsonRpcRequest;
/// use serde_json::json;
///
/// let req = JsonRpcRequest::new("Calculator.add", vec![json!(2), json!(3)], 1);
/// let wire = serde_json::to_string(&req).unwrap();
/// assert_eq!(wire, r#"{"id":1,"method":"Calculator.add","params":[2,3]}"#);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Correlation identifier, unique among in-flight requests
    pub id: i64,
    /// Fully-qualified remote method name (`"<type>.<method>"`)
    pub method: String,
    /// Positional arguments; serialized even when empty
    pub params: Vec<serde_json::Value>,
}

impl JsonRpcRequest {
    /// Create a new request envelope
    ///
    /// # Arguments
    ///
    /// * `method` - Fully-qualified remote method name
    /// * `params` - Positional arguments (empty vec for no-arg calls)
    /// * `id` - Correlation id from the allocator
    pub fn new(method: impl Into<String>, params: Vec<serde_json::Value>, id: i64) -> Self {
        Self {
            id,
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC response envelope
///
/// Exactly one of `result`/`error` is present on a reply that carries an
/// id. A transport that returns no body at all never produces this type;
/// the pipeline short-circuits before decoding.
///
/// # Examples
///
/// ```rust
/// use remit_core::JsonRpcResponse;
///
/// let resp: JsonRpcResponse = serde_json::from_str(r#"{"id":1,"result":5}"#).unwrap();
/// assert!(resp.is_success());
/// assert_eq!(resp.result, Some(serde_json::json!(5)));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Correlation id echoed from the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Result payload, present only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Error object, present only on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorData>,
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(result: serde_json::Value, id: i64) -> Self {
        Self {
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(error: JsonRpcErrorData, id: i64) -> Self {
        Self {
            id: Some(id),
            result: None,
            error: Some(error),
        }
    }

    /// Check if the response carries a result
    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }

    /// Check if the response carries an error object
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
