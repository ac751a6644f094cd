//! Error taxonomy for remit
//!
//! Four failure kinds are surfaced to callers, all through the same
//! `Result` channel:
//!
//! - **Resolution**: the target type or method could not be determined
//!   (unknown type, no matching overload). One kind at the API boundary;
//!   callers only learn that the call could not be dispatched.
//! - **Serialization**: the request could not be encoded, the response
//!   could not be decoded, or a payload could not be converted to its
//!   expected type.
//! - **Protocol**: the server returned an error object. Carries the
//!   code, message and converted data as a [`RemoteError`].
//! - **Transport**: the transport failed. Propagated unchanged, never
//!   wrapped in another kind.
//!
//! No retries are performed anywhere; every failure reaches the caller
//! synchronously and the request id is released on every path.
//!
//! # Wire Errors vs Structured Errors
//!
//! [`JsonRpcErrorData`] is the error object exactly as it appears on the
//! wire. [`RemoteError`] is the structured failure the dispatcher hands
//! back after running the error mapper over it: the `data` payload is
//! converted with the same serde machinery as normal results, and if
//! that conversion fails the raw value is still carried along.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for remit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for transport implementations
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Dispatcher error type
///
/// Uses `thiserror` for `std::error::Error` and message formatting.
/// Transport failures convert via `#[from]` so transports stay
/// unwrapped; everything else is constructed explicitly on the call
/// path.
#[derive(Debug, Error)]
pub enum Error {
    /// Target type or method could not be determined
    ///
    /// Covers unknown target types, no matching overload, and any other
    /// lookup failure. Deliberately a single kind: callers only see
    /// "this call could not be dispatched".
    #[error("resolution failed: {0}")]
    Resolution(String),

    /// Encode, decode, or type-conversion failure
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The server returned an error object
    #[error("remote call failed: {0}")]
    Protocol(#[from] RemoteError),

    /// Transport-level failure, passed through unchanged
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Dispatcher bootstrap or invariant failure
    ///
    /// Not part of the call-path taxonomy; used for construction-time
    /// problems such as observability initialization.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Short stable label for metrics and logging
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Resolution(_) => "resolution",
            Error::Serialization(_) => "serialization",
            Error::Protocol(_) => "protocol",
            Error::Transport(_) => "transport",
            Error::Internal(_) => "internal",
        }
    }
}

/// Transport-level error
///
/// Produced by transport implementations and surfaced to callers as
/// [`Error::Transport`] without rewrapping.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Low-level I/O failure
    #[error("transport IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying connection is no longer usable
    #[error("transport connection closed")]
    Closed,

    /// Any other transport-specific failure
    #[error("transport error: {0}")]
    Other(String),
}

/// JSON-RPC error object as it appears on the wire
///
/// Appears in the `error` field of a response. Standard codes:
/// - `-32700`: Parse error
/// - `-32600`: Invalid Request
/// - `-32601`: Method not found
/// - `-32602`: Invalid params
/// - `-32603`: Internal error
/// - `-32000 to -32099`: Server error (implementation-defined)
///
/// # Examples
///
/// ```rust
/// use remit_core::JsonRpcErrorData;
///
/// let error = JsonRpcErrorData::method_not_found("Calculator.add");
/// assert_eq!(error.code, -32601);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorData {
    /// Numeric error code
    pub code: i32,
    /// Human-readable error message
    pub message: String,
    /// Optional structured payload with more context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcErrorData {
    /// Create an error object with code and message
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create an error object with an additional data payload
    pub fn with_data(code: i32, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Parse error (-32700)
    pub fn parse_error() -> Self {
        Self::new(-32700, "Parse error")
    }

    /// Invalid request (-32600)
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(-32600, msg)
    }

    /// Method not found (-32601)
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(-32601, format!("Method not found: {}", method.into()))
    }

    /// Invalid params (-32602)
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::new(-32602, msg)
    }

    /// Internal error (-32603)
    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::new(-32603, msg)
    }
}

impl std::fmt::Display for JsonRpcErrorData {
    /// Formats as "[code] message" for log readability
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for JsonRpcErrorData {}

/// Structured detail carried inside an error object's `data` payload
///
/// Brokers that serialize server-side exceptions use this shape: a
/// message plus optional stack trace lines. The error mapper converts
/// `data` into this with the same machinery used for normal results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Server-side failure message
    pub message: String,
    /// Stack trace lines, when the server includes them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<String>,
}

/// Structured remote failure produced by the error mapper
///
/// Preserves the wire error's `code` and `message`, the converted
/// `data` (when it matches [`ErrorDetail`]), and the raw `data` value
/// regardless, so nothing the server sent is lost.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct RemoteError {
    /// Error code from the wire object
    pub code: i32,
    /// Error message from the wire object
    pub message: String,
    /// Converted `data` payload, when conversion succeeded
    pub detail: Option<ErrorDetail>,
    /// Raw `data` payload as received
    pub data: Option<serde_json::Value>,
}

impl RemoteError {
    /// Map a wire error object into a structured failure
    ///
    /// The `data` payload is converted into [`ErrorDetail`] using the
    /// same conversion machinery as normal results. When that conversion
    /// fails the result is a generic protocol error that still carries
    /// the raw value, with `detail` left empty.
    pub fn from_wire(err: JsonRpcErrorData) -> Self {
        let detail = err
            .data
            .clone()
            .and_then(|value| serde_json::from_value::<ErrorDetail>(value).ok());
        Self {
            code: err.code,
            message: err.message,
            detail,
            data: err.data,
        }
    }
}
