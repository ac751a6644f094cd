//! Core envelope types, codec and error taxonomy for remit
//!
//! This crate provides the foundation the dispatcher is built on:
//!
//! - **Types**: the request/response wire envelopes
//! - **Codec**: serialization and deserialization helpers
//! - **Error handling**: the four-kind failure taxonomy and the error
//!   mapper that turns wire error objects into structured failures
//! - **Observability**: optional OpenTelemetry bootstrap
//!
//! The crate is transport-agnostic: it defines what crosses the wire,
//! not how. The `remit-client` crate builds the dispatching pipeline on
//! top of this foundation.
//!
//! # Example
//!
//! ```rust
//! use remit_core::{codec, JsonRpcRequest};
//! use serde_json::json;
//!
//! let request = JsonRpcRequest::new("Calculator.add", vec![json!(2), json!(3)], 1);
//! let wire = codec::encode_request(&request).unwrap();
//! assert_eq!(wire, r#"{"id":1,"method":"Calculator.add","params":[2,3]}"#);
//! ```

pub mod codec;
pub mod error;
pub mod observability;
pub mod types;

// Re-export the most commonly used items so users can write
// `remit_core::Error` instead of `remit_core::error::Error`
pub use error::{
    Error, ErrorDetail, JsonRpcErrorData, RemoteError, Result, TransportError, TransportResult,
};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use types::{JsonRpcRequest, JsonRpcResponse};
