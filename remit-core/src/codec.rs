//! Codec for request and response envelopes
//!
//! Thin wrappers over serde_json that map encode/decode failures into
//! the dispatcher's `Serialization` error kind. Keeping this in one
//! place means the pipeline never touches serde errors directly.
//!
//! # Examples
//!
//! ```rust
//! use remit_core::{codec, JsonRpcRequest};
//! use serde_json::json;
//!
//! let request = JsonRpcRequest::new("Calculator.add", vec![json!(2), json!(3)], 1);
//! let wire = codec::encode_request(&request).unwrap();
//! assert_eq!(wire, r#"{"id":1,"method":"Calculator.add","params":[2,3]}"#);
//! ```

use crate::error::{Error, Result};
use crate::types::{JsonRpcRequest, JsonRpcResponse};
use serde::{Deserialize, Serialize};

/// Encode any serializable message to a JSON string
///
/// # Errors
///
/// Returns `Error::Serialization` if the message cannot be serialized.
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decode a JSON string to a specific type
///
/// # Errors
///
/// Returns `Error::Serialization` if the JSON doesn't match the
/// expected type.
pub fn decode_as<'de, T: Deserialize<'de>>(data: &'de str) -> Result<T> {
    serde_json::from_str(data).map_err(|e| Error::Serialization(e.to_string()))
}

/// Encode a request envelope to JSON
pub fn encode_request(req: &JsonRpcRequest) -> Result<String> {
    encode(req)
}

/// Decode a response envelope from JSON
pub fn decode_response(data: &str) -> Result<JsonRpcResponse> {
    decode_as(data)
}
