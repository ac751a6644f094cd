//! remit - a client-side JSON-RPC call dispatcher
//!
//! This is the main convenience crate that re-exports the remit
//! sub-crates. Use it if you want a single dependency.
//!
//! # Architecture
//!
//! remit is organized into modular crates:
//!
//! - **remit-core**: wire envelope types, codec, error taxonomy,
//!   observability bootstrap
//! - **remit-client**: the dispatcher - id allocation, method
//!   resolution, the call pipeline, pluggable transports
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use remit::{Caller, MethodRegistry, MethodSpec, ParamType, ReturnKind, TypeSpec, WsTransport};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = MethodRegistry::new().register(
//!         TypeSpec::new("Calculator").method(MethodSpec::new(
//!             "add",
//!             [ParamType::Number, ParamType::Number],
//!             ReturnKind::Value,
//!         )),
//!     );
//!
//!     let transport = WsTransport::connect("ws://localhost:8080").await?;
//!     let caller = Caller::builder(transport).registry(registry).build()?;
//!
//!     let sum: Option<i64> = caller.invoke("Calculator", "add", vec![json!(2), json!(3)]).await?;
//!     println!("sum = {sum:?}");
//!     Ok(())
//! }
//! ```

// Re-export all public APIs from sub-crates
// This allows users to access everything through the `remit::` prefix
pub use remit_client as client;
pub use remit_core as core;

// Convenience re-exports of the most commonly used types
pub use remit_client::{
    CallSite, Caller, CallerBuilder, MethodRegistry, MethodSpec, ParamType, ReturnKind, Transport,
    TypeSpec, WsTransport,
};
pub use remit_core::{Error, RemoteError, Result, TransportError};
