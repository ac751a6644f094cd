//! Client-side JSON-RPC call dispatcher
//!
//! This crate turns a local method invocation into a JSON-RPC request,
//! sends it through a pluggable [`Transport`], correlates the response
//! by request id, and converts the outcome into a typed value or a
//! typed failure.
//!
//! # Core Pieces
//!
//! - **[`Caller`]**: the dispatching pipeline (encode, send, decode,
//!   map errors, convert results)
//! - **[`MethodRegistry`]**: setup-time declarations of remote types,
//!   overloads, ignore markers and redirects; resolution is a table
//!   walk, first match wins
//! - **[`IdAllocator`]**: smallest-free-integer request ids, recycled
//!   on completion, released on every exit path
//! - **[`Transport`]**: the collaborator that actually moves bytes;
//!   [`WsTransport`] is the bundled WebSocket implementation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use remit_client::{Caller, MethodRegistry, MethodSpec, ParamType, ReturnKind, TypeSpec, WsTransport};
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

mod caller;
mod id;
mod metrics;
mod registry;
mod transport;

pub use caller::{Caller, CallerBuilder};
pub use id::{IdAllocator, IdGuard};
pub use metrics::CallerMetrics;
pub use registry::{
    CallSite, MethodDescriptor, MethodRegistry, MethodSpec, ParamType, ReturnKind, TypeSpec,
};
pub use transport::{Transport, WsTransport};
