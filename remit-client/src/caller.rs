//! The call dispatcher
//!
//! [`Caller`] turns a local invocation into a request envelope, sends
//! it through the configured [`Transport`](crate::Transport), and turns
//! the reply back into a typed value or a typed failure.
//!
//! # Call Lifecycle
//!
//! 1. **Resolve** (for the registry entry points): pick the remote
//!    method and its declared return type
//! 2. **Lease id**: smallest free positive integer
//! 3. **Encode**: build and serialize the request envelope
//! 4. **Send**: exactly one transport invocation, no retries
//! 5. **Decode**: absent body means fire-and-forget; otherwise a
//!    response envelope with either a result or an error object
//! 6. **Map**: error objects become structured `Protocol` failures;
//!    results are converted to the caller's expected type
//! 7. **Release**: the id lease drops on every exit path
//!
//! The call blocks (awaits) until the transport produces an outcome;
//! there is no internal timeout and no cancellation once the send has
//! started.
//!
//! # Entry Points
//!
//! - [`Caller::call`] / [`Caller::call_value`]: low-level, the caller
//!   supplies the wire method name directly
//! - [`Caller::invoke`]: explicit target type + method, resolved
//!   through the registry
//! - [`Caller::invoke_from`]: implicit dispatch from a [`CallSite`],
//!   honoring configured redirects
//!
//! # Cloning
//!
//! `Caller` is cheaply cloneable; clones share the transport, the
//! registry, and the id allocator, so concurrent calls from any clone
//! never collide on an id.

use crate::id::IdAllocator;
use crate::metrics::CallerMetrics;
use crate::registry::{CallSite, MethodDescriptor, MethodRegistry, ReturnKind};
use crate::transport::Transport;
use remit_core::{codec, Error, JsonRpcRequest, RemoteError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Client-side JSON-RPC call dispatcher
#[derive(Clone)]
pub struct Caller {
    transport: Arc<dyn Transport>,
    registry: Arc<MethodRegistry>,
    ids: IdAllocator,
    metrics: Option<Arc<CallerMetrics>>,
}

impl Caller {
    /// Start building a caller over the given transport
    pub fn builder(transport: impl Transport + 'static) -> CallerBuilder {
        CallerBuilder::new(transport)
    }

    /// Ids currently in flight, for tests and introspection
    pub fn in_flight(&self) -> usize {
        self.ids.in_flight()
    }

    /// Dispatch a call and return the raw result payload
    ///
    /// This is the pipeline every entry point funnels into. Returns
    /// `Ok(None)` when the transport produced no reply (notification
    /// semantics) or the reply carried no result.
    #[tracing::instrument(skip(self, params), fields(method = %method))]
    pub async fn call_value(&self, method: &str, params: Vec<Value>) -> Result<Option<Value>> {
        let start = std::time::Instant::now();
        let lease = self.ids.lease();
        if let Some(m) = &self.metrics {
            m.record_in_flight(self.ids.in_flight() as i64);
        }

        let outcome = self.round_trip(lease.id(), method, params).await;

        // The lease also drops on panic; dropping it here keeps the
        // in-flight gauge accurate for the normal paths
        drop(lease);
        if let Some(m) = &self.metrics {
            m.record_in_flight(self.ids.in_flight() as i64);
            let duration = start.elapsed().as_secs_f64();
            match &outcome {
                Ok(_) => m.record_call(method, "success", duration),
                Err(e) => {
                    m.record_call(method, "error", duration);
                    m.record_error(e.kind());
                }
            }
        }

        match &outcome {
            Ok(Some(_)) => tracing::debug!("Call completed with result"),
            Ok(None) => tracing::debug!("Call completed with no reply"),
            Err(e) => tracing::error!(error = %e, "Call failed"),
        }
        outcome
    }

    /// One serialize/send/deserialize round trip
    async fn round_trip(&self, id: i64, method: &str, params: Vec<Value>) -> Result<Option<Value>> {
        let request = JsonRpcRequest::new(method, params, id);
        let request_text = codec::encode_request(&request)?;

        // TransportError converts via From and stays unwrapped
        let response_text = self.transport.send(&request_text).await?;

        let Some(body) = response_text else {
            // No reply: fire-and-forget, not an error
            return Ok(None);
        };

        let response = codec::decode_response(&body)?;
        if let Some(error) = response.error {
            return Err(Error::Protocol(RemoteError::from_wire(error)));
        }
        Ok(response.result)
    }

    /// Dispatch a call and convert the result to the expected type
    ///
    /// The low-level typed entry point: the caller supplies the wire
    /// method name and declares the return type through `R`. Returns
    /// `Ok(None)` for calls that produce no reply.
    pub async fn call<R>(&self, method: &str, params: Vec<Value>) -> Result<Option<R>>
    where
        R: DeserializeOwned,
    {
        let raw = self.call_value(method, params).await?;
        raw.map(convert).transpose()
    }

    /// Resolve an explicit target type and method, then dispatch
    ///
    /// The registry picks the overload (first match in declaration
    /// order) and its declared return type. When that type is the "no
    /// value" kind the raw result is discarded without conversion.
    pub async fn invoke<R>(
        &self,
        target_type: &str,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Option<R>>
    where
        R: DeserializeOwned,
    {
        let descriptor = self.registry.resolve(target_type, method, &params)?;
        self.dispatch(descriptor, params).await
    }

    /// Resolve from an explicit caller descriptor, then dispatch
    ///
    /// Applies the registry's redirect table to the call site's type
    /// before resolution, so a local facade type dispatches under its
    /// remote interface's name.
    pub async fn invoke_from<R>(&self, site: &CallSite, params: Vec<Value>) -> Result<Option<R>>
    where
        R: DeserializeOwned,
    {
        let descriptor = self.registry.resolve_from_caller(site, &params)?;
        self.dispatch(descriptor, params).await
    }

    async fn dispatch<R>(&self, descriptor: MethodDescriptor, params: Vec<Value>) -> Result<Option<R>>
    where
        R: DeserializeOwned,
    {
        let raw = self.call_value(&descriptor.qualified_name, params).await?;
        match descriptor.return_kind {
            ReturnKind::Unit => Ok(None),
            ReturnKind::Value => raw.map(convert).transpose(),
        }
    }
}

/// Convert a raw result payload into the caller's expected type
fn convert<R: DeserializeOwned>(value: Value) -> Result<R> {
    serde_json::from_value(value).map_err(|e| Error::Serialization(e.to_string()))
}

/// Builder for configuring and creating a [`Caller`]
///
/// # Examples
///
/// ```rust,no_run
/// use remit_client::{Caller, MethodRegistry, WsTransport};
///
/// # async fn example() -> remit_core::Result<()> {
/// let transport = WsTransport::connect("ws://localhost:8080").await?;
/// let caller = Caller::builder(transport)
///     .registry(MethodRegistry::new())
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct CallerBuilder {
    transport: Arc<dyn Transport>,
    registry: MethodRegistry,
    observability_config: Option<remit_core::ObservabilityConfig>,
    service_name: Option<String>,
}

impl CallerBuilder {
    /// Create a builder over the given transport
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            registry: MethodRegistry::new(),
            observability_config: None,
            service_name: None,
        }
    }

    /// Set the method registry used by the resolved entry points
    pub fn registry(mut self, registry: MethodRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Enable OpenTelemetry observability with custom configuration
    pub fn with_observability(mut self, config: remit_core::ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self
    }

    /// Enable OpenTelemetry observability with default configuration
    pub fn with_default_observability(mut self) -> Self {
        self.observability_config = Some(remit_core::ObservabilityConfig::default());
        self
    }

    /// Set service name for observability (used if observability is enabled)
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Build the caller
    ///
    /// # Errors
    ///
    /// `Error::Internal` when observability was requested but its
    /// initialization fails.
    pub fn build(self) -> Result<Caller> {
        let metrics = if let Some(mut config) = self.observability_config {
            if let Some(name) = self.service_name {
                config.service_name = name;
            }

            remit_core::init_observability(config.clone())
                .map_err(|e| Error::Internal(format!("Failed to initialize observability: {e}")))?;

            Some(Arc::new(CallerMetrics::new(&config.service_name)))
        } else {
            None
        };

        Ok(Caller {
            transport: self.transport,
            registry: Arc::new(self.registry),
            ids: IdAllocator::new(),
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{MethodSpec, TypeSpec};
    use async_trait::async_trait;
    use remit_core::TransportResult;
    use serde_json::json;

    /// Replies to every request with a canned body
    struct FixedTransport(Option<String>);

    #[async_trait]
    impl Transport for FixedTransport {
        async fn send(&self, _request: &str) -> TransportResult<Option<String>> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_call_converts_result() {
        let caller = Caller::builder(FixedTransport(Some(r#"{"id":1,"result":5}"#.into())))
            .build()
            .unwrap();
        let result: Option<i64> = caller.call("add", vec![json!(2), json!(3)]).await.unwrap();
        assert_eq!(result, Some(5));
    }

    #[tokio::test]
    async fn test_call_no_reply_is_none() {
        let caller = Caller::builder(FixedTransport(None)).build().unwrap();
        let result: Option<Value> = caller.call("log", vec![json!("hi")]).await.unwrap();
        assert_eq!(result, None);
        assert_eq!(caller.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_invoke_unit_return_skips_conversion() {
        // The reply carries a result the declared return type says to ignore
        let registry = MethodRegistry::new().register(
            TypeSpec::new("Store").method(MethodSpec::new(
                "clear",
                [],
                ReturnKind::Unit,
            )),
        );
        let caller = Caller::builder(FixedTransport(Some(r#"{"id":1,"result":"ok"}"#.into())))
            .registry(registry)
            .build()
            .unwrap();
        let result: Option<i64> = caller.invoke("Store", "clear", vec![]).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_resolution_failure_skips_transport() {
        struct PanicTransport;

        #[async_trait]
        impl Transport for PanicTransport {
            async fn send(&self, _request: &str) -> TransportResult<Option<String>> {
                panic!("transport must not be reached");
            }
        }

        let caller = Caller::builder(PanicTransport).build().unwrap();
        let result: Result<Option<Value>> = caller.invoke("Nope", "add", vec![]).await;
        assert!(matches!(result, Err(Error::Resolution(_))));
        assert_eq!(caller.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_result_conversion_failure_is_serialization_error() {
        let caller = Caller::builder(FixedTransport(Some(r#"{"id":1,"result":"text"}"#.into())))
            .build()
            .unwrap();
        let result: Result<Option<i64>> = caller.call("add", vec![]).await;
        assert!(matches!(result, Err(Error::Serialization(_))));
        assert_eq!(caller.in_flight(), 0);
    }

    #[test]
    fn test_builder_defaults() {
        let builder = CallerBuilder::new(FixedTransport(None));
        assert!(builder.observability_config.is_none());
        assert!(builder.service_name.is_none());
    }

    #[test]
    fn test_builder_service_name() {
        let builder = CallerBuilder::new(FixedTransport(None)).service_name("my-caller");
        assert_eq!(builder.service_name, Some("my-caller".to_string()));
    }
}
