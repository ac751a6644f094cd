//! Dispatcher metrics definitions
//!
//! OpenTelemetry instruments for monitoring the call path. Recorded
//! automatically when observability is enabled via
//! `CallerBuilder::with_observability()` and exported to the configured
//! OTLP backend.
//!
//! # Metrics Collected
//!
//! - **calls_total**: dispatched calls, by method and outcome (counter)
//! - **call_duration**: round-trip latency distribution (histogram)
//! - **errors_total**: failures by error kind (counter)
//! - **ids_in_flight**: currently allocated request ids (gauge)

use opentelemetry::{
    global,
    metrics::{Counter, Gauge, Histogram, Meter},
    KeyValue,
};

/// Caller metrics for monitoring
pub struct CallerMetrics {
    /// Total number of dispatched calls
    pub calls_total: Counter<u64>,
    /// Call round-trip duration in seconds
    pub call_duration: Histogram<f64>,
    /// Total number of failures, by kind
    pub errors_total: Counter<u64>,
    /// Request ids currently in flight
    pub ids_in_flight: Gauge<i64>,
}

impl CallerMetrics {
    /// Create a new CallerMetrics instance
    pub fn new(service_name: impl Into<String>) -> Self {
        let name: &'static str = Box::leak(service_name.into().into_boxed_str());
        let meter = global::meter(name);
        Self::new_with_meter(&meter)
    }

    /// Create a new CallerMetrics instance with a custom meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            calls_total: meter
                .u64_counter("remit.caller.calls.total")
                .with_description("Total number of dispatched calls")
                .build(),
            call_duration: meter
                .f64_histogram("remit.caller.call.duration")
                .with_description("Call round-trip duration in seconds")
                .build(),
            errors_total: meter
                .u64_counter("remit.caller.errors.total")
                .with_description("Total number of failed calls by error kind")
                .build(),
            ids_in_flight: meter
                .i64_gauge("remit.caller.ids.in_flight")
                .with_description("Request ids currently allocated")
                .build(),
        }
    }

    /// Record one dispatched call and its duration
    pub fn record_call(&self, method: &str, outcome: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("outcome", outcome.to_string()),
        ];
        self.calls_total.add(1, attributes);
        self.call_duration.record(duration_secs, attributes);
    }

    /// Record a failure by kind
    pub fn record_error(&self, kind: &str) {
        let attributes = &[KeyValue::new("kind", kind.to_string())];
        self.errors_total.add(1, attributes);
    }

    /// Update the in-flight id gauge
    pub fn record_in_flight(&self, count: i64) {
        self.ids_in_flight.record(count, &[]);
    }
}
