//! HTTP collectors backed by a `prometheus::Registry`.
//!
//! The three collectors are created and registered once, when `HttpMetrics`
//! is constructed. The registry handle is owned by the caller (or created
//! fresh per instance); nothing here touches the process-global default
//! registry. Per-label atomicity is the collectors' own concern.

use std::time::Duration;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntGaugeVec, Opts, Registry, TextEncoder,
};

use muxprom_core::error::{MuxPromError, Result};

use crate::config::MuxPromConfig;

const ROUTE: &str = "route";
const METHOD: &str = "method";
const HTTP_STATUS: &str = "http_status";

/// Content type of the text exposition format.
pub const EXPOSITION_CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

fn registry_err(what: &str) -> impl FnOnce(prometheus::Error) -> MuxPromError + '_ {
    move |e| MuxPromError::Registry(format!("{what}: {e}"))
}

#[derive(Clone)]
pub struct HttpMetrics {
    registry: Registry,
    in_flight: IntGaugeVec,
    duration: HistogramVec,
    response_size: HistogramVec,
}

impl HttpMetrics {
    /// Build the collectors from `cfg` and register them into `registry`.
    ///
    /// Public entry point in its own right: `cfg` is validated here, before
    /// anything is registered. Fails if the config is invalid or a collector
    /// with the same name is already registered.
    pub fn new(cfg: &MuxPromConfig, registry: Registry) -> Result<Self> {
        // Child histograms are built lazily; bad buckets must fail here, not per request.
        cfg.validate()?;

        let in_flight = IntGaugeVec::new(
            Opts::new("http_requests_inflight", "HTTP requests in-flight")
                .namespace(cfg.namespace.as_str()),
            &[ROUTE, METHOD],
        )
        .map_err(registry_err("http_requests_inflight"))?;

        let duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration seconds",
            )
            .namespace(cfg.namespace.as_str())
            .buckets(cfg.duration_buckets.clone()),
            &[ROUTE, METHOD, HTTP_STATUS],
        )
        .map_err(registry_err("http_request_duration_seconds"))?;

        let response_size = HistogramVec::new(
            HistogramOpts::new("http_response_size", "HTTP response size in bytes")
                .namespace(cfg.namespace.as_str())
                .buckets(cfg.response_size_buckets.clone()),
            &[ROUTE, METHOD, HTTP_STATUS],
        )
        .map_err(registry_err("http_response_size"))?;

        registry
            .register(Box::new(in_flight.clone()))
            .map_err(registry_err("register http_requests_inflight"))?;
        registry
            .register(Box::new(duration.clone()))
            .map_err(registry_err("register http_request_duration_seconds"))?;
        registry
            .register(Box::new(response_size.clone()))
            .map_err(registry_err("register http_response_size"))?;

        tracing::info!(namespace = %cfg.namespace, "http collectors registered");

        Ok(Self {
            registry,
            in_flight,
            duration,
            response_size,
        })
    }

    /// Remove the three collectors from the registry again.
    pub(crate) fn unregister(&self) {
        let _ = self.registry.unregister(Box::new(self.in_flight.clone()));
        let _ = self.registry.unregister(Box::new(self.duration.clone()));
        let _ = self.registry.unregister(Box::new(self.response_size.clone()));
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn inc_in_flight(&self, route: &str, method: &str) {
        self.in_flight.with_label_values(&[route, method]).inc();
    }

    pub fn dec_in_flight(&self, route: &str, method: &str) {
        self.in_flight.with_label_values(&[route, method]).dec();
    }

    /// Current in-flight value for a (route, method) pair.
    pub fn in_flight(&self, route: &str, method: &str) -> i64 {
        self.in_flight.with_label_values(&[route, method]).get()
    }

    /// Record one finished request.
    pub fn observe(&self, route: &str, method: &str, status: &str, elapsed: Duration, bytes: u64) {
        let labels = [route, method, status];
        self.duration
            .with_label_values(&labels)
            .observe(elapsed.as_secs_f64());
        self.response_size
            .with_label_values(&labels)
            .observe(bytes as f64);
    }

    /// Render every collector in the registry in text exposition format.
    pub fn render(&self) -> Result<String> {
        let families = self.registry.gather();
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(&families, &mut buf)
            .map_err(registry_err("encode"))?;
        String::from_utf8(buf)
            .map_err(|e| MuxPromError::Registry(format!("exposition is not utf-8: {e}")))
    }
}
