//! Construction: collectors, scrape route and instrumentation.
//!
//! ```ignore
//! let app = MuxProm::builder()
//!     .router(Router::new().route("/hello", get(hello)))
//!     .namespace("shop")
//!     .build()?
//!     .instrument();
//! ```

use std::panic::{self, AssertUnwindSafe};

use axum::{
    extract::State,
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use prometheus::Registry;

use muxprom_core::error::{MuxPromError, Result};

use crate::config::MuxPromConfig;
use crate::middleware::track_http_metrics;
use crate::obs::{HttpMetrics, EXPOSITION_CONTENT_TYPE};

/// Collects overrides before any collector exists.
pub struct MuxPromBuilder<S = ()> {
    config: MuxPromConfig,
    router: Option<Router<S>>,
    registry: Option<Registry>,
}

impl<S> Default for MuxPromBuilder<S> {
    fn default() -> Self {
        Self {
            config: MuxPromConfig::default(),
            router: None,
            registry: None,
        }
    }
}

impl<S> MuxPromBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every setting at once, e.g. with a loaded config file section.
    pub fn config(mut self, config: MuxPromConfig) -> Self {
        self.config = config;
        self
    }

    /// Router to instrument. Required.
    pub fn router(mut self, router: Router<S>) -> Self {
        self.router = Some(router);
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.config.path = path.into();
        self
    }

    pub fn route_name(mut self, route_name: impl Into<String>) -> Self {
        self.config.route_name = route_name.into();
        self
    }

    pub fn duration_buckets(mut self, buckets: Vec<f64>) -> Self {
        self.config.duration_buckets = buckets;
        self
    }

    pub fn response_size_buckets(mut self, buckets: Vec<f64>) -> Self {
        self.config.response_size_buckets = buckets;
        self
    }

    /// Registry to register the collectors into. A fresh one is used otherwise.
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Register the collectors and mount `GET <path>` on the router.
    ///
    /// Fails with [`MuxPromError::RouterRequired`] before doing anything else
    /// when no router was supplied, and with [`MuxPromError::BadConfig`] when
    /// the configuration is invalid or the router already serves `GET <path>`.
    /// Collectors are left unregistered on failure.
    pub fn build(self) -> Result<MuxProm<S>> {
        let Some(router) = self.router else {
            tracing::error!("muxprom: no router supplied, nothing to instrument");
            return Err(MuxPromError::RouterRequired);
        };

        let config = self.config;
        // validates the config before registering anything
        let metrics = HttpMetrics::new(&config, self.registry.unwrap_or_default())?;

        // axum reports overlapping routes by panicking
        let scrape = get(scrape_metrics).with_state(metrics.clone());
        let mounted = panic::catch_unwind(AssertUnwindSafe(|| router.route(&config.path, scrape)));
        let router = match mounted {
            Ok(router) => router,
            Err(_) => {
                metrics.unregister();
                tracing::error!(path = %config.path, "scrape path clashes with an application route");
                return Err(MuxPromError::BadConfig(format!(
                    "metrics.path {:?} clashes with an application route",
                    config.path
                )));
            }
        };
        tracing::info!(
            path = %config.path,
            route_name = %config.route_name,
            "scrape route mounted"
        );

        Ok(MuxProm {
            config,
            metrics,
            router,
        })
    }
}

/// A router with collectors registered and the scrape route mounted.
pub struct MuxProm<S = ()> {
    config: MuxPromConfig,
    metrics: HttpMetrics,
    router: Router<S>,
}

impl<S> MuxProm<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn builder() -> MuxPromBuilder<S> {
        MuxPromBuilder::new()
    }

    pub fn config(&self) -> &MuxPromConfig {
        &self.config
    }

    /// Handle to the collectors, e.g. for reading the in-flight gauge.
    pub fn metrics(&self) -> HttpMetrics {
        self.metrics.clone()
    }

    /// Wrap every route and both fallbacks with the instrumentation middleware.
    ///
    /// Routes added to the returned router afterwards are not instrumented.
    pub fn instrument(self) -> Router<S> {
        self.router.layer(middleware::from_fn_with_state(
            self.metrics,
            track_http_metrics,
        ))
    }
}

async fn scrape_metrics(State(metrics): State<HttpMetrics>) -> Response {
    match metrics.render() {
        Ok(body) => ([(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, code = e.kind().as_str(), "metrics scrape failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
