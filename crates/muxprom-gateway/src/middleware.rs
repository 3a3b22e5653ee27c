//! Request instrumentation middleware.
//!
//! Applied with `Router::layer`, which puts it in front of every route, every
//! method router's 405 fallback and the router's 404 fallback. Each request
//! therefore passes through it exactly once.
//!
//! Bookkeeping is scoped: [`InFlightRequest`] increments the in-flight gauge
//! when created and records duration, size and the decrement when dropped,
//! so panics and cancelled requests are accounted for too.

use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::obs::HttpMetrics;
use crate::observer::{supports_upgrade, ObservedBody, ResponseObserver};

/// Status label for a request that panicked before producing a response.
const PANICKED_STATUS: &str = "500";
/// Status label for a request whose future was dropped before producing a response.
const CANCELLED_STATUS: &str = "499";

/// Route and method labels, fixed for the lifetime of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLabels {
    pub route: String,
    pub method: String,
}

impl RequestLabels {
    /// Route template when the request matched one, the full request URI otherwise.
    pub fn from_request<B>(req: &axum::http::Request<B>) -> Self {
        let route = match req.extensions().get::<MatchedPath>() {
            Some(matched) => matched.as_str().to_owned(),
            None => req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str().to_owned())
                .unwrap_or_else(|| req.uri().path().to_owned()),
        };

        Self {
            route,
            method: req.method().as_str().to_owned(),
        }
    }
}

/// One request between entry and completion.
pub(crate) struct InFlightRequest {
    metrics: HttpMetrics,
    labels: RequestLabels,
    started: Instant,
    observer: ResponseObserver,
}

impl InFlightRequest {
    pub(crate) fn start(metrics: HttpMetrics, labels: RequestLabels) -> Self {
        metrics.inc_in_flight(&labels.route, &labels.method);
        Self {
            metrics,
            labels,
            started: Instant::now(),
            observer: ResponseObserver::new(),
        }
    }

    pub(crate) fn observer_mut(&mut self) -> &mut ResponseObserver {
        &mut self.observer
    }
}

impl Drop for InFlightRequest {
    fn drop(&mut self) {
        let elapsed = self.started.elapsed();
        let status = match self.observer.status() {
            Some(s) => s.as_u16().to_string(),
            None => {
                let panicked = std::thread::panicking();
                tracing::warn!(
                    route = %self.labels.route,
                    method = %self.labels.method,
                    panicked,
                    "request ended without a response"
                );
                let label = if panicked { PANICKED_STATUS } else { CANCELLED_STATUS };
                label.to_owned()
            }
        };
        let bytes = self.observer.written();

        self.metrics
            .observe(&self.labels.route, &self.labels.method, &status, elapsed, bytes);
        self.metrics
            .dec_in_flight(&self.labels.route, &self.labels.method);

        tracing::debug!(
            route = %self.labels.route,
            method = %self.labels.method,
            status = %status,
            bytes,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "request observed"
        );
    }
}

/// `axum::middleware::from_fn_with_state` entry point.
pub async fn track_http_metrics(
    State(metrics): State<HttpMetrics>,
    req: Request,
    next: Next,
) -> Response {
    let labels = RequestLabels::from_request(&req);
    tracing::trace!(
        route = %labels.route,
        method = %labels.method,
        upgradable = supports_upgrade(&req),
        "request started"
    );

    let mut in_flight = InFlightRequest::start(metrics, labels);
    let response = next.run(req).await;
    in_flight.observer_mut().observe_status(response.status());

    let (parts, body) = response.into_parts();
    Response::from_parts(parts, Body::new(ObservedBody::new(body, in_flight)))
}
