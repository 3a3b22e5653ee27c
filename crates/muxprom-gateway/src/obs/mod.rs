//! In-process HTTP metrics.
//!
//! Collectors are stored in a `prometheus::Registry` and rendered by the
//! scrape handler mounted in `crate::muxprom`.

pub mod metrics;

pub use metrics::{HttpMetrics, EXPOSITION_CONTENT_TYPE};
