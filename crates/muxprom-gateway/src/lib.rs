//! muxprom gateway library entry.
//!
//! Instruments an axum `Router` with in-flight, latency and response-size
//! metrics and mounts a Prometheus scrape endpoint on it. Consumed by the
//! demo binary (`main.rs`) and by integration tests.

pub mod config;
pub mod middleware;
pub mod muxprom;
pub mod obs;
pub mod observer;
pub mod router;

pub use config::MuxPromConfig;
pub use muxprom::{MuxProm, MuxPromBuilder};
pub use obs::HttpMetrics;
