//! muxprom demo server
//!
//! - Config: `muxprom.yaml` (or `MUXPROM_CONFIG`), defaults when absent
//! - Demo routes from `router::build_router`
//! - Scrape endpoint at `metrics.path`

use std::net::SocketAddr;
use std::path::Path;

use tracing_subscriber::{fmt, EnvFilter};

use muxprom_gateway::{config, router, MuxProm};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("MUXPROM_CONFIG").unwrap_or_else(|_| "muxprom.yaml".into());
    let cfg = if Path::new(&path).exists() {
        config::load_from_file(&path).expect("config load failed")
    } else {
        tracing::info!(%path, "no config file, using defaults");
        config::ServerConfig::default()
    };
    let listen: SocketAddr = cfg
        .listen
        .parse()
        .expect("listen must be a valid SocketAddr");

    let app = MuxProm::builder()
        .config(cfg.metrics)
        .router(router::build_router())
        .build()
        .expect("metrics setup failed")
        .instrument();

    tracing::info!(%listen, "muxprom-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
