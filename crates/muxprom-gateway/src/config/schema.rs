use serde::Deserialize;
use muxprom_core::error::{MuxPromError, Result};
use muxprom_core::{validate_buckets, DEFAULT_DURATION_BUCKETS, DEFAULT_RESPONSE_SIZE_BUCKETS};

/// Top-level server file consumed by the demo binary.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default)]
    pub metrics: MuxPromConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            listen: default_listen(),
            metrics: MuxPromConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MuxPromError::BadConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        if self.listen.trim().is_empty() {
            return Err(MuxPromError::BadConfig("listen must not be empty".into()));
        }

        self.metrics.validate()?;

        Ok(())
    }
}

/// Instrumentation settings. Fixed once collectors are built.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MuxPromConfig {
    /// Prefix for every metric name (`<namespace>_http_...`).
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Path the scrape endpoint is mounted on.
    #[serde(default = "default_path")]
    pub path: String,

    /// Name of the scrape route. Must not collide with an application route name.
    #[serde(default = "default_route_name")]
    pub route_name: String,

    /// Upper bounds for the request duration histogram, in seconds.
    #[serde(default = "default_duration_buckets")]
    pub duration_buckets: Vec<f64>,

    /// Upper bounds for the response size histogram, in bytes.
    #[serde(default = "default_response_size_buckets")]
    pub response_size_buckets: Vec<f64>,
}

impl Default for MuxPromConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            path: default_path(),
            route_name: default_route_name(),
            duration_buckets: default_duration_buckets(),
            response_size_buckets: default_response_size_buckets(),
        }
    }
}

impl MuxPromConfig {
    pub fn validate(&self) -> Result<()> {
        if !is_metric_prefix(&self.namespace) {
            return Err(MuxPromError::BadConfig(format!(
                "metrics.namespace must match [a-zA-Z_:][a-zA-Z0-9_:]* (got {:?})",
                self.namespace
            )));
        }
        if !self.path.starts_with('/') {
            return Err(MuxPromError::BadConfig(format!(
                "metrics.path must start with '/' (got {:?})",
                self.path
            )));
        }
        if self.path != "/" {
            let bad_segment = self.path[1..]
                .split('/')
                .find(|seg| seg.is_empty() || seg.starts_with(':') || seg.starts_with('*'));
            if let Some(seg) = bad_segment {
                return Err(MuxPromError::BadConfig(format!(
                    "metrics.path must be a literal path without empty, ':' or '*' segments \
                     (got {:?}, segment {:?})",
                    self.path, seg
                )));
            }
        }
        if self.route_name.trim().is_empty() {
            return Err(MuxPromError::BadConfig(
                "metrics.route_name must not be empty".into(),
            ));
        }

        validate_buckets("metrics.duration_buckets", &self.duration_buckets)?;
        validate_buckets("metrics.response_size_buckets", &self.response_size_buckets)?;

        Ok(())
    }
}

fn is_metric_prefix(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_namespace() -> String {
    "muxprom".into()
}
fn default_path() -> String {
    "/metrics".into()
}
fn default_route_name() -> String {
    "metrics".into()
}
fn default_duration_buckets() -> Vec<f64> {
    DEFAULT_DURATION_BUCKETS.to_vec()
}
fn default_response_size_buckets() -> Vec<f64> {
    DEFAULT_RESPONSE_SIZE_BUCKETS.to_vec()
}
