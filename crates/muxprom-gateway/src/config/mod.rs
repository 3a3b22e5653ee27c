//! Config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use muxprom_core::error::{MuxPromError, Result};

pub use schema::{MuxPromConfig, ServerConfig};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ServerConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        MuxPromError::Internal(format!("read config failed ({}): {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| MuxPromError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
