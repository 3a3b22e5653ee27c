//! Top-level facade crate for muxprom.
//!
//! Re-exports core types and the axum integration so users can depend on a single crate.

pub mod core {
    pub use muxprom_core::*;
}

pub mod gateway {
    pub use muxprom_gateway::*;
}

pub use muxprom_core::{MuxPromError, Result};
pub use muxprom_gateway::{HttpMetrics, MuxProm, MuxPromBuilder, MuxPromConfig};
