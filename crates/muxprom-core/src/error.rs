//! Shared error type across muxprom crates.

use thiserror::Error;

/// Stable error categories, independent of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid configuration value.
    BadConfig,
    /// No router was supplied at construction.
    RouterRequired,
    /// The connection cannot be upgraded to a raw stream.
    UpgradeUnsupported,
    /// Collector creation, registration or encoding failed.
    Registry,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// String code used in logs and error bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadConfig => "BAD_CONFIG",
            ErrorKind::RouterRequired => "ROUTER_REQUIRED",
            ErrorKind::UpgradeUnsupported => "UPGRADE_UNSUPPORTED",
            ErrorKind::Registry => "REGISTRY",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MuxPromError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum MuxPromError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("a router is required to attach metrics to")]
    RouterRequired,
    #[error("connection upgrade not supported by the underlying connection")]
    UpgradeUnsupported,
    #[error("registry: {0}")]
    Registry(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MuxPromError {
    /// Map the error to its stable category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MuxPromError::BadConfig(_) => ErrorKind::BadConfig,
            MuxPromError::RouterRequired => ErrorKind::RouterRequired,
            MuxPromError::UpgradeUnsupported => ErrorKind::UpgradeUnsupported,
            MuxPromError::Registry(_) => ErrorKind::Registry,
            MuxPromError::Internal(_) => ErrorKind::Internal,
        }
    }
}
