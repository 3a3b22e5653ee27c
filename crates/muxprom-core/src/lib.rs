//! muxprom core: runtime-free error types and histogram boundary defaults.
//!
//! Shared by the axum integration and by tooling that only needs to validate
//! configuration. No HTTP or async runtime dependencies live here.
//!
//! Panics, `unwrap`, and `expect` are compile-denied in this crate
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod buckets;
pub mod error;

pub use buckets::{validate_buckets, DEFAULT_DURATION_BUCKETS, DEFAULT_RESPONSE_SIZE_BUCKETS};
pub use error::{ErrorKind, MuxPromError, Result};
