//! Default histogram boundaries and boundary validation.

use crate::error::{MuxPromError, Result};

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * KIB;

/// Request duration boundaries, in seconds.
pub const DEFAULT_DURATION_BUCKETS: [f64; 14] = [
    0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Response size boundaries, in bytes.
pub const DEFAULT_RESPONSE_SIZE_BUCKETS: [f64; 12] = [
    0.0,
    512.0,
    KIB,
    100.0 * KIB,
    512.0 * KIB,
    MIB,
    5.0 * MIB,
    10.0 * MIB,
    25.0 * MIB,
    50.0 * MIB,
    100.0 * MIB,
    500.0 * MIB,
];

/// Check that `buckets` is non-empty, finite and strictly increasing.
///
/// `what` names the field in the returned error.
pub fn validate_buckets(what: &str, buckets: &[f64]) -> Result<()> {
    if buckets.is_empty() {
        return Err(MuxPromError::BadConfig(format!("{what} must not be empty")));
    }
    if let Some(b) = buckets.iter().find(|b| !b.is_finite()) {
        return Err(MuxPromError::BadConfig(format!(
            "{what} must be finite (got {b})"
        )));
    }
    if let Some(w) = buckets.windows(2).find(|w| w[0] >= w[1]) {
        return Err(MuxPromError::BadConfig(format!(
            "{what} must be strictly increasing ({} >= {})",
            w[0], w[1]
        )));
    }
    Ok(())
}
