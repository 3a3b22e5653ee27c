//! Bucket boundary validation.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use muxprom_core::{
    validate_buckets, ErrorKind, DEFAULT_DURATION_BUCKETS, DEFAULT_RESPONSE_SIZE_BUCKETS,
};

#[test]
fn defaults_are_valid() {
    validate_buckets("duration_buckets", &DEFAULT_DURATION_BUCKETS).unwrap();
    validate_buckets("response_size_buckets", &DEFAULT_RESPONSE_SIZE_BUCKETS).unwrap();
}

#[test]
fn default_size_buckets_use_binary_units() {
    assert_eq!(DEFAULT_RESPONSE_SIZE_BUCKETS[2], 1024.0);
    assert_eq!(DEFAULT_RESPONSE_SIZE_BUCKETS[5], 1_048_576.0);
    assert_eq!(DEFAULT_RESPONSE_SIZE_BUCKETS[11], 524_288_000.0);
}

#[test]
fn rejects_empty() {
    let err = validate_buckets("duration_buckets", &[]).expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::BadConfig);
    assert!(err.to_string().contains("duration_buckets"));
}

#[test]
fn rejects_non_increasing() {
    let err = validate_buckets("b", &[0.1, 1.0, 1.0]).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "BAD_CONFIG");
    validate_buckets("b", &[1.0, 0.5]).expect_err("must fail");
}

#[test]
fn rejects_non_finite() {
    validate_buckets("b", &[0.1, f64::INFINITY]).expect_err("must fail");
    validate_buckets("b", &[f64::NAN]).expect_err("must fail");
}
