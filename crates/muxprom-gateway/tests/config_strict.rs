#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use muxprom_core::{ErrorKind, DEFAULT_DURATION_BUCKETS, DEFAULT_RESPONSE_SIZE_BUCKETS};
use muxprom_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
listen: "0.0.0.0:8080"
metrics:
  namespace: "shop"
  pathz: "/metrics" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.listen, "0.0.0.0:8080");
    assert_eq!(cfg.metrics.namespace, "muxprom");
    assert_eq!(cfg.metrics.path, "/metrics");
    assert_eq!(cfg.metrics.route_name, "metrics");
    assert_eq!(cfg.metrics.duration_buckets, DEFAULT_DURATION_BUCKETS.to_vec());
    assert_eq!(
        cfg.metrics.response_size_buckets,
        DEFAULT_RESPONSE_SIZE_BUCKETS.to_vec()
    );
}

#[test]
fn ok_full_config() {
    let ok = r#"
version: 1
listen: "127.0.0.1:9000"
metrics:
  namespace: "shop"
  path: "/internal/metrics"
  route_name: "internal-metrics"
  duration_buckets: [0.1, 1, 10]
  response_size_buckets: [0, 1024]
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.metrics.namespace, "shop");
    assert_eq!(cfg.metrics.path, "/internal/metrics");
    assert_eq!(cfg.metrics.route_name, "internal-metrics");
    assert_eq!(cfg.metrics.duration_buckets, vec![0.1, 1.0, 10.0]);
    assert_eq!(cfg.metrics.response_size_buckets, vec![0.0, 1024.0]);
}

#[test]
fn rejects_unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::BadConfig);
}

#[test]
fn rejects_relative_metrics_path() {
    let bad = r#"
version: 1
metrics:
  path: "metrics"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("metrics.path"));
}

#[test]
fn rejects_wildcard_and_capture_metrics_paths() {
    for path in ["/metrics/*", "/:name", "//metrics"] {
        let bad = format!("version: 1\nmetrics:\n  path: \"{path}\"\n");
        let err = config::load_from_str(&bad).expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::BadConfig, "path {path:?}");
    }
    // the root path is literal
    let cfg = config::load_from_str("version: 1\nmetrics:\n  path: \"/\"\n").unwrap();
    assert_eq!(cfg.metrics.path, "/");
}

#[test]
fn rejects_invalid_namespace() {
    for ns in ["", "1abc", "my-app"] {
        let bad = format!("version: 1\nmetrics:\n  namespace: \"{ns}\"\n");
        let err = config::load_from_str(&bad).expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::BadConfig, "namespace {ns:?}");
    }
}

#[test]
fn rejects_unsorted_buckets() {
    let bad = r#"
version: 1
metrics:
  duration_buckets: [1, 0.5]
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("metrics.duration_buckets"));
}

#[test]
fn missing_file_is_internal() {
    let err = config::load_from_file("/nonexistent/muxprom.yaml").expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::Internal);
}
