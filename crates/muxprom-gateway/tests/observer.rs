#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::body::Body;
use axum::http::{Request, StatusCode};

use muxprom_core::ErrorKind;
use muxprom_gateway::observer::{supports_upgrade, take_upgrade, ResponseObserver};

#[test]
fn nothing_observed_yet() {
    let obs = ResponseObserver::new();
    assert_eq!(obs.status(), None);
    assert_eq!(obs.written(), 0);
}

#[test]
fn write_before_status_implies_200() {
    let mut obs = ResponseObserver::new();
    obs.observe_written(5);
    assert_eq!(obs.status(), Some(StatusCode::OK));

    // too late to change it
    assert_eq!(obs.observe_status(StatusCode::NOT_FOUND), StatusCode::OK);
    assert_eq!(obs.status(), Some(StatusCode::OK));
}

#[test]
fn first_status_wins() {
    let mut obs = ResponseObserver::new();
    assert_eq!(obs.observe_status(StatusCode::NOT_FOUND), StatusCode::NOT_FOUND);
    assert_eq!(
        obs.observe_status(StatusCode::INTERNAL_SERVER_ERROR),
        StatusCode::NOT_FOUND
    );
    obs.observe_written(3);
    assert_eq!(obs.status(), Some(StatusCode::NOT_FOUND));
}

#[test]
fn written_bytes_accumulate() {
    let mut obs = ResponseObserver::new();
    obs.observe_written(10);
    obs.observe_written(20);
    obs.observe_written(0);
    assert_eq!(obs.written(), 30);
}

#[test]
fn upgrade_without_connection_is_unsupported() {
    let mut req = Request::builder().uri("/ws").body(Body::empty()).unwrap();
    assert!(!supports_upgrade(&req));

    let err = take_upgrade(&mut req).expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::UpgradeUnsupported);
}
