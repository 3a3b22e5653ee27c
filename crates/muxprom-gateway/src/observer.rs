//! Response observer.
//!
//! Sits between a handler's response and the connection. The response head
//! passes through once, so the first status seen is the one attributed. The
//! body is wrapped in [`ObservedBody`], which forwards every frame untouched
//! and counts the data bytes actually handed on.
//!
//! Connection upgrades stay with the request: the middleware never consumes
//! hyper's `OnUpgrade` extension, so a downstream handler can still take it
//! via [`take_upgrade`].

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use bytes::Bytes;
use http_body::{Body as HttpBody, Frame, SizeHint};
use hyper::upgrade::OnUpgrade;

use muxprom_core::error::{MuxPromError, Result};

use crate::middleware::InFlightRequest;

/// Status and byte count captured for a single response.
#[derive(Debug, Default)]
pub struct ResponseObserver {
    status: Option<StatusCode>,
    written: u64,
}

impl ResponseObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute `status` unless a status is already attributed.
    /// Returns the status that is in effect afterwards.
    pub fn observe_status(&mut self, status: StatusCode) -> StatusCode {
        *self.status.get_or_insert(status)
    }

    /// Account for `n` bytes forwarded to the client.
    /// Body bytes with no prior status imply 200.
    pub fn observe_written(&mut self, n: usize) {
        self.status.get_or_insert(StatusCode::OK);
        self.written += n as u64;
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn written(&self) -> u64 {
        self.written
    }
}

/// Response body wrapper that feeds an in-flight request's observer.
///
/// The request is finished when the body reports end of stream, or when the
/// body is dropped early (client went away, write error, cancellation).
pub struct ObservedBody {
    inner: Body,
    request: Option<InFlightRequest>,
}

impl ObservedBody {
    pub(crate) fn new(inner: Body, request: InFlightRequest) -> Self {
        Self {
            inner,
            request: Some(request),
        }
    }
}

impl HttpBody for ObservedBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<std::result::Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        let polled = Pin::new(&mut this.inner).poll_frame(cx);

        match &polled {
            Poll::Ready(Some(Ok(frame))) => {
                if let (Some(data), Some(req)) = (frame.data_ref(), this.request.as_mut()) {
                    req.observer_mut().observe_written(data.len());
                }
            }
            Poll::Ready(None) => {
                // end of stream: record now rather than waiting for drop
                this.request.take();
            }
            // errors pass through unchanged; the partial count stays
            Poll::Ready(Some(Err(_))) | Poll::Pending => {}
        }

        polled
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

/// Whether the connection behind `req` can be upgraded to a raw stream.
pub fn supports_upgrade<B>(req: &Request<B>) -> bool {
    req.extensions().get::<OnUpgrade>().is_some()
}

/// Take the connection upgrade capability out of `req`.
///
/// Fails with [`MuxPromError::UpgradeUnsupported`] when the underlying
/// connection does not offer one (HTTP/2, in-process test calls, or a
/// previous handler already took it).
pub fn take_upgrade<B>(req: &mut Request<B>) -> Result<OnUpgrade> {
    req.extensions_mut()
        .remove::<OnUpgrade>()
        .ok_or(MuxPromError::UpgradeUnsupported)
}
