//! Response body that completes its request once the body is done.
//!
//! The inner service returns as soon as the response head is ready. The
//! timers keep running until the last frame has been polled, or until the
//! server drops the body (length reached, client gone).

use super::{PendingRequest, PromBundle};
use axum::body::{Body, Bytes, HttpBody};
use http_body::{Frame, SizeHint};
use std::pin::Pin;
use std::task::{Context, Poll};

/// Everything needed to complete a request after its body ends.
struct Finish {
    bundle: PromBundle,
    pending: PendingRequest,
    status: u16,
    matched_route: Option<String>,
}

pub(crate) struct CompletionBody {
    inner: Body,
    finish: Option<Finish>,
}

impl CompletionBody {
    // ---

    pub(crate) fn new(
        inner: Body,
        bundle: PromBundle,
        pending: PendingRequest,
        status: u16,
        matched_route: Option<String>,
    ) -> Self {
        CompletionBody {
            inner,
            finish: Some(Finish {
                bundle,
                pending,
                status,
                matched_route,
            }),
        }
    }

    fn complete(&mut self) {
        // ---
        if let Some(finish) = self.finish.take() {
            finish.bundle.complete_request(
                finish.pending,
                Some(finish.status),
                finish.matched_route.as_deref(),
            );
        }
    }
}

impl HttpBody for CompletionBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        // ---
        let this = self.get_mut();
        let polled = Pin::new(&mut this.inner).poll_frame(cx);
        if let Poll::Ready(None) = polled {
            this.complete();
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

impl Drop for CompletionBody {
    fn drop(&mut self) {
        self.complete();
    }
}
