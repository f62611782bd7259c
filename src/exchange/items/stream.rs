use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

use super::types::ItemsPage;
use crate::error::DmarketError;

/// Pages of a listing, produced by a background task.
///
/// Yields one `Ok` per non-empty page in server order. The stream ends after
/// an empty page, after the first `Err`, or once cancelled. Dropping the
/// stream cancels the producer.
#[derive(Debug)]
pub struct ItemsStream {
    inner: ReceiverStream<Result<ItemsPage, DmarketError>>,
    cancel: CancellationToken,
}

impl ItemsStream {
    pub(crate) fn new(
        receiver: mpsc::Receiver<Result<ItemsPage, DmarketError>>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            inner: ReceiverStream::new(receiver),
            cancel,
        }
    }

    /// Stop the producer. Pages already buffered are still yielded.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// True once the producer has been told to stop.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Stream for ItemsStream {
    type Item = Result<ItemsPage, DmarketError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl Drop for ItemsStream {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
