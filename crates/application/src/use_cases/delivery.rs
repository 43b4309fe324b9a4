use super::query::QueryHandle;
use ferrous_lookup_domain::QueryError;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// One-shot result callback.
pub type Completion<T> = Box<dyn FnOnce(Result<T, QueryError>) + Send + 'static>;

/// Future side of a callback-style operation started by [`deferred`].
///
/// Holds the guard returned by the start function for as long as the future
/// lives.
#[must_use = "futures do nothing unless awaited"]
pub struct Deferred<T, G> {
    rx: oneshot::Receiver<Result<T, QueryError>>,
    guard: G,
}

impl<T, G> Deferred<T, G> {
    pub fn guard(&self) -> &G {
        &self.guard
    }
}

impl<T, G: Unpin> Future for Deferred<T, G> {
    type Output = Result<T, QueryError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.get_mut().rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            // Completion dropped without being called.
            Poll::Ready(Err(_)) => Poll::Ready(Err(QueryError::Unknown)),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Turns a callback-style operation into a future resolving to the single
/// value it delivers.
///
/// `start` receives the completion and returns a guard that the future keeps
/// alive. If the completion is dropped uncalled the future resolves to
/// [`QueryError::Unknown`].
pub fn deferred<T, G, F>(start: F) -> Deferred<T, G>
where
    T: Send + 'static,
    F: FnOnce(Completion<T>) -> G,
{
    let (tx, rx) = oneshot::channel();
    let guard = start(Box::new(move |result| {
        let _ = tx.send(result);
    }));
    Deferred { rx, guard }
}

/// Cancels the query when dropped, e.g. when an awaiting future times out.
#[derive(Debug)]
pub struct CancelOnDrop(QueryHandle);

impl CancelOnDrop {
    pub fn new(handle: QueryHandle) -> Self {
        Self(handle)
    }

    pub fn handle(&self) -> &QueryHandle {
        &self.0
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}
