use super::transaction::QueryTransaction;
use crate::ports::{DatagramTransport, EventSink};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Caller-side handle to a running query.
#[derive(Debug, Clone)]
pub struct QueryHandle {
    token: CancellationToken,
}

impl QueryHandle {
    /// A handle not attached to any running query.
    pub fn detached() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Requests cancellation. The completion still runs, with
    /// `QueryError::Cancelled`, unless the query already finished.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Runs `transaction` on `context` until it reaches a terminal state.
pub fn spawn<T>(context: &Handle, mut transaction: QueryTransaction<T>) -> QueryHandle
where
    T: DatagramTransport + 'static,
{
    let handle = QueryHandle::detached();
    let token = handle.token.clone();
    let (sink, mut events) = EventSink::channel();

    context.spawn(async move {
        transaction.start(sink);

        while !transaction.is_finished() {
            tokio::select! {
                biased;

                _ = token.cancelled() => transaction.cancel(),

                event = events.recv() => match event {
                    Some(event) => transaction.handle_event(event),
                    None => {
                        debug!("Transport dropped its event sink");
                        transaction.cancel();
                    }
                },
            }
        }
    });

    handle
}
