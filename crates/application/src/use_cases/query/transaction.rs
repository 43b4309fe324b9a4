use crate::ports::{ConnectionState, Datagram, DatagramTransport, EventSink, TransportEvent};
use crate::use_cases::delivery::Completion;
use ferrous_lookup_domain::{Message, QueryError, QueryRequest, TransportError};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Created,
    Connecting,
    Ready,
    Sending,
    AwaitingResponse,
    Completed,
    Failed,
    Cancelled,
}

impl TransactionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionState::Completed | TransactionState::Failed | TransactionState::Cancelled
        )
    }

    fn is_before_ready(&self) -> bool {
        matches!(
            self,
            TransactionState::Created | TransactionState::Connecting
        )
    }
}

/// A single DNS query over one transport connection.
///
/// The completion runs exactly once and the transport is cancelled exactly
/// once, whichever way the transaction ends. Dropping an unfinished
/// transaction cancels it.
pub struct QueryTransaction<T: DatagramTransport> {
    request: QueryRequest,
    transport: T,
    state: TransactionState,
    completion: Option<Completion<Message>>,
    released: bool,
}

impl<T: DatagramTransport> QueryTransaction<T> {
    pub fn new(request: QueryRequest, transport: T, completion: Completion<Message>) -> Self {
        Self {
            request,
            transport,
            state: TransactionState::Created,
            completion: Some(completion),
            released: false,
        }
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    pub fn request(&self) -> &QueryRequest {
        &self.request
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Opens the transport. Only the first call has any effect.
    pub fn start(&mut self, events: EventSink) {
        if self.state != TransactionState::Created {
            debug!(state = ?self.state, "Transaction already started");
            return;
        }

        self.state = TransactionState::Connecting;
        debug!(
            server = %self.request.endpoint,
            domain = %self.request.domain,
            record_type = %self.request.record_type,
            id = self.request.transaction_id,
            "Opening transport for DNS query"
        );
        self.transport.open(&self.request.endpoint, events);
    }

    /// Advances the state machine. Events after a terminal state are ignored.
    pub fn handle_event(&mut self, event: TransportEvent) {
        if self.state.is_terminal() {
            trace!(state = ?self.state, event = ?event, "Ignoring transport event after completion");
            return;
        }

        match event {
            TransportEvent::StateChanged(ConnectionState::Connecting) => {
                trace!(server = %self.request.endpoint, "Transport connecting");
            }
            TransportEvent::StateChanged(ConnectionState::Ready) => self.on_ready(),
            TransportEvent::StateChanged(ConnectionState::Failed(err)) => {
                self.fail(QueryError::from(err))
            }
            TransportEvent::StateChanged(ConnectionState::Cancelled) => {
                debug!(server = %self.request.endpoint, "Transport cancelled");
                self.finish(TransactionState::Cancelled, Err(QueryError::Cancelled));
            }
            TransportEvent::SendCompleted(result) => self.on_sent(result),
            TransportEvent::Received(result) => self.on_received(result),
        }
    }

    /// Caller cancellation. No effect once terminal.
    pub fn cancel(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        debug!(server = %self.request.endpoint, state = ?self.state, "DNS query cancelled");
        self.finish(TransactionState::Cancelled, Err(QueryError::Cancelled));
    }

    fn on_ready(&mut self) {
        if self.state != TransactionState::Connecting {
            trace!(state = ?self.state, "Ignoring repeated ready notification");
            return;
        }
        self.state = TransactionState::Ready;

        let bytes = self.request.to_message().encode();
        self.state = TransactionState::Sending;
        debug!(server = %self.request.endpoint, bytes = bytes.len(), "Sending DNS query");
        self.transport.send(bytes);
    }

    fn on_sent(&mut self, result: Result<(), TransportError>) {
        if self.state.is_before_ready() {
            return self.fail(QueryError::TransportNotReady);
        }
        if self.state != TransactionState::Sending {
            warn!(state = ?self.state, "Unexpected send completion");
            return;
        }

        match result {
            Ok(()) => {
                self.state = TransactionState::AwaitingResponse;
                self.transport.receive_one();
            }
            Err(err) => self.fail(QueryError::from(err)),
        }
    }

    fn on_received(&mut self, result: Result<Datagram, TransportError>) {
        if self.state.is_before_ready() {
            return self.fail(QueryError::TransportNotReady);
        }

        let datagram = match result {
            Ok(datagram) => datagram,
            Err(err) => return self.fail(QueryError::from(err)),
        };
        if !datagram.is_complete {
            warn!(
                server = %self.request.endpoint,
                bytes = datagram.bytes.len(),
                "DNS response did not fit the receive buffer"
            );
            return self.fail(QueryError::ResponseIncomplete);
        }

        match Message::decode(&datagram.bytes) {
            Ok(message) => {
                if message.id() != self.request.transaction_id {
                    warn!(
                        server = %self.request.endpoint,
                        expected = self.request.transaction_id,
                        received = message.id(),
                        "DNS response transaction ID mismatch"
                    );
                }
                debug!(
                    server = %self.request.endpoint,
                    rcode = %message.response_code(),
                    answers = message.answers().len(),
                    "DNS response received"
                );
                self.finish(TransactionState::Completed, Ok(message));
            }
            Err(err) => self.fail(QueryError::Malformed(err)),
        }
    }

    fn fail(&mut self, error: QueryError) {
        debug!(server = %self.request.endpoint, error = %error, "DNS query failed");
        self.finish(TransactionState::Failed, Err(error));
    }

    fn finish(&mut self, state: TransactionState, result: Result<Message, QueryError>) {
        self.state = state;
        if !self.released {
            self.released = true;
            self.transport.cancel();
        }
        if let Some(completion) = self.completion.take() {
            completion(result);
        }
    }
}

impl<T: DatagramTransport> Drop for QueryTransaction<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
