use ferrous_lookup_domain::{Endpoint, TransportError};
use tokio::sync::mpsc;

/// Connection lifecycle as reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Ready,
    Failed(TransportError),
    Cancelled,
}

/// One received datagram. `is_complete` is false when the payload did not
/// fit the receive buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    pub bytes: Vec<u8>,
    pub is_complete: bool,
}

impl Datagram {
    pub fn complete(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            is_complete: true,
        }
    }

    pub fn incomplete(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            is_complete: false,
        }
    }
}

/// Notifications a transport delivers back to the transaction driving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    StateChanged(ConnectionState),
    SendCompleted(Result<(), TransportError>),
    Received(Result<Datagram, TransportError>),
}

/// Where a transport reports its notifications. Cloning yields another
/// handle onto the same queue.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<TransportEvent>,
}

impl EventSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TransportEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Returns false once the receiving transaction is gone.
    pub fn emit(&self, event: TransportEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn state(&self, state: ConnectionState) -> bool {
        self.emit(TransportEvent::StateChanged(state))
    }

    pub fn sent(&self, result: Result<(), TransportError>) -> bool {
        self.emit(TransportEvent::SendCompleted(result))
    }

    pub fn received(&self, result: Result<Datagram, TransportError>) -> bool {
        self.emit(TransportEvent::Received(result))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// A connected-datagram transport. Every operation returns immediately;
/// outcomes arrive later through the [`EventSink`] passed to `open`.
pub trait DatagramTransport: Send {
    /// Starts establishing an association with `endpoint`. Emits
    /// `Connecting`, then `Ready` or `Failed`.
    fn open(&mut self, endpoint: &Endpoint, events: EventSink);

    /// Submits one datagram. Emits `SendCompleted`.
    fn send(&mut self, bytes: Vec<u8>);

    /// Waits for exactly one datagram. Emits `Received`.
    fn receive_one(&mut self);

    /// Tears the association down. Must be idempotent.
    fn cancel(&mut self);
}

impl<T: DatagramTransport + ?Sized> DatagramTransport for Box<T> {
    fn open(&mut self, endpoint: &Endpoint, events: EventSink) {
        (**self).open(endpoint, events)
    }

    fn send(&mut self, bytes: Vec<u8>) {
        (**self).send(bytes)
    }

    fn receive_one(&mut self) {
        (**self).receive_one()
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }
}

/// Produces a fresh, unopened transport for every query.
pub trait TransportFactory: Send + Sync {
    fn create(&self) -> Box<dyn DatagramTransport>;
}
