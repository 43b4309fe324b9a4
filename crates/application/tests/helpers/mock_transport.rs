#![allow(dead_code)]

use ferrous_lookup_application::ports::{
    ConnectionState, Datagram, DatagramTransport, EventSink, TransportEvent, TransportFactory,
};
use ferrous_lookup_domain::{Endpoint, TransportError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What a [`MockTransport`] emits in reply to each operation.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub on_open: Vec<TransportEvent>,
    pub on_send: Vec<TransportEvent>,
    pub on_receive: Vec<TransportEvent>,
    /// Drop the event sink right after `open` instead of keeping it.
    pub drop_sink: bool,
}

impl Script {
    /// Connects, sends and answers with `response`.
    pub fn answering(response: Vec<u8>) -> Self {
        Self {
            on_open: vec![connecting(), ready()],
            on_send: vec![TransportEvent::SendCompleted(Ok(()))],
            on_receive: vec![TransportEvent::Received(Ok(Datagram::complete(response)))],
            drop_sink: false,
        }
    }

    /// Reports `Connecting` and then nothing at all.
    pub fn stalled() -> Self {
        Self {
            on_open: vec![connecting()],
            ..Self::default()
        }
    }

    pub fn on_open(mut self, events: Vec<TransportEvent>) -> Self {
        self.on_open = events;
        self
    }

    pub fn on_send(mut self, events: Vec<TransportEvent>) -> Self {
        self.on_send = events;
        self
    }

    pub fn on_receive(mut self, events: Vec<TransportEvent>) -> Self {
        self.on_receive = events;
        self
    }

    pub fn dropping_sink(mut self) -> Self {
        self.drop_sink = true;
        self
    }
}

pub fn connecting() -> TransportEvent {
    TransportEvent::StateChanged(ConnectionState::Connecting)
}

pub fn ready() -> TransportEvent {
    TransportEvent::StateChanged(ConnectionState::Ready)
}

pub fn failed(err: TransportError) -> TransportEvent {
    TransportEvent::StateChanged(ConnectionState::Failed(err))
}

/// Counters shared between a mock transport and the test observing it.
#[derive(Debug, Default)]
pub struct TransportProbe {
    pub opens: AtomicUsize,
    pub receives: AtomicUsize,
    pub cancels: AtomicUsize,
    pub sent: Mutex<Vec<Vec<u8>>>,
    pub endpoint: Mutex<Option<Endpoint>>,
}

impl TransportProbe {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn receives(&self) -> usize {
        self.receives.load(Ordering::SeqCst)
    }

    pub fn cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }

    pub fn endpoint(&self) -> Option<Endpoint> {
        self.endpoint.lock().unwrap().clone()
    }
}

pub struct MockTransport {
    script: Script,
    probe: Arc<TransportProbe>,
    sink: Option<EventSink>,
}

impl MockTransport {
    pub fn new(script: Script) -> (Self, Arc<TransportProbe>) {
        let probe = Arc::new(TransportProbe::default());
        (Self::with_probe(script, probe.clone()), probe)
    }

    pub fn with_probe(script: Script, probe: Arc<TransportProbe>) -> Self {
        Self {
            script,
            probe,
            sink: None,
        }
    }

    fn emit_all(&self, events: &[TransportEvent]) {
        if let Some(sink) = &self.sink {
            for event in events {
                sink.emit(event.clone());
            }
        }
    }
}

impl DatagramTransport for MockTransport {
    fn open(&mut self, endpoint: &Endpoint, events: EventSink) {
        self.probe.opens.fetch_add(1, Ordering::SeqCst);
        *self.probe.endpoint.lock().unwrap() = Some(endpoint.clone());
        self.sink = Some(events);
        self.emit_all(&self.script.on_open);
        if self.script.drop_sink {
            self.sink = None;
        }
    }

    fn send(&mut self, bytes: Vec<u8>) {
        self.probe.sent.lock().unwrap().push(bytes);
        self.emit_all(&self.script.on_send);
    }

    fn receive_one(&mut self) {
        self.probe.receives.fetch_add(1, Ordering::SeqCst);
        self.emit_all(&self.script.on_receive);
    }

    fn cancel(&mut self) {
        self.probe.cancels.fetch_add(1, Ordering::SeqCst);
        self.sink = None;
    }
}

/// Hands out mock transports that all report into one probe.
pub struct MockTransportFactory {
    script: Script,
    probe: Arc<TransportProbe>,
}

impl MockTransportFactory {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            probe: Arc::new(TransportProbe::default()),
        }
    }

    pub fn probe(&self) -> Arc<TransportProbe> {
        self.probe.clone()
    }
}

impl TransportFactory for MockTransportFactory {
    fn create(&self) -> Box<dyn DatagramTransport> {
        Box::new(MockTransport::with_probe(
            self.script.clone(),
            self.probe.clone(),
        ))
    }
}
