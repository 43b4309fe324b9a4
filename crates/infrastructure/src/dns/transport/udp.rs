//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! One connected socket per transport. Messages are sent as-is (no framing)
//! and exactly one response datagram is read back. Every operation runs on
//! the runtime handle given at construction and reports through the
//! transaction's `EventSink`.

use arc_swap::ArcSwapOption;
use ferrous_lookup_application::ports::{
    ConnectionState, Datagram, DatagramTransport, EventSink, TransportFactory,
};
use ferrous_lookup_domain::{Endpoint, TransportError};
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
pub const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    runtime: Handle,
    socket: Arc<ArcSwapOption<UdpSocket>>,
    events: Option<EventSink>,
    server: Arc<str>,
    shutdown: CancellationToken,
}

impl UdpTransport {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            socket: Arc::new(ArcSwapOption::empty()),
            events: None,
            server: Arc::from(""),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.socket.load().is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

impl DatagramTransport for UdpTransport {
    fn open(&mut self, endpoint: &Endpoint, events: EventSink) {
        if self.events.is_some() || self.is_cancelled() {
            warn!(server = %endpoint, "UDP transport cannot be reopened");
            events.state(ConnectionState::Failed(TransportError::Closed {
                server: endpoint.to_string(),
            }));
            return;
        }

        self.server = Arc::from(endpoint.to_string());
        self.events = Some(events.clone());
        events.state(ConnectionState::Connecting);

        let slot = Arc::clone(&self.socket);
        let shutdown = self.shutdown.clone();
        let endpoint = endpoint.clone();

        self.runtime.spawn(async move {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {}
                result = connect(&endpoint) => match result {
                    Ok(socket) => {
                        slot.store(Some(Arc::new(socket)));
                        if shutdown.is_cancelled() {
                            slot.store(None);
                            return;
                        }
                        events.state(ConnectionState::Ready);
                    }
                    Err(err) => {
                        debug!(server = %endpoint, error = %err, "UDP connect failed");
                        events.state(ConnectionState::Failed(err));
                    }
                },
            }
        });
    }

    fn send(&mut self, bytes: Vec<u8>) {
        let Some(events) = self.events.clone() else {
            warn!("UDP send before open");
            return;
        };
        let Some(socket) = self.socket.load_full() else {
            events.sent(Err(TransportError::NotReady));
            return;
        };

        let server = Arc::clone(&self.server);
        let shutdown = self.shutdown.clone();

        self.runtime.spawn(async move {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {}
                result = socket.send(&bytes) => {
                    let outcome = match result {
                        Ok(bytes_sent) => {
                            debug!(server = %server, bytes_sent = bytes_sent, "UDP query sent");
                            Ok(())
                        }
                        Err(e) => Err(TransportError::Send {
                            server: server.to_string(),
                            reason: e.to_string(),
                        }),
                    };
                    events.sent(outcome);
                }
            }
        });
    }

    fn receive_one(&mut self) {
        let Some(events) = self.events.clone() else {
            warn!("UDP receive before open");
            return;
        };
        let Some(socket) = self.socket.load_full() else {
            events.received(Err(TransportError::NotReady));
            return;
        };

        let server = Arc::clone(&self.server);
        let shutdown = self.shutdown.clone();

        self.runtime.spawn(async move {
            // One spare byte tells an oversized datagram apart from a full one.
            let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE + 1];

            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {}
                result = socket.recv(&mut recv_buf) => {
                    let outcome = match result {
                        Ok(bytes_received) => {
                            debug!(
                                server = %server,
                                bytes_received = bytes_received,
                                "UDP response received"
                            );
                            recv_buf.truncate(bytes_received);
                            if bytes_received > MAX_UDP_RESPONSE_SIZE {
                                recv_buf.truncate(MAX_UDP_RESPONSE_SIZE);
                                Ok(Datagram::incomplete(recv_buf))
                            } else {
                                Ok(Datagram::complete(recv_buf))
                            }
                        }
                        Err(e) => Err(receive_error(&server, e)),
                    };
                    events.received(outcome);
                }
            }
        });
    }

    fn cancel(&mut self) {
        if self.shutdown.is_cancelled() {
            return;
        }
        self.shutdown.cancel();
        self.socket.store(None);
        self.events = None;
        debug!(server = %self.server, "UDP transport released");
    }
}

impl Drop for UdpTransport {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn connect(endpoint: &Endpoint) -> Result<UdpSocket, TransportError> {
    let server = endpoint.to_string();
    let resolve_error = |reason: String| TransportError::Resolve {
        host: endpoint.host.to_string(),
        reason,
    };

    let server_addr = tokio::net::lookup_host((endpoint.host.as_ref(), endpoint.port))
        .await
        .map_err(|e| resolve_error(e.to_string()))?
        .next()
        .ok_or_else(|| resolve_error("no addresses found".to_string()))?;

    let socket = UdpSocket::bind(unspecified_for(&server_addr))
        .await
        .map_err(|e| TransportError::Bind(e.to_string()))?;

    socket
        .connect(server_addr)
        .await
        .map_err(|e| TransportError::Connect {
            server: server.clone(),
            reason: e.to_string(),
        })?;

    debug!(
        server = %server,
        resolved = %server_addr,
        local = ?socket.local_addr().ok(),
        "UDP socket connected"
    );
    Ok(socket)
}

/// Ephemeral bind address of the same family as `server_addr`.
fn unspecified_for(server_addr: &SocketAddr) -> SocketAddr {
    if server_addr.is_ipv4() {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
    } else {
        SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
    }
}

fn receive_error(server: &str, e: io::Error) -> TransportError {
    match e.kind() {
        io::ErrorKind::ConnectionRefused => TransportError::ConnectionRefused {
            server: server.to_string(),
        },
        _ => TransportError::Receive {
            server: server.to_string(),
            reason: e.to_string(),
        },
    }
}

/// Builds a fresh [`UdpTransport`] for every query.
#[derive(Clone)]
pub struct UdpTransportFactory {
    runtime: Handle,
}

impl UdpTransportFactory {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl TransportFactory for UdpTransportFactory {
    fn create(&self) -> Box<dyn DatagramTransport> {
        Box::new(UdpTransport::new(self.runtime.clone()))
    }
}
