mod datagram_transport;

pub use datagram_transport::{
    ConnectionState, Datagram, DatagramTransport, EventSink, TransportEvent, TransportFactory,
};
