pub mod udp;

pub use udp::{UdpTransport, UdpTransportFactory, MAX_UDP_RESPONSE_SIZE};
