//! Ferrous Lookup Infrastructure Layer
pub mod dns;

pub use dns::transport::{UdpTransport, UdpTransportFactory};
