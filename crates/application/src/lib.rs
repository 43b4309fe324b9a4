//! Ferrous Lookup Application Layer
//!
//! Drives one DNS query over an abstract datagram transport and hands the
//! result back either through a callback or as a future.
pub mod ports;
pub mod use_cases;
