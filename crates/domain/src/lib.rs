//! Ferrous Lookup Domain Layer
//!
//! DNS message model and the RFC 1035 wire codec. Nothing in this crate
//! performs I/O.
pub mod config;
pub mod dns_message;
pub mod dns_query;
pub mod dns_record;
pub mod domain_name;
pub mod errors;
pub mod wire;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_message::{Header, Message, Opcode, Question, ResponseCode};
pub use dns_query::{Endpoint, QueryRequest};
pub use dns_record::{RData, RecordClass, RecordType, ResourceRecord};
pub use domain_name::DomainName;
pub use errors::{DecodeError, QueryError, TransportError};
