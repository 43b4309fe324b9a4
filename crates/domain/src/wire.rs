//! RFC 1035 §4 message framing.
//!
//! Encoding covers what a resolver sends: a header and its questions, with no
//! name compression. Decoding accepts any complete message, follows
//! compression pointers, and interprets record data per type.

mod decoder;
mod encoder;
mod reader;

pub use decoder::decode;
pub use encoder::encode;
pub use reader::MAX_POINTER_HOPS;
