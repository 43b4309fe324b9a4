use crate::dns_message::ResponseCode;
use crate::dns_record::RecordType;
use thiserror::Error;

/// Structural problems found while decoding a DNS message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Message truncated: {len} bytes is shorter than the 12-byte header")]
    Truncated { len: usize },

    #[error("Unexpected end of message at offset {offset}: needed {needed} more bytes")]
    UnexpectedEnd { offset: usize, needed: usize },

    #[error("Compression pointer at offset {offset} targets {target}, outside the message")]
    PointerOutOfRange { offset: usize, target: usize },

    #[error("Compression pointer at offset {offset} targets {target}, which is not behind the name")]
    PointerNotBackward { offset: usize, target: usize },

    #[error("Too many compression pointers in name starting at offset {offset}")]
    TooManyPointers { offset: usize },

    #[error("Reserved label type 0x{byte:02x} at offset {offset}")]
    ReservedLabelType { offset: usize, byte: u8 },

    #[error("Domain name starting at offset {offset} exceeds 255 bytes")]
    NameTooLong { offset: usize },

    #[error("{record_type} record data declared {declared} bytes but {consumed} were parsed")]
    RDataLength {
        record_type: RecordType,
        declared: u16,
        consumed: usize,
    },

    #[error("{remaining} trailing bytes after the last declared record at offset {offset}")]
    TrailingData { offset: usize, remaining: usize },
}

impl DecodeError {
    /// True when the buffer could not even hold a header.
    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeError::Truncated { .. })
    }
}

/// Failures reported by a datagram transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Transport connection is not ready")]
    NotReady,

    #[error("Failed to resolve {host}: {reason}")]
    Resolve { host: String, reason: String },

    #[error("Failed to bind UDP socket: {0}")]
    Bind(String),

    #[error("Failed to connect to {server}: {reason}")]
    Connect { server: String, reason: String },

    #[error("Failed to send UDP query to {server}: {reason}")]
    Send { server: String, reason: String },

    #[error("Failed to receive UDP response from {server}: {reason}")]
    Receive { server: String, reason: String },

    #[error("Transport connection refused by {server}")]
    ConnectionRefused { server: String },

    #[error("Transport closed by {server}")]
    Closed { server: String },
}

/// The single error a query delivers when it does not produce a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Transport connection is not ready")]
    TransportNotReady,

    #[error("Response datagram was incomplete")]
    ResponseIncomplete,

    #[error("Malformed DNS response: {0}")]
    Malformed(#[from] DecodeError),

    #[error("Query cancelled")]
    Cancelled,

    #[error("Query finished without a result")]
    Unknown,

    #[error(transparent)]
    Transport(TransportError),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Server responded with {0}")]
    ServerError(ResponseCode),
}

impl From<TransportError> for QueryError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::NotReady => QueryError::TransportNotReady,
            other => QueryError::Transport(other),
        }
    }
}
