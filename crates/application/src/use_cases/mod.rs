pub mod delivery;
pub mod query;

// Re-export use cases
pub use delivery::{deferred, CancelOnDrop, Completion, Deferred};
pub use query::{DnsQuerying, DnsService, QueryHandle, QueryTransaction, TransactionState};
