mod driver;
mod service;
mod transaction;

pub use driver::{spawn, QueryHandle};
pub use service::{DnsQuerying, DnsService};
pub use transaction::{QueryTransaction, TransactionState};
