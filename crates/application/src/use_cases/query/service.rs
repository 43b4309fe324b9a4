use super::driver::{self, QueryHandle};
use super::transaction::QueryTransaction;
use crate::ports::TransportFactory;
use crate::use_cases::delivery::{deferred, CancelOnDrop, Completion};
use async_trait::async_trait;
use ferrous_lookup_domain::{Message, QueryError, QueryRequest};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::debug;

/// Entry point for issuing DNS queries.
///
/// Implementors provide the callback form; the future form and the
/// domain-only conveniences are derived from it.
#[async_trait]
pub trait DnsQuerying: Send + Sync {
    /// Starts `request` on `context`. `completion` receives exactly one
    /// result.
    fn query(
        &self,
        request: QueryRequest,
        context: &Handle,
        completion: Completion<Message>,
    ) -> QueryHandle;

    /// Runs `request` and resolves to its result. Dropping the future cancels
    /// the query.
    async fn lookup(&self, request: QueryRequest, context: &Handle) -> Result<Message, QueryError> {
        deferred(|completion| CancelOnDrop::new(self.query(request, context, completion))).await
    }

    /// Queries the A records of `domain` against the default server. An
    /// invalid name is delivered to `completion` as an error.
    fn query_domain(
        &self,
        domain: &str,
        context: &Handle,
        completion: Completion<Message>,
    ) -> QueryHandle {
        match QueryRequest::parse(domain) {
            Ok(request) => self.query(request, context, completion),
            Err(err) => {
                completion(Err(err));
                QueryHandle::detached()
            }
        }
    }

    async fn lookup_domain(&self, domain: &str, context: &Handle) -> Result<Message, QueryError> {
        let request = QueryRequest::parse(domain)?;
        self.lookup(request, context).await
    }
}

pub struct DnsService {
    transports: Arc<dyn TransportFactory>,
}

impl DnsService {
    pub fn new(transports: Arc<dyn TransportFactory>) -> Self {
        Self { transports }
    }
}

#[async_trait]
impl DnsQuerying for DnsService {
    fn query(
        &self,
        request: QueryRequest,
        context: &Handle,
        completion: Completion<Message>,
    ) -> QueryHandle {
        debug!(
            server = %request.endpoint,
            domain = %request.domain,
            record_type = %request.record_type,
            "Starting DNS query"
        );
        let transaction = QueryTransaction::new(request, self.transports.create(), completion);
        driver::spawn(context, transaction)
    }
}
