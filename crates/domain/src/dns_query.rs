use crate::dns_message::{Message, Question};
use crate::dns_record::{RecordClass, RecordType};
use crate::domain_name::DomainName;
use crate::errors::QueryError;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_HOST: &str = "8.8.8.8";
pub const DEFAULT_PORT: u16 = 53;
pub const DEFAULT_TRANSACTION_ID: u16 = 0xAAAA;

/// Where a query is sent. The host may be an IP literal or a name the
/// transport resolves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub host: Arc<str>,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<Arc<str>>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn ip(&self) -> Option<IpAddr> {
        self.host.parse().ok()
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

fn parse_host_port(s: &str) -> Option<(&str, u16)> {
    if let Some(rest) = s.strip_prefix('[') {
        let (host, rest) = rest.split_once(']')?;
        let port = match rest.strip_prefix(':') {
            Some(port) => port.parse::<u16>().ok()?,
            None if rest.is_empty() => DEFAULT_PORT,
            None => return None,
        };
        return Some((host, port));
    }
    if s.parse::<IpAddr>().is_ok() {
        return Some((s, DEFAULT_PORT));
    }
    match s.rsplit_once(':') {
        Some((host, port)) => Some((host, port.parse::<u16>().ok()?)),
        None => Some((s, DEFAULT_PORT)),
    }
}

impl FromStr for Endpoint {
    type Err = String;

    /// Accepts `host`, `host:port`, a bare IPv6 literal, or `[v6]:port`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_host_port(s.trim()) {
            Some((host, port)) if !host.is_empty() => Ok(Endpoint::new(host, port)),
            _ => Err(format!(
                "Invalid server '{}'. Expected HOST, HOST:PORT or [IPv6]:PORT",
                s
            )),
        }
    }
}

/// Everything one query transaction needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub endpoint: Endpoint,
    pub domain: DomainName,
    pub record_type: RecordType,
    pub class: RecordClass,
    pub transaction_id: u16,
}

impl QueryRequest {
    pub fn new(domain: DomainName, record_type: RecordType) -> Self {
        Self {
            endpoint: Endpoint::default(),
            domain,
            record_type,
            class: RecordClass::IN,
            transaction_id: DEFAULT_TRANSACTION_ID,
        }
    }

    /// Validates `domain` and builds an A query against the default server.
    pub fn parse(domain: &str) -> Result<Self, QueryError> {
        Ok(Self::new(DomainName::parse(domain)?, RecordType::A))
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    pub fn with_transaction_id(mut self, id: u16) -> Self {
        self.transaction_id = id;
        self
    }

    pub fn question(&self) -> Question {
        Question::new(self.domain.clone(), self.record_type).with_class(self.class)
    }

    /// The query message sent for this request: one question, RD set.
    pub fn to_message(&self) -> Message {
        Message::query(self.transaction_id, self.question())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_parsing() {
        assert_eq!("1.1.1.1".parse::<Endpoint>().unwrap(), Endpoint::new("1.1.1.1", 53));
        assert_eq!(
            "dns.google:5353".parse::<Endpoint>().unwrap(),
            Endpoint::new("dns.google", 5353)
        );
        assert_eq!(
            "2001:4860:4860::8888".parse::<Endpoint>().unwrap(),
            Endpoint::new("2001:4860:4860::8888", 53)
        );
        assert_eq!(
            "[::1]:5300".parse::<Endpoint>().unwrap(),
            Endpoint::new("::1", 5300)
        );
        assert!("host:notaport".parse::<Endpoint>().is_err());
        assert!(":53".parse::<Endpoint>().is_err());
    }

    #[test]
    fn test_endpoint_display_brackets_ipv6() {
        assert_eq!(Endpoint::new("::1", 53).to_string(), "[::1]:53");
        assert_eq!(Endpoint::default().to_string(), "8.8.8.8:53");
    }

    #[test]
    fn test_request_defaults() {
        let request = QueryRequest::parse("example.com").unwrap();
        assert_eq!(request.endpoint, Endpoint::new("8.8.8.8", 53));
        assert_eq!(request.record_type, RecordType::A);
        assert_eq!(request.class, RecordClass::IN);
        assert_eq!(request.transaction_id, 0xAAAA);
    }

    #[test]
    fn test_request_message_has_single_recursive_question() {
        let message = QueryRequest::parse("example.com")
            .unwrap()
            .with_record_type(RecordType::TXT)
            .with_transaction_id(7)
            .to_message();

        assert_eq!(message.id(), 7);
        assert!(message.header().recursion_desired);
        assert!(!message.header().is_response);
        assert_eq!(message.questions().len(), 1);
        assert_eq!(message.questions()[0].record_type, RecordType::TXT);
    }
}
