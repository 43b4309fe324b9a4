use super::{RData, RecordClass, RecordType};
use crate::domain_name::DomainName;

/// One answer, authority or additional entry of a decoded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DomainName,

    pub record_type: RecordType,

    pub class: RecordClass,

    pub ttl: u32,

    /// Declared length of the resource data on the wire.
    pub rdlength: u16,

    pub rdata: RData,
}

impl ResourceRecord {
    pub fn is_expired(&self, elapsed_secs: u32) -> bool {
        elapsed_secs >= self.ttl
    }

    pub fn remaining_ttl(&self, elapsed_secs: u32) -> u32 {
        self.ttl.saturating_sub(elapsed_secs)
    }

    /// Resource data rendered as text: dotted-decimal for A, space-joined
    /// character-strings for TXT.
    pub fn rdata_string(&self) -> String {
        self.rdata.to_string()
    }
}
