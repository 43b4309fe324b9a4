use crate::dns_record::{RecordClass, RecordType};
use crate::domain_name::DomainName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: DomainName,
    pub record_type: RecordType,
    pub class: RecordClass,
}

impl Question {
    pub fn new(name: DomainName, record_type: RecordType) -> Self {
        Self {
            name,
            record_type,
            class: RecordClass::IN,
        }
    }

    pub fn with_class(mut self, class: RecordClass) -> Self {
        self.class = class;
        self
    }
}
