mod header;
mod question;

pub use header::{Header, Opcode, ResponseCode, HEADER_LEN};
pub use question::Question;

use crate::dns_record::ResourceRecord;
use crate::errors::{DecodeError, QueryError};
use crate::wire;

/// A DNS message. Queries are built with [`Message::query`]; responses come
/// from [`Message::decode`] and are read through accessors only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    header: Header,
    questions: Vec<Question>,
    answers: Vec<ResourceRecord>,
    authorities: Vec<ResourceRecord>,
    additionals: Vec<ResourceRecord>,
}

impl Message {
    /// A recursive query carrying a single question.
    pub fn query(id: u16, question: Question) -> Self {
        let mut header = Header::query(id);
        header.question_count = 1;
        Self {
            header,
            questions: vec![question],
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    pub(crate) fn from_sections(
        header: Header,
        questions: Vec<Question>,
        answers: Vec<ResourceRecord>,
        authorities: Vec<ResourceRecord>,
        additionals: Vec<ResourceRecord>,
    ) -> Self {
        Self {
            header,
            questions,
            answers,
            authorities,
            additionals,
        }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        wire::decode(bytes)
    }

    pub fn encode(&self) -> Vec<u8> {
        wire::encode(&self.header, &self.questions)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn id(&self) -> u16 {
        self.header.id
    }

    pub fn response_code(&self) -> ResponseCode {
        self.header.response_code
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[ResourceRecord] {
        &self.answers
    }

    pub fn authorities(&self) -> &[ResourceRecord] {
        &self.authorities
    }

    pub fn additionals(&self) -> &[ResourceRecord] {
        &self.additionals
    }

    /// Rendered resource data of every answer, in wire order.
    pub fn answer_strings(&self) -> Vec<String> {
        self.answers.iter().map(ResourceRecord::rdata_string).collect()
    }

    /// Reports a non-zero RCODE as an error, handing the message back otherwise.
    pub fn ensure_success(self) -> Result<Self, QueryError> {
        match self.header.response_code {
            ResponseCode::NoError => Ok(self),
            rcode => Err(QueryError::ServerError(rcode)),
        }
    }
}
