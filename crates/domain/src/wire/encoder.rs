use crate::dns_message::{Header, Question, HEADER_LEN};
use crate::domain_name::DomainName;

/// Serializes a header and its question section.
///
/// QDCOUNT is taken from `questions`; the record counts are written as zero
/// since no records are emitted. Names are never compressed.
pub fn encode(header: &Header, questions: &[Question]) -> Vec<u8> {
    let capacity = HEADER_LEN
        + questions
            .iter()
            .map(|q| q.name.wire_len() + 4)
            .sum::<usize>();
    let mut buf = Vec::with_capacity(capacity);

    buf.extend_from_slice(&header.id.to_be_bytes());
    buf.extend_from_slice(&header.flags().to_be_bytes());
    buf.extend_from_slice(&(questions.len() as u16).to_be_bytes());
    buf.extend_from_slice(&[0x00; 6]);

    for question in questions {
        write_name(&mut buf, &question.name);
        buf.extend_from_slice(&question.record_type.to_u16().to_be_bytes());
        buf.extend_from_slice(&question.class.to_u16().to_be_bytes());
    }

    buf
}

fn write_name(buf: &mut Vec<u8>, name: &DomainName) {
    // DomainName keeps every label within 63 bytes.
    for label in name.labels() {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label);
    }
    buf.push(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns_record::{RecordClass, RecordType};

    #[test]
    fn test_encode_query_layout() {
        let question = Question::new(DomainName::parse("example.com").unwrap(), RecordType::A);
        let bytes = encode(&Header::query(0xAAAA), &[question]);

        assert_eq!(
            bytes,
            vec![
                0xAA, 0xAA, // id
                0x01, 0x00, // flags: RD
                0x00, 0x01, // qdcount
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // an/ns/ar
                7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0,
                0x00, 0x01, // A
                0x00, 0x01, // IN
            ]
        );
    }

    #[test]
    fn test_question_count_follows_questions() {
        let mut header = Header::query(1);
        header.question_count = 7;
        header.answer_count = 3;
        let q = Question::new(DomainName::parse("a.b").unwrap(), RecordType::TXT)
            .with_class(RecordClass::CH);

        let bytes = encode(&header, &[q.clone(), q]);

        assert_eq!(&bytes[4..12], &[0, 2, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[bytes.len() - 4..], &[0x00, 0x10, 0x00, 0x03]);
    }

    #[test]
    fn test_root_name_is_single_zero() {
        let q = Question::new(DomainName::root(), RecordType::Unknown(99));
        let bytes = encode(&Header::query(0), &[q]);
        assert_eq!(&bytes[12..], &[0, 0x00, 0x63, 0x00, 0x01]);
    }
}
