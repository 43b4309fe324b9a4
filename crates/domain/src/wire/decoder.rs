use super::reader::WireReader;
use crate::dns_message::{Header, Message, Question, HEADER_LEN};
use crate::dns_record::{RData, RecordClass, RecordType, ResourceRecord};
use crate::errors::DecodeError;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Smallest possible resource record: root name, type, class, ttl, rdlength.
const MIN_RECORD_LEN: usize = 11;

/// Smallest possible question: root name, type, class.
const MIN_QUESTION_LEN: usize = 5;

/// Decodes one complete DNS message.
///
/// Every declared section entry must be present and the buffer must end
/// exactly after the last one. Nothing partial is ever returned.
pub fn decode(bytes: &[u8]) -> Result<Message, DecodeError> {
    if bytes.len() < HEADER_LEN {
        return Err(DecodeError::Truncated { len: bytes.len() });
    }

    let mut reader = WireReader::new(bytes);
    let header = read_header(&mut reader)?;

    let mut questions = Vec::with_capacity(bounded(header.question_count, &reader, MIN_QUESTION_LEN));
    for _ in 0..header.question_count {
        questions.push(read_question(&mut reader)?);
    }

    let answers = read_records(&mut reader, bytes, header.answer_count)?;
    let authorities = read_records(&mut reader, bytes, header.authority_count)?;
    let additionals = read_records(&mut reader, bytes, header.additional_count)?;

    if reader.remaining() > 0 {
        return Err(DecodeError::TrailingData {
            offset: reader.position(),
            remaining: reader.remaining(),
        });
    }

    Ok(Message::from_sections(
        header,
        questions,
        answers,
        authorities,
        additionals,
    ))
}

fn bounded(count: u16, reader: &WireReader<'_>, min_len: usize) -> usize {
    usize::from(count).min(reader.remaining() / min_len)
}

fn read_header(reader: &mut WireReader<'_>) -> Result<Header, DecodeError> {
    let mut header = Header {
        id: reader.read_u16()?,
        ..Header::default()
    };
    header.set_flags(reader.read_u16()?);
    header.question_count = reader.read_u16()?;
    header.answer_count = reader.read_u16()?;
    header.authority_count = reader.read_u16()?;
    header.additional_count = reader.read_u16()?;
    Ok(header)
}

fn read_question(reader: &mut WireReader<'_>) -> Result<Question, DecodeError> {
    let name = reader.read_name()?;
    let record_type = RecordType::from_u16(reader.read_u16()?);
    let class = RecordClass::from_u16(reader.read_u16()?);
    Ok(Question {
        name,
        record_type,
        class,
    })
}

fn read_records(
    reader: &mut WireReader<'_>,
    message: &[u8],
    count: u16,
) -> Result<Vec<ResourceRecord>, DecodeError> {
    let mut records = Vec::with_capacity(bounded(count, reader, MIN_RECORD_LEN));
    for _ in 0..count {
        records.push(read_record(reader, message)?);
    }
    Ok(records)
}

fn read_record(reader: &mut WireReader<'_>, message: &[u8]) -> Result<ResourceRecord, DecodeError> {
    let name = reader.read_name()?;
    let record_type = RecordType::from_u16(reader.read_u16()?);
    let class = RecordClass::from_u16(reader.read_u16()?);
    let raw_ttl = reader.read_u32()?;
    let rdlength = reader.read_u16()?;

    let rdata_start = reader.position();
    reader.read_bytes(rdlength as usize)?;
    let rdata = read_rdata(message, rdata_start, rdlength, record_type)?;

    Ok(ResourceRecord {
        name,
        record_type,
        class,
        // RFC 2181 §8: a TTL with the top bit set is treated as zero.
        ttl: if raw_ttl & 0x8000_0000 != 0 { 0 } else { raw_ttl },
        rdlength,
        rdata,
    })
}

/// Interprets `rdlength` bytes at `start`. The view handed to the type
/// parser ends with the resource data, so literal labels and strings cannot
/// run past it, while compression pointers can still reach earlier names.
fn read_rdata(
    message: &[u8],
    start: usize,
    rdlength: u16,
    record_type: RecordType,
) -> Result<RData, DecodeError> {
    let end = start + rdlength as usize;
    let view = message.get(..end).ok_or(DecodeError::UnexpectedEnd {
        offset: start,
        needed: end.saturating_sub(message.len()),
    })?;
    let mut rd = WireReader::at(view, start);

    let rdata = match record_type {
        RecordType::A if rdlength == 4 => {
            let b = rd.read_bytes(4)?;
            RData::A(Ipv4Addr::new(b[0], b[1], b[2], b[3]))
        }
        RecordType::AAAA if rdlength == 16 => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(rd.read_bytes(16)?);
            RData::AAAA(Ipv6Addr::from(octets))
        }
        RecordType::A | RecordType::AAAA => {
            return Err(DecodeError::RDataLength {
                record_type,
                declared: rdlength,
                consumed: if record_type == RecordType::A { 4 } else { 16 },
            })
        }
        RecordType::TXT => {
            let mut strings = Vec::new();
            while rd.position() < end {
                let len = rd.read_u8()? as usize;
                strings.push(String::from_utf8_lossy(rd.read_bytes(len)?).into_owned());
            }
            RData::TXT(strings)
        }
        RecordType::CNAME => RData::CNAME(rd.read_name()?),
        RecordType::NS => RData::NS(rd.read_name()?),
        RecordType::PTR => RData::PTR(rd.read_name()?),
        RecordType::MX => RData::MX {
            preference: rd.read_u16()?,
            exchange: rd.read_name()?,
        },
        _ => RData::Raw(rd.read_bytes(rdlength as usize)?.to_vec()),
    };

    let consumed = rd.position() - start;
    if consumed != rdlength as usize {
        return Err(DecodeError::RDataLength {
            record_type,
            declared: rdlength,
            consumed,
        });
    }

    Ok(rdata)
}
