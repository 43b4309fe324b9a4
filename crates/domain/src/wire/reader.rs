use crate::domain_name::{DomainName, MAX_NAME_WIRE_LEN};
use crate::errors::DecodeError;

const POINTER_MASK: u8 = 0xC0;

/// Upper bound on compression pointers followed while reading one name.
pub const MAX_POINTER_HOPS: usize = 64;

/// Bounds-checked cursor over a message buffer.
pub(crate) struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let bytes = self
            .pos
            .checked_add(len)
            .and_then(|end| self.buf.get(self.pos..end))
            .ok_or(DecodeError::UnexpectedEnd {
                offset: self.pos,
                needed: len.saturating_sub(self.remaining()),
            })?;
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads a possibly compressed domain name (RFC 1035 §4.1.4).
    ///
    /// Every pointer must land strictly before the label run it terminates,
    /// so each hop moves backward through the buffer and a cycle cannot be
    /// expressed. The hop count is capped on top of that.
    pub fn read_name(&mut self) -> Result<DomainName, DecodeError> {
        let name_start = self.pos;
        let mut cursor = self.pos;
        let mut run_start = self.pos;
        let mut resume_at: Option<usize> = None;
        let mut hops = 0usize;
        let mut wire_len = 1usize;
        let mut labels: Vec<Box<[u8]>> = Vec::new();

        loop {
            let len_byte = *self.buf.get(cursor).ok_or(DecodeError::UnexpectedEnd {
                offset: cursor,
                needed: 1,
            })?;

            match len_byte & POINTER_MASK {
                0x00 if len_byte == 0 => {
                    cursor += 1;
                    break;
                }
                0x00 => {
                    let len = len_byte as usize;
                    let label_start = cursor + 1;
                    let label = self.buf.get(label_start..label_start + len).ok_or(
                        DecodeError::UnexpectedEnd {
                            offset: label_start,
                            needed: (label_start + len).saturating_sub(self.buf.len()),
                        },
                    )?;

                    wire_len += len + 1;
                    if wire_len > MAX_NAME_WIRE_LEN {
                        return Err(DecodeError::NameTooLong { offset: name_start });
                    }

                    labels.push(Box::from(label));
                    cursor = label_start + len;
                }
                POINTER_MASK => {
                    let low = *self.buf.get(cursor + 1).ok_or(DecodeError::UnexpectedEnd {
                        offset: cursor + 1,
                        needed: 1,
                    })?;
                    let target = (((len_byte & !POINTER_MASK) as usize) << 8) | low as usize;

                    if target >= self.buf.len() {
                        return Err(DecodeError::PointerOutOfRange {
                            offset: cursor,
                            target,
                        });
                    }
                    if target >= run_start {
                        return Err(DecodeError::PointerNotBackward {
                            offset: cursor,
                            target,
                        });
                    }

                    hops += 1;
                    if hops > MAX_POINTER_HOPS {
                        return Err(DecodeError::TooManyPointers { offset: name_start });
                    }

                    // The caller continues after the first pointer only.
                    if resume_at.is_none() {
                        resume_at = Some(cursor + 2);
                    }
                    cursor = target;
                    run_start = target;
                }
                _ => {
                    return Err(DecodeError::ReservedLabelType {
                        offset: cursor,
                        byte: len_byte,
                    })
                }
            }
        }

        self.pos = resume_at.unwrap_or(cursor);
        Ok(DomainName::from_labels(labels))
    }
}
