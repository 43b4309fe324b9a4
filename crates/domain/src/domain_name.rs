use crate::errors::QueryError;
use std::fmt;
use std::str::FromStr;

pub const MAX_LABEL_LEN: usize = 63;

/// Maximum length of a name in wire form, including length octets and the
/// terminating root label.
pub const MAX_NAME_WIRE_LEN: usize = 255;

/// A domain name as an ordered list of raw labels. Case is preserved and
/// labels may hold any byte; every label is at most 63 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DomainName {
    labels: Vec<Box<[u8]>>,
}

impl DomainName {
    pub fn root() -> Self {
        Self { labels: Vec::new() }
    }

    /// Builds a name from labels that already satisfy the length limits.
    /// Only the decoder constructs names this way.
    pub(crate) fn from_labels(labels: Vec<Box<[u8]>>) -> Self {
        Self { labels }
    }

    /// Parses presentation format. `\.`, `\\` and `\DDD` escapes put the
    /// literal byte into a label.
    pub fn parse(name: &str) -> Result<Self, QueryError> {
        if name.is_empty() {
            return Err(QueryError::InvalidDomainName("empty name".to_string()));
        }
        if name == "." {
            return Ok(Self::root());
        }

        let mut labels = split_labels(name)?;
        if labels.len() > 1 && labels.last().is_some_and(|l| l.is_empty()) {
            labels.pop();
        }

        for label in &labels {
            if label.is_empty() {
                return Err(QueryError::InvalidDomainName(format!(
                    "empty label in '{}'",
                    name
                )));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(QueryError::InvalidDomainName(format!(
                    "label '{}' exceeds {} bytes",
                    String::from_utf8_lossy(label),
                    MAX_LABEL_LEN
                )));
            }
        }

        let domain = Self {
            labels: labels.into_iter().map(Vec::into_boxed_slice).collect(),
        };
        if domain.wire_len() > MAX_NAME_WIRE_LEN {
            return Err(QueryError::InvalidDomainName(format!(
                "'{}' exceeds {} bytes on the wire",
                name, MAX_NAME_WIRE_LEN
            )));
        }
        Ok(domain)
    }

    pub fn labels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.labels.iter().map(|label| &**label)
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Uncompressed length on the wire.
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }
}

fn split_labels(name: &str) -> Result<Vec<Vec<u8>>, QueryError> {
    let mut labels = Vec::new();
    let mut label = Vec::new();
    let mut bytes = name.bytes();

    while let Some(b) = bytes.next() {
        match b {
            b'.' => labels.push(std::mem::take(&mut label)),
            b'\\' => label.push(unescape(&mut bytes, name)?),
            _ => label.push(b),
        }
    }
    labels.push(label);
    Ok(labels)
}

fn unescape(bytes: &mut std::str::Bytes<'_>, name: &str) -> Result<u8, QueryError> {
    let invalid = || QueryError::InvalidDomainName(format!("bad escape in '{}'", name));

    let first = bytes.next().ok_or_else(invalid)?;
    if !first.is_ascii_digit() {
        return Ok(first);
    }

    let mut value = u16::from(first - b'0');
    for _ in 0..2 {
        let digit = bytes.next().filter(u8::is_ascii_digit).ok_or_else(invalid)?;
        value = value * 10 + u16::from(digit - b'0');
    }
    u8::try_from(value).map_err(|_| invalid())
}

fn write_label(f: &mut fmt::Formatter<'_>, label: &[u8]) -> fmt::Result {
    for &b in label {
        match b {
            b'.' | b'\\' => write!(f, "\\{}", b as char)?,
            0x21..=0x7E => write!(f, "{}", b as char)?,
            _ => write!(f, "\\{:03}", b)?,
        }
    }
    Ok(())
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return write!(f, ".");
        }
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write_label(f, label)?;
        }
        Ok(())
    }
}

impl FromStr for DomainName {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
