#![allow(dead_code)]

/// Assembles raw response datagrams the way a name server would lay them
/// out, so decoding can be exercised against realistic bytes.
pub struct ResponseBuilder {
    id: u16,
    flags: u16,
    counts: Option<[u16; 4]>,
    questions: Vec<Vec<u8>>,
    sections: [Vec<Vec<u8>>; 3],
}

pub const QUESTION_OFFSET: u16 = 12;

impl ResponseBuilder {
    pub fn new(id: u16) -> Self {
        Self {
            id,
            flags: 0x8180,
            counts: None,
            questions: Vec::new(),
            sections: [Vec::new(), Vec::new(), Vec::new()],
        }
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        self.flags = (self.flags & !0x000F) | rcode as u16;
        self
    }

    /// Overrides the header counts instead of deriving them from the sections.
    pub fn counts(mut self, qd: u16, an: u16, ns: u16, ar: u16) -> Self {
        self.counts = Some([qd, an, ns, ar]);
        self
    }

    pub fn question(mut self, name: &str, rtype: u16) -> Self {
        let mut q = encode_name(name);
        q.extend_from_slice(&rtype.to_be_bytes());
        q.extend_from_slice(&1u16.to_be_bytes());
        self.questions.push(q);
        self
    }

    /// Answer whose owner name is a pointer to the first question name.
    pub fn answer(mut self, rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.sections[0].push(record(&pointer(QUESTION_OFFSET), rtype, ttl, rdata));
        self
    }

    pub fn answer_named(mut self, name: &str, rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.sections[0].push(record(&encode_name(name), rtype, ttl, rdata));
        self
    }

    pub fn answer_owned(mut self, owner: &[u8], rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.sections[0].push(record(owner, rtype, ttl, rdata));
        self
    }

    pub fn authority(mut self, rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.sections[1].push(record(&pointer(QUESTION_OFFSET), rtype, ttl, rdata));
        self
    }

    pub fn additional_named(mut self, name: &str, rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.sections[2].push(record(&encode_name(name), rtype, ttl, rdata));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let counts = self.counts.unwrap_or([
            self.questions.len() as u16,
            self.sections[0].len() as u16,
            self.sections[1].len() as u16,
            self.sections[2].len() as u16,
        ]);

        let mut buf = Vec::new();
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.extend_from_slice(&self.flags.to_be_bytes());
        for count in counts {
            buf.extend_from_slice(&count.to_be_bytes());
        }
        for q in &self.questions {
            buf.extend_from_slice(q);
        }
        for section in &self.sections {
            for rr in section {
                buf.extend_from_slice(rr);
            }
        }
        buf
    }
}

pub fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

pub fn pointer(offset: u16) -> Vec<u8> {
    (0xC000 | offset).to_be_bytes().to_vec()
}

pub fn txt_rdata(strings: &[&str]) -> Vec<u8> {
    let mut out = Vec::new();
    for s in strings {
        out.push(s.len() as u8);
        out.extend_from_slice(s.as_bytes());
    }
    out
}

fn record(owner: &[u8], rtype: u16, ttl: u32, rdata: &[u8]) -> Vec<u8> {
    let mut rr = owner.to_vec();
    rr.extend_from_slice(&rtype.to_be_bytes());
    rr.extend_from_slice(&1u16.to_be_bytes());
    rr.extend_from_slice(&ttl.to_be_bytes());
    rr.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    rr.extend_from_slice(rdata);
    rr
}
