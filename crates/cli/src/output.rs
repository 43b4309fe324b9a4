use ferrous_lookup_domain::{DomainName, Header, Message, QueryRequest, ResourceRecord};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

fn fqdn(name: &DomainName) -> String {
    if name.is_root() {
        ".".to_string()
    } else {
        format!("{}.", name)
    }
}

fn flag_names(header: &Header) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if header.is_response {
        flags.push("qr");
    }
    if header.authoritative {
        flags.push("aa");
    }
    if header.truncated {
        flags.push("tc");
    }
    if header.recursion_desired {
        flags.push("rd");
    }
    if header.recursion_available {
        flags.push("ra");
    }
    flags
}

/// dig-style rendering of a response.
pub fn render_text(request: &QueryRequest, message: &Message, elapsed: Duration) -> String {
    TextReport {
        request,
        message,
        elapsed,
    }
    .to_string()
}

struct TextReport<'a> {
    request: &'a QueryRequest,
    message: &'a Message,
    elapsed: Duration,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message;
        let header = message.header();

        writeln!(
            f,
            ";; ->>HEADER<<- opcode: {}, status: {}, id: {}",
            header.opcode, header.response_code, header.id
        )?;
        writeln!(
            f,
            ";; flags: {}; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
            flag_names(header).join(" "),
            message.questions().len(),
            message.answers().len(),
            message.authorities().len(),
            message.additionals().len()
        )?;

        writeln!(f, "\n;; QUESTION SECTION:")?;
        for question in message.questions() {
            writeln!(
                f,
                ";{}\t\t{}\t{}",
                fqdn(&question.name),
                question.class,
                question.record_type
            )?;
        }

        for (title, records) in [
            ("ANSWER", message.answers()),
            ("AUTHORITY", message.authorities()),
            ("ADDITIONAL", message.additionals()),
        ] {
            if records.is_empty() {
                continue;
            }
            writeln!(f, "\n;; {} SECTION:", title)?;
            for record in records {
                writeln!(
                    f,
                    "{}\t{}\t{}\t{}\t{}",
                    fqdn(&record.name),
                    record.ttl,
                    record.class,
                    record.record_type,
                    record.rdata_string()
                )?;
            }
        }

        writeln!(f, "\n;; Query time: {} msec", self.elapsed.as_millis())?;
        writeln!(f, ";; SERVER: {}", self.request.endpoint)
    }
}

#[derive(Serialize)]
struct JsonResponse {
    server: String,
    query_time_ms: u64,
    id: u16,
    opcode: String,
    status: String,
    flags: Vec<&'static str>,
    question: Vec<JsonQuestion>,
    answer: Vec<JsonRecord>,
    authority: Vec<JsonRecord>,
    additional: Vec<JsonRecord>,
}

#[derive(Serialize)]
struct JsonQuestion {
    name: String,
    class: String,
    #[serde(rename = "type")]
    record_type: String,
}

#[derive(Serialize)]
struct JsonRecord {
    name: String,
    ttl: u32,
    class: String,
    #[serde(rename = "type")]
    record_type: String,
    data: String,
}

impl From<&ResourceRecord> for JsonRecord {
    fn from(record: &ResourceRecord) -> Self {
        Self {
            name: fqdn(&record.name),
            ttl: record.ttl,
            class: record.class.to_string(),
            record_type: record.record_type.to_string(),
            data: record.rdata_string(),
        }
    }
}

pub fn render_json(
    request: &QueryRequest,
    message: &Message,
    elapsed: Duration,
) -> Result<String, serde_json::Error> {
    let header = message.header();
    let response = JsonResponse {
        server: request.endpoint.to_string(),
        query_time_ms: elapsed.as_millis() as u64,
        id: header.id,
        opcode: header.opcode.to_string(),
        status: header.response_code.to_string(),
        flags: flag_names(header),
        question: message
            .questions()
            .iter()
            .map(|q| JsonQuestion {
                name: fqdn(&q.name),
                class: q.class.to_string(),
                record_type: q.record_type.to_string(),
            })
            .collect(),
        answer: message.answers().iter().map(JsonRecord::from).collect(),
        authority: message.authorities().iter().map(JsonRecord::from).collect(),
        additional: message.additionals().iter().map(JsonRecord::from).collect(),
    };
    serde_json::to_string_pretty(&response)
}
