use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use revdns_domain::DomainError;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PtrResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// PTR targets in answer order, without the trailing root dot.
    pub hostnames: Vec<String>,
}

impl PtrResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        !matches!(self.rcode, ResponseCode::NoError | ResponseCode::NXDomain)
    }

    pub fn first_hostname(&self) -> Option<&str> {
        self.hostnames.first().map(String::as_str)
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<PtrResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let hostnames: Vec<String> = message
            .answers()
            .iter()
            .filter_map(|record| match record.data() {
                RData::PTR(ptr) => Some(trim_root(&ptr.to_utf8())),
                _ => None,
            })
            .collect();

        debug!(
            id = message.id(),
            rcode = Self::rcode_to_status(rcode),
            answers = hostnames.len(),
            truncated = truncated,
            "PTR response parsed"
        );

        Ok(PtrResponse {
            id: message.id(),
            rcode,
            truncated,
            hostnames,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}

fn trim_root(name: &str) -> String {
    match name.strip_suffix('.') {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => name.to_string(),
    }
}
