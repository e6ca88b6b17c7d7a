//! PTR query construction in wire format using `hickory-proto`.

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use revdns_domain::DomainError;
use std::str::FromStr;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Builds a recursive PTR query for `reverse_name` and returns the random
    /// message ID alongside the serialized bytes so the caller can match the
    /// response.
    pub fn build_ptr_query(reverse_name: &str) -> Result<(u16, Vec<u8>), DomainError> {
        Self::build_ptr_query_with_id(reverse_name, fastrand::u16(..))
    }

    pub fn build_ptr_query_with_id(
        reverse_name: &str,
        id: u16,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Name::from_str(reverse_name).map_err(|e| {
            DomainError::InvalidIpAddress(format!("Invalid reverse name '{}': {}", reverse_name, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordType::PTR);
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(128);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
