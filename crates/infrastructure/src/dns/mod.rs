pub mod forwarding;
pub mod ptr_lookup;
pub mod reverse_name;
pub mod transport;

pub use forwarding::{MessageBuilder, PtrResponse, ResponseParser};
pub use ptr_lookup::{PtrReverseLookup, DEFAULT_QUERY_TIMEOUT};
pub use reverse_name::ip_to_reverse_domain;
pub use transport::{create_transport, DnsTransport, Transport, TransportResponse};
