use super::forwarding::{MessageBuilder, PtrResponse, ResponseParser};
use super::reverse_name::ip_to_reverse_domain;
use super::transport::create_transport;
use async_trait::async_trait;
use revdns_application::ports::ReverseLookup;
use revdns_domain::{DomainError, LookupFailure, ResolverEndpoint, TransportKind};
use std::net::IpAddr;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// What a single resolver told us about one address.
enum Attempt {
    /// Authoritative for the whole lookup: stop asking other resolvers.
    Final(Result<String, LookupFailure>),
    /// The server answered with an error rcode; try the next one.
    ServerError(String),
    /// The server could not be reached.
    Unreachable(DomainError),
    /// The bytes that came back were not a usable DNS response.
    Malformed(String),
}

/// Reverse lookups via PTR queries sent straight to the caller's resolvers.
///
/// Resolvers are tried one after another starting at a random index, so a
/// batch spreads its load across the list. A server that times out, refuses
/// or answers SERVFAIL hands over to the next one; NXDOMAIN and empty answers
/// are final.
pub struct PtrReverseLookup {
    query_timeout: Duration,
    rotate: bool,
}

impl PtrReverseLookup {
    pub fn new(query_timeout: Duration) -> Self {
        Self {
            query_timeout,
            rotate: true,
        }
    }

    /// Always start from the first resolver instead of a random one.
    pub fn without_rotation(mut self) -> Self {
        self.rotate = false;
        self
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Parses the resolver list, dropping entries that are not addresses.
    pub fn parse_resolvers(resolvers: &[String]) -> Vec<ResolverEndpoint> {
        resolvers
            .iter()
            .filter_map(|raw| match raw.parse::<ResolverEndpoint>() {
                Ok(endpoint) => Some(endpoint),
                Err(e) => {
                    warn!(resolver = %raw, error = %e, "Skipping unusable resolver");
                    None
                }
            })
            .collect()
    }

    async fn exchange(
        &self,
        endpoint: &ResolverEndpoint,
        reverse_name: &str,
    ) -> Result<PtrResponse, DomainError> {
        let (id, query) = MessageBuilder::build_ptr_query(reverse_name)?;
        let transport = create_transport(endpoint);

        let response = transport.send(&query, self.query_timeout).await?;
        let parsed = ResponseParser::parse(&response.bytes)?;

        if parsed.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "response ID mismatch from {}: sent {:#06x}, got {:#06x}",
                endpoint, id, parsed.id
            )));
        }

        debug!(
            server = %endpoint,
            protocol = response.protocol_used,
            rcode = ResponseParser::rcode_to_status(parsed.rcode),
            "PTR exchange complete"
        );

        Ok(parsed)
    }

    async fn ask(&self, endpoint: &ResolverEndpoint, reverse_name: &str) -> Attempt {
        let mut result = self.exchange(endpoint, reverse_name).await;

        if let Ok(response) = &result {
            if response.truncated && endpoint.transport == TransportKind::Udp {
                debug!(server = %endpoint, "Truncated UDP answer, retrying over TCP");
                result = self.exchange(&endpoint.as_tcp(), reverse_name).await;
            }
        }

        match result {
            Ok(response) => classify_response(&response, endpoint),
            Err(DomainError::InvalidDnsResponse(reason)) => Attempt::Malformed(reason),
            Err(e) if e.is_transport() => Attempt::Unreachable(e),
            Err(e) => Attempt::Malformed(e.to_string()),
        }
    }
}

impl Default for PtrReverseLookup {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_TIMEOUT)
    }
}

fn classify_response(response: &PtrResponse, endpoint: &ResolverEndpoint) -> Attempt {
    if response.is_nxdomain() {
        return Attempt::Final(Err(LookupFailure::host_not_found(format!(
            "NXDOMAIN from {}",
            endpoint
        ))));
    }
    if response.is_server_error() {
        return Attempt::ServerError(format!(
            "{} from {}",
            ResponseParser::rcode_to_status(response.rcode),
            endpoint
        ));
    }
    match response.first_hostname() {
        Some(hostname) => Attempt::Final(Ok(hostname.to_string())),
        None => Attempt::Final(Err(LookupFailure::host_not_found(format!(
            "no PTR record from {}",
            endpoint
        )))),
    }
}

#[async_trait]
impl ReverseLookup for PtrReverseLookup {
    async fn reverse_lookup(&self, ip: &str, resolvers: &[String]) -> Result<String, LookupFailure> {
        let addr: IpAddr = ip.trim().parse().map_err(|_| {
            LookupFailure::resolution_failed(DomainError::InvalidIpAddress(ip.to_string()).to_string())
        })?;

        let endpoints = Self::parse_resolvers(resolvers);
        if endpoints.is_empty() {
            return Err(LookupFailure::resolution_failed(
                DomainError::TransportNoUsableResolvers.to_string(),
            ));
        }

        let reverse_name = ip_to_reverse_domain(&addr);
        let start = if self.rotate {
            fastrand::usize(..endpoints.len())
        } else {
            0
        };

        debug!(ip = %addr, reverse_name = %reverse_name, start, "Performing PTR lookup");

        let mut server_errors = Vec::new();
        let mut unreachable = 0usize;
        let mut malformed = Vec::new();

        for offset in 0..endpoints.len() {
            let endpoint = &endpoints[(start + offset) % endpoints.len()];

            match self.ask(endpoint, &reverse_name).await {
                Attempt::Final(result) => return result,
                Attempt::ServerError(detail) => {
                    debug!(ip = %addr, server = %endpoint, detail = %detail, "Resolver failed, trying next");
                    server_errors.push(detail);
                }
                Attempt::Unreachable(e) => {
                    debug!(ip = %addr, server = %endpoint, error = %e, "Resolver unreachable, trying next");
                    unreachable += 1;
                }
                Attempt::Malformed(reason) => {
                    warn!(ip = %addr, server = %endpoint, reason = %reason, "Malformed DNS response");
                    malformed.push(reason);
                }
            }
        }

        if malformed.len() == endpoints.len() {
            return Err(LookupFailure::unknown(malformed.join("; ")));
        }
        if unreachable == endpoints.len() {
            return Err(LookupFailure::resolution_failed(
                DomainError::TransportAllServersUnreachable.to_string(),
            ));
        }

        let mut details = server_errors;
        if unreachable > 0 {
            details.push(format!("{} unreachable", unreachable));
        }
        details.extend(malformed);
        Err(LookupFailure::resolution_failed(details.join("; ")))
    }

    fn backend_name(&self) -> &'static str {
        "resolvers"
    }
}
