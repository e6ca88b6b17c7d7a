use async_trait::async_trait;
use dns_lookup::{LookupError, LookupErrorKind};
use revdns_application::ports::ReverseLookup;
use revdns_domain::{DomainError, LookupFailure};
use std::net::{IpAddr, SocketAddr};
use tracing::debug;

#[cfg(unix)]
const NI_NAMEREQD: i32 = libc::NI_NAMEREQD;
#[cfg(not(unix))]
const NI_NAMEREQD: i32 = 0x04;

/// Reverse lookups through the platform resolver (`getnameinfo`).
///
/// The OS decides which name servers to ask, so the resolver list handed to
/// each call is accepted and ignored. The call blocks, so it runs on tokio's
/// blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemReverseLookup;

impl SystemReverseLookup {
    pub fn new() -> Self {
        Self
    }
}

pub(crate) fn classify_lookup_error(error: &LookupError) -> LookupFailure {
    match error.kind() {
        LookupErrorKind::NoName | LookupErrorKind::NoData => {
            LookupFailure::host_not_found("Unknown host")
        }
        LookupErrorKind::Again => {
            LookupFailure::resolution_failed("Temporary failure in name resolution")
        }
        LookupErrorKind::Fail => {
            LookupFailure::resolution_failed("Non-recoverable failure in name resolution")
        }
        _ => LookupFailure::unknown(format!("{:?}", error)),
    }
}

#[async_trait]
impl ReverseLookup for SystemReverseLookup {
    async fn reverse_lookup(&self, ip: &str, _resolvers: &[String]) -> Result<String, LookupFailure> {
        let addr: IpAddr = ip.trim().parse().map_err(|_| {
            LookupFailure::resolution_failed(DomainError::InvalidIpAddress(ip.to_string()).to_string())
        })?;
        let sock = SocketAddr::new(addr, 0);

        let joined =
            tokio::task::spawn_blocking(move || dns_lookup::getnameinfo(&sock, NI_NAMEREQD)).await;

        match joined {
            Ok(Ok((hostname, _service))) => {
                debug!(ip = %addr, hostname = %hostname, "System reverse lookup succeeded");
                Ok(hostname)
            }
            Ok(Err(e)) => {
                let failure = classify_lookup_error(&e);
                debug!(ip = %addr, kind = %failure.kind, "System reverse lookup failed");
                Err(failure)
            }
            Err(e) => Err(LookupFailure::unknown(format!("lookup task failed: {}", e))),
        }
    }

    fn backend_name(&self) -> &'static str {
        "system"
    }

    fn honours_resolvers(&self) -> bool {
        false
    }
}
