use async_trait::async_trait;
use revdns_domain::LookupFailure;

/// Resolves one address to a hostname.
///
/// Implementations classify their own failures; a lookup never aborts the run.
#[async_trait]
pub trait ReverseLookup: Send + Sync {
    async fn reverse_lookup(&self, ip: &str, resolvers: &[String]) -> Result<String, LookupFailure>;

    fn backend_name(&self) -> &'static str;

    /// Whether the resolver list actually decides which server answers.
    fn honours_resolvers(&self) -> bool {
        true
    }
}
