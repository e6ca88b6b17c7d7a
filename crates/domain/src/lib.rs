//! revdns domain layer
pub mod config;
pub mod errors;
pub mod resolution;
pub mod resolver_endpoint;

pub use config::{CliOverrides, Config, ConfigError, LookupBackend};
pub use errors::DomainError;
pub use resolution::{FailureKind, LookupFailure, LookupResult, ResolutionOutcome};
pub use resolver_endpoint::{ResolverEndpoint, TransportKind, DEFAULT_DNS_PORT};
