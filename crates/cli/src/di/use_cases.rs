use revdns_application::ports::ReverseLookup;
use revdns_application::use_cases::ResolveIpListUseCase;
use revdns_domain::{Config, LookupBackend};
use revdns_infrastructure::{PtrReverseLookup, SystemReverseLookup};
use std::sync::Arc;

pub fn build_lookup(config: &Config) -> Arc<dyn ReverseLookup> {
    match config.resolution.backend {
        LookupBackend::System => Arc::new(SystemReverseLookup::new()),
        LookupBackend::Resolvers => {
            Arc::new(PtrReverseLookup::new(config.resolution.lookup_timeout()))
        }
    }
}

/// For the resolvers backend the timeout applies to each resolver attempt,
/// so failover is not cut short. The system backend gets it as an overall cap
/// since `getnameinfo` has no timeout of its own.
pub fn build_resolve_use_case(config: &Config) -> ResolveIpListUseCase {
    let use_case = ResolveIpListUseCase::new(build_lookup(config))
        .with_idle_timeout(config.resolution.idle_timeout());

    match config.resolution.backend {
        LookupBackend::System => use_case.with_lookup_timeout(config.resolution.lookup_timeout()),
        LookupBackend::Resolvers => use_case,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_selection() {
        let mut config = Config::default();
        assert_eq!(build_lookup(&config).backend_name(), "resolvers");

        config.resolution.backend = LookupBackend::System;
        let lookup = build_lookup(&config);
        assert_eq!(lookup.backend_name(), "system");
        assert!(!lookup.honours_resolvers());
    }
}
