use revdns_domain::{FailureKind, LookupFailure, LookupResult, ResolutionOutcome};

#[test]
fn test_resolved_outcome_message_is_hostname() {
    let outcome = ResolutionOutcome::resolved("8.8.8.8", "dns.google");

    assert_eq!(outcome.ip, "8.8.8.8");
    assert_eq!(outcome.message(), "dns.google");
    assert_eq!(outcome.result.hostname(), Some("dns.google"));
    assert!(outcome.result.failure().is_none());
}

#[test]
fn test_host_not_found_prefix() {
    let outcome = ResolutionOutcome::failed(
        "10.255.255.1",
        LookupFailure::host_not_found("Unknown host"),
    );

    assert!(outcome.message().starts_with("Error: Hostname not found"));
    assert_eq!(
        outcome.result.failure_kind(),
        Some(FailureKind::HostNotFound)
    );
}

#[test]
fn test_resolution_failed_prefix() {
    let outcome = ResolutionOutcome::failed(
        "not-an-ip",
        LookupFailure::resolution_failed("Name or service not known"),
    );

    assert_eq!(
        outcome.message(),
        "Error: Resolution failed (Name or service not known)"
    );
}

#[test]
fn test_unknown_error_format() {
    let failure = LookupFailure::unknown("worker panicked");
    assert_eq!(failure.to_string(), "Unknown error: worker panicked");
}

#[test]
fn test_cancelled_is_a_failure() {
    let result = LookupResult::Failed(LookupFailure::cancelled("run aborted"));

    assert!(!result.is_resolved());
    assert_eq!(result.failure_kind(), Some(FailureKind::Cancelled));
    assert!(result.to_string().starts_with("Error: Resolution cancelled"));
}

#[test]
fn test_lookup_result_from_backend_result() {
    let ok: LookupResult = Ok::<_, LookupFailure>("one.one.one.one".to_string()).into();
    assert_eq!(ok, LookupResult::Resolved("one.one.one.one".to_string()));

    let err: LookupResult = Err(LookupFailure::host_not_found("NXDOMAIN")).into();
    assert_eq!(err.failure_kind(), Some(FailureKind::HostNotFound));
}

#[test]
fn test_failure_kind_names() {
    assert_eq!(FailureKind::HostNotFound.to_string(), "host_not_found");
    assert_eq!(FailureKind::ResolutionFailed.to_string(), "resolution_failed");
    assert_eq!(FailureKind::Unknown.to_string(), "unknown");
    assert_eq!(FailureKind::Cancelled.to_string(), "cancelled");
}
