use revdns_domain::ResolutionOutcome;
use std::fmt::Write;
use std::time::Duration;

const RULE_WIDTH: usize = 50;

pub fn format_line(outcome: &ResolutionOutcome) -> String {
    format!("IP: {:<15} | Hostname: {}", outcome.ip, outcome.message())
}

/// The results table. Empty when there is nothing to show.
pub fn format_results(outcomes: &[ResolutionOutcome]) -> String {
    if outcomes.is_empty() {
        return String::new();
    }

    let mut out = String::from("\nResolution Results:\n");
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    for outcome in outcomes {
        let _ = writeln!(out, "{}", format_line(outcome));
    }
    out
}

pub fn format_elapsed(elapsed: Duration) -> String {
    format!("\nExecution time: {:.2} seconds", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use revdns_domain::LookupFailure;

    #[test]
    fn test_line_pads_ip_to_fifteen() {
        let line = format_line(&ResolutionOutcome::resolved("8.8.8.8", "dns.google"));
        assert_eq!(line, "IP: 8.8.8.8         | Hostname: dns.google");
    }

    #[test]
    fn test_long_ipv6_is_not_truncated() {
        let line = format_line(&ResolutionOutcome::resolved("2001:4860:4860::8888", "dns.google"));
        assert_eq!(line, "IP: 2001:4860:4860::8888 | Hostname: dns.google");
    }

    #[test]
    fn test_failure_uses_classic_message() {
        let line = format_line(&ResolutionOutcome::failed(
            "192.0.2.1",
            LookupFailure::host_not_found("NXDOMAIN"),
        ));
        assert_eq!(line, "IP: 192.0.2.1       | Hostname: Error: Hostname not found (NXDOMAIN)");
    }

    #[test]
    fn test_results_table_layout() {
        let table = format_results(&[
            ResolutionOutcome::resolved("1.1.1.1", "one.one.one.one"),
            ResolutionOutcome::resolved("8.8.8.8", "dns.google"),
        ]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Resolution Results:");
        assert_eq!(lines[2], "-".repeat(50));
        assert!(lines[3].starts_with("IP: 1.1.1.1"));
        assert!(lines[4].starts_with("IP: 8.8.8.8"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_empty_results_print_nothing() {
        assert!(format_results(&[]).is_empty());
    }

    #[test]
    fn test_elapsed_two_decimals() {
        assert_eq!(
            format_elapsed(Duration::from_millis(1234)),
            "\nExecution time: 1.23 seconds"
        );
    }
}
