use revdns_domain::ResolutionOutcome;
use std::time::Duration;

/// Everything one resolution run produced, outcomes sorted by IP.
#[derive(Debug, Clone, Default)]
pub struct ResolutionReport {
    pub outcomes: Vec<ResolutionOutcome>,
    pub workers_spawned: usize,
    pub resolvers_supplied: usize,
    pub elapsed: Duration,
    pub cancelled: bool,
}

impl ResolutionReport {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn resolved_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_resolved())
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.len() - self.resolved_count()
    }

    pub fn into_outcomes(self) -> Vec<ResolutionOutcome> {
        self.outcomes
    }
}
