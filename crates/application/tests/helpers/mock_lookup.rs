#![allow(dead_code)]

use async_trait::async_trait;
use revdns_application::ports::ReverseLookup;
use revdns_domain::LookupFailure;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Deterministic lookup: explicit answers first, otherwise `host-<ip>`.
/// Tracks call count and peak concurrency.
#[derive(Clone)]
pub struct MockReverseLookup {
    answers: Arc<Mutex<HashMap<String, Result<String, LookupFailure>>>>,
    delay: Duration,
    panic_on: Arc<Mutex<Option<String>>>,
    honours_resolvers: bool,
    calls: Arc<AtomicUsize>,
    active: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
    seen_resolvers: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockReverseLookup {
    pub fn new() -> Self {
        Self {
            answers: Arc::new(Mutex::new(HashMap::new())),
            delay: Duration::ZERO,
            panic_on: Arc::new(Mutex::new(None)),
            honours_resolvers: true,
            calls: Arc::new(AtomicUsize::new(0)),
            active: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
            seen_resolvers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn ignoring_resolvers(mut self) -> Self {
        self.honours_resolvers = false;
        self
    }

    pub fn with_hostname(self, ip: &str, hostname: &str) -> Self {
        self.answers
            .lock()
            .unwrap()
            .insert(ip.to_string(), Ok(hostname.to_string()));
        self
    }

    pub fn with_failure(self, ip: &str, failure: LookupFailure) -> Self {
        self.answers
            .lock()
            .unwrap()
            .insert(ip.to_string(), Err(failure));
        self
    }

    pub fn panicking_on(self, ip: &str) -> Self {
        *self.panic_on.lock().unwrap() = Some(ip.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn seen_resolvers(&self) -> Vec<Vec<String>> {
        self.seen_resolvers.lock().unwrap().clone()
    }
}

impl Default for MockReverseLookup {
    fn default() -> Self {
        Self::new()
    }
}

struct ActiveGuard(Arc<AtomicUsize>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ReverseLookup for MockReverseLookup {
    async fn reverse_lookup(&self, ip: &str, resolvers: &[String]) -> Result<String, LookupFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now_active, Ordering::SeqCst);
        let _guard = ActiveGuard(Arc::clone(&self.active));

        self.seen_resolvers
            .lock()
            .unwrap()
            .push(resolvers.to_vec());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let should_panic = self.panic_on.lock().unwrap().as_deref() == Some(ip);
        if should_panic {
            panic!("mock lookup exploded on {}", ip);
        }

        let answer = self.answers.lock().unwrap().get(ip).cloned();
        answer.unwrap_or_else(|| Ok(format!("host-{}", ip)))
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }

    fn honours_resolvers(&self) -> bool {
        self.honours_resolvers
    }
}

pub fn ips(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn resolvers() -> Vec<String> {
    ips(&["8.8.8.8", "1.1.1.1"])
}
