use super::report::ResolutionReport;
use super::session::ResolutionSession;
use crate::ports::ReverseLookup;
use crate::services::Dequeued;
use futures::FutureExt;
use revdns_domain::{LookupFailure, LookupResult, ResolutionOutcome};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// How long a worker waits on an open, empty queue before giving up.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Never spawn more workers than there are addresses, and always at least one.
pub fn effective_worker_count(requested: usize, items: usize) -> usize {
    requested.max(1).min(items)
}

/// Resolves a batch of addresses with a bounded pool of workers.
pub struct ResolveIpListUseCase {
    lookup: Arc<dyn ReverseLookup>,
    idle_timeout: Duration,
    lookup_timeout: Option<Duration>,
}

impl ResolveIpListUseCase {
    pub fn new(lookup: Arc<dyn ReverseLookup>) -> Self {
        Self {
            lookup,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            lookup_timeout: None,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn with_lookup_timeout(mut self, lookup_timeout: Duration) -> Self {
        self.lookup_timeout = Some(lookup_timeout);
        self
    }

    pub async fn execute(
        &self,
        ip_list: &[String],
        resolver_list: &[String],
        worker_count: usize,
    ) -> ResolutionReport {
        self.execute_with_cancellation(
            ip_list,
            resolver_list,
            worker_count,
            CancellationToken::new(),
        )
        .await
    }

    /// Runs until every address has an outcome. Cancelling `cancel` stops the
    /// workers early; addresses they never reached are reported as cancelled.
    pub async fn execute_with_cancellation(
        &self,
        ip_list: &[String],
        resolver_list: &[String],
        worker_count: usize,
        cancel: CancellationToken,
    ) -> ResolutionReport {
        if ip_list.is_empty() {
            warn!("No IPs to resolve");
            return ResolutionReport::empty();
        }
        if resolver_list.is_empty() {
            warn!("No valid resolvers supplied");
            return ResolutionReport::empty();
        }

        let started = Instant::now();
        let workers = effective_worker_count(worker_count, ip_list.len());

        info!(
            ips = ip_list.len(),
            resolvers = resolver_list.len(),
            workers,
            backend = self.lookup.backend_name(),
            "Processing IPs"
        );
        if !self.lookup.honours_resolvers() {
            info!(
                backend = self.lookup.backend_name(),
                "Lookup backend ignores the supplied resolver list"
            );
        }

        let session = Arc::new(ResolutionSession::new(resolver_list, ip_list.len(), workers));
        session.queue.extend(ip_list.iter().cloned());
        session.queue.close();

        let handles: Vec<JoinHandle<usize>> = (0..workers)
            .map(|worker_id| {
                let worker = Worker {
                    id: worker_id,
                    session: Arc::clone(&session),
                    lookup: Arc::clone(&self.lookup),
                    cancel: cancel.clone(),
                    idle_timeout: self.idle_timeout,
                    lookup_timeout: self.lookup_timeout,
                };
                tokio::spawn(worker.run())
            })
            .collect();

        for (worker_id, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(processed) => debug!(worker_id, processed, "Worker finished"),
                Err(e) => {
                    error!(worker_id, error = %e, "Worker task failed");
                    session.recover_in_flight(worker_id, &format!("worker task failed: {}", e));
                }
            }
        }

        let cancelled = cancel.is_cancelled();
        let leftover = if cancelled {
            LookupFailure::cancelled("run cancelled before lookup started")
        } else {
            LookupFailure::unknown("no worker left to process address")
        };
        let drained = session.drain_unprocessed(&leftover);
        if drained > 0 {
            warn!(drained, cancelled, "Addresses left in queue after workers exited");
        }

        session.queue.join().await;

        let mut outcomes = session.take_results();
        outcomes.sort_by(|a, b| a.ip.cmp(&b.ip));

        let report = ResolutionReport {
            outcomes,
            workers_spawned: workers,
            resolvers_supplied: resolver_list.len(),
            elapsed: started.elapsed(),
            cancelled,
        };

        info!(
            total = report.len(),
            resolved = report.resolved_count(),
            failed = report.failed_count(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Resolution finished"
        );

        report
    }
}

struct Worker {
    id: usize,
    session: Arc<ResolutionSession>,
    lookup: Arc<dyn ReverseLookup>,
    cancel: CancellationToken,
    idle_timeout: Duration,
    lookup_timeout: Option<Duration>,
}

impl Worker {
    async fn run(self) -> usize {
        let mut processed = 0usize;

        loop {
            let ip = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    debug!(worker_id = self.id, "Worker stopping: cancelled");
                    break;
                }
                next = self.session.queue.pop(self.idle_timeout) => match next {
                    Dequeued::Item(ip) => ip,
                    Dequeued::Closed => break,
                    Dequeued::TimedOut => {
                        debug!(worker_id = self.id, "Worker stopping: queue idle");
                        break;
                    }
                },
            };

            self.session.begin(self.id, &ip);

            let result = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    LookupResult::Failed(LookupFailure::cancelled("run cancelled during lookup"))
                }
                result = self.resolve(&ip) => result,
            };

            debug!(worker_id = self.id, ip = %ip, outcome = %result, "Lookup complete");
            self.session
                .complete(self.id, ResolutionOutcome::new(ip, result));
            processed += 1;
        }

        processed
    }

    async fn resolve(&self, ip: &str) -> LookupResult {
        let lookup = async {
            match AssertUnwindSafe(self.lookup.reverse_lookup(ip, &self.session.resolvers))
                .catch_unwind()
                .await
            {
                Ok(result) => result,
                Err(payload) => {
                    let reason = panic_message(payload.as_ref());
                    error!(worker_id = self.id, ip = %ip, reason = %reason, "Lookup panicked");
                    Err(LookupFailure::unknown(format!("lookup panicked: {}", reason)))
                }
            }
        };

        match self.lookup_timeout {
            Some(limit) => match tokio::time::timeout(limit, lookup).await {
                Ok(result) => result.into(),
                Err(_) => LookupResult::Failed(LookupFailure::resolution_failed(format!(
                    "lookup timed out after {}ms",
                    limit.as_millis()
                ))),
            },
            None => lookup.await.into(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
