use crate::services::WorkQueue;
use revdns_domain::{LookupFailure, ResolutionOutcome};
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State shared by the workers of a single run. Created per call, dropped
/// when the run returns.
pub(crate) struct ResolutionSession {
    pub(crate) queue: WorkQueue<String>,
    pub(crate) resolvers: Vec<String>,
    results: Mutex<Vec<ResolutionOutcome>>,
    in_flight: Mutex<Vec<Option<String>>>,
}

impl ResolutionSession {
    pub(crate) fn new(resolvers: &[String], expected: usize, workers: usize) -> Self {
        Self {
            queue: WorkQueue::new(),
            resolvers: resolvers.to_vec(),
            results: Mutex::new(Vec::with_capacity(expected)),
            in_flight: Mutex::new(vec![None; workers]),
        }
    }

    pub(crate) fn begin(&self, worker_id: usize, ip: &str) {
        if let Some(slot) = lock(&self.in_flight).get_mut(worker_id) {
            *slot = Some(ip.to_string());
        }
    }

    /// Stores the outcome and acknowledges the item on the queue.
    pub(crate) fn complete(&self, worker_id: usize, outcome: ResolutionOutcome) {
        if let Some(slot) = lock(&self.in_flight).get_mut(worker_id) {
            *slot = None;
        }
        lock(&self.results).push(outcome);
        self.queue.task_done();
    }

    /// Records an outcome for an address the worker held when it died.
    pub(crate) fn recover_in_flight(&self, worker_id: usize, detail: &str) -> bool {
        let ip = lock(&self.in_flight).get_mut(worker_id).and_then(Option::take);
        match ip {
            Some(ip) => {
                lock(&self.results).push(ResolutionOutcome::failed(ip, LookupFailure::unknown(detail)));
                self.queue.task_done();
                true
            }
            None => false,
        }
    }

    /// Gives every address still waiting in the queue the same failure.
    pub(crate) fn drain_unprocessed(&self, failure: &LookupFailure) -> usize {
        let mut drained = 0;
        while let Some(ip) = self.queue.try_pop() {
            lock(&self.results).push(ResolutionOutcome::failed(ip, failure.clone()));
            self.queue.task_done();
            drained += 1;
        }
        drained
    }

    pub(crate) fn take_results(&self) -> Vec<ResolutionOutcome> {
        std::mem::take(&mut *lock(&self.results))
    }
}
