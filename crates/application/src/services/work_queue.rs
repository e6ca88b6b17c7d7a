use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::warn;

/// Result of waiting on a [`WorkQueue`].
#[derive(Debug, PartialEq, Eq)]
pub enum Dequeued<T> {
    Item(T),
    /// The queue was closed and every item has been handed out.
    Closed,
    /// Nothing arrived before the timeout and the queue is still open.
    TimedOut,
}

struct QueueState<T> {
    items: VecDeque<T>,
    unfinished: usize,
    closed: bool,
}

/// Unbounded multi-producer multi-consumer FIFO with join accounting.
///
/// Every pushed item must be acknowledged with [`WorkQueue::task_done`] once
/// processed; [`WorkQueue::join`] waits for the outstanding count to reach zero.
pub struct WorkQueue<T> {
    state: Mutex<QueueState<T>>,
    item_ready: Notify,
    all_done: Notify,
}

impl<T> WorkQueue<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::new(),
                unfinished: 0,
                closed: false,
            }),
            item_ready: Notify::new(),
            all_done: Notify::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds an item. Returns `false` (and drops the item) if the queue is closed.
    pub fn push(&self, item: T) -> bool {
        {
            let mut state = self.lock();
            if state.closed {
                warn!("Push on a closed work queue ignored");
                return false;
            }
            state.items.push_back(item);
            state.unfinished += 1;
        }
        self.item_ready.notify_one();
        true
    }

    pub fn extend<I: IntoIterator<Item = T>>(&self, items: I) -> usize {
        let mut pushed = 0;
        for item in items {
            if self.push(item) {
                pushed += 1;
            }
        }
        pushed
    }

    /// No more items will be pushed. Waiting consumers drain what is left and
    /// then see [`Dequeued::Closed`].
    pub fn close(&self) {
        self.lock().closed = true;
        self.item_ready.notify_waiters();
    }

    pub fn try_pop(&self) -> Option<T> {
        self.lock().items.pop_front()
    }

    pub async fn pop(&self, timeout: Duration) -> Dequeued<T> {
        let deadline = Instant::now() + timeout;

        loop {
            let notified = self.item_ready.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut state = self.lock();
                if let Some(item) = state.items.pop_front() {
                    let more = !state.items.is_empty();
                    drop(state);
                    if more {
                        self.item_ready.notify_one();
                    }
                    return Dequeued::Item(item);
                }
                if state.closed {
                    return Dequeued::Closed;
                }
            }

            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return Dequeued::TimedOut;
            }
        }
    }

    /// Marks one previously popped item as processed.
    pub fn task_done(&self) {
        let all_done = {
            let mut state = self.lock();
            if state.unfinished == 0 {
                warn!("task_done called more times than items were queued");
                return;
            }
            state.unfinished -= 1;
            state.unfinished == 0
        };
        if all_done {
            self.all_done.notify_waiters();
        }
    }

    /// Waits until every pushed item has been acknowledged.
    pub async fn join(&self) {
        loop {
            let notified = self.all_done.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.lock().unfinished == 0 {
                return;
            }
            notified.await;
        }
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    pub fn unfinished(&self) -> usize {
        self.lock().unfinished
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
