//! Deterministic reveal scheduler.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::reveal::RevealTask;
use crate::traits::RevealScheduler;

#[derive(Debug, Default)]
struct Inner {
    now_ms: u64,
    seq: u64,
    queue: Vec<(u64, u64, RevealTask)>,
}

/// Scheduler driven by a fake clock.
///
/// Nothing fires until the test calls [`advance`](Self::advance), which
/// returns the due tasks in firing order. Clones share the same clock.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<Inner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move the clock forward and take every task now due.
    pub fn advance(&self, ms: u64) -> Vec<RevealTask> {
        let mut inner = self.lock();
        inner.now_ms += ms;
        let now = inner.now_ms;

        let mut due: Vec<(u64, u64, RevealTask)> = Vec::new();
        inner.queue.retain(|entry| {
            if entry.0 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(at, seq, _)| (*at, *seq));
        due.into_iter().map(|(_, _, task)| task).collect()
    }

    /// Tasks not yet fired, as `(due_at_ms, task)` in firing order.
    pub fn pending(&self) -> Vec<(u64, RevealTask)> {
        let mut queue = self.lock().queue.clone();
        queue.sort_by_key(|(at, seq, _)| (*at, *seq));
        queue.into_iter().map(|(at, _, task)| (at, task)).collect()
    }
}

impl RevealScheduler for ManualScheduler {
    fn schedule_after(&mut self, delay: Duration, task: RevealTask) {
        let mut inner = self.lock();
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        let at = inner.now_ms.saturating_add(delay_ms);
        let seq = inner.seq;
        inner.seq += 1;
        inner.queue.push((at, seq, task));
    }

    fn now_ms(&self) -> u64 {
        self.lock().now_ms
    }
}
