//! Timer seam for the word reveal animation.

use std::time::Duration;

use crate::reveal::RevealTask;

/// Delivers reveal tasks back to the owner after a delay.
///
/// The production scheduler uses tokio timers; tests use a manual clock
/// they advance explicitly.
pub trait RevealScheduler: Send {
    /// Deliver `task` once `delay` has elapsed.
    fn schedule_after(&mut self, delay: Duration, task: RevealTask);

    /// Milliseconds since the scheduler was created, on its own clock.
    fn now_ms(&self) -> u64;
}
