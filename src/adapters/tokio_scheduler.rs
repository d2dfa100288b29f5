//! Reveal scheduler backed by tokio timers.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::reveal::RevealTask;
use crate::traits::RevealScheduler;

/// Sleeps on a spawned task and delivers into the main loop's channel.
///
/// Stale tasks are not cancelled here; the renderer ignores tasks whose
/// generation no longer matches.
#[derive(Debug)]
pub struct TokioRevealScheduler {
    tx: mpsc::UnboundedSender<RevealTask>,
    epoch: Instant,
}

impl TokioRevealScheduler {
    pub fn new(tx: mpsc::UnboundedSender<RevealTask>) -> Self {
        Self {
            tx,
            epoch: Instant::now(),
        }
    }

    /// Scheduler plus the receiving end for the event loop.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RevealTask>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl RevealScheduler for TokioRevealScheduler {
    fn schedule_after(&mut self, delay: Duration, task: RevealTask) {
        let tx = self.tx.clone();
        if delay.is_zero() {
            let _ = tx.send(task);
            return;
        }
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(task);
        });
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::RevealStep;

    #[tokio::test(start_paused = true)]
    async fn test_tasks_arrive_in_delay_order() {
        let (mut scheduler, mut rx) = TokioRevealScheduler::channel();
        let late = RevealTask::new(1, RevealStep::ShowWord(1));
        let early = RevealTask::new(1, RevealStep::ShowWord(0));

        scheduler.schedule_after(Duration::from_millis(200), late);
        scheduler.schedule_after(Duration::from_millis(100), early);

        assert_eq!(rx.recv().await, Some(early));
        assert_eq!(rx.recv().await, Some(late));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_is_immediate() {
        let (mut scheduler, mut rx) = TokioRevealScheduler::channel();
        let task = RevealTask::new(7, RevealStep::Complete);
        scheduler.schedule_after(Duration::ZERO, task);
        assert_eq!(rx.try_recv().ok(), Some(task));
    }
}
