use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Identifies one scheduled advance.
///
/// A session honours only the ticket it handed out last; tickets from an
/// earlier run (`epoch`) or an earlier question (`seq`) are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceTicket {
    epoch: u64,
    seq: u64,
}

impl AdvanceTicket {
    pub(crate) fn new(epoch: u64, seq: u64) -> Self {
        Self { epoch, seq }
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What a transition asks of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEffect {
    Schedule {
        ticket: AdvanceTicket,
        delay: Duration,
    },
    Cancel,
}

/// Runs at most one single-shot advance timer at a time.
pub trait AdvanceScheduler {
    /// Replace any pending timer with one firing `ticket` after `delay`.
    fn schedule(&mut self, ticket: AdvanceTicket, delay: Duration);

    fn cancel(&mut self);
}

impl<T: AdvanceScheduler + ?Sized> AdvanceScheduler for &mut T {
    fn schedule(&mut self, ticket: AdvanceTicket, delay: Duration) {
        (**self).schedule(ticket, delay);
    }

    fn cancel(&mut self) {
        (**self).cancel();
    }
}

//
// ─── TOKIO ─────────────────────────────────────────────────────────────────────
//

/// Sleeps on the tokio runtime and delivers fired tickets over a channel.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    fired: mpsc::UnboundedSender<AdvanceTicket>,
    pending: Option<AbortHandle>,
}

impl TokioScheduler {
    /// Build a scheduler and the receiver its tickets arrive on.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<AdvanceTicket>) {
        let (fired, rx) = mpsc::unbounded_channel();
        (
            Self {
                fired,
                pending: None,
            },
            rx,
        )
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl AdvanceScheduler for TokioScheduler {
    fn schedule(&mut self, ticket: AdvanceTicket, delay: Duration) {
        self.cancel();
        let fired = self.fired.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone once the quiz shuts down.
            let _ = fired.send(ticket);
        });
        self.pending = Some(task.abort_handle());
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

//
// ─── MANUAL ────────────────────────────────────────────────────────────────────
//

/// Scheduler driven by hand: remembers the pending ticket and lets the
/// caller decide when it fires.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ManualScheduler {
    pending: Option<(AdvanceTicket, Duration)>,
    history: Vec<(AdvanceTicket, Duration)>,
    cancellations: usize,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pending(&self) -> Option<(AdvanceTicket, Duration)> {
        self.pending
    }

    /// Every schedule request seen so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[(AdvanceTicket, Duration)] {
        &self.history
    }

    #[must_use]
    pub fn cancellations(&self) -> usize {
        self.cancellations
    }

    /// Take the pending ticket as if its timer elapsed.
    pub fn fire(&mut self) -> Option<AdvanceTicket> {
        self.pending.take().map(|(ticket, _)| ticket)
    }
}

impl AdvanceScheduler for ManualScheduler {
    fn schedule(&mut self, ticket: AdvanceTicket, delay: Duration) {
        self.pending = Some((ticket, delay));
        self.history.push((ticket, delay));
    }

    fn cancel(&mut self) {
        if self.pending.take().is_some() {
            self.cancellations += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_fires_after_delay() {
        let (mut scheduler, mut rx) = TokioScheduler::channel();
        let ticket = AdvanceTicket::new(1, 1);
        scheduler.schedule(ticket, Duration::from_millis(2000));

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await, Some(ticket));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let (mut scheduler, mut rx) = TokioScheduler::channel();
        scheduler.schedule(AdvanceTicket::new(1, 1), Duration::from_millis(3500));
        scheduler.cancel();
        assert!(!scheduler.is_pending());

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_replaces_pending_timer() {
        let (mut scheduler, mut rx) = TokioScheduler::channel();
        let first = AdvanceTicket::new(1, 1);
        let second = AdvanceTicket::new(1, 2);
        scheduler.schedule(first, Duration::from_millis(3500));
        scheduler.schedule(second, Duration::from_millis(2000));

        tokio::time::sleep(Duration::from_millis(4000)).await;
        assert_eq!(rx.try_recv().ok(), Some(second));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn manual_scheduler_tracks_pending_and_cancellations() {
        let mut scheduler = ManualScheduler::new();
        let ticket = AdvanceTicket::new(2, 1);
        scheduler.schedule(ticket, Duration::from_millis(2000));
        assert_eq!(scheduler.pending(), Some((ticket, Duration::from_millis(2000))));

        scheduler.cancel();
        scheduler.cancel();
        assert_eq!(scheduler.cancellations(), 1);
        assert_eq!(scheduler.fire(), None);
        assert_eq!(scheduler.history().len(), 1);
    }
}
