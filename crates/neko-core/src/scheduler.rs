//! Timers for simulated replies.
//!
//! Every accepted submission gets its own tokio task that sleeps for the
//! reply delay and then sends the [`ReplyTicket`] back over a channel. The
//! UI loop owns the receiving end and is the only place the store is
//! mutated. Dropping the scheduler aborts every timer that has not fired.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::store::ReplyTicket;

/// Default delay before the simulated reply lands.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// Spawns and owns reply timers.
#[derive(Debug)]
pub struct ReplyScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<ReplyTicket>,
    handles: Vec<JoinHandle<()>>,
}

impl ReplyScheduler {
    /// Create a scheduler delivering tickets to `tx` after `delay`.
    pub fn new(delay: Duration, tx: mpsc::UnboundedSender<ReplyTicket>) -> Self {
        Self {
            delay,
            tx,
            handles: Vec::new(),
        }
    }

    /// Create a scheduler together with the receiving end of its channel.
    pub fn channel(delay: Duration) -> (Self, mpsc::UnboundedReceiver<ReplyTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(delay, tx), rx)
    }

    /// Configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start the timer for `ticket`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, ticket: ReplyTicket) {
        self.reap();

        // Deadline is fixed at submission, not when the task first runs.
        let deadline = Instant::now() + self.delay;
        let tx = self.tx.clone();
        debug!(seq = ticket.seq, delay_ms = self.delay.as_millis(), "scheduling simulated reply");
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if tx.send(ticket).is_err() {
                debug!("reply receiver gone, dropping ticket");
            }
        });
        self.handles.push(handle);
    }

    /// Number of timers that have not fired yet.
    pub fn in_flight(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    /// Abort every timer that has not fired. Returns how many were aborted.
    pub fn cancel_all(&mut self) -> usize {
        let mut cancelled = 0;
        for handle in self.handles.drain(..) {
            if !handle.is_finished() {
                handle.abort();
                cancelled += 1;
            }
        }
        if cancelled > 0 {
            warn!(cancelled, "cancelled pending simulated replies");
        }
        cancelled
    }

    /// Drop handles of timers that already fired.
    fn reap(&mut self) {
        self.handles.retain(|h| !h.is_finished());
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::message::Role;
    use crate::seed::CANNED_REPLY;
    use crate::store::{ConversationPhase, ConversationStore};
    use std::sync::Arc;
    use tokio::time::advance;

    fn ticket(seq: u64) -> ReplyTicket {
        ReplyTicket {
            seq,
            in_reply_to: format!("msg-{seq}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticket_returns_after_delay() {
        let (mut scheduler, mut rx) = ReplyScheduler::channel(DEFAULT_REPLY_DELAY);
        let start = Instant::now();
        scheduler.schedule(ticket(1));

        let got = rx.recv().await.expect("ticket delivered");
        assert_eq!(got, ticket(1));
        assert_eq!(start.elapsed(), DEFAULT_REPLY_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_before_delay() {
        let (mut scheduler, mut rx) = ReplyScheduler::channel(DEFAULT_REPLY_DELAY);
        scheduler.schedule(ticket(1));

        advance(Duration::from_millis(999)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
        assert_eq!(scheduler.in_flight(), 1);

        advance(Duration::from_millis(1)).await;
        assert_eq!(rx.recv().await, Some(ticket(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_reply_lands_exactly_once_after_one_second() {
        let mut store = ConversationStore::seeded().with_clock(Arc::new(FixedClock::at(8, 0)));
        let (mut scheduler, mut rx) = ReplyScheduler::channel(DEFAULT_REPLY_DELAY);

        store.set_input("hi");
        let t = store.submit().expect("accepted");
        scheduler.schedule(t);
        assert_eq!(store.len(), 6);

        let start = Instant::now();
        let fired = rx.recv().await.expect("fired");
        assert_eq!(start.elapsed(), DEFAULT_REPLY_DELAY);
        store.deliver_reply(&fired);

        assert_eq!(store.len(), 7);
        let last = store.last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, CANNED_REPLY);
        assert_eq!(store.phase(), ConversationPhase::Idle);

        advance(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_submissions_reply_in_firing_order() {
        let mut store = ConversationStore::seeded();
        let (mut scheduler, mut rx) = ReplyScheduler::channel(DEFAULT_REPLY_DELAY);

        let first = store.submit_text("first").unwrap();
        scheduler.schedule(first.clone());
        advance(Duration::from_millis(10)).await;
        let second = store.submit_text("second").unwrap();
        scheduler.schedule(second.clone());

        let a = rx.recv().await.unwrap();
        store.deliver_reply(&a);
        let b = rx.recv().await.unwrap();
        store.deliver_reply(&b);

        assert_eq!(a, first);
        assert_eq!(b, second);

        let tail: Vec<(Role, &str)> = store.messages()[5..]
            .iter()
            .map(|m| (m.role, m.content.as_str()))
            .collect();
        assert_eq!(
            tail,
            vec![
                (Role::User, "first"),
                (Role::User, "second"),
                (Role::Assistant, CANNED_REPLY),
                (Role::Assistant, CANNED_REPLY),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all_stops_pending_replies() {
        let (mut scheduler, mut rx) = ReplyScheduler::channel(DEFAULT_REPLY_DELAY);
        scheduler.schedule(ticket(1));
        scheduler.schedule(ticket(2));

        assert_eq!(scheduler.cancel_all(), 2);
        assert_eq!(scheduler.in_flight(), 0);

        advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_replies() {
        let (mut scheduler, mut rx) = ReplyScheduler::channel(DEFAULT_REPLY_DELAY);
        scheduler.schedule(ticket(1));
        drop(scheduler);

        // Every sender is gone once the aborted task is torn down.
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fired_timers_are_reaped() {
        let (mut scheduler, mut rx) = ReplyScheduler::channel(Duration::from_millis(5));
        scheduler.schedule(ticket(1));
        rx.recv().await.unwrap();
        tokio::task::yield_now().await;

        scheduler.schedule(ticket(2));
        assert_eq!(scheduler.in_flight(), 1);
        assert!(scheduler.handles.len() <= 2);
    }
}
