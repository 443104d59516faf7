//! Background thread-history refresh.
//!
//! A cancellable periodic task that fetches the thread list and publishes
//! it through a watch channel. Refreshes are fire-and-forget: a failed
//! fetch is logged and skipped, and the previous list stays visible.

use std::sync::Arc;
use std::time::Duration;
use taskpilot_core::thread::ThreadSummary;
use taskpilot_interaction::ChatService;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub struct HistoryPoller {
    chat: Arc<dyn ChatService>,
    interval: Duration,
}

impl HistoryPoller {
    pub fn new(chat: Arc<dyn ChatService>, interval: Duration) -> Self {
        Self { chat, interval }
    }

    /// Spawns the refresh loop.
    ///
    /// The first fetch happens immediately, then one per interval. The
    /// returned handle owns the loop; [`HistoryPollerHandle::stop`] tears
    /// it down so no timer outlives its owner.
    pub fn start(self) -> HistoryPollerHandle {
        let (sender, receiver) = watch::channel(Vec::new());
        let cancel = CancellationToken::new();
        let loop_cancel = cancel.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = loop_cancel.cancelled() => break,
                    _ = ticker.tick() => match self.chat.list_threads().await {
                        Ok(threads) => {
                            let _ = sender.send(threads);
                        }
                        Err(e) => {
                            tracing::warn!(target: "history", "thread list refresh failed: {e}");
                        }
                    },
                }
            }
            tracing::debug!(target: "history", "poller stopped");
        });

        HistoryPollerHandle {
            cancel,
            receiver,
            task,
        }
    }
}

/// Handle to a running history poller.
pub struct HistoryPollerHandle {
    cancel: CancellationToken,
    receiver: watch::Receiver<Vec<ThreadSummary>>,
    task: JoinHandle<()>,
}

impl HistoryPollerHandle {
    /// The latest thread list the poller has seen.
    pub fn threads(&self) -> Vec<ThreadSummary> {
        self.receiver.borrow().clone()
    }

    /// A receiver that observes every refresh.
    pub fn subscribe(&self) -> watch::Receiver<Vec<ThreadSummary>> {
        self.receiver.clone()
    }

    /// Cancels the refresh loop and waits for it to wind down.
    pub async fn stop(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}
