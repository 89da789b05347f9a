//! Cancellable deferred effects.
//!
//! Each timer is a tokio task that sleeps and then posts its effect back to
//! the store over a channel; the store applies effects on its own schedule,
//! so there is still a single writer. Timers live either in a named slot
//! (arming a slot supersedes whatever it held) or in the reply set.
//!
//! A superseded task is aborted, and its ticket is retired as well, so an
//! effect that was already in the channel when the abort happened is dropped
//! on receipt instead of being applied.
//!
//! Tasks run on the runtime current when the timers were created, or else
//! the one current at the call. With no runtime at all the timer is dropped
//! with a warning; its effect never fires.

use futures::future::{AbortHandle, Abortable};
use shared::conversation::Origin;
use std::collections::HashMap;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::warn;

use crate::dispatcher::Intent;

/// Named timer positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    NotificationDismiss,
    /// Timer tied to the current island mode (auto-compact, wake confirmation)
    IslandMode,
    RecordingLimit,
    FeatureOpen,
}

/// Work to do when a timer fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    HideNotification,
    InactivityElapsed,
    WakeConfirmed,
    RecordingTimedOut,
    StartChat,
    Reply {
        intent: Intent,
        origin: Origin,
        wants_image: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Slot(Slot),
    Reply,
}

#[derive(Debug)]
struct Fired {
    ticket: u64,
    target: Target,
    effect: Deferred,
}

struct Armed {
    ticket: u64,
    handle: AbortHandle,
}

pub struct Timers {
    tx: mpsc::UnboundedSender<Fired>,
    rx: mpsc::UnboundedReceiver<Fired>,
    next_ticket: u64,
    slots: HashMap<Slot, Armed>,
    replies: HashMap<u64, AbortHandle>,
    runtime: Option<Handle>,
}

impl Timers {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            next_ticket: 0,
            slots: HashMap::new(),
            replies: HashMap::new(),
            runtime: Handle::try_current().ok(),
        }
    }

    /// Arm `slot`, superseding any timer it already holds.
    pub fn arm(&mut self, slot: Slot, delay: Duration, effect: Deferred) {
        self.cancel(slot);
        let ticket = self.take_ticket();
        let handle = self.spawn(ticket, Target::Slot(slot), delay, effect);
        self.slots.insert(slot, Armed { ticket, handle });
    }

    /// Cancel the timer in `slot`. Returns true if one was pending.
    pub fn cancel(&mut self, slot: Slot) -> bool {
        match self.slots.remove(&slot) {
            Some(armed) => {
                armed.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Schedule an assistant reply. Replies never supersede each other.
    pub fn schedule_reply(&mut self, delay: Duration, effect: Deferred) -> u64 {
        let ticket = self.take_ticket();
        let handle = self.spawn(ticket, Target::Reply, delay, effect);
        self.replies.insert(ticket, handle);
        ticket
    }

    /// Cancel every pending reply. Returns how many were pending.
    pub fn cancel_replies(&mut self) -> usize {
        let count = self.replies.len();
        for (_, handle) in self.replies.drain() {
            handle.abort();
        }
        count
    }

    pub fn pending_replies(&self) -> usize {
        self.replies.len()
    }

    /// Next live effect that has already fired, without waiting
    pub fn try_next(&mut self) -> Option<Deferred> {
        while let Ok(fired) = self.rx.try_recv() {
            if let Some(effect) = self.accept(fired) {
                return Some(effect);
            }
        }
        None
    }

    /// Wait for the next live effect
    pub async fn next(&mut self) -> Deferred {
        loop {
            // We hold a sender, so the channel never closes
            if let Some(fired) = self.rx.recv().await {
                if let Some(effect) = self.accept(fired) {
                    return effect;
                }
            }
        }
    }

    fn accept(&mut self, fired: Fired) -> Option<Deferred> {
        match fired.target {
            Target::Slot(slot) => {
                let current = self.slots.get(&slot).map(|a| a.ticket);
                if current != Some(fired.ticket) {
                    tracing::trace!(?slot, ticket = fired.ticket, "dropping stale timer");
                    return None;
                }
                self.slots.remove(&slot);
            }
            Target::Reply => {
                if self.replies.remove(&fired.ticket).is_none() {
                    tracing::trace!(ticket = fired.ticket, "dropping cancelled reply");
                    return None;
                }
            }
        }
        Some(fired.effect)
    }

    fn take_ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }

    fn spawn(&self, ticket: u64, target: Target, delay: Duration, effect: Deferred) -> AbortHandle {
        let (handle, registration) = AbortHandle::new_pair();
        let Some(runtime) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            warn!(?effect, "no tokio runtime, timer dropped");
            return handle;
        };
        let tx = self.tx.clone();
        runtime.spawn(Abortable::new(
            async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(Fired {
                    ticket,
                    target,
                    effect,
                });
            },
            registration,
        ));
        handle
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        for (_, armed) in self.slots.drain() {
            armed.handle.abort();
        }
        self.cancel_replies();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_slot_fires_once() {
        let mut timers = Timers::new();
        timers.arm(Slot::IslandMode, Duration::from_secs(1), Deferred::WakeConfirmed);

        assert_eq!(timers.next().await, Deferred::WakeConfirmed);
        // Firing empties the slot
        assert!(!timers.cancel(Slot::IslandMode));
        assert!(timers.try_next().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearming_supersedes_previous_timer() {
        let mut timers = Timers::new();
        timers.arm(
            Slot::NotificationDismiss,
            Duration::from_millis(500),
            Deferred::HideNotification,
        );
        tokio::time::sleep(Duration::from_millis(200)).await;
        timers.arm(
            Slot::NotificationDismiss,
            Duration::from_millis(2000),
            Deferred::HideNotification,
        );

        // The first timer's deadline passes without anything firing
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(timers.try_next().is_none());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(timers.try_next(), Some(Deferred::HideNotification));
    }

    #[tokio::test(start_paused = true)]
    async fn test_effect_already_queued_is_dropped_after_cancel() {
        let mut timers = Timers::new();
        timers.arm(Slot::FeatureOpen, Duration::from_millis(10), Deferred::StartChat);

        // Let the task post its effect, then cancel before draining
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(timers.cancel(Slot::FeatureOpen));
        assert!(timers.try_next().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replies_are_independent_and_cancellable() {
        let mut timers = Timers::new();
        let reply = |intent| Deferred::Reply {
            intent,
            origin: Origin::Chat,
            wants_image: false,
        };
        timers.schedule_reply(Duration::from_millis(2000), reply(Intent::OpenBrowser));
        timers.schedule_reply(Duration::from_millis(1500), reply(Intent::Weather));
        assert_eq!(timers.pending_replies(), 2);

        assert_eq!(timers.next().await, reply(Intent::Weather));
        assert_eq!(timers.cancel_replies(), 1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(timers.try_next().is_none());
    }
}
