//! Cancel-and-restart debounce timer.
//!
//! Each [`Debouncer::schedule`] aborts the outstanding timer task and spawns a
//! new one that posts its event to the owner's channel after the delay. At
//! most one timer is pending at a time.
//!
//! Every scheduled event carries a generation number. An abort can lose the
//! race with a timer that already fired, so the owner must confirm each event
//! with [`Debouncer::accept`], which only admits the newest generation.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Debounced event scheduler owned by a single logic thread.
#[derive(Debug)]
pub struct Debouncer<E> {
    delay: Duration,
    events: UnboundedSender<E>,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl<E: Send + 'static> Debouncer<E> {
    #[must_use]
    pub const fn new(delay: Duration, events: UnboundedSender<E>) -> Self {
        Self {
            delay,
            events,
            generation: 0,
            pending: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending timer and start a new one.
    ///
    /// `event_for` receives the new generation and builds the event that is
    /// posted once the delay elapses. Must be called from within a Tokio
    /// runtime.
    pub fn schedule(&mut self, event_for: impl FnOnce(u64) -> E) -> u64 {
        self.cancel();
        self.generation += 1;

        let event = event_for(self.generation);
        let events = self.events.clone();
        let deadline = Instant::now() + self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // The owner may already be gone; nothing to deliver to then.
            let _ = events.send(event);
        }));

        self.generation
    }

    /// Abort the pending timer, if any. Late events from it are rejected by
    /// [`accept`](Self::accept).
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation += 1;
    }

    /// Admit a fired event. Returns `false` for stale generations.
    pub fn accept(&mut self, generation: u64) -> bool {
        if self.pending.is_none() || generation != self.generation {
            return false;
        }
        self.pending = None;
        true
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<E> Drop for Debouncer<E> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
