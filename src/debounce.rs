//! Debounce for values that change faster than they should be acted on.
//!
//! The UI loop owns a [`Debouncer`], feeds it every change through
//! [`Debouncer::update`] and asks [`Debouncer::poll`] once per iteration. The
//! caller supplies `now`, so the same code runs against a synthetic clock in
//! tests.

use std::time::{Duration, Instant};

#[derive(Debug)]
struct Pending<T> {
    value: T,
    since: Instant,
}

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces whatever is pending and restarts the countdown.
    pub fn update(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending { value, since: now });
    }

    /// Hands back the latest value once it has been stable for the delay.
    /// Each value is emitted at most once.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|p| now.saturating_duration_since(p.since) >= self.delay);
        if ready {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.since + self.delay)
    }

    /// Time left before the pending value is due, zero once it is.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
