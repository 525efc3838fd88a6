// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Debounced update scheduling.
//!
//! The scheduler decides when the highlighting pipeline runs. Immediate
//! requests (document switch, activation, manual refresh) run at once; text
//! changes arm a timer that is pushed back by every further change, so a burst
//! of keystrokes costs a single run once typing pauses.
//!
//! At most one timer is armed. A new request always cancels the pending one;
//! requests are never queued.

use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

/// Whether a debounced run is waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Nothing scheduled
    Idle,
    /// A timer is armed
    Pending,
}

#[derive(Debug)]
struct PendingTimer {
    deadline: Instant,
    timer: Receiver<Instant>,
}

/// Debounce state machine for pipeline runs.
#[derive(Debug)]
pub struct UpdateScheduler {
    quiet_period: Duration,
    pending: Option<PendingTimer>,
}

impl UpdateScheduler {
    /// Creates an idle scheduler with the given quiet period.
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    /// Returns the quiet period.
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Returns the current state.
    pub fn state(&self) -> SchedulerState {
        if self.pending.is_some() {
            SchedulerState::Pending
        } else {
            SchedulerState::Idle
        }
    }

    /// Returns when the armed timer fires.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Returns a channel that receives once the armed timer fires, for use in
    /// `crossbeam_channel::select!`. `None` while idle.
    pub fn timer(&self) -> Option<&Receiver<Instant>> {
        self.pending.as_ref().map(|pending| &pending.timer)
    }

    /// Requests an update, see [`UpdateScheduler::request_at`].
    pub fn request(&mut self, immediate: bool) -> bool {
        self.request_at(immediate, Instant::now())
    }

    /// Requests an update at time `now`.
    ///
    /// Any armed timer is cancelled first. Returns true if the caller must run
    /// the pipeline right away; otherwise a timer was armed for `now` plus the
    /// quiet period.
    pub fn request_at(&mut self, immediate: bool, now: Instant) -> bool {
        if self.cancel() {
            tracing::trace!(immediate, "superseded pending update");
        }
        if immediate {
            return true;
        }

        let deadline = now + self.quiet_period;
        self.pending = Some(PendingTimer {
            deadline,
            timer: crossbeam_channel::at(deadline),
        });
        tracing::trace!(quiet_period_ms = self.quiet_period.as_millis() as u64, "armed update timer");
        false
    }

    /// Checks the armed timer against the clock, see [`UpdateScheduler::poll_at`].
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    /// Returns true, and goes back to idle, if the armed timer is due at `now`.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        if !self.deadline().is_some_and(|deadline| deadline <= now) {
            return false;
        }
        self.pending = None;
        tracing::trace!("update timer fired");
        true
    }

    /// Disarms the timer. Returns true if one was armed.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}
