// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-slot cancellable timer.
//!
//! A [`HoverTimer`] holds at most one pending action. [`HoverTimer::set`]
//! replaces whatever was pending, [`HoverTimer::clear`] drops it, and
//! [`HoverTimer::poll`] hands the action back once its deadline has passed.
//!
//! ## Supersession
//!
//! ```rust
//! use understory_event_state::timer::HoverTimer;
//!
//! let mut timer = HoverTimer::new();
//! let first = timer.set(1_u8, 100, 0);
//! let second = timer.set(2_u8, 50, 10);
//! assert_ne!(first, second);
//!
//! // Cancelling a superseded token is a no-op.
//! assert!(!timer.cancel(first));
//! assert_eq!(timer.poll(100), Some(2));
//! ```

/// Identifies one scheduled action. Tokens are never reused by a timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

#[derive(Clone, Debug)]
struct Pending<A> {
    token: TimerToken,
    deadline: u64,
    action: A,
}

/// Timer with room for exactly one pending action.
#[derive(Clone, Debug)]
pub struct HoverTimer<A> {
    pending: Option<Pending<A>>,
    next_token: u64,
}

impl<A> Default for HoverTimer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> HoverTimer<A> {
    /// Create an idle timer.
    pub const fn new() -> Self {
        Self {
            pending: None,
            next_token: 0,
        }
    }

    /// Schedule `action` to fire `delay` milliseconds after `now`.
    ///
    /// Any pending action is discarded first and never fires.
    pub fn set(&mut self, action: A, delay: u64, now: u64) -> TimerToken {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        self.pending = Some(Pending {
            token,
            deadline: now.saturating_add(delay),
            action,
        });
        token
    }

    /// Drop the pending action, if any.
    ///
    /// Returns `true` if something was pending. Idempotent.
    pub fn clear(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Drop the pending action only if it is the one identified by `token`.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        if self.token() == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Whether an action is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending action.
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Token of the pending action.
    pub fn token(&self) -> Option<TimerToken> {
        self.pending.as_ref().map(|p| p.token)
    }

    /// The pending action, without consuming it.
    pub fn action(&self) -> Option<&A> {
        self.pending.as_ref().map(|p| &p.action)
    }

    /// Take the pending action if its deadline is at or before `now`.
    pub fn poll(&mut self, now: u64) -> Option<A> {
        if self.deadline()? > now {
            return None;
        }
        self.pending.take().map(|p| p.action)
    }
}
