// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover intent: delayed open on enter, delayed close on leave.
//!
//! A [`HoverArbiter`] owns one [`HoverTimer`] per interactive node. Pointer
//! enter schedules an "open" action after [`HoverTiming::open_delay_ms`];
//! pointer leave schedules a "close" action after
//! [`HoverTiming::close_delay_ms`]. Because the timer has a single slot, a fast
//! enter → leave → enter sequence always resolves to the action scheduled
//! last.
//!
//! ```rust
//! use understory_event_state::hover::{HoverArbiter, HoverBehavior, HoverIntent, HoverTiming};
//!
//! let mut arbiter = HoverArbiter::new(HoverBehavior::Default, HoverTiming::default());
//! arbiter.schedule(HoverIntent::Open, "open", 0);
//! arbiter.schedule(HoverIntent::Close, "close", 40);
//! arbiter.schedule(HoverIntent::Open, "open again", 80);
//!
//! assert_eq!(arbiter.poll(179), None);
//! assert_eq!(arbiter.poll(180), Some("open again"));
//! ```

use crate::timer::{HoverTimer, TimerToken};

/// Default delay before a hovered sub-menu opens, in milliseconds.
pub const DEFAULT_OPEN_DELAY_MS: u64 = 100;

/// Default delay before an un-hovered sub-menu closes, in milliseconds.
pub const DEFAULT_CLOSE_DELAY_MS: u64 = 300;

/// Delays used by [`HoverBehavior::Default`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HoverTiming {
    /// Delay between pointer enter and the open action.
    pub open_delay_ms: u64,
    /// Delay between pointer leave and the close action.
    pub close_delay_ms: u64,
}

impl Default for HoverTiming {
    fn default() -> Self {
        Self {
            open_delay_ms: DEFAULT_OPEN_DELAY_MS,
            close_delay_ms: DEFAULT_CLOSE_DELAY_MS,
        }
    }
}

/// How a node reacts to hover.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HoverBehavior {
    /// Use the configured [`HoverTiming`].
    #[default]
    Default,
    /// Act on the next poll (0 ms).
    Immediate,
    /// Wait twice as long as the configured timing.
    Delayed,
    /// Never act on hover.
    Disabled,
}

/// What a hover transition asks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoverIntent {
    /// Pointer entered: open after the open delay.
    Open,
    /// Pointer left: close after the close delay.
    Close,
}

impl HoverBehavior {
    /// Delay for `intent`, or `None` when hover is disabled.
    pub fn delay(self, intent: HoverIntent, timing: HoverTiming) -> Option<u64> {
        let base = match intent {
            HoverIntent::Open => timing.open_delay_ms,
            HoverIntent::Close => timing.close_delay_ms,
        };
        match self {
            Self::Default => Some(base),
            Self::Immediate => Some(0),
            Self::Delayed => Some(base.saturating_mul(2)),
            Self::Disabled => None,
        }
    }
}

/// A hover policy bound to a single-slot timer.
#[derive(Clone, Debug)]
pub struct HoverArbiter<A> {
    behavior: HoverBehavior,
    timing: HoverTiming,
    timer: HoverTimer<A>,
}

impl<A> Default for HoverArbiter<A> {
    fn default() -> Self {
        Self::new(HoverBehavior::Default, HoverTiming::default())
    }
}

impl<A> HoverArbiter<A> {
    /// Create an idle arbiter.
    pub const fn new(behavior: HoverBehavior, timing: HoverTiming) -> Self {
        Self {
            behavior,
            timing,
            timer: HoverTimer::new(),
        }
    }

    /// Current behavior.
    pub fn behavior(&self) -> HoverBehavior {
        self.behavior
    }

    /// Change the behavior. Switching to [`HoverBehavior::Disabled`] clears
    /// any pending action.
    pub fn set_behavior(&mut self, behavior: HoverBehavior) {
        self.behavior = behavior;
        if behavior == HoverBehavior::Disabled {
            self.timer.clear();
        }
    }

    /// Current timing.
    pub fn timing(&self) -> HoverTiming {
        self.timing
    }

    /// Schedule `action` for `intent` according to the behavior.
    ///
    /// Returns `None` without touching the pending action when hover is
    /// disabled.
    pub fn schedule(&mut self, intent: HoverIntent, action: A, now: u64) -> Option<TimerToken> {
        let delay = self.behavior.delay(intent, self.timing)?;
        Some(self.timer.set(action, delay, now))
    }

    /// Schedule `action` with an explicit delay, bypassing the behavior.
    pub fn set_timeout(&mut self, action: A, delay: u64, now: u64) -> TimerToken {
        self.timer.set(action, delay, now)
    }

    /// Drop the pending action. Idempotent.
    pub fn clear(&mut self) -> bool {
        self.timer.clear()
    }

    /// Whether an action is pending.
    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Deadline of the pending action.
    pub fn deadline(&self) -> Option<u64> {
        self.timer.deadline()
    }

    /// The pending action, without consuming it.
    pub fn action(&self) -> Option<&A> {
        self.timer.action()
    }

    /// Take the pending action if it is due.
    pub fn poll(&mut self, now: u64) -> Option<A> {
        self.timer.poll(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delays() {
        let t = HoverTiming::default();
        assert_eq!(HoverBehavior::Default.delay(HoverIntent::Open, t), Some(100));
        assert_eq!(HoverBehavior::Default.delay(HoverIntent::Close, t), Some(300));
    }

    #[test]
    fn behavior_variants() {
        let t = HoverTiming {
            open_delay_ms: 120,
            close_delay_ms: 250,
        };
        assert_eq!(HoverBehavior::Immediate.delay(HoverIntent::Close, t), Some(0));
        assert_eq!(HoverBehavior::Delayed.delay(HoverIntent::Open, t), Some(240));
        assert_eq!(HoverBehavior::Delayed.delay(HoverIntent::Close, t), Some(500));
        assert_eq!(HoverBehavior::Disabled.delay(HoverIntent::Open, t), None);
    }

    #[test]
    fn disabled_never_schedules() {
        let mut arbiter = HoverArbiter::new(HoverBehavior::Disabled, HoverTiming::default());
        assert!(arbiter.schedule(HoverIntent::Open, 1, 0).is_none());
        assert_eq!(arbiter.poll(10_000), None);
    }

    #[test]
    fn disabling_clears_pending_action() {
        let mut arbiter = HoverArbiter::default();
        arbiter.schedule(HoverIntent::Close, 1, 0);
        arbiter.set_behavior(HoverBehavior::Disabled);
        assert!(!arbiter.is_pending());
    }

    #[test]
    fn enter_leave_enter_resolves_to_last() {
        let mut arbiter = HoverArbiter::default();
        arbiter.schedule(HoverIntent::Open, "open-1", 0);
        arbiter.schedule(HoverIntent::Close, "close", 30);
        arbiter.schedule(HoverIntent::Open, "open-2", 60);
        assert_eq!(arbiter.deadline(), Some(160));
        assert_eq!(arbiter.poll(159), None);
        assert_eq!(arbiter.poll(160), Some("open-2"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn timing_deserializes_partially() {
        let t: HoverTiming = serde_json::from_str(r#"{ "close_delay_ms": 500 }"#).unwrap();
        assert_eq!(t.open_delay_ms, 100);
        assert_eq!(t.close_delay_ms, 500);
        let b: HoverBehavior = serde_json::from_str(r#""immediate""#).unwrap();
        assert_eq!(b, HoverBehavior::Immediate);
    }
}
