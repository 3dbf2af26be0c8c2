// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: small state machines for timed UI interactions.
//!
//! - [`timer`]: [`HoverTimer`](timer::HoverTimer), a single-slot cancellable
//!   timer. Scheduling a new action discards the pending one, so at most one
//!   action is ever live.
//! - [`hover`]: hover-intent policy ([`HoverBehavior`](hover::HoverBehavior),
//!   [`HoverTiming`](hover::HoverTiming)) and the
//!   [`HoverArbiter`](hover::HoverArbiter) that combines it with a timer.
//!
//! ## Design Philosophy
//!
//! - **Host-driven time**: nothing here reads a clock. Callers pass a
//!   monotonically increasing `now` in milliseconds and poll for due actions,
//!   which makes every interleaving reproducible in tests.
//! - **Payload, not callbacks**: a timer stores a value of your choosing (an
//!   enum of actions, a node id, or a boxed closure) and hands it back when due.
//! - **Generic**: no assumptions about the UI framework or the node id type.
//!
//! ## Example
//!
//! ```rust
//! use understory_event_state::timer::HoverTimer;
//!
//! let mut timer = HoverTimer::new();
//! timer.set("open", 100, 0);
//! // A second schedule before the first fires replaces it entirely.
//! timer.set("close", 50, 10);
//!
//! assert_eq!(timer.poll(59), None);
//! assert_eq!(timer.poll(60), Some("close"));
//! assert_eq!(timer.poll(1_000), None);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod hover;
pub mod timer;
