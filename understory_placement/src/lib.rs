// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Placement: collision-aware positioning of floating panels.
//!
//! ## Overview
//!
//! This crate answers one question: given the rectangle of a *trigger* and the
//! size of a *content* panel, where should the panel's top-left corner go?
//! It is split in two layers:
//!
//! - **Strategies** ([`strategy`]): pure functions of the two rectangles and a
//!   [`PositionOptions`]. A per-side [`SideStrategy`], a space-scoring
//!   [`AutoStrategy`], and the legacy [`InlineFlipStrategy`] all implement
//!   [`PlacementStrategy`]. Identical inputs always give identical output.
//! - **Engine** ([`engine`]): a [`Positioner`] that owns the element handles,
//!   tracks what changed since the last frame ([`Invalidation`]), and writes the
//!   result through a single [`LayoutHost::apply_position`] seam.
//!
//! The crate does not perform layout, rendering, or DOM access. The host
//! measures elements and applies positions; this crate does the arithmetic.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_placement::{Placement, PlacementStrategy, PositionOptions, SideStrategy};
//!
//! let placement = Placement::parse("bottom-end").unwrap();
//! let trigger = Rect::new(100.0, 50.0, 180.0, 80.0);
//! let content = Size::new(200.0, 120.0);
//! let options = PositionOptions {
//!     align: placement.align,
//!     ..PositionOptions::new(Size::new(1024.0, 768.0))
//! };
//!
//! let raw = SideStrategy(placement.side).resolve(
//!     trigger,
//!     content,
//!     &PositionOptions { avoid_collisions: false, ..options },
//! );
//! assert_eq!(raw.position, Point::new(-20.0, 84.0));
//!
//! // With collision avoidance the panel is kept 8px away from the viewport edge.
//! let clamped = SideStrategy(placement.side).resolve(trigger, content, &options);
//! assert_eq!(clamped.position, Point::new(8.0, 84.0));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` builds relying on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`Placement`], [`Side`],
//!   [`Align`] and [`PositionMode`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod engine;
pub mod flip;
pub mod placement;
pub mod strategy;

pub use engine::{Invalidation, LayoutHost, PositionMode, Positioner};
pub use flip::InlineFlipStrategy;
pub use placement::{Align, Placement, PlacementError, Side};
pub use strategy::{
    AutoStrategy, AvailableSpace, PlacementStrategy, PositionOptions, Resolved, SideStrategy,
    calculate_position,
};

/// Minimum gap, in pixels, between a floating panel and any viewport edge.
pub const VIEWPORT_PADDING: f64 = 8.0;

/// Default distance, in pixels, between the trigger and its content panel.
pub const DEFAULT_SIDE_OFFSET: f64 = 4.0;
