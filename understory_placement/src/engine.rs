// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioning engine: owns element handles, tracks invalidation, and applies
//! resolved positions through the host.
//!
//! ## Lifecycle
//!
//! 1. Create a [`Positioner`] with a [`Placement`] and a [`PositionMode`].
//! 2. When the host mounts the trigger and content elements, hand their
//!    handles over with [`Positioner::set_trigger`] / [`Positioner::set_content`].
//! 3. While the panel is visible call [`Positioner::observe`]; size-change
//!    notifications from the host go to [`Positioner::notify_resized`].
//! 4. Once per frame call [`Positioner::on_frame`]. It recomputes at most once,
//!    and only if something changed since the last write.
//! 5. When the panel hides or unmounts call [`Positioner::disconnect`]; pending
//!    invalidation is dropped so nothing fires afterwards.
//!
//! [`Positioner::update`] can be called directly to force a recomputation.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_placement::{LayoutHost, Placement, Positioner};
//!
//! struct Host {
//!     applied: Option<Point>,
//! }
//!
//! impl LayoutHost<u32> for Host {
//!     fn bounding_rect(&self, element: &u32) -> Option<Rect> {
//!         match element {
//!             1 => Some(Rect::new(100.0, 50.0, 180.0, 80.0)),
//!             2 => Some(Rect::new(0.0, 0.0, 200.0, 120.0)),
//!             _ => None,
//!         }
//!     }
//!     fn viewport(&self) -> Size {
//!         Size::new(1024.0, 768.0)
//!     }
//!     fn apply_position(&mut self, _element: &u32, position: Point) {
//!         self.applied = Some(position);
//!     }
//! }
//!
//! let mut host = Host { applied: None };
//! let mut positioner = Positioner::new(Placement::parse("bottom-end").unwrap());
//! positioner.set_trigger(Some(1));
//! positioner.set_content(Some(2));
//! positioner.observe();
//!
//! positioner.on_frame(&mut host);
//! assert_eq!(host.applied, Some(Point::new(8.0, 84.0)));
//! ```

use kurbo::{Point, Rect, Size};

use crate::flip::InlineFlipStrategy;
use crate::placement::Placement;
use crate::strategy::{AutoStrategy, PlacementStrategy, PositionOptions, Resolved, SideStrategy};
use crate::{DEFAULT_SIDE_OFFSET, VIEWPORT_PADDING};

/// Geometry access provided by the host.
///
/// This is the only place the engine touches the outside world. Rectangles
/// and positions share the host's coordinate space (typically the viewport).
pub trait LayoutHost<E> {
    /// Current bounding box of an element, or `None` if it cannot be measured
    /// (for example because it is detached).
    fn bounding_rect(&self, element: &E) -> Option<Rect>;

    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Move the content element so its top-left corner is at `position`.
    ///
    /// Implementations write the `left`/`top` offsets and nothing else.
    fn apply_position(&mut self, element: &E, position: Point);
}

/// How a [`Positioner`] turns its placement into a position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PositionMode {
    /// Anchor to the placement's side; clamp on collision.
    #[default]
    Side,
    /// Pick the side with the most room; keep the placement's alignment.
    Auto,
    /// Legacy path: anchor to the placement's side and flip on overflow.
    InlineFlip,
}

bitflags::bitflags! {
    /// Reasons a positioner needs to recompute.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Invalidation: u8 {
        /// The placement changed.
        const PLACEMENT       = 0b0000_0001;
        /// The trigger element reported a size change.
        const TRIGGER_RESIZED = 0b0000_0010;
        /// The content element reported a size change.
        const CONTENT_RESIZED = 0b0000_0100;
        /// Observation just started (panel became visible).
        const ATTACHED        = 0b0000_1000;
    }
}

/// Positioning state for one floating panel.
#[derive(Clone, Debug)]
pub struct Positioner<E> {
    placement: Placement,
    mode: PositionMode,
    side_offset: f64,
    avoid_collisions: bool,
    trigger: Option<E>,
    content: Option<E>,
    observing: bool,
    pending: Invalidation,
    last: Option<Resolved>,
}

impl<E> Positioner<E> {
    /// Create a positioner in [`PositionMode::Side`] with default offsets.
    pub fn new(placement: Placement) -> Self {
        Self {
            placement,
            mode: PositionMode::Side,
            side_offset: DEFAULT_SIDE_OFFSET,
            avoid_collisions: true,
            trigger: None,
            content: None,
            observing: false,
            pending: Invalidation::empty(),
            last: None,
        }
    }

    /// Builder-style mode selection.
    #[must_use]
    pub fn with_mode(mut self, mode: PositionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder-style side offset.
    #[must_use]
    pub fn with_side_offset(mut self, side_offset: f64) -> Self {
        self.side_offset = side_offset;
        self
    }

    /// Builder-style collision avoidance toggle.
    #[must_use]
    pub fn with_avoid_collisions(mut self, avoid_collisions: bool) -> Self {
        self.avoid_collisions = avoid_collisions;
        self
    }

    /// Current placement.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Change the placement. Returns `true` and schedules a recomputation if
    /// it differs from the current one.
    pub fn set_placement(&mut self, placement: Placement) -> bool {
        if self.placement == placement {
            return false;
        }
        self.placement = placement;
        self.pending |= Invalidation::PLACEMENT;
        true
    }

    /// Current mode.
    pub fn mode(&self) -> PositionMode {
        self.mode
    }

    /// Set the trigger element handle (`None` when unmounted).
    pub fn set_trigger(&mut self, trigger: Option<E>) {
        self.trigger = trigger;
    }

    /// Set the content element handle (`None` when unmounted).
    pub fn set_content(&mut self, content: Option<E>) {
        self.content = content;
    }

    /// Trigger element handle, if mounted.
    pub fn trigger(&self) -> Option<&E> {
        self.trigger.as_ref()
    }

    /// Content element handle, if mounted.
    pub fn content(&self) -> Option<&E> {
        self.content.as_ref()
    }

    /// Start reacting to size changes and schedule an initial placement.
    pub fn observe(&mut self) {
        self.observing = true;
        self.pending |= Invalidation::ATTACHED;
    }

    /// Stop reacting to size changes and drop any pending recomputation.
    pub fn disconnect(&mut self) {
        self.observing = false;
        self.pending = Invalidation::empty();
    }

    /// Whether size changes are currently observed.
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Pending invalidation reasons.
    pub fn pending(&self) -> Invalidation {
        self.pending
    }

    /// The last position written through the host, if any.
    pub fn last(&self) -> Option<Resolved> {
        self.last
    }

    /// Resolve a position for explicit geometry without touching the host.
    pub fn resolve(&self, trigger: Rect, content: Size, viewport: Size) -> Resolved {
        let options = PositionOptions {
            side_offset: self.side_offset,
            align: self.placement.align,
            avoid_collisions: self.avoid_collisions,
            viewport,
            padding: VIEWPORT_PADDING,
        };
        let side = self.placement.side;
        match self.mode {
            PositionMode::Side => SideStrategy(side).resolve(trigger, content, &options),
            PositionMode::Auto => {
                let resolved = AutoStrategy.resolve(trigger, content, &options);
                Resolved {
                    flipped: resolved.side != side,
                    ..resolved
                }
            }
            PositionMode::InlineFlip => InlineFlipStrategy(side).resolve(trigger, content, &options),
        }
    }
}

impl<E: PartialEq> Positioner<E> {
    /// Record a size change for `element`.
    ///
    /// Returns `true` if the element is one of the observed ones; the
    /// recomputation then happens on the next [`Positioner::on_frame`].
    pub fn notify_resized(&mut self, element: &E) -> bool {
        if !self.observing {
            return false;
        }
        let mut hit = false;
        if self.trigger.as_ref() == Some(element) {
            self.pending |= Invalidation::TRIGGER_RESIZED;
            hit = true;
        }
        if self.content.as_ref() == Some(element) {
            self.pending |= Invalidation::CONTENT_RESIZED;
            hit = true;
        }
        hit
    }

    /// Recompute and apply the position now.
    ///
    /// No-op (returns `None`) if either element is missing or cannot be
    /// measured. Pending invalidation survives a no-op and is cleared only
    /// once a position has been written, so the next frame retries.
    pub fn update<H: LayoutHost<E>>(&mut self, host: &mut H) -> Option<Resolved> {
        let (Some(trigger), Some(content)) = (self.trigger.as_ref(), self.content.as_ref()) else {
            return None;
        };
        let trigger_rect = host.bounding_rect(trigger)?;
        let content_rect = host.bounding_rect(content)?;
        let resolved = self.resolve(trigger_rect, content_rect.size(), host.viewport());
        host.apply_position(content, resolved.position);
        self.pending = Invalidation::empty();
        self.last = Some(resolved);
        Some(resolved)
    }

    /// Per-frame flush: recompute once if observing and anything changed.
    pub fn on_frame<H: LayoutHost<E>>(&mut self, host: &mut H) -> Option<Resolved> {
        if !self.observing || self.pending.is_empty() {
            return None;
        }
        self.update(host)
    }
}
