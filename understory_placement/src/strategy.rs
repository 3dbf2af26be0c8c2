// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement strategies: pure functions from trigger/content geometry to a
//! panel origin.
//!
//! All coordinates share one space, typically the viewport space reported by
//! the host's bounding-rect query. The returned [`Resolved::position`] is the
//! top-left corner (`left`, `top`) of the content panel in that space.
//!
//! Strategies never consult global state: for identical inputs the result is
//! identical.

use kurbo::{Point, Rect, Size};

use crate::placement::{Align, Side};
use crate::{DEFAULT_SIDE_OFFSET, VIEWPORT_PADDING};

/// Inputs shared by every strategy besides the two rectangles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionOptions {
    /// Gap between the trigger edge and the panel along the primary axis.
    pub side_offset: f64,
    /// Alignment along the cross axis.
    pub align: Align,
    /// Clamp the result into the padded viewport.
    pub avoid_collisions: bool,
    /// Size of the viewport the panel must stay inside.
    pub viewport: Size,
    /// Minimum gap from every viewport edge.
    pub padding: f64,
}

impl PositionOptions {
    /// Default options for a viewport: 4px side offset, `start` alignment,
    /// collision avoidance on, 8px viewport padding.
    #[must_use]
    pub const fn new(viewport: Size) -> Self {
        Self {
            side_offset: DEFAULT_SIDE_OFFSET,
            align: Align::Start,
            avoid_collisions: true,
            viewport,
            padding: VIEWPORT_PADDING,
        }
    }
}

/// Output of a strategy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolved {
    /// Top-left corner of the content panel.
    pub position: Point,
    /// Side the panel ended up on.
    pub side: Side,
    /// Whether the side differs from the requested one because of a collision.
    ///
    /// [`AutoStrategy`] has no requested side and always leaves this `false`;
    /// a [`Positioner`](crate::Positioner) in auto mode compares against its
    /// placement instead.
    pub flipped: bool,
}

/// A way of turning trigger/content geometry into a panel position.
pub trait PlacementStrategy {
    /// Compute where the panel goes.
    fn resolve(&self, trigger: Rect, content: Size, options: &PositionOptions) -> Resolved;
}

/// Anchor the panel to a fixed side of the trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SideStrategy(pub Side);

impl PlacementStrategy for SideStrategy {
    fn resolve(&self, trigger: Rect, content: Size, options: &PositionOptions) -> Resolved {
        let mut position = anchor(self.0, options.align, trigger, content, options.side_offset);
        if options.avoid_collisions {
            position = clamp_to_viewport(position, content, options.viewport, options.padding);
        }
        Resolved {
            position,
            side: self.0,
            flipped: false,
        }
    }
}

/// Panel origin for an explicit side: [`SideStrategy`] without the metadata.
#[must_use]
pub fn calculate_position(
    side: Side,
    trigger: Rect,
    content: Size,
    options: &PositionOptions,
) -> Point {
    SideStrategy(side).resolve(trigger, content, options).position
}

/// Pick the side with the most free space that fits the panel.
///
/// Free space in a direction is the distance from the trigger edge to the
/// viewport edge minus the padding. A side fits when the panel's primary
/// dimension plus the side offset is no larger than that space. Among fitting
/// sides the largest space wins; ties keep the order of [`Side::ALL`]. When
/// nothing fits the panel goes to the bottom.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AutoStrategy;

impl AutoStrategy {
    /// The side auto-placement would choose.
    #[must_use]
    pub fn choose_side(trigger: Rect, content: Size, options: &PositionOptions) -> Side {
        let space = AvailableSpace::around(trigger, options.viewport, options.padding);
        let mut best: Option<(Side, f64)> = None;
        for side in Side::ALL {
            let room = space.get(side);
            let needed = primary_extent(side, content) + options.side_offset;
            if needed > room {
                continue;
            }
            if best.is_none_or(|(_, best_room)| room > best_room) {
                best = Some((side, room));
            }
        }
        best.map_or(Side::Bottom, |(side, _)| side)
    }
}

impl PlacementStrategy for AutoStrategy {
    fn resolve(&self, trigger: Rect, content: Size, options: &PositionOptions) -> Resolved {
        let side = Self::choose_side(trigger, content, options);
        SideStrategy(side).resolve(trigger, content, options)
    }
}

/// Free space between the trigger and each padded viewport edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AvailableSpace {
    /// Above the trigger.
    pub top: f64,
    /// Below the trigger.
    pub bottom: f64,
    /// Left of the trigger.
    pub left: f64,
    /// Right of the trigger.
    pub right: f64,
}

impl AvailableSpace {
    /// Measure the space around `trigger` inside `viewport`.
    #[must_use]
    pub fn around(trigger: Rect, viewport: Size, padding: f64) -> Self {
        Self {
            top: trigger.y0 - padding,
            bottom: viewport.height - trigger.y1 - padding,
            left: trigger.x0 - padding,
            right: viewport.width - trigger.x1 - padding,
        }
    }

    /// Space on one side.
    #[must_use]
    pub const fn get(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Unclamped panel origin for a side and alignment.
#[must_use]
pub fn anchor(side: Side, align: Align, trigger: Rect, content: Size, side_offset: f64) -> Point {
    match side {
        Side::Top => Point::new(
            cross(align, trigger.x0, trigger.x1, content.width),
            trigger.y0 - content.height - side_offset,
        ),
        Side::Bottom => Point::new(
            cross(align, trigger.x0, trigger.x1, content.width),
            trigger.y1 + side_offset,
        ),
        Side::Left => Point::new(
            trigger.x0 - content.width - side_offset,
            cross(align, trigger.y0, trigger.y1, content.height),
        ),
        Side::Right => Point::new(
            trigger.x1 + side_offset,
            cross(align, trigger.y0, trigger.y1, content.height),
        ),
    }
}

/// Clamp a panel origin so the panel keeps `padding` from every viewport edge.
///
/// When the panel is larger than the padded viewport the lower bound wins, so
/// the panel's start edge stays visible.
#[must_use]
pub fn clamp_to_viewport(position: Point, content: Size, viewport: Size, padding: f64) -> Point {
    Point::new(
        clamp_axis(position.x, content.width, viewport.width, padding),
        clamp_axis(position.y, content.height, viewport.height, padding),
    )
}

fn clamp_axis(value: f64, extent: f64, limit: f64, padding: f64) -> f64 {
    value.min(limit - extent - padding).max(padding)
}

fn cross(align: Align, start: f64, end: f64, span: f64) -> f64 {
    match align {
        Align::Start => start,
        Align::Center => start + (end - start - span) / 2.0,
        Align::End => end - span,
    }
}

pub(crate) fn primary_extent(side: Side, content: Size) -> f64 {
    if side.is_vertical() {
        content.height
    } else {
        content.width
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_side() -> impl Strategy<Value = Side> {
        prop_oneof![
            Just(Side::Top),
            Just(Side::Bottom),
            Just(Side::Left),
            Just(Side::Right)
        ]
    }

    fn arb_align() -> impl Strategy<Value = Align> {
        prop_oneof![Just(Align::Start), Just(Align::Center), Just(Align::End)]
    }

    proptest! {
        #[test]
        fn clamped_positions_stay_inside_padded_viewport(
            side in arb_side(),
            align in arb_align(),
            x in -500.0_f64..1500.0,
            y in -500.0_f64..1500.0,
            tw in 1.0_f64..300.0,
            th in 1.0_f64..300.0,
            cw in 1.0_f64..1000.0,
            ch in 1.0_f64..700.0,
            offset in 0.0_f64..32.0,
        ) {
            let viewport = Size::new(1024.0, 768.0);
            let options = PositionOptions {
                side_offset: offset,
                align,
                ..PositionOptions::new(viewport)
            };
            let trigger = Rect::new(x, y, x + tw, y + th);
            let content = Size::new(cw, ch);
            let p = SideStrategy(side).resolve(trigger, content, &options).position;
            prop_assert!(p.x >= options.padding);
            prop_assert!(p.x <= viewport.width - cw - options.padding);
            prop_assert!(p.y >= options.padding);
            prop_assert!(p.y <= viewport.height - ch - options.padding);
        }

        #[test]
        fn auto_is_deterministic(
            x in 0.0_f64..1000.0,
            y in 0.0_f64..700.0,
            cw in 1.0_f64..600.0,
            ch in 1.0_f64..600.0,
        ) {
            let options = PositionOptions::new(Size::new(1024.0, 768.0));
            let trigger = Rect::new(x, y, x + 24.0, y + 24.0);
            let content = Size::new(cw, ch);
            let a = AutoStrategy.resolve(trigger, content, &options);
            let b = AutoStrategy.resolve(trigger, content, &options);
            prop_assert_eq!(a, b);
        }
    }
}
