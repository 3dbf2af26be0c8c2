// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legacy inline collision flip.
//!
//! This is the older positioning path kept for placement parity with hosts
//! that relied on it. It anchors the panel on the requested side and mirrors
//! it to the opposite side only when both hold:
//!
//! - the panel would overflow the viewport on the requested side, and
//! - the opposite side has strictly more free space.
//!
//! The decision compares static free space around the trigger, never the
//! flipped position, so repeated evaluation cannot oscillate. On flip only the
//! primary axis is recomputed; the cross axis keeps the value computed for
//! the requested side. [`SideStrategy`](crate::SideStrategy) and
//! [`AutoStrategy`](crate::AutoStrategy) recompute both axes instead.

use kurbo::{Point, Rect, Size};

use crate::placement::Side;
use crate::strategy::{
    AvailableSpace, PlacementStrategy, PositionOptions, Resolved, anchor, clamp_to_viewport,
};

/// Anchor to a side, flipping to the opposite side on overflow.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InlineFlipStrategy(pub Side);

impl InlineFlipStrategy {
    /// Whether the panel at `position` would cross the viewport edge on `side`.
    #[must_use]
    pub fn overflows(side: Side, position: Point, content: Size, viewport: Size) -> bool {
        match side {
            Side::Bottom => position.y + content.height > viewport.height,
            Side::Top => position.y < 0.0,
            Side::Right => position.x + content.width > viewport.width,
            Side::Left => position.x < 0.0,
        }
    }
}

impl PlacementStrategy for InlineFlipStrategy {
    fn resolve(&self, trigger: Rect, content: Size, options: &PositionOptions) -> Resolved {
        let requested = self.0;
        let mut position = anchor(
            requested,
            options.align,
            trigger,
            content,
            options.side_offset,
        );
        let space = AvailableSpace::around(trigger, options.viewport, options.padding);
        let opposite = requested.opposite();

        let flip = Self::overflows(requested, position, content, options.viewport)
            && space.get(opposite) > space.get(requested);

        let side = if flip {
            let mirrored = anchor(
                opposite,
                options.align,
                trigger,
                content,
                options.side_offset,
            );
            if requested.is_vertical() {
                position.y = mirrored.y;
            } else {
                position.x = mirrored.x;
            }
            tracing::trace!(
                from = requested.as_str(),
                to = opposite.as_str(),
                "flipped placement"
            );
            opposite
        } else {
            requested
        };

        if options.avoid_collisions {
            position = clamp_to_viewport(position, content, options.viewport, options.padding);
        }
        Resolved {
            position,
            side,
            flipped: flip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Align;

    const VIEWPORT: Size = Size::new(1024.0, 768.0);

    fn options() -> PositionOptions {
        PositionOptions {
            avoid_collisions: false,
            ..PositionOptions::new(VIEWPORT)
        }
    }

    #[test]
    fn bottom_flips_to_top_when_it_overflows_and_above_is_roomier() {
        let trigger = Rect::new(100.0, 700.0, 180.0, 730.0);
        let content = Size::new(120.0, 200.0);
        let r = InlineFlipStrategy(Side::Bottom).resolve(trigger, content, &options());
        assert!(r.flipped);
        assert_eq!(r.side, Side::Top);
        assert_eq!(r.position, Point::new(100.0, 496.0));
    }

    #[test]
    fn no_flip_without_overflow() {
        let trigger = Rect::new(100.0, 50.0, 180.0, 80.0);
        let content = Size::new(120.0, 200.0);
        let r = InlineFlipStrategy(Side::Bottom).resolve(trigger, content, &options());
        assert!(!r.flipped);
        assert_eq!(r.position, Point::new(100.0, 84.0));
    }

    #[test]
    fn no_flip_when_the_other_side_is_not_roomier() {
        // Overflows at the bottom, but there is even less room above.
        let viewport = Size::new(1024.0, 100.0);
        let trigger = Rect::new(0.0, 20.0, 40.0, 40.0);
        let content = Size::new(40.0, 80.0);
        let opts = PositionOptions {
            viewport,
            ..options()
        };
        let r = InlineFlipStrategy(Side::Bottom).resolve(trigger, content, &opts);
        assert!(!r.flipped);
        assert_eq!(r.side, Side::Bottom);
    }

    #[test]
    fn right_flips_to_left_and_keeps_cross_axis() {
        let trigger = Rect::new(950.0, 300.0, 1000.0, 330.0);
        let content = Size::new(160.0, 90.0);
        let opts = PositionOptions {
            align: Align::Center,
            ..options()
        };
        let r = InlineFlipStrategy(Side::Right).resolve(trigger, content, &opts);
        assert!(r.flipped);
        assert_eq!(r.side, Side::Left);
        assert_eq!(r.position, Point::new(786.0, 270.0));
    }

    #[test]
    fn top_flips_to_bottom_when_it_overflows_and_below_is_roomier() {
        let trigger = Rect::new(100.0, 30.0, 180.0, 60.0);
        let content = Size::new(120.0, 200.0);
        let r = InlineFlipStrategy(Side::Top).resolve(trigger, content, &options());
        assert!(r.flipped);
        assert_eq!(r.side, Side::Bottom);
        assert_eq!(r.position, Point::new(100.0, 64.0));
    }

    #[test]
    fn top_stays_when_below_is_not_roomier() {
        let trigger = Rect::new(0.0, 60.0, 40.0, 80.0);
        let content = Size::new(40.0, 80.0);
        let opts = PositionOptions {
            viewport: Size::new(1024.0, 100.0),
            ..options()
        };
        let r = InlineFlipStrategy(Side::Top).resolve(trigger, content, &opts);
        assert!(!r.flipped);
        assert_eq!(r.side, Side::Top);
        assert_eq!(r.position, Point::new(0.0, -24.0));
    }

    #[test]
    fn left_flips_to_right_and_keeps_cross_axis() {
        let trigger = Rect::new(20.0, 300.0, 70.0, 330.0);
        let content = Size::new(160.0, 90.0);
        let r = InlineFlipStrategy(Side::Left).resolve(trigger, content, &options());
        assert!(r.flipped);
        assert_eq!(r.side, Side::Right);
        assert_eq!(r.position, Point::new(74.0, 300.0));
    }

    #[test]
    fn left_stays_when_right_is_not_roomier() {
        let trigger = Rect::new(60.0, 0.0, 80.0, 20.0);
        let content = Size::new(80.0, 20.0);
        let opts = PositionOptions {
            viewport: Size::new(100.0, 768.0),
            ..options()
        };
        let r = InlineFlipStrategy(Side::Left).resolve(trigger, content, &opts);
        assert!(!r.flipped);
        assert_eq!(r.side, Side::Left);
        assert_eq!(r.position, Point::new(-24.0, 0.0));
    }

    #[test]
    fn flip_is_stable_under_reevaluation() {
        let trigger = Rect::new(100.0, 700.0, 180.0, 730.0);
        let content = Size::new(120.0, 200.0);
        let first = InlineFlipStrategy(Side::Bottom).resolve(trigger, content, &options());
        let second = InlineFlipStrategy(Side::Bottom).resolve(trigger, content, &options());
        assert_eq!(first, second);
    }
}
