// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement tokens: which side of the trigger a panel anchors to and how it
//! aligns along that side.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

/// Side of the trigger the content panel is placed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Above the trigger.
    Top,
    /// Below the trigger.
    Bottom,
    /// To the left of the trigger.
    Left,
    /// To the right of the trigger.
    Right,
}

impl Side {
    /// All sides, in the order used to break ties when scoring free space.
    pub const ALL: [Self; 4] = [Self::Bottom, Self::Top, Self::Right, Self::Left];

    /// The mirrored side (`top` ↔ `bottom`, `left` ↔ `right`).
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether the primary axis of this side is vertical (`top`/`bottom`).
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Token spelling of this side.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Alignment of the panel along the trigger's side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Align {
    /// Panel starts at the trigger's origin.
    #[default]
    Start,
    /// Panel is centered on the trigger span.
    Center,
    /// Panel ends at the trigger's far edge.
    End,
}

impl Align {
    /// Token spelling of this alignment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }
}

/// A `<side>-<align>` placement.
///
/// Twelve combinations exist. The bare side tokens (`"top"`, `"bottom"`,
/// `"left"`, `"right"`) are accepted when parsing and mean `<side>-start`.
///
/// With the `serde` feature a placement (de)serializes as its token string.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Placement {
    /// Side of the trigger.
    pub side: Side,
    /// Alignment along that side.
    pub align: Align,
}

impl Default for Placement {
    fn default() -> Self {
        Self::BOTTOM_START
    }
}

impl Placement {
    /// `bottom-start`, the fallback for unrecognized tokens.
    pub const BOTTOM_START: Self = Self::new(Side::Bottom, Align::Start);

    /// Create a placement from its parts.
    #[must_use]
    pub const fn new(side: Side, align: Align) -> Self {
        Self { side, align }
    }

    /// Same alignment on a different side.
    #[must_use]
    pub const fn with_side(self, side: Side) -> Self {
        Self::new(side, self.align)
    }

    /// Parse a placement token.
    ///
    /// ```rust
    /// use understory_placement::{Align, Placement, Side};
    ///
    /// assert_eq!(Placement::parse("left").unwrap(), Placement::new(Side::Left, Align::Start));
    /// assert_eq!(Placement::parse("top-center").unwrap(), Placement::new(Side::Top, Align::Center));
    /// assert!(Placement::parse("middle").is_err());
    /// ```
    pub fn parse(token: &str) -> Result<Self, PlacementError> {
        let (side, align) = match token.split_once('-') {
            Some((side, align)) => (side, Some(align)),
            None => (token, None),
        };
        let side = match side {
            "top" => Side::Top,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            "right" => Side::Right,
            _ => return Err(PlacementError::UnknownToken(token.to_string())),
        };
        let align = match align {
            None | Some("start") => Align::Start,
            Some("center") => Align::Center,
            Some("end") => Align::End,
            Some(_) => return Err(PlacementError::UnknownToken(token.to_string())),
        };
        Ok(Self::new(side, align))
    }

    /// Parse a placement token, falling back to [`Placement::BOTTOM_START`].
    ///
    /// Unknown tokens are reported with a `tracing` warning and never panic.
    pub fn parse_or_default(token: &str) -> Self {
        match Self::parse(token) {
            Ok(placement) => placement,
            Err(err) => {
                tracing::warn!(%err, "falling back to `bottom-start`");
                Self::BOTTOM_START
            }
        }
    }
}

impl FromStr for Placement {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Placement {
    type Error = PlacementError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Placement> for String {
    fn from(value: Placement) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.side.as_str(), self.align.as_str())
    }
}

/// Errors produced while parsing placement tokens.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// The token is not one of the recognized `<side>[-<align>]` spellings.
    #[error("unknown placement token `{0}`")]
    UnknownToken(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_side_and_alignment() {
        for side in Side::ALL {
            for align in [Align::Start, Align::Center, Align::End] {
                let token = alloc::format!("{}-{}", side.as_str(), align.as_str());
                assert_eq!(Placement::parse(&token), Ok(Placement::new(side, align)));
            }
        }
    }

    #[test]
    fn bare_side_defaults_to_start() {
        assert_eq!(
            Placement::parse("right"),
            Ok(Placement::new(Side::Right, Align::Start))
        );
        assert_eq!(
            Placement::parse("top"),
            Ok(Placement::new(Side::Top, Align::Start))
        );
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert_eq!(
            Placement::parse("bottom-middle"),
            Err(PlacementError::UnknownToken("bottom-middle".to_string()))
        );
        assert!(Placement::parse("").is_err());
        assert!(Placement::parse("Bottom").is_err());
    }

    #[test]
    fn unknown_tokens_fall_back_to_bottom_start() {
        assert_eq!(Placement::parse_or_default("sideways"), Placement::BOTTOM_START);
        assert_eq!(
            Placement::parse_or_default("left-end"),
            Placement::new(Side::Left, Align::End)
        );
    }

    #[test]
    fn display_uses_explicit_alignment() {
        let p: Placement = "bottom".parse().unwrap();
        assert_eq!(p.to_string(), "bottom-start");
    }

    #[test]
    fn opposite_is_an_involution() {
        for side in Side::ALL {
            assert_eq!(side.opposite().opposite(), side);
            assert_eq!(side.opposite().is_vertical(), side.is_vertical());
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_token_strings() {
        let p = Placement::new(Side::Top, Align::End);
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"top-end\"");
        let back: Placement = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(back, Placement::new(Side::Left, Align::Start));
        assert!(serde_json::from_str::<Placement>("\"nowhere\"").is_err());
    }
}
