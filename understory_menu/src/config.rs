// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree-wide configuration and per-node construction inputs.

use alloc::string::String;

use understory_event_state::hover::{HoverBehavior, HoverTiming};
use understory_placement::{DEFAULT_SIDE_OFFSET, Placement, PositionMode};

use crate::id::DEFAULT_ID_PREFIX;

/// Defaults shared by every node of a [`MenuTree`](crate::MenuTree).
///
/// With the `serde` feature, missing fields take their default value, so a
/// partial document such as `{ "hover_behavior": "immediate" }` loads.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MenuConfig {
    /// Hover open/close delays.
    pub hover: HoverTiming,
    /// Hover policy for nodes that do not set their own.
    pub hover_behavior: HoverBehavior,
    /// Gap between a trigger and its panel.
    pub side_offset: f64,
    /// Clamp panels into the padded viewport.
    pub avoid_collisions: bool,
    /// Close the open chain when an item is selected, unless a node overrides it.
    pub close_on_select: bool,
    /// How panels are positioned.
    pub position_mode: PositionMode,
    /// Prefix for generated element ids.
    pub id_prefix: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            hover: HoverTiming::default(),
            hover_behavior: HoverBehavior::Default,
            side_offset: DEFAULT_SIDE_OFFSET,
            avoid_collisions: true,
            close_on_select: true,
            position_mode: PositionMode::Side,
            id_prefix: String::from(DEFAULT_ID_PREFIX),
        }
    }
}

/// Construction inputs for one menu node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MenuProps {
    /// Externally controlled open state; `Some(true)` opens the node at mount.
    pub model_value: Option<bool>,
    /// Disable this node and everything below it.
    pub disabled: bool,
    /// Override [`MenuConfig::close_on_select`].
    pub close_on_select: Option<bool>,
    /// Where the panel goes relative to the trigger.
    pub placement: Option<Placement>,
    /// Override [`MenuConfig::hover_behavior`].
    pub hover_behavior: Option<HoverBehavior>,
    /// Label of the trigger. For sub-menus this is the sub-trigger item's
    /// label, used by type-ahead.
    pub label: String,
}

impl MenuProps {
    /// Props with a trigger label and everything else defaulted.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Builder-style: set the placement from a token such as `"right-start"`.
    ///
    /// Unknown tokens fall back to `bottom-start` with a warning.
    #[must_use]
    pub fn with_placement(mut self, token: &str) -> Self {
        self.placement = Some(Placement::parse_or_default(token));
        self
    }

    /// Builder-style: disable the node.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Builder-style: override close-on-select.
    #[must_use]
    pub fn with_close_on_select(mut self, close_on_select: bool) -> Self {
        self.close_on_select = Some(close_on_select);
        self
    }

    /// Builder-style: override the hover policy.
    #[must_use]
    pub fn with_hover_behavior(mut self, behavior: HoverBehavior) -> Self {
        self.hover_behavior = Some(behavior);
        self
    }

    /// Builder-style: set the initial controlled open state.
    #[must_use]
    pub fn with_model_value(mut self, open: bool) -> Self {
        self.model_value = Some(open);
        self
    }
}

/// Construction inputs for one item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemProps {
    /// Visible label; its first character drives type-ahead.
    pub label: String,
    /// Value reported in [`MenuEvent::Selected`](crate::MenuEvent::Selected).
    pub value: Option<String>,
    /// Skip the item in focus traversal and ignore activation.
    pub disabled: bool,
}

impl ItemProps {
    /// Enabled item with a label and no value.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Builder-style: set the value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Builder-style: disable the item.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_placement::{Align, Side};

    #[test]
    fn defaults_match_documented_constants() {
        let config = MenuConfig::default();
        assert_eq!(config.hover.open_delay_ms, 100);
        assert_eq!(config.hover.close_delay_ms, 300);
        assert_eq!(config.side_offset, 4.0);
        assert!(config.close_on_select);
        assert_eq!(config.position_mode, PositionMode::Side);
        assert_eq!(config.id_prefix, "menu");
    }

    #[test]
    fn unknown_placement_token_falls_back() {
        let props = MenuProps::new("File").with_placement("diagonal");
        assert_eq!(props.placement, Some(Placement::default()));
        let props = MenuProps::new("File").with_placement("left-end");
        assert_eq!(
            props.placement,
            Some(Placement {
                side: Side::Left,
                align: Align::End,
            })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config_loads() {
        let config: MenuConfig = serde_json::from_str(
            r#"{ "hover": { "open_delay_ms": 50 }, "position_mode": "inline-flip" }"#,
        )
        .unwrap();
        assert_eq!(config.hover.open_delay_ms, 50);
        assert_eq!(config.hover.close_delay_ms, 300);
        assert_eq!(config.position_mode, PositionMode::InlineFlip);
        assert!(config.close_on_select);

        let props: MenuProps =
            serde_json::from_str(r#"{ "label": "Edit", "placement": "right-start" }"#).unwrap();
        assert_eq!(props.label, "Edit");
        assert_eq!(props.placement.map(|p| p.side), Some(Side::Right));
    }
}
