// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! ARIA attribute sets for triggers, content panels, and items.
//!
//! The host copies these onto its elements. Every set can be flattened into
//! `(name, value)` pairs with `attributes()`.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::tree::MenuTree;
use crate::types::{ItemId, ItemKind, MenuId};

/// Attributes of an element that opens a menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerAria {
    /// Element id.
    pub id: String,
    /// `aria-expanded`.
    pub expanded: bool,
    /// `aria-controls`: id of the content panel.
    pub controls: String,
}

impl TriggerAria {
    /// Attribute pairs, including `aria-haspopup="true"`.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        Vec::from([
            ("id", self.id.clone()),
            ("aria-haspopup", String::from("true")),
            ("aria-expanded", self.expanded.to_string()),
            ("aria-controls", self.controls.clone()),
        ])
    }
}

/// Attributes of a content panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentAria {
    /// Element id.
    pub id: String,
    /// `aria-labelledby`: id of the trigger.
    pub labelled_by: String,
}

impl ContentAria {
    /// Attribute pairs, including `role="menu"`.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        Vec::from([
            ("id", self.id.clone()),
            ("role", String::from("menu")),
            ("aria-labelledby", self.labelled_by.clone()),
        ])
    }
}

/// Attributes of an item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemAria {
    /// Disabled items get `tabindex="-1"`.
    pub disabled: bool,
    /// Sub-triggers also carry the trigger attributes of their sub-menu.
    pub trigger: Option<TriggerAria>,
}

impl ItemAria {
    /// `tabindex` value.
    pub fn tab_index(&self) -> i8 {
        if self.disabled { -1 } else { 0 }
    }

    /// Attribute pairs, starting with `role="menuitem"`.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::from([
            ("role", String::from("menuitem")),
            ("tabindex", self.tab_index().to_string()),
        ]);
        if let Some(trigger) = &self.trigger {
            out.extend(trigger.attributes());
        }
        out
    }
}

impl MenuTree {
    /// ARIA attributes for `id`'s trigger.
    pub fn trigger_aria(&self, id: MenuId) -> Option<TriggerAria> {
        Some(TriggerAria {
            id: self.trigger_id(id)?.into(),
            expanded: self.is_open(id),
            controls: self.content_id(id)?.into(),
        })
    }

    /// ARIA attributes for `id`'s content panel.
    pub fn content_aria(&self, id: MenuId) -> Option<ContentAria> {
        Some(ContentAria {
            id: self.content_id(id)?.into(),
            labelled_by: self.trigger_id(id)?.into(),
        })
    }

    /// ARIA attributes for an item.
    pub fn item_aria(&self, item: ItemId) -> Option<ItemAria> {
        let trigger = match self.item_kind(item)? {
            ItemKind::SubTrigger(sub) => self.trigger_aria(sub),
            ItemKind::Item => None,
        };
        Some(ItemAria {
            disabled: self.is_item_disabled(item),
            trigger,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::config::{ItemProps, MenuProps};
    use crate::tree::MenuTree;

    #[test]
    fn trigger_and_content_reference_each_other() {
        let mut tree = MenuTree::default();
        let root = tree.mount_root(MenuProps::new("File"), 0x10);
        let trigger = tree.trigger_aria(root).unwrap();
        let content = tree.content_aria(root).unwrap();
        assert_eq!(trigger.controls, content.id);
        assert_eq!(content.labelled_by, trigger.id);
        assert!(!trigger.expanded);
        assert_eq!(
            content.attributes(),
            [
                ("id", String::from("menu-content-10-2")),
                ("role", String::from("menu")),
                ("aria-labelledby", String::from("menu-trigger-10-1")),
            ]
        );

        tree.open(root);
        let attrs = tree.trigger_aria(root).unwrap().attributes();
        assert!(attrs.contains(&("aria-expanded", String::from("true"))));
        assert!(attrs.contains(&("aria-haspopup", String::from("true"))));
    }

    #[test]
    fn items_expose_role_and_tabindex() {
        let mut tree = MenuTree::default();
        let root = tree.mount_root(MenuProps::new("File"), 0);
        let on = tree.mount_item(root, ItemProps::new("Save")).unwrap();
        let off = tree
            .mount_item(root, ItemProps::new("Revert").disabled())
            .unwrap();
        let sub = tree
            .mount_sub_menu(root, MenuProps::new("Export"), 0)
            .unwrap();

        let on = tree.item_aria(on).unwrap();
        assert_eq!(on.tab_index(), 0);
        assert_eq!(on.attributes()[0], ("role", String::from("menuitem")));

        assert_eq!(tree.item_aria(off).unwrap().tab_index(), -1);

        let sub_trigger = tree.sub_menu_trigger(sub).unwrap();
        let attrs = tree.item_aria(sub_trigger).unwrap().attributes();
        assert!(attrs.contains(&("role", String::from("menuitem"))));
        assert!(attrs.contains(&("aria-haspopup", String::from("true"))));
        assert!(attrs.contains(&(
            "aria-controls",
            String::from(tree.content_id(sub).unwrap())
        )));
    }
}
