// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Signals emitted by the menu tree.

use alloc::string::String;

use crate::types::{ItemId, MenuId};

/// Something the host may want to react to.
///
/// Events queue up inside the tree in the order transitions happen and are
/// handed out by [`MenuTree::drain_events`](crate::MenuTree::drain_events).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    /// Open state changed. Lets an external controller mirror the state.
    Update {
        /// The menu whose state changed.
        menu: MenuId,
        /// New open state.
        open: bool,
    },
    /// The menu opened.
    Opened {
        /// The menu.
        menu: MenuId,
    },
    /// The menu closed.
    Closed {
        /// The menu.
        menu: MenuId,
    },
    /// A plain item was activated.
    Selected {
        /// Menu whose content holds the item.
        menu: MenuId,
        /// The item.
        item: ItemId,
        /// The item's value, if it has one.
        value: Option<String>,
    },
    /// Move keyboard focus to an item.
    FocusItem {
        /// Menu whose content holds the item.
        menu: MenuId,
        /// The item.
        item: ItemId,
    },
    /// Move keyboard focus back to a root trigger.
    FocusTrigger {
        /// The root menu.
        menu: MenuId,
    },
}
