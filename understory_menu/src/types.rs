// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public handle types: menu and item identifiers, host element references.

/// Identifier for a menu node (a root dropdown or a sub-menu). Generational.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct MenuId(pub(crate) u32, pub(crate) u32);

/// Identifier for an item rendered inside a menu's content. Generational.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) u32, pub(crate) u32);

macro_rules! generational_id {
    ($name:ident) => {
        impl $name {
            /// Pack index and generation into one integer, unique among live
            /// and stale ids of the same tree.
            pub fn to_bits(self) -> u64 {
                (u64::from(self.0) << 32) | u64::from(self.1)
            }
        }

        impl crate::arena::ArenaKey for $name {
            fn from_parts(idx: u32, generation: u32) -> Self {
                Self(idx, generation)
            }

            fn idx(self) -> usize {
                self.0 as usize
            }

            fn generation(self) -> u32 {
                self.1
            }
        }
    };
}

generational_id!(MenuId);
generational_id!(ItemId);

/// Opaque handle to a host element (a trigger or a content panel).
///
/// The engine never dereferences it; it only hands it back through
/// [`LayoutHost`](understory_placement::LayoutHost).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementRef(pub u64);

/// What an item does when activated.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ItemKind {
    /// A plain, selectable item.
    Item,
    /// The trigger of a nested sub-menu.
    SubTrigger(MenuId),
}

/// Where keyboard focus currently is.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FocusTarget {
    /// The trigger of a menu. For sub-menus this is the same element as the
    /// sub-trigger item in the parent's content.
    Trigger(MenuId),
    /// An item inside some menu's content.
    Item(ItemId),
}
