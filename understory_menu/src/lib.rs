// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_menu --heading-base-level=0

//! Understory Menu: a headless engine for nested dropdown menus.
//!
//! This crate keeps the state of arbitrarily deep menu trees consistent while
//! leaving rendering to the host:
//!
//! - **State machine** ([`MenuTree`]): open/close/toggle/select with
//!   close-on-select cascading up the chain, inherited disablement, and a
//!   deferred focus return when a root closes.
//! - **Sub-menu coordination** ([`SubMenuSet`]): at most one open child per
//!   menu; stale or racing calls are no-ops.
//! - **Hover intent**: one cancellable timer per node, driven by the host's
//!   clock through [`MenuTree::tick`].
//! - **Keyboard** ([`MenuTree::key_down`]): role-aware mapping of
//!   arrows/Home/End/Enter/Space/Escape/Tab and type-ahead.
//! - **Positioning**: each content panel owns a
//!   [`Positioner`](understory_placement::Positioner); the host supplies
//!   geometry via [`LayoutHost`](understory_placement::LayoutHost) and flushes
//!   with [`MenuTree::on_animation_frame`].
//! - **ARIA** ([`aria`]): attribute sets wiring triggers, panels, and items.
//! - **Provider scopes** ([`ProviderScopes`]): nearest-ancestor lookup for
//!   hosts built from nested components.
//!
//! ## Example
//!
//! ```rust
//! use understory_menu::{FocusTarget, ItemProps, Key, MenuEvent, MenuProps, MenuTree};
//!
//! let mut tree = MenuTree::default();
//! let edit = tree.mount_root(MenuProps::new("Edit"), 0);
//! let undo = tree.mount_item(edit, ItemProps::new("Undo")).unwrap();
//! let share = tree.mount_sub_menu(edit, MenuProps::new("Share"), 0).unwrap();
//! let mail = tree.mount_item(share, ItemProps::new("Mail").with_value("mail")).unwrap();
//!
//! // ArrowDown on the trigger opens the menu and focuses the first item.
//! tree.key_down(FocusTarget::Trigger(edit), Key::ArrowDown);
//! assert!(tree.drain_events().contains(&MenuEvent::FocusItem { menu: edit, item: undo }));
//!
//! // Hovering the sub-trigger opens "Share" after the default 100 ms.
//! tree.pointer_enter_trigger(share, 1_000);
//! tree.tick(1_100);
//! assert!(tree.is_open(share));
//!
//! // Selecting a leaf closes the whole chain; focus returns to the root trigger
//! // on the next deferred turn.
//! tree.select(mail);
//! assert!(!tree.is_open(edit));
//! tree.run_deferred();
//! assert_eq!(tree.drain_events().last(), Some(&MenuEvent::FocusTrigger { menu: edit }));
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: enables `std` in the geometry dependencies.
//! - `libm`: `no_std` float math for the geometry dependencies.
//! - `serde`: `Serialize`/`Deserialize` for [`MenuConfig`], [`MenuProps`], and
//!   [`ItemProps`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

mod arena;

pub mod aria;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod id;
pub mod keyboard;
pub mod scope;
pub mod tree;
pub mod types;

pub use aria::{ContentAria, ItemAria, TriggerAria};
pub use config::{ItemProps, MenuConfig, MenuProps};
pub use coordinator::SubMenuSet;
pub use error::MenuError;
pub use event::MenuEvent;
pub use id::IdGenerator;
pub use keyboard::{Key, KeyOutcome};
pub use scope::ProviderScopes;
pub use tree::{HoverAction, MenuTree};
pub use types::{ElementRef, FocusTarget, ItemId, ItemKind, MenuId};

pub use understory_focus::Navigation;
