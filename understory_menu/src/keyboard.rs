// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard navigation.
//!
//! [`MenuTree::key_down`] maps a key pressed while focus is on a trigger or an
//! item to state transitions and focus moves. The mapping depends on the role
//! of the focused element:
//!
//! | Focus | Key | Effect |
//! |---|---|---|
//! | root trigger | `Enter`, `Space` | toggle |
//! | root trigger | `ArrowDown` / `ArrowUp` | open, focus first / last item |
//! | root trigger | `Escape` | close |
//! | sub-trigger | `Enter`, `Space`, `ArrowRight` | open, focus first sub-item |
//! | sub-trigger of an open sub-menu | `ArrowLeft` | close it, keep focus |
//! | item | `Enter`, `Space` | select |
//! | any item | `ArrowDown` / `ArrowUp` | next / previous enabled item, wrapping |
//! | any item | `Home` / `End` | first / last enabled item |
//! | any item | `Escape` | close this level, focus its trigger |
//! | item in a sub-menu | `ArrowLeft` | close this level, focus its sub-trigger |
//! | anywhere | `Tab` | close the chain, let focus move on |
//! | any item | printable character | next enabled item starting with it |

use understory_focus::Navigation;

use crate::tree::MenuTree;
use crate::types::{FocusTarget, ItemId, ItemKind, MenuId};

/// Keys the navigator understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `Enter`.
    Enter,
    /// The space bar.
    Space,
    /// `ArrowUp`.
    ArrowUp,
    /// `ArrowDown`.
    ArrowDown,
    /// `ArrowLeft`.
    ArrowLeft,
    /// `ArrowRight`.
    ArrowRight,
    /// `Home`.
    Home,
    /// `End`.
    End,
    /// `Escape`.
    Escape,
    /// `Tab`.
    Tab,
    /// A printable character, for type-ahead.
    Char(char),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Enter" => Self::Enter,
            " " | "Space" | "Spacebar" => Self::Space,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            _ => {
                let mut chars = name.chars();
                let ch = chars.next()?;
                if chars.next().is_some() || ch.is_whitespace() || ch.is_control() {
                    return None;
                }
                Self::Char(ch)
            }
        })
    }
}

/// What the host should do with the key event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyOutcome {
    /// The menu reacted to the key.
    pub handled: bool,
    /// Suppress the platform's default action (scrolling, focus advance).
    pub prevent_default: bool,
}

impl KeyOutcome {
    /// The key was not for us.
    pub const IGNORED: Self = Self {
        handled: false,
        prevent_default: false,
    };

    /// The key was consumed.
    pub const CONSUMED: Self = Self {
        handled: true,
        prevent_default: true,
    };

    const fn pass_through(handled: bool) -> Self {
        Self {
            handled,
            prevent_default: false,
        }
    }

    const fn consumed_if(handled: bool) -> Self {
        if handled {
            Self::CONSUMED
        } else {
            Self::IGNORED
        }
    }
}

impl MenuTree {
    /// Handle a key pressed while focus is on `target`.
    pub fn key_down(&mut self, target: FocusTarget, key: Key) -> KeyOutcome {
        match target {
            FocusTarget::Trigger(menu) => match self.sub_menu_trigger(menu) {
                Some(item) => self.item_key(item, key),
                None => self.trigger_key(menu, key),
            },
            FocusTarget::Item(item) => self.item_key(item, key),
        }
    }

    fn trigger_key(&mut self, menu: MenuId, key: Key) -> KeyOutcome {
        if !self.contains(menu) {
            return KeyOutcome::IGNORED;
        }
        match key {
            Key::Enter | Key::Space => KeyOutcome::consumed_if(self.toggle(menu)),
            Key::ArrowDown => self.open_and_focus(menu, Navigation::First),
            Key::ArrowUp => self.open_and_focus(menu, Navigation::Last),
            Key::Escape => KeyOutcome::consumed_if(self.close(menu)),
            Key::Tab => KeyOutcome::pass_through(self.close_chain(menu)),
            _ => KeyOutcome::IGNORED,
        }
    }

    fn item_key(&mut self, item: ItemId, key: Key) -> KeyOutcome {
        let (Some(menu), Some(kind)) = (self.item_menu(item), self.item_kind(item)) else {
            return KeyOutcome::IGNORED;
        };
        let sub = match kind {
            ItemKind::SubTrigger(sub) => Some(sub),
            ItemKind::Item => None,
        };
        match key {
            Key::Enter | Key::Space => match sub {
                Some(sub) => self.open_and_focus(sub, Navigation::First),
                None => KeyOutcome::consumed_if(self.select(item)),
            },
            Key::ArrowRight => match sub {
                Some(sub) => self.open_and_focus(sub, Navigation::First),
                None => KeyOutcome::IGNORED,
            },
            Key::ArrowLeft => match sub.filter(|sub| self.is_open(*sub)) {
                Some(sub) => {
                    self.close(sub);
                    self.focus_item(menu, item);
                    KeyOutcome::CONSUMED
                }
                None => KeyOutcome::consumed_if(self.close_to_trigger(menu, false)),
            },
            Key::ArrowDown => self.step(menu, item, Navigation::Next),
            Key::ArrowUp => self.step(menu, item, Navigation::Prev),
            Key::Home => self.step(menu, item, Navigation::First),
            Key::End => self.step(menu, item, Navigation::Last),
            Key::Escape => KeyOutcome::consumed_if(self.close_to_trigger(menu, true)),
            Key::Tab => KeyOutcome::pass_through(self.close_chain(menu)),
            Key::Char(ch) => {
                let found = self.move_focus(menu, Some(item), Navigation::TypeAhead(ch));
                KeyOutcome::consumed_if(found.is_some())
            }
        }
    }

    fn open_and_focus(&mut self, menu: MenuId, navigation: Navigation) -> KeyOutcome {
        if !self.is_open(menu) && !self.open(menu) {
            return KeyOutcome::IGNORED;
        }
        self.move_focus(menu, None, navigation);
        KeyOutcome::CONSUMED
    }

    fn step(&mut self, menu: MenuId, item: ItemId, navigation: Navigation) -> KeyOutcome {
        self.move_focus(menu, Some(item), navigation);
        KeyOutcome::CONSUMED
    }

    /// Close one level and put focus on the element that opened it.
    ///
    /// Sub-menus hand focus to their sub-trigger right away. Roots only close
    /// when `include_root` is set and get focus back through the deferred
    /// return.
    fn close_to_trigger(&mut self, menu: MenuId, include_root: bool) -> bool {
        match (self.parent(menu), self.sub_menu_trigger(menu)) {
            (Some(parent), Some(trigger)) => {
                if !self.close(menu) {
                    return false;
                }
                self.focus_item(parent, trigger);
                true
            }
            _ if include_root => self.close(menu),
            _ => false,
        }
    }
}
