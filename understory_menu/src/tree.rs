// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The menu tree: open state, sub-menu exclusion, hover timers, positioning.
//!
//! ## Model
//!
//! A [`MenuTree`] stores every menu node and item of one UI in generational
//! arenas. A node is either a root (a dropdown with its own trigger) or a
//! sub-menu whose trigger is an item in its parent's content. Each node owns:
//!
//! - its open flag, mutated only by [`MenuTree::open`] and [`MenuTree::close`],
//! - a [`SubMenuSet`] of child sub-menus, which keeps at most one child open,
//! - a [`HoverArbiter`] with a single pending hover action,
//! - a [`Positioner`] for its content panel.
//!
//! ## Time and side effects
//!
//! Nothing here reads a clock or touches the host directly. Hover timers are
//! advanced by [`MenuTree::tick`], focus return after closing a root is run by
//! [`MenuTree::run_deferred`], and panels are repositioned by
//! [`MenuTree::on_animation_frame`]. Everything the host should react to
//! comes out of [`MenuTree::drain_events`].
//!
//! ## Example
//!
//! ```rust
//! use understory_menu::{ItemProps, MenuEvent, MenuProps, MenuTree};
//!
//! let mut tree = MenuTree::default();
//! let root = tree.mount_root(MenuProps::new("File"), 0);
//! let recent = tree.mount_sub_menu(root, MenuProps::new("Open Recent"), 0).unwrap();
//! let doc = tree.mount_item(recent, ItemProps::new("notes.txt").with_value("notes")).unwrap();
//!
//! tree.open(root);
//! tree.open(recent);
//! tree.select(doc);
//!
//! // Selecting a leaf collapses the whole chain.
//! assert!(!tree.is_open(root) && !tree.is_open(recent));
//! assert!(tree.drain_events().contains(&MenuEvent::Selected {
//!     menu: recent,
//!     item: doc,
//!     value: Some("notes".into()),
//! }));
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;
use understory_event_state::hover::{HoverArbiter, HoverIntent};
use understory_event_state::timer::TimerToken;
use understory_focus::{
    DefaultPolicy, FocusEntry, FocusPolicy, FocusSpace, FocusSymbol, Navigation, WrapMode,
};
use understory_placement::{LayoutHost, Placement, Positioner, Resolved};

use crate::arena::Arena;
use crate::config::{ItemProps, MenuConfig, MenuProps};
use crate::coordinator::SubMenuSet;
use crate::error::MenuError;
use crate::event::MenuEvent;
use crate::id::IdGenerator;
use crate::types::{ElementRef, ItemId, ItemKind, MenuId};

/// A delayed hover action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoverAction {
    /// Open the node.
    Open,
    /// Close the node.
    Close,
}

#[derive(Clone, Debug)]
struct MenuNode {
    parent: Option<MenuId>,
    /// For sub-menus, the item in the parent's content that triggers this node.
    trigger_item: Option<ItemId>,
    open: bool,
    disabled: bool,
    close_on_select: bool,
    label: String,
    trigger_id: String,
    content_id: String,
    sub_menus: SubMenuSet<MenuId>,
    hover: HoverArbiter<HoverAction>,
    positioner: Positioner<ElementRef>,
    items: SmallVec<[ItemId; 8]>,
}

#[derive(Clone, Debug)]
struct ItemNode {
    menu: MenuId,
    disabled: bool,
    label: String,
    value: Option<String>,
    kind: ItemKind,
}

type MenuList = SmallVec<[MenuId; 4]>;

/// All menus and items of one UI.
#[derive(Clone, Debug)]
pub struct MenuTree {
    config: MenuConfig,
    ids: IdGenerator,
    menus: Arena<MenuId, MenuNode>,
    items: Arena<ItemId, ItemNode>,
    events: Vec<MenuEvent>,
    /// Roots whose trigger should regain focus on the next `run_deferred`.
    focus_returns: Vec<MenuId>,
}

impl Default for MenuTree {
    fn default() -> Self {
        Self::new(MenuConfig::default())
    }
}

impl MenuTree {
    /// Create an empty tree.
    pub fn new(config: MenuConfig) -> Self {
        Self {
            ids: IdGenerator::new(&config.id_prefix),
            config,
            menus: Arena::default(),
            items: Arena::default(),
            events: Vec::new(),
            focus_returns: Vec::new(),
        }
    }

    /// Tree-wide configuration.
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    // --- lifecycle ---

    /// Mount a root menu. `now` stamps the generated element ids.
    pub fn mount_root(&mut self, props: MenuProps, now: u64) -> MenuId {
        self.mount(None, props, now)
    }

    /// Mount a sub-menu under `parent`. Its trigger becomes the last item of
    /// the parent's content.
    ///
    /// Fails if `parent` is not mounted.
    pub fn mount_sub_menu(
        &mut self,
        parent: MenuId,
        props: MenuProps,
        now: u64,
    ) -> Result<MenuId, MenuError> {
        if !self.menus.contains(parent) {
            return Err(MenuError::missing_menu("sub-menu"));
        }
        Ok(self.mount(Some(parent), props, now))
    }

    fn mount(&mut self, parent: Option<MenuId>, props: MenuProps, now: u64) -> MenuId {
        let trigger_id = self.ids.next("trigger", now);
        let content_id = self.ids.next("content", now);
        let behavior = props.hover_behavior.unwrap_or(self.config.hover_behavior);
        let positioner = Positioner::new(props.placement.unwrap_or_default())
            .with_mode(self.config.position_mode)
            .with_side_offset(self.config.side_offset)
            .with_avoid_collisions(self.config.avoid_collisions);
        let id = self.menus.insert(MenuNode {
            parent,
            trigger_item: None,
            open: false,
            disabled: props.disabled,
            close_on_select: props.close_on_select.unwrap_or(self.config.close_on_select),
            label: props.label.clone(),
            trigger_id,
            content_id,
            sub_menus: SubMenuSet::new(),
            hover: HoverArbiter::new(behavior, self.config.hover),
            positioner,
            items: SmallVec::new(),
        });
        if let Some(parent) = parent {
            let item = self.items.insert(ItemNode {
                menu: parent,
                disabled: props.disabled,
                label: props.label,
                value: None,
                kind: ItemKind::SubTrigger(id),
            });
            if let Some(parent_node) = self.menus.get_mut(parent) {
                parent_node.sub_menus.register(id);
                parent_node.items.push(item);
            }
            if let Some(node) = self.menus.get_mut(id) {
                node.trigger_item = Some(item);
            }
        }
        tracing::debug!(?id, ?parent, "mounted menu");
        if props.model_value == Some(true) {
            self.open(id);
        }
        id
    }

    /// Mount a plain item at the end of `menu`'s content.
    ///
    /// Fails if `menu` is not mounted.
    pub fn mount_item(&mut self, menu: MenuId, props: ItemProps) -> Result<ItemId, MenuError> {
        if !self.menus.contains(menu) {
            return Err(MenuError::missing_menu("menu item"));
        }
        let item = self.items.insert(ItemNode {
            menu,
            disabled: props.disabled,
            label: props.label,
            value: props.value,
            kind: ItemKind::Item,
        });
        if let Some(node) = self.menus.get_mut(menu) {
            node.items.push(item);
        }
        Ok(item)
    }

    /// Unmount a menu and everything below it.
    ///
    /// Pending hover actions, deferred focus returns, and size observation
    /// are dropped synchronously; no event is emitted for the removed nodes.
    pub fn unmount(&mut self, id: MenuId) -> bool {
        let Some(node) = self.menus.get(id) else {
            return false;
        };
        let children: MenuList = node.sub_menus.registered().iter().copied().collect();
        for child in children {
            self.unmount(child);
        }
        let Some(mut node) = self.menus.remove(id) else {
            return false;
        };
        node.hover.clear();
        node.positioner.disconnect();
        for item in node.items {
            self.items.remove(item);
        }
        if let Some(parent) = node.parent {
            if let Some(parent_node) = self.menus.get_mut(parent) {
                parent_node.sub_menus.unregister(id);
                if let Some(trigger_item) = node.trigger_item {
                    parent_node.items.retain(|i| *i != trigger_item);
                }
            }
        }
        if let Some(trigger_item) = node.trigger_item {
            self.items.remove(trigger_item);
        }
        self.focus_returns.retain(|m| *m != id);
        tracing::debug!(?id, "unmounted menu");
        true
    }

    /// Unmount an item. Unmounting a sub-trigger unmounts its sub-menu.
    pub fn unmount_item(&mut self, item: ItemId) -> bool {
        let Some(node) = self.items.get(item) else {
            return false;
        };
        match node.kind {
            ItemKind::SubTrigger(sub) => self.unmount(sub),
            ItemKind::Item => {
                let menu = node.menu;
                self.items.remove(item);
                if let Some(menu_node) = self.menus.get_mut(menu) {
                    menu_node.items.retain(|i| *i != item);
                }
                true
            }
        }
    }

    // --- queries ---

    /// Whether `id` is mounted.
    pub fn contains(&self, id: MenuId) -> bool {
        self.menus.contains(id)
    }

    /// Number of mounted menus.
    pub fn len(&self) -> usize {
        self.menus.len()
    }

    /// Whether no menu is mounted.
    pub fn is_empty(&self) -> bool {
        self.menus.len() == 0
    }

    /// Whether the menu is open. Unmounted menus are closed.
    pub fn is_open(&self, id: MenuId) -> bool {
        self.menus.get(id).is_some_and(|n| n.open)
    }

    /// Whether the menu or any ancestor is disabled.
    pub fn is_disabled(&self, id: MenuId) -> bool {
        let mut current = Some(id);
        while let Some(menu) = current {
            let Some(node) = self.menus.get(menu) else {
                return true;
            };
            if node.disabled {
                return true;
            }
            current = node.parent;
        }
        false
    }

    /// Whether the item or its menu is disabled.
    pub fn is_item_disabled(&self, item: ItemId) -> bool {
        self.items
            .get(item)
            .is_none_or(|node| node.disabled || self.is_disabled(node.menu))
    }

    /// Parent of a sub-menu.
    pub fn parent(&self, id: MenuId) -> Option<MenuId> {
        self.menus.get(id)?.parent
    }

    /// Root of the chain `id` belongs to.
    pub fn root_of(&self, id: MenuId) -> Option<MenuId> {
        let mut current = id;
        loop {
            match self.menus.get(current)?.parent {
                Some(parent) => current = parent,
                None => return Some(current),
            }
        }
    }

    fn depth(&self, id: MenuId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// The open child sub-menu of `id`.
    pub fn active_sub_menu(&self, id: MenuId) -> Option<MenuId> {
        self.menus.get(id)?.sub_menus.active()
    }

    /// Child sub-menus of `id` in mount order.
    pub fn sub_menus(&self, id: MenuId) -> &[MenuId] {
        self.menus
            .get(id)
            .map(|n| n.sub_menus.registered())
            .unwrap_or_default()
    }

    /// Items of `id`'s content in mount order.
    pub fn items(&self, id: MenuId) -> &[ItemId] {
        self.menus
            .get(id)
            .map(|n| n.items.as_slice())
            .unwrap_or_default()
    }

    /// The trigger label given at mount.
    pub fn label(&self, id: MenuId) -> Option<&str> {
        self.menus.get(id).map(|n| n.label.as_str())
    }

    /// Generated id of the trigger element.
    pub fn trigger_id(&self, id: MenuId) -> Option<&str> {
        self.menus.get(id).map(|n| n.trigger_id.as_str())
    }

    /// Generated id of the content element.
    pub fn content_id(&self, id: MenuId) -> Option<&str> {
        self.menus.get(id).map(|n| n.content_id.as_str())
    }

    /// The sub-trigger item of a sub-menu.
    pub fn sub_menu_trigger(&self, id: MenuId) -> Option<ItemId> {
        self.menus.get(id)?.trigger_item
    }

    /// Menu whose content holds `item`.
    pub fn item_menu(&self, item: ItemId) -> Option<MenuId> {
        self.items.get(item).map(|n| n.menu)
    }

    /// Kind of `item`.
    pub fn item_kind(&self, item: ItemId) -> Option<ItemKind> {
        self.items.get(item).map(|n| n.kind)
    }

    /// Label of `item`.
    pub fn item_label(&self, item: ItemId) -> Option<&str> {
        self.items.get(item).map(|n| n.label.as_str())
    }

    // --- state machine ---

    /// Open a menu.
    ///
    /// No-op if the menu is unmounted, already open, disabled (directly or
    /// through an ancestor), or a sub-menu whose parent is closed. Opening a
    /// sub-menu closes its open siblings first.
    pub fn open(&mut self, id: MenuId) -> bool {
        let Some(node) = self.menus.get(id) else {
            tracing::debug!(?id, "ignoring open of an unmounted menu");
            return false;
        };
        if node.open || self.is_disabled(id) {
            return false;
        }
        if let Some(parent) = node.parent {
            if !self.is_open(parent) {
                tracing::debug!(?id, ?parent, "ignoring open under a closed parent");
                return false;
            }
            let siblings: MenuList = self
                .sub_menus(parent)
                .iter()
                .copied()
                .filter(|s| *s != id)
                .collect();
            for sibling in siblings {
                self.close_level(sibling, false);
            }
            if let Some(parent_node) = self.menus.get_mut(parent) {
                parent_node.sub_menus.close_all();
                parent_node.sub_menus.open(id);
            }
        }
        if let Some(node) = self.menus.get_mut(id) {
            node.open = true;
            node.hover.clear();
            node.positioner.observe();
        }
        tracing::trace!(?id, "menu opened");
        self.events.push(MenuEvent::Update {
            menu: id,
            open: true,
        });
        self.events.push(MenuEvent::Opened { menu: id });
        true
    }

    /// Close a menu and every open descendant.
    ///
    /// No-op if the menu is closed or unmounted. Closing a root queues a focus
    /// return to its trigger, run by [`MenuTree::run_deferred`].
    pub fn close(&mut self, id: MenuId) -> bool {
        self.close_level(id, true)
    }

    /// Close the whole chain `id` belongs to without returning focus, as when
    /// focus leaves the menu with `Tab`.
    pub fn close_chain(&mut self, id: MenuId) -> bool {
        match self.root_of(id) {
            Some(root) => self.close_level(root, false),
            None => false,
        }
    }

    fn close_level(&mut self, id: MenuId, return_focus: bool) -> bool {
        let Some(node) = self.menus.get(id) else {
            return false;
        };
        if !node.open {
            return false;
        }
        let parent = node.parent;
        let children: MenuList = node.sub_menus.registered().iter().copied().collect();
        for child in children {
            self.close_level(child, false);
        }
        self.clear_subtree_timers(id);
        if let Some(node) = self.menus.get_mut(id) {
            node.sub_menus.close_all();
            node.open = false;
            node.positioner.disconnect();
        }
        match parent {
            Some(parent) => {
                if let Some(parent_node) = self.menus.get_mut(parent) {
                    parent_node.sub_menus.close(id);
                }
            }
            None if return_focus => self.focus_returns.push(id),
            None => {}
        }
        tracing::trace!(?id, "menu closed");
        self.events.push(MenuEvent::Update {
            menu: id,
            open: false,
        });
        self.events.push(MenuEvent::Closed { menu: id });
        true
    }

    fn clear_subtree_timers(&mut self, id: MenuId) {
        let Some(node) = self.menus.get_mut(id) else {
            return;
        };
        node.hover.clear();
        let children: MenuList = node.sub_menus.registered().iter().copied().collect();
        for child in children {
            self.clear_subtree_timers(child);
        }
    }

    /// Close if open, open otherwise.
    pub fn toggle(&mut self, id: MenuId) -> bool {
        if self.is_open(id) {
            self.close(id)
        } else {
            self.open(id)
        }
    }

    /// Activate an item.
    ///
    /// A sub-trigger opens its sub-menu. A plain item emits
    /// [`MenuEvent::Selected`]; if its menu closes on select, the menu and
    /// every ancestor close, innermost first. Disabled items are ignored.
    pub fn select(&mut self, item: ItemId) -> bool {
        if self.is_item_disabled(item) {
            return false;
        }
        let Some(node) = self.items.get(item) else {
            return false;
        };
        let menu = node.menu;
        if let ItemKind::SubTrigger(sub) = node.kind {
            return self.open(sub);
        }
        self.events.push(MenuEvent::Selected {
            menu,
            item,
            value: node.value.clone(),
        });
        let close_on_select = self.menus.get(menu).is_some_and(|n| n.close_on_select);
        if close_on_select {
            let mut current = Some(menu);
            while let Some(level) = current {
                current = self.parent(level);
                self.close(level);
            }
        }
        true
    }

    /// Mirror an externally controlled open state.
    pub fn set_model_value(&mut self, id: MenuId, open: bool) -> bool {
        if open {
            self.open(id)
        } else {
            self.close(id)
        }
    }

    /// Close every open root, as on a pointer-down outside all panels.
    ///
    /// Focus is not returned to the triggers. Returns the number of roots
    /// closed.
    pub fn dismiss_all(&mut self) -> usize {
        let roots: Vec<MenuId> = self
            .menus
            .keys()
            .into_iter()
            .filter(|id| self.parent(*id).is_none() && self.is_open(*id))
            .collect();
        roots
            .into_iter()
            .filter(|root| self.close_level(*root, false))
            .count()
    }

    // --- focus ---

    /// Move focus inside `menu`'s content and emit [`MenuEvent::FocusItem`].
    ///
    /// `origin` is the focused item, or `None` when focus is on the trigger.
    /// Disabled items are skipped and traversal wraps.
    pub fn move_focus(
        &mut self,
        menu: MenuId,
        origin: Option<ItemId>,
        navigation: Navigation,
    ) -> Option<ItemId> {
        let scope = FocusSymbol(menu.to_bits());
        let entries: Vec<FocusEntry<ItemId>> = self
            .items(menu)
            .iter()
            .enumerate()
            .map(|(order, item)| {
                let order = i32::try_from(order).unwrap_or(i32::MAX);
                let mut entry = FocusEntry::new(*item, order, scope)
                    .with_label(self.item_label(*item).unwrap_or_default());
                entry.enabled = !self.is_item_disabled(*item);
                entry
            })
            .collect();
        let space = FocusSpace::scoped(&entries, scope);
        let policy = DefaultPolicy {
            wrap: WrapMode::Scope,
        };
        let target = policy.next(origin, navigation, &space)?;
        self.events.push(MenuEvent::FocusItem { menu, item: target });
        Some(target)
    }

    pub(crate) fn focus_item(&mut self, menu: MenuId, item: ItemId) {
        self.events.push(MenuEvent::FocusItem { menu, item });
    }

    // --- hover ---

    /// Pointer entered a sub-trigger: schedule opening its sub-menu.
    ///
    /// Roots are click-driven and ignore hover.
    pub fn pointer_enter_trigger(&mut self, id: MenuId, now: u64) -> bool {
        if self.is_disabled(id) {
            return false;
        }
        self.schedule_hover(id, HoverIntent::Open, now)
    }

    /// Pointer left a sub-trigger: schedule closing its sub-menu.
    pub fn pointer_leave_trigger(&mut self, id: MenuId, now: u64) -> bool {
        self.schedule_hover(id, HoverIntent::Close, now)
    }

    /// Pointer entered a panel: cancel pending hover actions on it and its
    /// ancestors so the chain under the pointer stays open.
    pub fn pointer_enter_content(&mut self, id: MenuId) -> bool {
        let mut cleared = false;
        let mut current = Some(id);
        while let Some(menu) = current {
            let Some(node) = self.menus.get_mut(menu) else {
                break;
            };
            cleared |= node.hover.clear();
            current = node.parent;
        }
        cleared
    }

    /// Pointer left a sub-menu's panel: schedule closing it.
    pub fn pointer_leave_content(&mut self, id: MenuId, now: u64) -> bool {
        self.schedule_hover(id, HoverIntent::Close, now)
    }

    fn schedule_hover(&mut self, id: MenuId, intent: HoverIntent, now: u64) -> bool {
        let Some(node) = self.menus.get_mut(id) else {
            return false;
        };
        if node.parent.is_none() {
            return false;
        }
        let action = match intent {
            HoverIntent::Open => HoverAction::Open,
            HoverIntent::Close => HoverAction::Close,
        };
        node.hover.schedule(intent, action, now).is_some()
    }

    /// Schedule `action` on `id` after `delay` ms, replacing any pending one.
    pub fn set_hover_timeout(
        &mut self,
        id: MenuId,
        action: HoverAction,
        delay: u64,
        now: u64,
    ) -> Option<TimerToken> {
        Some(self.menus.get_mut(id)?.hover.set_timeout(action, delay, now))
    }

    /// Drop the pending hover action on `id`. Idempotent.
    pub fn clear_hover_timeout(&mut self, id: MenuId) -> bool {
        self.menus.get_mut(id).is_some_and(|n| n.hover.clear())
    }

    /// Deadline of the pending hover action on `id`.
    pub fn hover_deadline(&self, id: MenuId) -> Option<u64> {
        self.menus.get(id)?.hover.deadline()
    }

    /// Earliest pending hover deadline in the tree, for scheduling the next
    /// [`MenuTree::tick`].
    pub fn next_deadline(&self) -> Option<u64> {
        self.menus
            .keys()
            .into_iter()
            .filter_map(|id| self.hover_deadline(id))
            .min()
    }

    /// Run every hover action due at `now`. Returns how many fired.
    ///
    /// Closes run before opens, shallower nodes before deeper ones. A close
    /// clears the timers of its subtree, so an open due below a closing node
    /// never fires.
    pub fn tick(&mut self, now: u64) -> usize {
        let mut due: Vec<(HoverAction, usize, MenuId)> = self
            .menus
            .keys()
            .into_iter()
            .filter_map(|id| {
                let hover = &self.menus.get(id)?.hover;
                if hover.deadline()? > now {
                    return None;
                }
                Some((*hover.action()?, self.depth(id), id))
            })
            .collect();
        due.sort_by_key(|(action, depth, _)| (*action == HoverAction::Open, *depth));

        let mut fired = 0;
        for (_, _, id) in due {
            // Skips timers cleared by an earlier close in this tick.
            let Some(action) = self.menus.get_mut(id).and_then(|n| n.hover.poll(now)) else {
                continue;
            };
            fired += 1;
            match action {
                HoverAction::Open => self.open(id),
                HoverAction::Close => self.close(id),
            };
        }
        fired
    }

    /// Run deferred work: focus return to roots closed since the last call.
    ///
    /// A return is skipped when its root was unmounted or reopened meanwhile.
    pub fn run_deferred(&mut self) -> usize {
        let pending = core::mem::take(&mut self.focus_returns);
        let mut ran = 0;
        for menu in pending {
            if self.menus.get(menu).is_some_and(|n| !n.open) {
                self.events.push(MenuEvent::FocusTrigger { menu });
                ran += 1;
            }
        }
        ran
    }

    // --- positioning ---

    /// Attach (or detach with `None`) the trigger element.
    pub fn attach_trigger(&mut self, id: MenuId, element: Option<ElementRef>) -> bool {
        let Some(node) = self.menus.get_mut(id) else {
            return false;
        };
        node.positioner.set_trigger(element);
        if node.open {
            node.positioner.observe();
        }
        true
    }

    /// Attach (or detach with `None`) the content panel element.
    pub fn attach_content(&mut self, id: MenuId, element: Option<ElementRef>) -> bool {
        let Some(node) = self.menus.get_mut(id) else {
            return false;
        };
        node.positioner.set_content(element);
        if node.open {
            node.positioner.observe();
        }
        true
    }

    /// Current placement of `id`.
    pub fn placement(&self, id: MenuId) -> Option<Placement> {
        Some(self.menus.get(id)?.positioner.placement())
    }

    /// Change the placement; an open panel repositions on the next frame.
    pub fn set_placement(&mut self, id: MenuId, placement: Placement) -> bool {
        self.menus
            .get_mut(id)
            .is_some_and(|n| n.positioner.set_placement(placement))
    }

    /// Last position written for `id`'s panel.
    pub fn last_position(&self, id: MenuId) -> Option<Resolved> {
        self.menus.get(id)?.positioner.last()
    }

    /// Forward a size-change notification from the host.
    ///
    /// Returns `true` if an open panel or its trigger uses `element`.
    pub fn notify_resized(&mut self, element: ElementRef) -> bool {
        let mut hit = false;
        for id in self.menus.keys() {
            if let Some(node) = self.menus.get_mut(id) {
                hit |= node.positioner.notify_resized(&element);
            }
        }
        hit
    }

    /// Reposition `id`'s panel now.
    pub fn update_position<H: LayoutHost<ElementRef>>(
        &mut self,
        id: MenuId,
        host: &mut H,
    ) -> Option<Resolved> {
        self.menus.get_mut(id)?.positioner.update(host)
    }

    /// Per-frame flush: reposition every open panel with pending changes.
    /// Returns how many panels moved.
    pub fn on_animation_frame<H: LayoutHost<ElementRef>>(&mut self, host: &mut H) -> usize {
        let mut moved = 0;
        for id in self.menus.keys() {
            if let Some(node) = self.menus.get_mut(id) {
                if node.positioner.on_frame(host).is_some() {
                    moved += 1;
                }
            }
        }
        moved
    }

    // --- events ---

    /// Take every event emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<MenuEvent> {
        core::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::{Point, Rect, Size};
    use understory_event_state::hover::HoverBehavior;
    use understory_placement::{Align, Side};

    fn tree_with_root() -> (MenuTree, MenuId) {
        let mut tree = MenuTree::default();
        let root = tree.mount_root(MenuProps::new("root"), 0);
        (tree, root)
    }

    fn opened(tree: &mut MenuTree, ids: &[MenuId]) {
        for id in ids {
            assert!(tree.open(*id));
        }
        tree.drain_events();
    }

    #[test]
    fn open_close_emit_update_and_lifecycle_events() {
        let (mut tree, root) = tree_with_root();
        assert!(tree.open(root));
        assert!(tree.close(root));
        assert_eq!(
            tree.drain_events(),
            vec![
                MenuEvent::Update {
                    menu: root,
                    open: true,
                },
                MenuEvent::Opened { menu: root },
                MenuEvent::Update {
                    menu: root,
                    open: false,
                },
                MenuEvent::Closed { menu: root },
            ]
        );
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let (mut tree, root) = tree_with_root();
        assert!(tree.open(root));
        assert!(!tree.open(root));
        assert_eq!(tree.drain_events().len(), 2);
        assert!(tree.close(root));
        assert!(!tree.close(root));
        assert_eq!(tree.drain_events().len(), 2);
        assert!(!tree.is_open(root));
    }

    #[test]
    fn disabled_is_inherited() {
        let mut tree = MenuTree::default();
        let root = tree.mount_root(MenuProps::new("root").disabled(), 0);
        let sub = tree.mount_sub_menu(root, MenuProps::new("sub"), 0).unwrap();
        assert!(tree.is_disabled(sub));
        assert!(!tree.open(root));
        assert!(!tree.open(sub));
        assert!(tree.drain_events().is_empty());
    }

    #[test]
    fn sub_menu_needs_an_open_parent() {
        let (mut tree, root) = tree_with_root();
        let sub = tree.mount_sub_menu(root, MenuProps::new("sub"), 0).unwrap();
        assert!(!tree.open(sub));
        tree.open(root);
        assert!(tree.open(sub));
        assert_eq!(tree.active_sub_menu(root), Some(sub));
    }

    #[test]
    fn opening_a_sibling_closes_the_other() {
        let (mut tree, root) = tree_with_root();
        let a = tree.mount_sub_menu(root, MenuProps::new("a"), 0).unwrap();
        let b = tree.mount_sub_menu(root, MenuProps::new("b"), 0).unwrap();
        let a1 = tree.mount_sub_menu(a, MenuProps::new("a1"), 0).unwrap();
        opened(&mut tree, &[root, a, a1]);

        assert!(tree.open(b));
        assert_eq!(tree.active_sub_menu(root), Some(b));
        assert!(!tree.is_open(a));
        assert!(!tree.is_open(a1));
        assert!(tree.is_open(b));
        assert_eq!(tree.active_sub_menu(a), None);
        assert_eq!(
            tree.drain_events(),
            vec![
                MenuEvent::Update {
                    menu: a1,
                    open: false,
                },
                MenuEvent::Closed { menu: a1 },
                MenuEvent::Update {
                    menu: a,
                    open: false,
                },
                MenuEvent::Closed { menu: a },
                MenuEvent::Update { menu: b, open: true },
                MenuEvent::Opened { menu: b },
            ]
        );
    }

    #[test]
    fn closing_a_sub_menu_clears_the_parents_active_id() {
        let (mut tree, root) = tree_with_root();
        let sub = tree.mount_sub_menu(root, MenuProps::new("sub"), 0).unwrap();
        opened(&mut tree, &[root, sub]);
        tree.close(sub);
        assert_eq!(tree.active_sub_menu(root), None);
        assert!(tree.is_open(root));
    }

    #[test]
    fn select_cascades_through_three_levels() {
        let (mut tree, root) = tree_with_root();
        let a = tree.mount_sub_menu(root, MenuProps::new("a"), 0).unwrap();
        let a1 = tree.mount_sub_menu(a, MenuProps::new("a1"), 0).unwrap();
        let leaf = tree
            .mount_item(a1, ItemProps::new("leaf").with_value("v"))
            .unwrap();
        opened(&mut tree, &[root, a, a1]);

        assert!(tree.select(leaf));
        assert!(!tree.is_open(root));
        assert!(!tree.is_open(a));
        assert!(!tree.is_open(a1));
        let events = tree.drain_events();
        assert_eq!(
            events[0],
            MenuEvent::Selected {
                menu: a1,
                item: leaf,
                value: Some("v".into()),
            }
        );
        let closed: Vec<MenuId> = events
            .iter()
            .filter_map(|e| match e {
                MenuEvent::Closed { menu } => Some(*menu),
                _ => None,
            })
            .collect();
        assert_eq!(closed, [a1, a, root]);
    }

    #[test]
    fn select_without_close_on_select_keeps_the_chain_open() {
        let mut tree = MenuTree::default();
        let root = tree.mount_root(MenuProps::new("root").with_close_on_select(false), 0);
        let item = tree.mount_item(root, ItemProps::new("check")).unwrap();
        tree.open(root);
        assert!(tree.select(item));
        assert!(tree.is_open(root));
    }

    #[test]
    fn disabled_items_cannot_be_selected() {
        let (mut tree, root) = tree_with_root();
        let item = tree
            .mount_item(root, ItemProps::new("nope").disabled())
            .unwrap();
        tree.open(root);
        assert!(!tree.select(item));
        assert!(tree.is_open(root));
    }

    #[test]
    fn selecting_a_sub_trigger_opens_its_sub_menu() {
        let (mut tree, root) = tree_with_root();
        let sub = tree.mount_sub_menu(root, MenuProps::new("sub"), 0).unwrap();
        tree.open(root);
        let trigger = tree.sub_menu_trigger(sub).unwrap();
        assert_eq!(tree.items(root), &[trigger]);
        assert!(tree.select(trigger));
        assert!(tree.is_open(sub));
        assert!(tree.is_open(root));
    }

    #[test]
    fn closing_a_root_returns_focus_on_the_next_turn() {
        let (mut tree, root) = tree_with_root();
        opened(&mut tree, &[root]);
        tree.close(root);
        tree.drain_events();
        assert_eq!(tree.run_deferred(), 1);
        assert_eq!(
            tree.drain_events(),
            vec![MenuEvent::FocusTrigger { menu: root }]
        );
        assert_eq!(tree.run_deferred(), 0);
    }

    #[test]
    fn focus_return_is_skipped_when_reopened_or_unmounted() {
        let (mut tree, root) = tree_with_root();
        tree.open(root);
        tree.close(root);
        tree.open(root);
        assert_eq!(tree.run_deferred(), 0);

        let other = tree.mount_root(MenuProps::new("other"), 0);
        tree.open(other);
        tree.close(other);
        tree.unmount(other);
        assert_eq!(tree.run_deferred(), 0);
    }

    #[test]
    fn close_chain_and_dismiss_all_skip_focus_return() {
        let (mut tree, root) = tree_with_root();
        let sub = tree.mount_sub_menu(root, MenuProps::new("sub"), 0).unwrap();
        let other = tree.mount_root(MenuProps::new("other"), 0);
        opened(&mut tree, &[root, sub]);

        assert!(tree.close_chain(sub));
        assert!(!tree.is_open(root));
        assert_eq!(tree.run_deferred(), 0);

        opened(&mut tree, &[root, other]);
        assert_eq!(tree.dismiss_all(), 2);
        assert_eq!(tree.run_deferred(), 0);
        assert_eq!(tree.dismiss_all(), 0);
    }

    #[test]
    fn model_value_opens_at_mount_and_mirrors_later() {
        let mut tree = MenuTree::default();
        let root = tree.mount_root(MenuProps::new("root").with_model_value(true), 0);
        assert!(tree.is_open(root));
        assert!(tree.set_model_value(root, false));
        assert!(!tree.is_open(root));
        assert!(!tree.set_model_value(root, false));
    }

    #[test]
    fn unregistering_the_active_sub_menu_clears_it() {
        let (mut tree, root) = tree_with_root();
        let sub = tree.mount_sub_menu(root, MenuProps::new("sub"), 0).unwrap();
        opened(&mut tree, &[root, sub]);
        assert!(tree.unmount(sub));
        assert_eq!(tree.active_sub_menu(root), None);
        assert!(tree.items(root).is_empty());
        assert!(tree.drain_events().is_empty());
        assert!(!tree.open(sub));
    }

    #[test]
    fn unmount_cancels_timers_recursively() {
        let (mut tree, root) = tree_with_root();
        let a = tree.mount_sub_menu(root, MenuProps::new("a"), 0).unwrap();
        let a1 = tree.mount_sub_menu(a, MenuProps::new("a1"), 0).unwrap();
        let item = tree.mount_item(a1, ItemProps::new("x")).unwrap();
        tree.open(root);
        tree.pointer_enter_trigger(a, 0);
        assert!(tree.unmount(a));
        assert!(!tree.contains(a1));
        assert_eq!(tree.item_menu(item), None);
        assert_eq!(tree.tick(10_000), 0);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn mounting_under_a_stale_menu_fails() {
        let (mut tree, root) = tree_with_root();
        tree.unmount(root);
        assert_eq!(
            tree.mount_sub_menu(root, MenuProps::new("x"), 0),
            Err(MenuError::MissingProvider {
                consumer: "sub-menu",
                provider: "menu",
            })
        );
        assert!(tree.mount_item(root, ItemProps::new("x")).is_err());
        assert!(tree.is_empty());
    }

    #[test]
    fn ids_are_stable_and_unique() {
        let (mut tree, root) = tree_with_root();
        let sub = tree.mount_sub_menu(root, MenuProps::new("sub"), 5).unwrap();
        let ids = [
            tree.trigger_id(root).unwrap(),
            tree.content_id(root).unwrap(),
            tree.trigger_id(sub).unwrap(),
            tree.content_id(sub).unwrap(),
        ];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
        let before = String::from(tree.trigger_id(root).unwrap());
        tree.open(root);
        tree.close(root);
        assert_eq!(tree.trigger_id(root), Some(before.as_str()));
    }

    #[test]
    fn hover_opens_after_delay_and_closes_after_leave() {
        let (mut tree, root) = tree_with_root();
        let sub = tree.mount_sub_menu(root, MenuProps::new("sub"), 0).unwrap();
        tree.open(root);

        assert!(tree.pointer_enter_trigger(sub, 1_000));
        assert_eq!(tree.tick(1_099), 0);
        assert_eq!(tree.tick(1_100), 1);
        assert!(tree.is_open(sub));

        tree.pointer_leave_trigger(sub, 2_000);
        assert_eq!(tree.next_deadline(), Some(2_300));
        tree.tick(2_300);
        assert!(!tree.is_open(sub));
    }

    #[test]
    fn entering_content_cancels_the_pending_close() {
        let (mut tree, root) = tree_with_root();
        let sub = tree.mount_sub_menu(root, MenuProps::new("sub"), 0).unwrap();
        opened(&mut tree, &[root, sub]);
        tree.pointer_leave_trigger(sub, 0);
        assert!(tree.pointer_enter_content(sub));
        assert_eq!(tree.tick(1_000), 0);
        assert!(tree.is_open(sub));

        tree.pointer_leave_content(sub, 1_000);
        tree.tick(1_300);
        assert!(!tree.is_open(sub));
    }

    #[test]
    fn fast_enter_leave_enter_resolves_to_open() {
        let (mut tree, root) = tree_with_root();
        let sub = tree.mount_sub_menu(root, MenuProps::new("sub"), 0).unwrap();
        tree.open(root);
        tree.pointer_enter_trigger(sub, 0);
        tree.pointer_leave_trigger(sub, 20);
        tree.pointer_enter_trigger(sub, 40);
        assert_eq!(tree.tick(139), 0);
        assert_eq!(tree.tick(140), 1);
        assert!(tree.is_open(sub));
    }

    #[test]
    fn explicit_hover_timeout_supersedes() {
        let (mut tree, root) = tree_with_root();
        let sub = tree.mount_sub_menu(root, MenuProps::new("sub"), 0).unwrap();
        tree.open(root);
        tree.set_hover_timeout(sub, HoverAction::Close, 100, 0);
        tree.set_hover_timeout(sub, HoverAction::Open, 50, 10);
        assert_eq!(tree.tick(100), 1);
        assert!(tree.is_open(sub));
        assert!(!tree.clear_hover_timeout(sub));
    }

    #[test]
    fn opening_clears_the_pending_timer() {
        let (mut tree, root) = tree_with_root();
        let sub = tree.mount_sub_menu(root, MenuProps::new("sub"), 0).unwrap();
        tree.open(root);
        tree.set_hover_timeout(sub, HoverAction::Close, 500, 0);
        tree.open(sub);
        assert_eq!(tree.hover_deadline(sub), None);
    }

    #[test]
    fn closing_clears_subtree_timers() {
        let (mut tree, root) = tree_with_root();
        let a = tree.mount_sub_menu(root, MenuProps::new("a"), 0).unwrap();
        let a1 = tree.mount_sub_menu(a, MenuProps::new("a1"), 0).unwrap();
        opened(&mut tree, &[root, a]);
        tree.pointer_enter_trigger(a1, 0);
        tree.close(root);
        assert_eq!(tree.hover_deadline(a1), None);
        assert_eq!(tree.next_deadline(), None);
    }

    #[test]
    fn due_close_on_a_parent_wins_over_a_child_in_a_reused_slot() {
        let (mut tree, root) = tree_with_root();
        let scratch = tree
            .mount_sub_menu(root, MenuProps::new("scratch"), 0)
            .unwrap();
        let a = tree.mount_sub_menu(root, MenuProps::new("a"), 0).unwrap();
        tree.unmount(scratch);
        // Takes the freed slot, which sits below its parent's.
        let a1 = tree.mount_sub_menu(a, MenuProps::new("a1"), 0).unwrap();
        assert_eq!(a1.to_bits() >> 32, scratch.to_bits() >> 32);
        opened(&mut tree, &[root, a]);
        tree.drain_events();

        tree.pointer_leave_content(a, 0);
        tree.pointer_enter_trigger(a1, 200);
        assert_eq!(tree.tick(300), 1);

        assert!(!tree.is_open(a));
        assert!(!tree.is_open(a1));
        assert_eq!(tree.hover_deadline(a1), None);
        assert_eq!(
            tree.drain_events(),
            vec![
                MenuEvent::Update {
                    menu: a,
                    open: false,
                },
                MenuEvent::Closed { menu: a },
            ]
        );
    }

    #[test]
    fn hover_behaviors() {
        let (mut tree, root) = tree_with_root();
        let now = tree
            .mount_sub_menu(
                root,
                MenuProps::new("now").with_hover_behavior(HoverBehavior::Immediate),
                0,
            )
            .unwrap();
        let never = tree
            .mount_sub_menu(
                root,
                MenuProps::new("never").with_hover_behavior(HoverBehavior::Disabled),
                0,
            )
            .unwrap();
        let slow = tree
            .mount_sub_menu(
                root,
                MenuProps::new("slow").with_hover_behavior(HoverBehavior::Delayed),
                0,
            )
            .unwrap();
        tree.open(root);

        assert!(!tree.pointer_enter_trigger(never, 0));
        assert!(!tree.pointer_enter_trigger(root, 0));
        tree.pointer_enter_trigger(slow, 0);
        assert_eq!(tree.hover_deadline(slow), Some(200));
        tree.pointer_enter_trigger(now, 0);
        assert_eq!(tree.hover_deadline(now), Some(0));
    }

    struct FakeHost {
        viewport: Size,
        rects: Vec<(ElementRef, Rect)>,
        applied: Vec<(ElementRef, Point)>,
    }

    impl LayoutHost<ElementRef> for FakeHost {
        fn bounding_rect(&self, element: &ElementRef) -> Option<Rect> {
            self.rects.iter().find(|(e, _)| e == element).map(|(_, r)| *r)
        }

        fn viewport(&self) -> Size {
            self.viewport
        }

        fn apply_position(&mut self, element: &ElementRef, position: Point) {
            self.applied.push((*element, position));
        }
    }

    fn host() -> FakeHost {
        FakeHost {
            viewport: Size::new(1024.0, 768.0),
            rects: vec![
                (ElementRef(1), Rect::new(100.0, 50.0, 180.0, 80.0)),
                (ElementRef(2), Rect::new(0.0, 0.0, 200.0, 120.0)),
            ],
            applied: Vec::new(),
        }
    }

    #[test]
    fn panel_is_positioned_once_per_frame_while_open() {
        let mut tree = MenuTree::default();
        let root = tree.mount_root(MenuProps::new("root").with_placement("bottom-end"), 0);
        let mut host = host();
        tree.attach_trigger(root, Some(ElementRef(1)));
        tree.attach_content(root, Some(ElementRef(2)));

        // Closed panels are not observed.
        assert_eq!(tree.on_animation_frame(&mut host), 0);
        assert!(!tree.notify_resized(ElementRef(2)));

        tree.open(root);
        assert_eq!(tree.on_animation_frame(&mut host), 1);
        assert_eq!(host.applied, [(ElementRef(2), Point::new(8.0, 84.0))]);
        assert_eq!(tree.on_animation_frame(&mut host), 0);

        assert!(tree.notify_resized(ElementRef(2)));
        assert!(tree.notify_resized(ElementRef(2)));
        assert_eq!(tree.on_animation_frame(&mut host), 1);
        assert_eq!(host.applied.len(), 2);

        tree.close(root);
        assert!(!tree.notify_resized(ElementRef(1)));
    }

    #[test]
    fn placement_change_repositions() {
        let (mut tree, root) = tree_with_root();
        let mut host = host();
        tree.attach_trigger(root, Some(ElementRef(1)));
        tree.attach_content(root, Some(ElementRef(2)));
        tree.open(root);
        tree.on_animation_frame(&mut host);

        assert!(tree.set_placement(root, Placement::new(Side::Right, Align::Start)));
        assert!(!tree.set_placement(root, Placement::new(Side::Right, Align::Start)));
        assert_eq!(tree.on_animation_frame(&mut host), 1);
        assert_eq!(
            tree.last_position(root).map(|r| r.position),
            Some(Point::new(184.0, 50.0))
        );
    }

    #[test]
    fn missing_refs_make_update_a_no_op() {
        let (mut tree, root) = tree_with_root();
        let mut host = host();
        tree.open(root);
        assert_eq!(tree.update_position(root, &mut host), None);
        tree.attach_trigger(root, Some(ElementRef(1)));
        tree.attach_content(root, Some(ElementRef(99)));
        assert_eq!(tree.update_position(root, &mut host), None);
        assert!(host.applied.is_empty());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn siblings_are_mutually_exclusive(ops in proptest::collection::vec((0_u8..4, 0_usize..4, 0_u64..500), 0..64)) {
                let mut tree = MenuTree::default();
                let root = tree.mount_root(MenuProps::new("root"), 0);
                let subs: Vec<MenuId> = (0..3)
                    .map(|i| tree.mount_sub_menu(root, MenuProps::new(format!("s{i}")), 0).unwrap())
                    .collect();
                let targets = [root, subs[0], subs[1], subs[2]];
                let mut now = 0;
                for (op, target, dt) in ops {
                    now += dt;
                    let id = targets[target];
                    match op {
                        0 => { tree.open(id); }
                        1 => { tree.close(id); }
                        2 => { tree.pointer_enter_trigger(id, now); }
                        _ => { tree.pointer_leave_trigger(id, now); }
                    }
                    tree.tick(now);
                    let open: Vec<MenuId> = subs.iter().copied().filter(|s| tree.is_open(*s)).collect();
                    prop_assert!(open.len() <= 1);
                    prop_assert_eq!(tree.active_sub_menu(root), open.first().copied());
                    if !tree.is_open(root) {
                        prop_assert!(open.is_empty());
                    }
                }
            }
        }
    }
}
