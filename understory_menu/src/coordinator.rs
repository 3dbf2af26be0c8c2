// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sub-menu coordinator: which immediate child of a menu is active.
//!
//! Every menu owns one [`SubMenuSet`] holding its registered child sub-menus
//! and at most one active id. The set is the only place the active id is
//! written, so conflicting opens serialize through it.
//!
//! Operations on ids that are not registered (or no longer active) are
//! no-ops. They happen legitimately when an unmount races a pending hover
//! timer, so they never fail.

use core::fmt::Debug;

use smallvec::SmallVec;

/// Registered child sub-menus of one menu, plus the active one.
#[derive(Clone, Debug)]
pub struct SubMenuSet<K> {
    registered: SmallVec<[K; 4]>,
    active: Option<K>,
}

impl<K> Default for SubMenuSet<K> {
    fn default() -> Self {
        Self {
            registered: SmallVec::new(),
            active: None,
        }
    }
}

impl<K: Copy + Eq + Debug> SubMenuSet<K> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a child. Returns `false` if it was already registered.
    pub fn register(&mut self, id: K) -> bool {
        if self.registered.contains(&id) {
            return false;
        }
        self.registered.push(id);
        true
    }

    /// Unregister a child, clearing the active id if it was this one.
    pub fn unregister(&mut self, id: K) -> bool {
        let Some(pos) = self.registered.iter().position(|k| *k == id) else {
            return false;
        };
        self.registered.remove(pos);
        if self.active == Some(id) {
            self.active = None;
        }
        true
    }

    /// Make `id` the active child. Unregistered ids are ignored with a warning.
    pub fn open(&mut self, id: K) -> bool {
        if !self.registered.contains(&id) {
            tracing::warn!(?id, "ignoring open of an unregistered sub-menu");
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Clear the active id, but only if it is `id`.
    pub fn close(&mut self, id: K) -> bool {
        if self.active != Some(id) {
            return false;
        }
        self.active = None;
        true
    }

    /// Clear the active id unconditionally, returning what it was.
    pub fn close_all(&mut self) -> Option<K> {
        self.active.take()
    }

    /// The active child.
    pub fn active(&self) -> Option<K> {
        self.active
    }

    /// Whether `id` is registered.
    pub fn is_registered(&self, id: K) -> bool {
        self.registered.contains(&id)
    }

    /// Registered children in registration order.
    pub fn registered(&self) -> &[K] {
        &self.registered
    }
}
