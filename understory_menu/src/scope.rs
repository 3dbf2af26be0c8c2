// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-ancestor lookup of the menu that provides context to a component.
//!
//! Hosts that build menus out of nested components (a dropdown containing a
//! content panel containing items and further dropdowns) record each
//! component under a key of their choosing, together with its parent key.
//! Components that own a menu [`provide`](ProviderScopes::provide) it; any
//! component can then ask for the [`nearest`](ProviderScopes::nearest) menu
//! above it, or [`require`](ProviderScopes::require) one and fail loudly if
//! the tree is wired wrong.
//!
//! ```rust
//! use understory_menu::{MenuProps, MenuTree, ProviderScopes};
//!
//! let mut tree = MenuTree::default();
//! let mut scopes = ProviderScopes::new();
//!
//! // "dropdown" provides a menu; "content" and "item" sit below it.
//! scopes.insert("dropdown", None);
//! scopes.insert("content", Some("dropdown"));
//! scopes.insert("item", Some("content"));
//! scopes.insert("stray", None);
//!
//! let root = tree.mount_root(MenuProps::new("File"), 0);
//! scopes.provide("dropdown", root);
//!
//! assert_eq!(scopes.nearest("item"), Some(root));
//! assert!(scopes.require("stray", "menu item").is_err());
//! ```

use core::hash::Hash;

use hashbrown::HashMap;

use crate::error::MenuError;
use crate::types::MenuId;

#[derive(Copy, Clone, Debug)]
struct Scope<K> {
    parent: Option<K>,
    menu: Option<MenuId>,
}

/// Component keys, their parents, and the menus they provide.
#[derive(Clone, Debug)]
pub struct ProviderScopes<K> {
    scopes: HashMap<K, Scope<K>>,
}

impl<K> Default for ProviderScopes<K> {
    fn default() -> Self {
        Self {
            scopes: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> ProviderScopes<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a component and its parent. Re-inserting a key replaces its
    /// parent and drops what it provided.
    pub fn insert(&mut self, key: K, parent: Option<K>) {
        self.scopes.insert(key, Scope { parent, menu: None });
    }

    /// Mark `key` as providing `menu` to its descendants.
    ///
    /// Returns `false` if `key` was never inserted.
    pub fn provide(&mut self, key: K, menu: MenuId) -> bool {
        match self.scopes.get_mut(&key) {
            Some(scope) => {
                scope.menu = Some(menu);
                true
            }
            None => false,
        }
    }

    /// Forget a component, returning the menu it provided.
    ///
    /// Children keep pointing at the removed key and so lose their provider.
    pub fn remove(&mut self, key: K) -> Option<MenuId> {
        self.scopes.remove(&key).and_then(|scope| scope.menu)
    }

    /// The menu `key` itself provides.
    pub fn provided(&self, key: K) -> Option<MenuId> {
        self.scopes.get(&key).and_then(|scope| scope.menu)
    }

    /// The menu provided by the closest strict ancestor of `key`.
    pub fn nearest(&self, key: K) -> Option<MenuId> {
        let mut current = self.scopes.get(&key)?.parent;
        // A well-formed chain visits each key at most once.
        for _ in 0..self.scopes.len() {
            let scope = self.scopes.get(&current?)?;
            if let Some(menu) = scope.menu {
                return Some(menu);
            }
            current = scope.parent;
        }
        None
    }

    /// Like [`nearest`](Self::nearest), but a missing provider is an error
    /// naming `consumer`.
    pub fn require(&self, key: K, consumer: &'static str) -> Result<MenuId, MenuError> {
        self.nearest(key).ok_or(MenuError::missing_menu(consumer))
    }

    /// Number of recorded components.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Whether no components are recorded.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
