// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Focus: scoped focus traversal primitives.
//!
//! This crate models keyboard focus movement inside a container (a menu, a
//! list, a toolbar) as a combination of:
//! - **Navigation intents** ([`Navigation`]) such as [`Navigation::Next`],
//!   [`Navigation::First`], or [`Navigation::TypeAhead`].
//! - **Candidates** ([`FocusEntry`]) carrying an explicit order, an enabled
//!   flag, the [`FocusSymbol`] of the scope they belong to, and an optional
//!   type-ahead key.
//! - A **read-only view** ([`FocusSpace`]) restricted to one scope, so that
//!   traversal never leaks into a nested container that happens to share the
//!   same candidate list.
//! - Pluggable **policies** ([`FocusPolicy`]) that pick the next target.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_focus::{
//!     DefaultPolicy, FocusEntry, FocusPolicy, FocusSpace, FocusSymbol, Navigation, WrapMode,
//! };
//!
//! const MENU: FocusSymbol = FocusSymbol(1);
//!
//! let entries = vec![
//!     FocusEntry::new(1_u32, 0, MENU).with_key('c'),
//!     FocusEntry::new(2_u32, 1, MENU).disabled(),
//!     FocusEntry::new(3_u32, 2, MENU).with_key('p'),
//! ];
//!
//! let space = FocusSpace::scoped(&entries, MENU);
//! let policy = DefaultPolicy { wrap: WrapMode::Scope };
//!
//! // The disabled entry is skipped…
//! assert_eq!(policy.next(Some(1), Navigation::Next, &space), Some(3));
//! // …traversal wraps at the end…
//! assert_eq!(policy.next(Some(3), Navigation::Next, &space), Some(1));
//! // …and type-ahead jumps by first letter.
//! assert_eq!(policy.next(Some(1), Navigation::TypeAhead('P'), &space), Some(3));
//! ```
//!
//! The core types are generic over the node identifier `K`, so callers can use
//! any small, copyable handle.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Focus navigation intent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move to the next candidate (for example, `ArrowDown`).
    Next,
    /// Move to the previous candidate (for example, `ArrowUp`).
    Prev,
    /// Move to the first candidate (for example, `Home`).
    First,
    /// Move to the last candidate (for example, `End`).
    Last,
    /// Move to the next candidate whose key matches, case-insensitively.
    TypeAhead(char),
}

/// Symbol-like identifier for a focus scope.
///
/// The host decides what a symbol means; a menu typically uses one symbol per
/// content panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FocusSymbol(pub u64);

/// A single focusable candidate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusEntry<K> {
    /// Identifier for this node.
    pub id: K,
    /// Position in traversal order; lower comes first.
    pub order: i32,
    /// Scope this node belongs to.
    pub scope: FocusSymbol,
    /// Whether this node can receive focus.
    ///
    /// Disabled nodes stay in the list (they are still rendered) but are
    /// skipped by every navigation intent.
    pub enabled: bool,
    /// Type-ahead key, usually the first character of the label.
    pub key: Option<char>,
}

impl<K> FocusEntry<K> {
    /// Enabled entry without a type-ahead key.
    pub const fn new(id: K, order: i32, scope: FocusSymbol) -> Self {
        Self {
            id,
            order,
            scope,
            enabled: true,
            key: None,
        }
    }

    /// Builder-style: mark as disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Builder-style: set the type-ahead key.
    #[must_use]
    pub fn with_key(mut self, key: char) -> Self {
        self.key = Some(key);
        self
    }

    /// Builder-style: derive the type-ahead key from a label's first
    /// non-whitespace character.
    #[must_use]
    pub fn with_label(mut self, label: &str) -> Self {
        self.key = label.trim_start().chars().next();
        self
    }
}

/// A read-only view of candidates, optionally restricted to one scope.
#[derive(Clone, Debug)]
pub struct FocusSpace<'a, K> {
    /// All candidates the host knows about.
    pub nodes: &'a [FocusEntry<K>],
    /// When set, only entries in this scope are visible to policies.
    pub scope: Option<FocusSymbol>,
}

impl<'a, K> FocusSpace<'a, K> {
    /// A view over every entry.
    pub const fn unscoped(nodes: &'a [FocusEntry<K>]) -> Self {
        Self { nodes, scope: None }
    }

    /// A view over the entries of one scope.
    pub const fn scoped(nodes: &'a [FocusEntry<K>], scope: FocusSymbol) -> Self {
        Self {
            nodes,
            scope: Some(scope),
        }
    }

    fn candidates(&self) -> Vec<&'a FocusEntry<K>> {
        let mut out: Vec<&'a FocusEntry<K>> = self
            .nodes
            .iter()
            .filter(|e| e.enabled && self.scope.is_none_or(|s| s == e.scope))
            .collect();
        // Stable: entries with equal order keep slice order.
        out.sort_by_key(|e| e.order);
        out
    }
}

/// Wrap mode for linear traversal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Stop at the ends.
    Never,
    /// Wrap around within the scope.
    Scope,
}

/// Trait for focus traversal policies.
pub trait FocusPolicy<K>
where
    K: Copy + Eq,
{
    /// Compute the next focus target.
    ///
    /// `origin` is the currently focused node, or `None` when focus is outside
    /// the space (for example on the trigger that opened a menu).
    fn next(&self, origin: Option<K>, direction: Navigation, space: &FocusSpace<'_, K>)
    -> Option<K>;
}

/// Linear traversal in `order`, skipping disabled and out-of-scope entries.
#[derive(Copy, Clone, Debug)]
pub struct DefaultPolicy {
    /// Wrap behavior at the ends.
    pub wrap: WrapMode,
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self {
            wrap: WrapMode::Scope,
        }
    }
}

impl<K> FocusPolicy<K> for DefaultPolicy
where
    K: Copy + Eq,
{
    fn next(
        &self,
        origin: Option<K>,
        direction: Navigation,
        space: &FocusSpace<'_, K>,
    ) -> Option<K> {
        let candidates = space.candidates();
        let first = candidates.first()?;
        let last = candidates.last()?;
        let origin_pos = origin.and_then(|o| candidates.iter().position(|e| e.id == o));
        let wraps = self.wrap == WrapMode::Scope;

        match direction {
            Navigation::First => Some(first.id),
            Navigation::Last => Some(last.id),
            Navigation::Next => match origin_pos {
                Some(pos) if pos + 1 < candidates.len() => Some(candidates[pos + 1].id),
                Some(_) => wraps.then_some(first.id),
                None => Some(first.id),
            },
            Navigation::Prev => match origin_pos {
                Some(pos) if pos > 0 => Some(candidates[pos - 1].id),
                Some(_) => wraps.then_some(last.id),
                None => Some(last.id),
            },
            Navigation::TypeAhead(ch) => type_ahead(&candidates, origin_pos, ch),
        }
    }
}

fn type_ahead<K: Copy>(
    candidates: &[&FocusEntry<K>],
    origin_pos: Option<usize>,
    ch: char,
) -> Option<K> {
    let start = origin_pos.map_or(0, |p| p + 1);
    let len = candidates.len();
    (0..len)
        .map(|i| candidates[(start + i) % len])
        .find(|e| e.key.is_some_and(|k| k.to_lowercase().eq(ch.to_lowercase())))
        .map(|e| e.id)
}
