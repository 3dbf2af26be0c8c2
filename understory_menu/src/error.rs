// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural errors.
//!
//! Runtime races (opening an unmounted menu, closing a closed one) are not
//! errors; those calls are no-ops. The one hard failure is wiring a consumer
//! into the tree without the ancestor it needs.

/// Errors raised while building a menu tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    /// A consumer (item, sub-menu, scope lookup) has no enclosing provider.
    #[error("{consumer} must be used inside a {provider}")]
    MissingProvider {
        /// What was being mounted or looked up.
        consumer: &'static str,
        /// The ancestor it requires.
        provider: &'static str,
    },
}

impl MenuError {
    pub(crate) const fn missing_menu(consumer: &'static str) -> Self {
        Self::MissingProvider {
            consumer,
            provider: "menu",
        }
    }
}
