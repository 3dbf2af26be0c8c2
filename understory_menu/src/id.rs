// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifier generation for accessibility wiring.
//!
//! Ids look like `menu-trigger-18c3b2e1f40-7`: a sanitized prefix, the kind of
//! element, the creation time in hexadecimal milliseconds, and a counter that
//! strictly increases per generator. The counter alone makes ids from one
//! generator unique; the timestamp keeps ids from generators that restart
//! (for example across page reloads) apart.

use alloc::format;
use alloc::string::String;

/// Prefix used when the configured one sanitizes to nothing.
pub const DEFAULT_ID_PREFIX: &str = "menu";

/// Produces unique, DOM-safe element ids.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    prefix: String,
    counter: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}

impl IdGenerator {
    /// Create a generator. Characters outside `[A-Za-z0-9_-]` in `prefix`
    /// become `-`.
    pub fn new(prefix: &str) -> Self {
        let prefix: String = prefix
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        let prefix = if prefix.trim_matches('-').is_empty() {
            String::from(DEFAULT_ID_PREFIX)
        } else {
            prefix
        };
        Self { prefix, counter: 0 }
    }

    /// The sanitized prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Next id for an element of `kind`, created at `now` (milliseconds).
    pub fn next(&mut self, kind: &str, now: u64) -> String {
        self.counter += 1;
        format!("{}-{kind}-{now:x}-{}", self.prefix, self.counter)
    }
}
