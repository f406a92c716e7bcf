// SPDX-License-Identifier: MPL-2.0
//! Coalescing cache mapping dedupe keys to the toast that last claimed them.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::newtypes::ToastId;

/// One dedupe key claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    pub id: ToastId,
    pub recorded_at: Instant,
}

impl CacheEntry {
    /// Returns true while the entry is younger than `window`.
    #[must_use]
    pub fn is_fresh(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.recorded_at) < window
    }
}

/// Dedupe key → most recent toast bearing that key.
///
/// Entries older than the coalescing window are treated as absent and are
/// pruned lazily whenever a new toast is evaluated.
#[derive(Debug, Clone, Default)]
pub struct CoalescingCache {
    entries: HashMap<String, CacheEntry>,
}

impl CoalescingCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the toast holding `key` if its claim is still fresh.
    #[must_use]
    pub fn lookup(&self, key: &str, now: Instant, window: Duration) -> Option<ToastId> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_fresh(now, window))
            .map(|entry| entry.id)
    }

    /// Records (or refreshes) the claim of `id` on `key`.
    pub fn record(&mut self, key: &str, id: ToastId, now: Instant) {
        let entry = CacheEntry {
            id,
            recorded_at: now,
        };
        if let Some(existing) = self.entries.get_mut(key) {
            *existing = entry;
        } else {
            self.entries.insert(key.to_owned(), entry);
        }
    }

    /// Drops every entry that is no longer fresh.
    pub fn prune(&mut self, now: Instant, window: Duration) {
        self.entries.retain(|_, entry| entry.is_fresh(now, window));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
