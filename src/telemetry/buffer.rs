// SPDX-License-Identifier: MPL-2.0
//! Bounded in-memory storage for telemetry records.

use std::collections::VecDeque;

pub use crate::domain::telemetry::TelemetryCapacity;

/// Keeps the newest `capacity` records, oldest first.
///
/// ```
/// use agora_toast::telemetry::{RecordRing, TelemetryCapacity};
///
/// let mut ring = RecordRing::new(TelemetryCapacity::new(16));
/// for n in 0..20 {
///     ring.push(n);
/// }
/// assert_eq!(ring.iter().next(), Some(&4));
/// assert_eq!(ring.evicted(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct RecordRing<T> {
    records: VecDeque<T>,
    capacity: TelemetryCapacity,
    evicted: u64,
}

impl<T> RecordRing<T> {
    #[must_use]
    pub fn new(capacity: TelemetryCapacity) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.value()),
            capacity,
            evicted: 0,
        }
    }

    /// Appends `record`, handing back the record it displaced, if any.
    pub fn push(&mut self, record: T) -> Option<T> {
        let displaced = if self.records.len() == self.capacity.value() {
            self.evicted += 1;
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        displaced
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> TelemetryCapacity {
        self.capacity
    }

    /// Total records displaced since creation. Survives [`clear`](Self::clear).
    #[must_use]
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
