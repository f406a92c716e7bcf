// SPDX-License-Identifier: MPL-2.0
//! Telemetry collector for aggregating toast lifecycle events.
//!
//! The manager records into a [`TelemetryHandle`]; the owning side drains
//! the collector whenever convenient and exports what it kept as JSON.

use std::fs;
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::Serialize;

use super::{RecordRing, TelemetryCapacity, TelemetryEvent, TelemetrySink};
use crate::error::Result;

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// A telemetry event with its wall-clock timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryRecord {
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: TelemetryEvent,
}

/// Per-event-type totals over the records currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TelemetrySummary {
    pub shown: usize,
    pub dismissed: usize,
    pub coalesced: usize,
    pub dropped: usize,
    pub transitions: usize,
}

/// Handle for sending telemetry events to the collector.
///
/// This handle is cheap to clone and can be shared across threads.
/// Events go through a bounded channel; when it is full the event is
/// dropped rather than blocking the manager.
#[derive(Clone, Debug)]
pub struct TelemetryHandle {
    event_tx: Sender<TelemetryRecord>,
}

impl TelemetryHandle {
    /// Attempts to send an event, returning an error if the channel is full.
    ///
    /// # Errors
    ///
    /// Returns `TrySendError::Full` if the internal channel buffer is full,
    /// or `TrySendError::Disconnected` if the collector has been dropped.
    pub fn try_record(&self, event: TelemetryEvent) -> std::result::Result<(), TrySendError<TelemetryRecord>> {
        self.event_tx.try_send(TelemetryRecord {
            recorded_at: Utc::now(),
            event,
        })
    }
}

impl TelemetrySink for TelemetryHandle {
    fn record(&self, event: TelemetryEvent) {
        // Non-blocking send - drop if channel is full
        let _ = self.try_record(event);
    }
}

/// Central collector for toast telemetry.
///
/// Receives records through a channel and stores them in a memory-bounded
/// record ring. Old records are evicted when the buffer is full.
pub struct TelemetryCollector {
    buffer: RecordRing<TelemetryRecord>,
    event_rx: Receiver<TelemetryRecord>,
    event_tx: Sender<TelemetryRecord>,
    started_at: Instant,
}

impl TelemetryCollector {
    /// Creates a new collector with the specified buffer capacity.
    #[must_use]
    pub fn new(capacity: TelemetryCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);
        Self {
            buffer: RecordRing::new(capacity),
            event_rx,
            event_tx,
            started_at: Instant::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> TelemetryHandle {
        TelemetryHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves every pending record from the channel into the buffer.
    ///
    /// Returns the number of records drained.
    pub fn process_pending(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(record) = self.event_rx.try_recv() {
            self.buffer.push(record);
            drained += 1;
        }
        drained
    }

    /// Returns the stored records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TelemetryRecord> {
        self.buffer.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Records evicted because the buffer was full.
    #[must_use]
    pub fn evicted(&self) -> u64 {
        self.buffer.evicted()
    }

    /// Time since the collector was created.
    #[must_use]
    pub fn uptime(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }

    /// Counts stored records by event type.
    #[must_use]
    pub fn summary(&self) -> TelemetrySummary {
        let mut summary = TelemetrySummary::default();
        for record in self.buffer.iter() {
            match record.event {
                TelemetryEvent::ToastShown { .. } => summary.shown += 1,
                TelemetryEvent::ToastDismissed { .. } => summary.dismissed += 1,
                TelemetryEvent::ToastCoalesced { .. } => summary.coalesced += 1,
                TelemetryEvent::ToastDropped { .. } => summary.dropped += 1,
                TelemetryEvent::StateTransition { .. } => summary.transitions += 1,
            }
        }
        summary
    }

    /// Serializes the stored records as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let records: Vec<&TelemetryRecord> = self.buffer.iter().collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }

    /// Writes [`to_json`](Self::to_json) output to `path`, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any file operation fails.
    pub fn export_to_path(&self, path: &Path) -> Result<()> {
        let content = self.to_json()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Clears stored records.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new(TelemetryCapacity::default())
    }
}
