// SPDX-License-Identifier: MPL-2.0
//! Telemetry for the toast engine.
//!
//! The manager reports lifecycle events (shown, dismissed, coalesced,
//! dropped, state transitions) to a [`TelemetrySink`]. Reporting is
//! fire-and-forget and never influences manager decisions.
//!
//! # Sinks
//!
//! - [`NoopTelemetry`]: discards everything (default)
//! - [`TracingTelemetry`]: writes events to the `tracing` log
//! - [`TelemetryHandle`]: feeds a [`TelemetryCollector`], which keeps the
//!   most recent records in a [`RecordRing`] and exports them as JSON

mod buffer;
mod collector;
mod events;
mod sink;

pub use buffer::{RecordRing, TelemetryCapacity};
pub use collector::{TelemetryCollector, TelemetryHandle, TelemetryRecord, TelemetrySummary};
pub use events::TelemetryEvent;
pub use sink::{NoopTelemetry, TelemetrySink, TracingTelemetry};
