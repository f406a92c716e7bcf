// SPDX-License-Identifier: MPL-2.0
//! Telemetry domain types.
//!
//! This module provides pure domain types for telemetry:
//! - [`TelemetryCapacity`]: Capacity for the in-memory telemetry buffer

mod newtypes;

pub use newtypes::{telemetry_capacity_bounds, TelemetryCapacity};
