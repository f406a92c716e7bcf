// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core toast logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity. Time enters only through
//! `std::time::Instant` values passed in by the caller.
//!
//! # Modules
//!
//! - [`error`]: Domain error types ([`PolicyError`](error::PolicyError))
//! - [`telemetry`]: Telemetry buffer sizing ([`TelemetryCapacity`](telemetry::TelemetryCapacity))
//! - [`toast`]: Toast items, policy, coalescing and the admission decision
//!   ([`ToastItem`](toast::ToastItem), [`ToastPolicy`](toast::ToastPolicy),
//!   [`Decision`](toast::Decision))

pub mod error;
pub mod telemetry;
pub mod toast;
