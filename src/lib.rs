// SPDX-License-Identifier: MPL-2.0
//! `agora_toast` arbitrates transient toast notifications for a UI.
//!
//! Callers submit [`ToastItem`]s to a [`ToastManager`]; the manager decides
//! when each one is shown, merges repeats sharing a dedupe key, lets higher
//! priority toasts take over the screen, spaces presentations out and keeps
//! the backlog bounded. Rendering is left to a [`PresentationRouter`]
//! implementation supplied by the host application.
//!
//! - [`domain`]: pure value types and the admission policy
//! - [`notifications`]: the manager task and router contract
//! - [`telemetry`]: lifecycle event sinks
//! - [`config`]: `toast.toml` loading

#![doc(html_root_url = "https://docs.rs/agora_toast/0.1.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod notifications;
pub mod telemetry;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use domain::toast::{
    DismissalMethod, Priority, ToastAction, ToastItem, ToastKind, ToastOptions, ToastPolicy,
};
pub use error::{Error, Result};
pub use notifications::{DismissalHandle, PresentationRouter, ToastManager};
pub use telemetry::{TelemetryEvent, TelemetrySink};
