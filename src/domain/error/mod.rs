// SPDX-License-Identifier: MPL-2.0
//! Domain error types.
//!
//! This module provides pure domain error types that are independent
//! of external crates and infrastructure concerns.

use std::fmt;
use std::time::Duration;

/// A [`ToastPolicy`](crate::domain::toast::ToastPolicy) value outside its
/// accepted range. Raised at construction so misconfiguration surfaces
/// immediately instead of as confusing runtime drops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    MinimumIntervalTooLong { value: Duration, max: Duration },
    InterruptionDelayTooLong { value: Duration, max: Duration },
    CoalescingWindowTooLong { value: Duration, max: Duration },
    QueueTooLarge { value: usize, max: usize },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::MinimumIntervalTooLong { value, max } => write!(
                f,
                "minimum interval {}ms exceeds the {}ms limit",
                value.as_millis(),
                max.as_millis()
            ),
            PolicyError::InterruptionDelayTooLong { value, max } => write!(
                f,
                "critical interruption delay {}ms exceeds the {}ms limit",
                value.as_millis(),
                max.as_millis()
            ),
            PolicyError::CoalescingWindowTooLong { value, max } => write!(
                f,
                "coalescing window {}ms exceeds the {}ms limit",
                value.as_millis(),
                max.as_millis()
            ),
            PolicyError::QueueTooLarge { value, max } => {
                write!(f, "max queue size {value} exceeds the limit of {max}")
            }
        }
    }
}

impl std::error::Error for PolicyError {}
