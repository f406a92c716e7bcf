// SPDX-License-Identifier: MPL-2.0
//! Toast newtypes.
//!
//! This module provides type-safe wrappers for toast values,
//! ensuring they are always unique or within valid ranges.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

// =============================================================================
// ToastId
// =============================================================================

/// Unique identifier for a toast.
///
/// Identifiers come from a process-wide counter and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    #[must_use]
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

// =============================================================================
// Duration Bounds
// =============================================================================

/// Auto-dismiss duration bounds (1s to 10s).
pub mod duration_bounds {
    use std::time::Duration;

    /// Shortest auto-dismiss interval.
    pub const MIN: Duration = Duration::from_secs(1);
    /// Longest auto-dismiss interval.
    pub const MAX: Duration = Duration::from_secs(10);
    /// Default auto-dismiss interval.
    pub const DEFAULT: Duration = Duration::from_secs(3);
}

// =============================================================================
// ToastDuration
// =============================================================================

/// Auto-dismiss interval, guaranteed to be within valid range (1s–10s).
///
/// Out-of-range requests are clamped rather than rejected, so a caller
/// asking for 30 seconds gets the 10 second maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToastDuration(Duration);

impl ToastDuration {
    /// Creates a new duration, clamping to valid range.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self(duration.clamp(duration_bounds::MIN, duration_bounds::MAX))
    }

    /// Creates a new duration from seconds, clamping to valid range.
    #[must_use]
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs.is_nan() || secs <= 0.0 {
            return Self(duration_bounds::MIN);
        }
        let max = duration_bounds::MAX.as_secs_f64();
        Self::new(Duration::from_secs_f64(secs.min(max)))
    }

    /// Returns the interval as a [`Duration`].
    #[must_use]
    pub fn value(self) -> Duration {
        self.0
    }

    /// Returns true if this is the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= duration_bounds::MIN
    }

    /// Returns true if this is the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= duration_bounds::MAX
    }
}

impl Default for ToastDuration {
    fn default() -> Self {
        Self(duration_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_ids_are_unique_and_increasing() {
        let first = ToastId::new();
        let second = ToastId::new();
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn toast_id_display_is_prefixed() {
        let id = ToastId::new();
        assert_eq!(id.to_string(), format!("toast-{}", id.value()));
    }

    #[test]
    fn duration_clamps_to_bounds() {
        assert_eq!(
            ToastDuration::new(Duration::from_millis(10)).value(),
            duration_bounds::MIN
        );
        assert_eq!(
            ToastDuration::new(Duration::from_secs(60)).value(),
            duration_bounds::MAX
        );
    }

    #[test]
    fn duration_accepts_boundaries_exactly() {
        assert!(ToastDuration::new(Duration::from_secs(1)).is_min());
        assert!(ToastDuration::new(Duration::from_secs(10)).is_max());
        assert_eq!(
            ToastDuration::new(Duration::from_secs(10)).value(),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn duration_from_secs_handles_garbage() {
        assert!(ToastDuration::from_secs_f64(f64::NAN).is_min());
        assert!(ToastDuration::from_secs_f64(-4.0).is_min());
        assert!(ToastDuration::from_secs_f64(f64::INFINITY).is_max());
        assert_eq!(
            ToastDuration::from_secs_f64(2.5).value(),
            Duration::from_millis(2500)
        );
    }

    #[test]
    fn default_duration_is_three_seconds() {
        assert_eq!(ToastDuration::default().value(), Duration::from_secs(3));
    }
}
