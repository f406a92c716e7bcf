// SPDX-License-Identifier: MPL-2.0
//! Default values and accepted ranges for the toast configuration file.
//!
//! Values are expressed in the units used by `toast.toml` (milliseconds,
//! counts). The domain keeps its own `Duration` constants; the tests below
//! keep both in agreement.
//!
//! # Categories
//!
//! - **Rate limit**: spacing between presentation starts
//! - **Queue**: bound on pending toasts
//! - **Coalescing**: dedupe key merge window
//! - **Preemption**: delay before a higher priority toast takes over
//! - **Duration**: per-toast display time
//! - **Telemetry**: collector buffer size

// ==========================================================================
// Rate Limit Defaults
// ==========================================================================

/// Default minimum spacing between two presentation starts (ms).
pub const DEFAULT_MINIMUM_INTERVAL_MS: u64 = 800;

/// Maximum accepted minimum interval (ms).
pub const MAX_MINIMUM_INTERVAL_MS: u64 = 10_000;

// ==========================================================================
// Queue Defaults
// ==========================================================================

/// Default bound on pending toasts.
pub const DEFAULT_MAX_QUEUE_SIZE: usize = 10;

/// Maximum accepted queue bound. Zero is allowed.
pub const MAX_QUEUE_SIZE: usize = 1000;

// ==========================================================================
// Coalescing Defaults
// ==========================================================================

/// Default coalescing window (ms).
pub const DEFAULT_COALESCING_WINDOW_MS: u64 = 2_000;

/// Maximum accepted coalescing window (ms).
pub const MAX_COALESCING_WINDOW_MS: u64 = 60_000;

// ==========================================================================
// Preemption Defaults
// ==========================================================================

/// Default delay before a preempting toast forces the current one off (ms).
pub const DEFAULT_CRITICAL_INTERRUPTION_DELAY_MS: u64 = 120;

/// Maximum accepted interruption delay (ms).
pub const MAX_CRITICAL_INTERRUPTION_DELAY_MS: u64 = 1_000;

/// Critical toasts survive backgrounding unless disabled.
pub const DEFAULT_PERSIST_CRITICAL_TOASTS: bool = true;

// ==========================================================================
// Duration Defaults
// ==========================================================================

/// Default toast display time (ms).
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3_000;

/// Shortest display time (ms).
pub const MIN_TOAST_DURATION_MS: u64 = 1_000;

/// Longest display time (ms).
pub const MAX_TOAST_DURATION_MS: u64 = 10_000;

// ==========================================================================
// Telemetry Defaults
// ==========================================================================

/// Default number of records kept by the telemetry collector.
pub const DEFAULT_TELEMETRY_CAPACITY: usize = 500;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_MINIMUM_INTERVAL_MS <= MAX_MINIMUM_INTERVAL_MS);

    assert!(DEFAULT_MAX_QUEUE_SIZE <= MAX_QUEUE_SIZE);

    assert!(DEFAULT_COALESCING_WINDOW_MS > 0);
    assert!(DEFAULT_COALESCING_WINDOW_MS <= MAX_COALESCING_WINDOW_MS);

    assert!(DEFAULT_CRITICAL_INTERRUPTION_DELAY_MS <= MAX_CRITICAL_INTERRUPTION_DELAY_MS);

    assert!(MIN_TOAST_DURATION_MS > 0);
    assert!(MAX_TOAST_DURATION_MS >= MIN_TOAST_DURATION_MS);
    assert!(DEFAULT_TOAST_DURATION_MS >= MIN_TOAST_DURATION_MS);
    assert!(DEFAULT_TOAST_DURATION_MS <= MAX_TOAST_DURATION_MS);

    assert!(DEFAULT_TELEMETRY_CAPACITY > 0);
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::telemetry_capacity_bounds;
    use crate::domain::toast::{duration_bounds, policy_bounds, ToastPolicy};
    use std::time::Duration;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn rate_limit_defaults_match_domain() {
        assert_eq!(ms(DEFAULT_MINIMUM_INTERVAL_MS), policy_bounds::DEFAULT_MINIMUM_INTERVAL);
        assert_eq!(ms(MAX_MINIMUM_INTERVAL_MS), policy_bounds::MAX_MINIMUM_INTERVAL);
    }

    #[test]
    fn queue_defaults_match_domain() {
        assert_eq!(DEFAULT_MAX_QUEUE_SIZE, policy_bounds::DEFAULT_MAX_QUEUE_SIZE);
        assert_eq!(MAX_QUEUE_SIZE, policy_bounds::MAX_QUEUE_SIZE);
    }

    #[test]
    fn coalescing_and_preemption_defaults_match_domain() {
        assert_eq!(ms(DEFAULT_COALESCING_WINDOW_MS), policy_bounds::DEFAULT_COALESCING_WINDOW);
        assert_eq!(ms(MAX_COALESCING_WINDOW_MS), policy_bounds::MAX_COALESCING_WINDOW);
        assert_eq!(
            ms(DEFAULT_CRITICAL_INTERRUPTION_DELAY_MS),
            policy_bounds::DEFAULT_CRITICAL_INTERRUPTION_DELAY
        );
        assert_eq!(
            ms(MAX_CRITICAL_INTERRUPTION_DELAY_MS),
            policy_bounds::MAX_CRITICAL_INTERRUPTION_DELAY
        );
        assert_eq!(
            DEFAULT_PERSIST_CRITICAL_TOASTS,
            ToastPolicy::default().persist_critical_toasts()
        );
    }

    #[test]
    fn duration_defaults_match_domain() {
        assert_eq!(ms(DEFAULT_TOAST_DURATION_MS), duration_bounds::DEFAULT);
        assert_eq!(ms(MIN_TOAST_DURATION_MS), duration_bounds::MIN);
        assert_eq!(ms(MAX_TOAST_DURATION_MS), duration_bounds::MAX);
    }

    #[test]
    fn telemetry_default_matches_domain() {
        assert_eq!(DEFAULT_TELEMETRY_CAPACITY, telemetry_capacity_bounds::DEFAULT);
    }
}
