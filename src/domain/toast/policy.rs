// SPDX-License-Identifier: MPL-2.0
//! Global toast policy.
//!
//! A `ToastPolicy` is fixed for the lifetime of a manager. Callers wanting
//! different behavior build a new policy and a new manager.

use std::time::{Duration, Instant};

use crate::domain::error::PolicyError;

// =============================================================================
// Policy Bounds
// =============================================================================

/// Defaults and accepted upper limits for policy values.
pub mod policy_bounds {
    use std::time::Duration;

    /// Default spacing between two presentation starts.
    pub const DEFAULT_MINIMUM_INTERVAL: Duration = Duration::from_millis(800);
    /// Longest accepted spacing between two presentation starts.
    pub const MAX_MINIMUM_INTERVAL: Duration = Duration::from_secs(10);

    /// Default bound on pending toasts.
    pub const DEFAULT_MAX_QUEUE_SIZE: usize = 10;
    /// Largest accepted bound on pending toasts.
    pub const MAX_QUEUE_SIZE: usize = 1000;

    /// Default window in which matching dedupe keys merge.
    pub const DEFAULT_COALESCING_WINDOW: Duration = Duration::from_secs(2);
    /// Longest accepted coalescing window.
    pub const MAX_COALESCING_WINDOW: Duration = Duration::from_secs(60);

    /// Default delay before a preempting toast forces the current one off.
    pub const DEFAULT_CRITICAL_INTERRUPTION_DELAY: Duration = Duration::from_millis(120);
    /// Longest accepted interruption delay.
    pub const MAX_CRITICAL_INTERRUPTION_DELAY: Duration = Duration::from_secs(1);
}

/// What happens to the visible toast's auto-dismiss timer when a newer toast
/// with the same dedupe key is merged into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoalesceTimer {
    /// Keep the remaining time; only the content changes.
    #[default]
    Preserve,
    /// Start a fresh interval from the merged toast's duration.
    Restart,
}

/// Global, immutable-per-session toast configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastPolicy {
    minimum_interval: Duration,
    max_queue_size: usize,
    coalescing_window: Duration,
    critical_interruption_delay: Duration,
    persist_critical_toasts: bool,
    coalesce_timer: CoalesceTimer,
}

impl Default for ToastPolicy {
    fn default() -> Self {
        Self {
            minimum_interval: policy_bounds::DEFAULT_MINIMUM_INTERVAL,
            max_queue_size: policy_bounds::DEFAULT_MAX_QUEUE_SIZE,
            coalescing_window: policy_bounds::DEFAULT_COALESCING_WINDOW,
            critical_interruption_delay: policy_bounds::DEFAULT_CRITICAL_INTERRUPTION_DELAY,
            persist_critical_toasts: true,
            coalesce_timer: CoalesceTimer::Preserve,
        }
    }
}

impl ToastPolicy {
    /// Starts a builder seeded with the default values.
    #[must_use]
    pub fn builder() -> ToastPolicyBuilder {
        ToastPolicyBuilder {
            policy: Self::default(),
        }
    }

    #[must_use]
    pub fn minimum_interval(&self) -> Duration {
        self.minimum_interval
    }

    #[must_use]
    pub fn max_queue_size(&self) -> usize {
        self.max_queue_size
    }

    #[must_use]
    pub fn coalescing_window(&self) -> Duration {
        self.coalescing_window
    }

    #[must_use]
    pub fn critical_interruption_delay(&self) -> Duration {
        self.critical_interruption_delay
    }

    #[must_use]
    pub fn persist_critical_toasts(&self) -> bool {
        self.persist_critical_toasts
    }

    #[must_use]
    pub fn coalesce_timer(&self) -> CoalesceTimer {
        self.coalesce_timer
    }

    /// Time still to wait before another presentation may begin.
    ///
    /// Returns `None` when a presentation may start at `now`.
    #[must_use]
    pub fn rate_limit_delay(&self, now: Instant, last_presentation: Option<Instant>) -> Option<Duration> {
        let last = last_presentation?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.minimum_interval {
            Some(self.minimum_interval - elapsed)
        } else {
            None
        }
    }

    fn validate(&self) -> Result<(), PolicyError> {
        if self.minimum_interval > policy_bounds::MAX_MINIMUM_INTERVAL {
            return Err(PolicyError::MinimumIntervalTooLong {
                value: self.minimum_interval,
                max: policy_bounds::MAX_MINIMUM_INTERVAL,
            });
        }
        if self.max_queue_size > policy_bounds::MAX_QUEUE_SIZE {
            return Err(PolicyError::QueueTooLarge {
                value: self.max_queue_size,
                max: policy_bounds::MAX_QUEUE_SIZE,
            });
        }
        if self.coalescing_window > policy_bounds::MAX_COALESCING_WINDOW {
            return Err(PolicyError::CoalescingWindowTooLong {
                value: self.coalescing_window,
                max: policy_bounds::MAX_COALESCING_WINDOW,
            });
        }
        if self.critical_interruption_delay > policy_bounds::MAX_CRITICAL_INTERRUPTION_DELAY {
            return Err(PolicyError::InterruptionDelayTooLong {
                value: self.critical_interruption_delay,
                max: policy_bounds::MAX_CRITICAL_INTERRUPTION_DELAY,
            });
        }
        Ok(())
    }
}

/// Builder for [`ToastPolicy`]. Values are checked once, in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ToastPolicyBuilder {
    policy: ToastPolicy,
}

impl ToastPolicyBuilder {
    #[must_use]
    pub fn minimum_interval(mut self, interval: Duration) -> Self {
        self.policy.minimum_interval = interval;
        self
    }

    /// Bound on pending toasts. Zero is accepted: only the visible toast survives.
    #[must_use]
    pub fn max_queue_size(mut self, size: usize) -> Self {
        self.policy.max_queue_size = size;
        self
    }

    #[must_use]
    pub fn coalescing_window(mut self, window: Duration) -> Self {
        self.policy.coalescing_window = window;
        self
    }

    #[must_use]
    pub fn critical_interruption_delay(mut self, delay: Duration) -> Self {
        self.policy.critical_interruption_delay = delay;
        self
    }

    #[must_use]
    pub fn persist_critical_toasts(mut self, persist: bool) -> Self {
        self.policy.persist_critical_toasts = persist;
        self
    }

    #[must_use]
    pub fn coalesce_timer(mut self, behavior: CoalesceTimer) -> Self {
        self.policy.coalesce_timer = behavior;
        self
    }

    /// Validates and returns the policy.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] naming the first out-of-range value.
    pub fn build(self) -> Result<ToastPolicy, PolicyError> {
        self.policy.validate()?;
        Ok(self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_documented_values() {
        let policy = ToastPolicy::default();
        assert_eq!(policy.minimum_interval(), Duration::from_millis(800));
        assert_eq!(policy.max_queue_size(), 10);
        assert_eq!(policy.coalescing_window(), Duration::from_secs(2));
        assert_eq!(policy.critical_interruption_delay(), Duration::from_millis(120));
        assert_eq!(policy.coalesce_timer(), CoalesceTimer::Preserve);
    }

    #[test]
    fn builder_defaults_validate() {
        assert_eq!(ToastPolicy::builder().build(), Ok(ToastPolicy::default()));
    }

    #[test]
    fn zero_queue_size_is_accepted() {
        let policy = ToastPolicy::builder().max_queue_size(0).build().unwrap();
        assert_eq!(policy.max_queue_size(), 0);
    }

    #[test]
    fn oversized_values_are_rejected() {
        assert!(matches!(
            ToastPolicy::builder().max_queue_size(1001).build(),
            Err(PolicyError::QueueTooLarge { value: 1001, .. })
        ));
        assert!(matches!(
            ToastPolicy::builder()
                .critical_interruption_delay(Duration::from_secs(5))
                .build(),
            Err(PolicyError::InterruptionDelayTooLong { .. })
        ));
        assert!(matches!(
            ToastPolicy::builder()
                .minimum_interval(Duration::from_secs(11))
                .build(),
            Err(PolicyError::MinimumIntervalTooLong { .. })
        ));
        assert!(matches!(
            ToastPolicy::builder()
                .coalescing_window(Duration::from_secs(61))
                .build(),
            Err(PolicyError::CoalescingWindowTooLong { .. })
        ));
    }

    #[test]
    fn rate_limit_delay_reports_remaining_time() {
        let policy = ToastPolicy::default();
        let start = Instant::now();

        assert_eq!(policy.rate_limit_delay(start, None), None);
        assert_eq!(
            policy.rate_limit_delay(start + Duration::from_millis(300), Some(start)),
            Some(Duration::from_millis(500))
        );
        assert_eq!(
            policy.rate_limit_delay(start + Duration::from_millis(800), Some(start)),
            None
        );
    }
}
