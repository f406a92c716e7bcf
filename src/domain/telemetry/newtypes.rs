// SPDX-License-Identifier: MPL-2.0
//! Telemetry newtypes.
//!
//! This module provides type-safe wrappers for telemetry values,
//! ensuring they are always within valid ranges.

// =============================================================================
// Telemetry Capacity Bounds
// =============================================================================

/// Telemetry buffer capacity bounds (16 to 10000 records).
pub mod telemetry_capacity_bounds {
    /// Minimum buffer capacity.
    pub const MIN: usize = 16;
    /// Maximum buffer capacity.
    pub const MAX: usize = 10000;
    /// Default buffer capacity.
    pub const DEFAULT: usize = 500;
}

// =============================================================================
// TelemetryCapacity
// =============================================================================

/// Number of telemetry records kept in memory by the collector.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (16–10000 records).
///
/// # Example
///
/// ```
/// use agora_toast::domain::telemetry::TelemetryCapacity;
///
/// let capacity = TelemetryCapacity::new(1000);
/// assert_eq!(capacity.value(), 1000);
///
/// // Values outside range are clamped
/// let too_high = TelemetryCapacity::new(50000);
/// assert_eq!(too_high.value(), 10000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryCapacity(usize);

impl TelemetryCapacity {
    /// Creates a new capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(
            telemetry_capacity_bounds::MIN,
            telemetry_capacity_bounds::MAX,
        ))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns true if this is the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= telemetry_capacity_bounds::MIN
    }

    /// Returns true if this is the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= telemetry_capacity_bounds::MAX
    }
}

impl Default for TelemetryCapacity {
    fn default() -> Self {
        Self(telemetry_capacity_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================
