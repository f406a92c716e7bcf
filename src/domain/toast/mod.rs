// SPDX-License-Identifier: MPL-2.0
//! Toast domain types.
//!
//! This module provides the pure building blocks of the toast engine:
//! - [`ToastItem`] and its options, kinds and actions
//! - [`ToastPolicy`] and the [`decide`](ToastPolicy::decide) admission function
//! - [`CoalescingCache`] for dedupe-key merging
//! - [`PresentationState`] and the dismissal/drop vocabulary

mod coalescing;
mod decision;
mod item;
mod newtypes;
mod policy;
mod state;

pub use coalescing::{CacheEntry, CoalescingCache};
pub use decision::{ActiveSlot, Decision, DecisionContext};
pub use item::{
    AccentColor, ActionRole, AllowsUserDismiss, HapticFeedback, HapticsPolicy, PresentationEdge,
    Priority, SafeAreaBehavior, ToastAction, ToastItem, ToastKind, ToastOptions,
};
pub use newtypes::{duration_bounds, ToastDuration, ToastId};
pub use policy::{policy_bounds, CoalesceTimer, ToastPolicy, ToastPolicyBuilder};
pub use state::{DismissalMethod, DropReason, PresentationState, PresentationStateKind};
