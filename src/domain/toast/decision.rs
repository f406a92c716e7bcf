// SPDX-License-Identifier: MPL-2.0
//! Admission decisions for newly submitted toasts.
//!
//! [`ToastPolicy::decide`] is a pure function of the policy and a snapshot of
//! manager state. The clock is passed in through [`DecisionContext::now`], so
//! the same snapshot always yields the same decision.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::coalescing::CoalescingCache;
use super::item::{Priority, ToastItem};
use super::newtypes::ToastId;
use super::policy::ToastPolicy;
use super::state::DropReason;

/// What occupies the screen when a decision is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveSlot {
    Idle,
    Presenting { id: ToastId, priority: Priority },
    /// The visible toast is already on its way out.
    Dismissing { id: ToastId },
    /// `current` is being preempted; `next` will replace it.
    Interrupted {
        current: ToastId,
        next: ToastId,
        next_priority: Priority,
    },
}

/// Snapshot of manager state handed to [`ToastPolicy::decide`].
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub now: Instant,
    pub active: ActiveSlot,
    pub queued: &'a VecDeque<ToastItem>,
    /// Critical toasts held for restoration while suspended.
    pub restoring: &'a [ToastItem],
    pub cache: &'a CoalescingCache,
    pub last_presentation: Option<Instant>,
    /// Presentation is paused (app in background).
    pub suspended: bool,
}

impl DecisionContext<'_> {
    /// Returns true if `id` is a toast a newer one may still be merged into:
    /// queued, held for restoration, on screen, or waiting to preempt.
    #[must_use]
    pub fn is_mergeable(&self, id: ToastId) -> bool {
        match self.active {
            ActiveSlot::Presenting { id: current, .. } if current == id => return true,
            ActiveSlot::Interrupted { next, .. } if next == id => return true,
            _ => {}
        }
        self.queued
            .iter()
            .chain(self.restoring)
            .any(|item| item.id() == id)
    }
}

/// Outcome of evaluating a newly submitted toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Replace the live toast `ToastId` (same dedupe key) with the new one.
    MergeInto(ToastId),
    /// Strictly higher priority than what is on screen: take over.
    Preempt,
    /// Nothing visible, nothing waiting, no rate limit: show right away.
    PresentNow,
    /// Nothing visible but the rate limit applies: queue and resume later.
    Delay(Duration),
    /// Critical toast that cannot show yet: queue it ahead of every
    /// non-critical toast. It skips the rate limit when it reaches the head.
    Expedite,
    /// Append to the back of the queue.
    Enqueue,
    Drop(DropReason),
}

impl ToastPolicy {
    /// Decides how a newly submitted toast is admitted.
    ///
    /// Order of evaluation: coalescing, then priority preemption, then
    /// critical admission, then immediate/deferred presentation, then
    /// queueing subject to the bound.
    ///
    /// Critical toasts never wait on the rate limit.
    #[must_use]
    pub fn decide(&self, item: &ToastItem, ctx: &DecisionContext<'_>) -> Decision {
        if let Some(key) = item.dedupe_key() {
            if let Some(existing) = ctx.cache.lookup(key, ctx.now, self.coalescing_window()) {
                if ctx.is_mergeable(existing) {
                    return Decision::MergeInto(existing);
                }
            }
        }

        match ctx.active {
            ActiveSlot::Presenting { priority, .. } if item.priority() > priority => {
                return Decision::Preempt;
            }
            ActiveSlot::Interrupted { next_priority, .. } if item.priority() > next_priority => {
                return Decision::Preempt;
            }
            _ => {}
        }

        let queue_full = ctx.queued.len() >= self.max_queue_size();

        if item.priority() == Priority::Critical {
            return if ctx.active == ActiveSlot::Idle && !ctx.suspended {
                Decision::PresentNow
            } else if queue_full {
                Decision::Drop(DropReason::QueueFull)
            } else {
                Decision::Expedite
            };
        }

        if ctx.active == ActiveSlot::Idle && ctx.queued.is_empty() && !ctx.suspended {
            return match self.rate_limit_delay(ctx.now, ctx.last_presentation) {
                None => Decision::PresentNow,
                Some(_) if queue_full => Decision::Drop(DropReason::QueueFull),
                Some(remaining) => Decision::Delay(remaining),
            };
        }

        if queue_full {
            Decision::Drop(DropReason::QueueFull)
        } else {
            Decision::Enqueue
        }
    }
}
