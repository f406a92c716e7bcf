// SPDX-License-Identifier: MPL-2.0
//! The manager task: sole owner of queue, current toast, coalescing cache,
//! rate-limit clock and restoration buffer.
//!
//! Every mutation happens inside [`ManagerActor::run`], one message at a
//! time. Delays (auto-dismiss, preemption, rate limit) are deadlines stored
//! in the current [`Phase`]; replacing the phase cancels them.

use std::collections::VecDeque;
use std::mem;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use super::manager::{Command, ManagerSnapshot};
use super::router::{DismissalHandle, PresentationRouter, PresentationToken, RouterEvent};
use crate::domain::toast::{
    ActiveSlot, CoalesceTimer, CoalescingCache, Decision, DecisionContext, DismissalMethod,
    DropReason, PresentationState, PresentationStateKind, Priority, ToastId, ToastItem,
    ToastPolicy,
};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// A toast handed to the router, with its pending auto-dismiss deadline.
#[derive(Debug)]
struct Active {
    item: ToastItem,
    token: PresentationToken,
    dismiss_at: Instant,
}

/// Progress of a preemption.
#[derive(Debug, Clone, Copy)]
enum Preemption {
    /// Waiting out the interruption delay.
    Pending(Instant),
    /// Dismissal requested from the router with this reason.
    Requested(DismissalMethod),
}

#[derive(Debug)]
enum Phase {
    /// `resume_at` is set while the rate limit holds back a queued toast.
    Idle { resume_at: Option<Instant> },
    Presenting(Active),
    /// Waiting for the router to confirm the toast is gone.
    Dismissing { active: Active, reason: DismissalMethod },
    Interrupted {
        current: Active,
        next: ToastItem,
        preemption: Preemption,
    },
}

impl Phase {
    const IDLE: Phase = Phase::Idle { resume_at: None };

    fn kind(&self) -> PresentationStateKind {
        match self {
            Phase::Idle { .. } => PresentationStateKind::Idle,
            Phase::Presenting(_) => PresentationStateKind::Presenting,
            Phase::Dismissing { .. } => PresentationStateKind::Dismissing,
            Phase::Interrupted { .. } => PresentationStateKind::Interrupted,
        }
    }

    fn deadline(&self) -> Option<Instant> {
        match self {
            Phase::Idle { resume_at } => *resume_at,
            Phase::Presenting(active) => Some(active.dismiss_at),
            Phase::Dismissing { .. } => None,
            Phase::Interrupted { preemption, .. } => match preemption {
                Preemption::Pending(at) => Some(*at),
                Preemption::Requested(_) => None,
            },
        }
    }

    fn slot(&self) -> ActiveSlot {
        match self {
            Phase::Idle { .. } => ActiveSlot::Idle,
            Phase::Presenting(active) => ActiveSlot::Presenting {
                id: active.item.id(),
                priority: active.item.priority(),
            },
            Phase::Dismissing { active, .. } => ActiveSlot::Dismissing {
                id: active.item.id(),
            },
            Phase::Interrupted { current, next, .. } => ActiveSlot::Interrupted {
                current: current.item.id(),
                next: next.id(),
                next_priority: next.priority(),
            },
        }
    }

    fn state(&self) -> PresentationState {
        match self {
            Phase::Idle { .. } => PresentationState::Idle,
            Phase::Presenting(active) => PresentationState::Presenting(active.item.id()),
            Phase::Dismissing { active, reason } => PresentationState::Dismissing {
                id: active.item.id(),
                reason: *reason,
            },
            Phase::Interrupted { current, next, .. } => PresentationState::Interrupted {
                current: current.item.id(),
                next: next.id(),
            },
        }
    }
}

pub(super) struct ManagerActor {
    policy: ToastPolicy,
    router: Arc<dyn PresentationRouter>,
    telemetry: Arc<dyn TelemetrySink>,
    command_rx: mpsc::UnboundedReceiver<Command>,
    event_rx: mpsc::UnboundedReceiver<RouterEvent>,
    event_tx: mpsc::UnboundedSender<RouterEvent>,
    phase: Phase,
    queue: VecDeque<ToastItem>,
    cache: CoalescingCache,
    last_presentation: Option<Instant>,
    restoration: Vec<ToastItem>,
    suspended: bool,
    last_token: PresentationToken,
}

impl ManagerActor {
    pub(super) fn new(
        policy: ToastPolicy,
        router: Arc<dyn PresentationRouter>,
        telemetry: Arc<dyn TelemetrySink>,
        command_rx: mpsc::UnboundedReceiver<Command>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            policy,
            router,
            telemetry,
            command_rx,
            event_rx,
            event_tx,
            phase: Phase::IDLE,
            queue: VecDeque::new(),
            cache: CoalescingCache::new(),
            last_presentation: None,
            restoration: Vec::new(),
            suspended: false,
            last_token: PresentationToken::first(),
        }
    }

    /// Processes router events, commands and deadlines until every
    /// [`ToastManager`](super::ToastManager) handle is dropped.
    pub(super) async fn run(mut self) {
        loop {
            let deadline = self.phase.deadline();
            tokio::select! {
                biased;
                Some(event) = self.event_rx.recv() => self.on_router_event(event),
                command = self.command_rx.recv() => match command {
                    Some(command) => self.on_command(command),
                    None => break,
                },
                () = sleep_until(deadline) => self.on_deadline(),
            }
        }
        debug!("toast manager stopped");
    }

    fn now() -> Instant {
        tokio::time::Instant::now().into_std()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    fn on_command(&mut self, command: Command) {
        match command {
            Command::Show { item, ack } => {
                self.show(item);
                let _ = ack.send(());
            }
            Command::Dismiss { id, ack } => {
                self.dismiss(id);
                let _ = ack.send(());
            }
            Command::DismissAll { ack } => {
                self.dismiss_all();
                let _ = ack.send(());
            }
            Command::EnterBackground { ack } => {
                self.enter_background();
                let _ = ack.send(());
            }
            Command::EnterForeground { ack } => {
                self.enter_foreground();
                let _ = ack.send(());
            }
            Command::ReplaceRouter { router, ack } => {
                self.replace_router(router);
                let _ = ack.send(());
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
        }
    }

    fn on_router_event(&mut self, event: RouterEvent) {
        match event {
            RouterEvent::Dismissed { token, method } => self.on_dismissed(token, method),
        }
    }

    fn on_deadline(&mut self) {
        match self.take_phase() {
            Phase::Idle { .. } => {
                self.phase = Phase::IDLE;
                self.advance();
            }
            Phase::Presenting(active) => {
                self.begin_dismissal(active, DismissalMethod::Timeout, true);
            }
            Phase::Interrupted {
                current,
                next,
                preemption: Preemption::Pending(_),
            } => {
                debug!(current = %current.item.id(), next = %next.id(), "interruption delay elapsed");
                self.phase = Phase::Interrupted {
                    current,
                    next,
                    preemption: Preemption::Requested(DismissalMethod::Interrupted),
                };
                self.router.dismiss(true);
            }
            other => self.phase = other,
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    fn show(&mut self, item: ToastItem) {
        let now = Self::now();
        self.cache.prune(now, self.policy.coalescing_window());

        let decision = {
            let ctx = DecisionContext {
                now,
                active: self.phase.slot(),
                queued: &self.queue,
                restoring: &self.restoration,
                cache: &self.cache,
                last_presentation: self.last_presentation,
                suspended: self.suspended,
            };
            self.policy.decide(&item, &ctx)
        };
        debug!(id = %item.id(), kind = item.kind().as_str(), priority = item.priority().as_str(), ?decision, "show");

        match decision {
            Decision::MergeInto(target) => self.merge(target, item, now),
            Decision::Preempt => {
                self.claim_key(&item, now);
                self.preempt(item, now);
            }
            Decision::PresentNow => {
                self.claim_key(&item, now);
                self.present(PresentationStateKind::Idle, item);
            }
            Decision::Delay(remaining) => {
                self.claim_key(&item, now);
                self.queue.push_back(item);
                self.phase = Phase::Idle {
                    resume_at: Some(now + remaining),
                };
            }
            Decision::Expedite => {
                self.claim_key(&item, now);
                let ahead = self
                    .queue
                    .iter()
                    .take_while(|queued| queued.priority() == Priority::Critical)
                    .count();
                self.queue.insert(ahead, item);
            }
            Decision::Enqueue => {
                self.claim_key(&item, now);
                self.queue.push_back(item);
            }
            Decision::Drop(reason) => self.drop_item(&item, reason),
        }
    }

    fn dismiss(&mut self, id: ToastId) {
        if let Some(position) = self.queue.iter().position(|item| item.id() == id) {
            self.queue.remove(position);
            debug!(%id, "removed queued toast");
            return;
        }
        if let Some(position) = self.restoration.iter().position(|item| item.id() == id) {
            self.restoration.remove(position);
            debug!(%id, "removed restorable toast");
            return;
        }

        let from = self.phase.kind();
        match self.take_phase() {
            Phase::Presenting(active) if active.item.id() == id => {
                self.begin_dismissal(active, DismissalMethod::Programmatic, true);
            }
            Phase::Interrupted {
                current,
                next,
                preemption,
            } if current.item.id() == id => {
                if matches!(preemption, Preemption::Pending(_)) {
                    self.router.dismiss(true);
                }
                self.phase = Phase::Interrupted {
                    current,
                    next,
                    preemption: Preemption::Requested(DismissalMethod::Programmatic),
                };
            }
            Phase::Interrupted {
                current,
                next,
                preemption,
            } if next.id() == id => match preemption {
                // The preemption is called off; the current toast stays.
                Preemption::Pending(_) => self.enter(from, Phase::Presenting(current)),
                Preemption::Requested(reason) => self.enter(
                    from,
                    Phase::Dismissing {
                        active: current,
                        reason,
                    },
                ),
            },
            other => {
                trace!(%id, "dismiss matched nothing");
                self.phase = other;
            }
        }
    }

    fn dismiss_all(&mut self) {
        let cleared = self.queue.len() + self.restoration.len();
        self.queue.clear();
        self.restoration.clear();

        let from = self.phase.kind();
        match self.take_phase() {
            Phase::Idle { .. } => self.phase = Phase::IDLE,
            Phase::Presenting(active) => {
                self.begin_dismissal(active, DismissalMethod::Programmatic, true);
            }
            Phase::Interrupted {
                current,
                preemption,
                ..
            } => {
                if matches!(preemption, Preemption::Pending(_)) {
                    self.router.dismiss(true);
                }
                self.enter(
                    from,
                    Phase::Dismissing {
                        active: current,
                        reason: DismissalMethod::Programmatic,
                    },
                );
            }
            dismissing @ Phase::Dismissing { .. } => self.phase = dismissing,
        }
        debug!(cleared, "dismiss all");
    }

    fn enter_background(&mut self) {
        if self.suspended {
            return;
        }
        self.suspended = true;
        let persist = self.policy.persist_critical_toasts();
        let mut restored = Vec::new();

        let from = self.phase.kind();
        match self.take_phase() {
            Phase::Idle { .. } => self.phase = Phase::IDLE,
            Phase::Presenting(active) => {
                if persist && active.item.priority() == Priority::Critical {
                    restored.push(active.item.clone());
                }
                self.begin_dismissal(active, DismissalMethod::SceneInactive, false);
            }
            Phase::Interrupted {
                current,
                next,
                preemption,
            } => {
                if persist && current.item.priority() == Priority::Critical {
                    restored.push(current.item.clone());
                }
                if persist && next.priority() == Priority::Critical {
                    restored.push(next);
                } else {
                    self.drop_item(&next, DropReason::Backgrounded);
                }
                if matches!(preemption, Preemption::Pending(_)) {
                    self.router.dismiss(false);
                }
                self.enter(
                    from,
                    Phase::Dismissing {
                        active: current,
                        reason: DismissalMethod::SceneInactive,
                    },
                );
            }
            dismissing @ Phase::Dismissing { .. } => self.phase = dismissing,
        }

        for item in mem::take(&mut self.queue) {
            if persist && item.priority() == Priority::Critical {
                restored.push(item);
            } else {
                self.drop_item(&item, DropReason::Backgrounded);
            }
        }

        info!(restorable = restored.len(), "entering background");
        self.restoration = restored;
    }

    fn enter_foreground(&mut self) {
        if !self.suspended {
            return;
        }
        self.suspended = false;

        let mut merged: VecDeque<ToastItem> = mem::take(&mut self.restoration).into();
        merged.extend(self.queue.drain(..));
        while merged.len() > self.policy.max_queue_size() {
            if let Some(item) = merged.pop_back() {
                self.drop_item(&item, DropReason::QueueFull);
            }
        }
        self.queue = merged;
        info!(queued = self.queue.len(), "entering foreground");

        if matches!(self.phase, Phase::Idle { .. }) {
            self.advance();
        }
    }

    fn replace_router(&mut self, router: Arc<dyn PresentationRouter>) {
        info!("presentation router replaced");
        self.router = router;

        let from = self.phase.kind();
        match self.take_phase() {
            Phase::Idle { resume_at } => {
                self.phase = Phase::Idle { resume_at };
                if resume_at.is_none() {
                    self.advance();
                }
            }
            Phase::Presenting(mut active) => {
                // Re-present on the new surface; remaining time is kept.
                active.token = self.next_token();
                let handle = DismissalHandle::new(active.token, self.event_tx.clone());
                self.router.present(&active.item, handle);
                self.phase = Phase::Presenting(active);
            }
            Phase::Dismissing { active, reason } => {
                // The old surface is gone and will not confirm.
                self.phase = Phase::Dismissing { active, reason };
                self.finish_dismissal();
            }
            Phase::Interrupted {
                current,
                next,
                preemption,
            } => {
                let reason = match preemption {
                    Preemption::Pending(_) => DismissalMethod::Interrupted,
                    Preemption::Requested(reason) => reason,
                };
                self.report_dismissed(current.item.id(), reason);
                self.present(from, next);
            }
        }
    }

    fn snapshot(&self) -> ManagerSnapshot {
        ManagerSnapshot {
            state: self.phase.state(),
            queued: self.queue.iter().map(ToastItem::id).collect(),
            restoration: self.restoration.iter().map(ToastItem::id).collect(),
            backgrounded: self.suspended,
            coalescing_entries: self.cache.len(),
            last_presentation: self.last_presentation,
        }
    }

    // =========================================================================
    // State machine steps
    // =========================================================================

    fn on_dismissed(&mut self, token: PresentationToken, method: DismissalMethod) {
        let from = self.phase.kind();
        match self.take_phase() {
            Phase::Presenting(active) if active.token == token => {
                self.enter(
                    from,
                    Phase::Dismissing {
                        active,
                        reason: method,
                    },
                );
                self.finish_dismissal();
            }
            Phase::Dismissing { active, reason } if active.token == token => {
                self.phase = Phase::Dismissing { active, reason };
                self.finish_dismissal();
            }
            Phase::Interrupted {
                current,
                next,
                preemption,
            } if current.token == token => {
                let reason = match preemption {
                    Preemption::Pending(_) => method,
                    Preemption::Requested(reason) => reason,
                };
                self.report_dismissed(current.item.id(), reason);
                self.present(from, next);
            }
            other => {
                trace!(token = token.value(), method = method.as_str(), "ignoring stale dismissal");
                self.phase = other;
            }
        }
    }

    /// Manager-initiated dismissal of the presenting toast.
    fn begin_dismissal(&mut self, active: Active, reason: DismissalMethod, animated: bool) {
        debug!(id = %active.item.id(), reason = reason.as_str(), "dismissing");
        self.enter(
            PresentationStateKind::Presenting,
            Phase::Dismissing { active, reason },
        );
        self.router.dismiss(animated);
    }

    /// Completes `Dismissing`: reports the dismissal, returns to idle and
    /// moves on to the next queued toast.
    fn finish_dismissal(&mut self) {
        if let Phase::Dismissing { active, reason } = self.take_phase() {
            self.report_dismissed(active.item.id(), reason);
        }
        self.enter(PresentationStateKind::Dismissing, Phase::IDLE);
        self.advance();
    }

    /// Presents the head of the queue if nothing holds it back. A critical
    /// head is exempt from the rate limit.
    fn advance(&mut self) {
        let Some(head) = self.queue.front() else {
            return;
        };
        if self.suspended || !matches!(self.phase, Phase::Idle { .. }) {
            return;
        }

        let now = Self::now();
        let rate_limited = if head.priority() == Priority::Critical {
            None
        } else {
            self.policy.rate_limit_delay(now, self.last_presentation)
        };
        if let Some(remaining) = rate_limited {
            trace!(?remaining, "rate limited");
            self.phase = Phase::Idle {
                resume_at: Some(now + remaining),
            };
            return;
        }

        if let Some(item) = self.queue.pop_front() {
            self.present(PresentationStateKind::Idle, item);
        }
    }

    fn present(&mut self, from: PresentationStateKind, item: ToastItem) {
        let now = Self::now();
        let token = self.next_token();
        let handle = DismissalHandle::new(token, self.event_tx.clone());

        self.last_presentation = Some(now);
        self.telemetry.record(TelemetryEvent::ToastShown {
            id: item.id(),
            kind: item.kind().clone(),
            duration: item.duration(),
        });
        self.router.present(&item, handle);
        self.enter(
            from,
            Phase::Presenting(Active {
                dismiss_at: now + item.duration(),
                item,
                token,
            }),
        );
    }

    fn preempt(&mut self, item: ToastItem, now: Instant) {
        let from = self.phase.kind();
        match self.take_phase() {
            Phase::Presenting(current) => {
                let fire_at = now + self.policy.critical_interruption_delay();
                self.enter(
                    from,
                    Phase::Interrupted {
                        current,
                        next: item,
                        preemption: Preemption::Pending(fire_at),
                    },
                );
            }
            Phase::Interrupted {
                current,
                next: displaced,
                preemption,
            } => {
                self.phase = Phase::Interrupted {
                    current,
                    next: item,
                    preemption,
                };
                if self.queue.len() < self.policy.max_queue_size() {
                    self.queue.push_front(displaced);
                } else {
                    self.drop_item(&displaced, DropReason::QueueFull);
                }
            }
            _ => unreachable!("preemption is only decided while a toast is visible"),
        }
    }

    fn merge(&mut self, target: ToastId, item: ToastItem, now: Instant) {
        let updated = item.id();
        let key = item.dedupe_key().map(str::to_owned);

        let pending = self
            .queue
            .iter_mut()
            .chain(self.restoration.iter_mut())
            .find(|pending| pending.id() == target);
        let restart = self.policy.coalesce_timer() == CoalesceTimer::Restart;
        match (&mut self.phase, pending) {
            (_, Some(slot)) => *slot = item,
            (Phase::Presenting(active), None) if active.item.id() == target => {
                self.router.update_current(&item);
                if restart {
                    active.dismiss_at = now + item.duration();
                }
                active.item = item;
            }
            (Phase::Interrupted { next, .. }, None) if next.id() == target => *next = item,
            _ => unreachable!("merge target {target} is not live"),
        }

        debug!(original = %target, %updated, "coalesced");
        self.telemetry.record(TelemetryEvent::ToastCoalesced {
            original: target,
            updated,
        });
        if let Some(key) = key {
            self.cache.record(&key, updated, now);
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn claim_key(&mut self, item: &ToastItem, now: Instant) {
        if let Some(key) = item.dedupe_key() {
            self.cache.record(key, item.id(), now);
        }
    }

    fn drop_item(&self, item: &ToastItem, reason: DropReason) {
        debug!(id = %item.id(), reason = reason.as_str(), "dropped");
        self.telemetry
            .record(TelemetryEvent::ToastDropped { reason });
    }

    fn report_dismissed(&self, id: ToastId, method: DismissalMethod) {
        debug!(%id, method = method.as_str(), "dismissed");
        self.telemetry
            .record(TelemetryEvent::ToastDismissed { id, method });
    }

    fn next_token(&mut self) -> PresentationToken {
        self.last_token = self.last_token.next();
        self.last_token
    }

    fn take_phase(&mut self) -> Phase {
        mem::replace(&mut self.phase, Phase::IDLE)
    }

    /// Installs `phase`, reporting a transition when the state kind changes.
    fn enter(&mut self, from: PresentationStateKind, phase: Phase) {
        let to = phase.kind();
        self.phase = phase;
        if from != to {
            debug!(from = from.as_str(), to = to.as_str(), "state transition");
            self.telemetry
                .record(TelemetryEvent::StateTransition { from, to });
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn active(item: ToastItem, dismiss_at: Instant) -> Active {
        Active {
            item,
            token: PresentationToken::first(),
            dismiss_at,
        }
    }

    #[test]
    fn only_timed_phases_have_deadlines() {
        let now = Instant::now();
        let later = now + Duration::from_secs(3);

        assert_eq!(Phase::IDLE.deadline(), None);
        assert_eq!(Phase::Idle { resume_at: Some(now) }.deadline(), Some(now));
        assert_eq!(
            Phase::Presenting(active(ToastItem::info("a"), later)).deadline(),
            Some(later)
        );
        assert_eq!(
            Phase::Dismissing {
                active: active(ToastItem::info("a"), later),
                reason: DismissalMethod::Timeout,
            }
            .deadline(),
            None
        );
    }

    #[test]
    fn requested_preemption_waits_for_the_router() {
        let now = Instant::now();
        let fire_at = now + Duration::from_millis(120);
        let pending = Phase::Interrupted {
            current: active(ToastItem::info("a"), now + Duration::from_secs(3)),
            next: ToastItem::error("b"),
            preemption: Preemption::Pending(fire_at),
        };
        assert_eq!(pending.deadline(), Some(fire_at));

        let Phase::Interrupted { current, next, .. } = pending else {
            unreachable!()
        };
        let requested = Phase::Interrupted {
            current,
            next,
            preemption: Preemption::Requested(DismissalMethod::Interrupted),
        };
        assert_eq!(requested.deadline(), None);
        assert_eq!(requested.kind(), PresentationStateKind::Interrupted);
    }

    #[test]
    fn slot_and_state_expose_ids() {
        let current = ToastItem::info("a");
        let next = ToastItem::error("b").with_priority(Priority::Critical);
        let (current_id, next_id) = (current.id(), next.id());
        let phase = Phase::Interrupted {
            current: active(current, Instant::now()),
            next,
            preemption: Preemption::Pending(Instant::now()),
        };

        assert_eq!(
            phase.slot(),
            ActiveSlot::Interrupted {
                current: current_id,
                next: next_id,
                next_priority: Priority::Critical,
            }
        );
        assert_eq!(
            phase.state(),
            PresentationState::Interrupted {
                current: current_id,
                next: next_id,
            }
        );
    }
}
