// SPDX-License-Identifier: MPL-2.0
//! Public handle to the toast manager.
//!
//! [`ToastManager`] is a cheap, cloneable handle. Every call is sent to the
//! manager task and awaited until the task has applied it, so a caller
//! observing `show(..).await` returning knows the toast has been admitted
//! (or dropped) and any resulting presentation has started.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, oneshot};

use super::actor::ManagerActor;
use super::router::PresentationRouter;
use crate::domain::toast::{
    PresentationState, ToastAction, ToastId, ToastItem, ToastKind, ToastOptions, ToastPolicy,
};
use crate::telemetry::{NoopTelemetry, TelemetrySink};

/// Messages accepted by the manager task.
pub(super) enum Command {
    Show {
        item: ToastItem,
        ack: oneshot::Sender<()>,
    },
    Dismiss {
        id: ToastId,
        ack: oneshot::Sender<()>,
    },
    DismissAll {
        ack: oneshot::Sender<()>,
    },
    EnterBackground {
        ack: oneshot::Sender<()>,
    },
    EnterForeground {
        ack: oneshot::Sender<()>,
    },
    ReplaceRouter {
        router: Arc<dyn PresentationRouter>,
        ack: oneshot::Sender<()>,
    },
    Snapshot {
        reply: oneshot::Sender<ManagerSnapshot>,
    },
}

/// Point-in-time view of the manager, for diagnostics and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerSnapshot {
    pub state: PresentationState,
    /// Pending toasts, front first.
    pub queued: Vec<ToastId>,
    /// Critical toasts held back while in the background.
    pub restoration: Vec<ToastId>,
    pub backgrounded: bool,
    /// Live dedupe key claims.
    pub coalescing_entries: usize,
    pub last_presentation: Option<Instant>,
}

/// Handle to a running toast manager.
///
/// The manager task stops once every handle has been dropped.
#[derive(Clone)]
pub struct ToastManager {
    command_tx: mpsc::UnboundedSender<Command>,
}

impl std::fmt::Debug for ToastManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastManager")
            .field("running", &!self.command_tx.is_closed())
            .finish()
    }
}

impl ToastManager {
    /// Starts configuring a manager for `router`.
    #[must_use]
    pub fn builder(policy: ToastPolicy, router: Arc<dyn PresentationRouter>) -> ToastManagerBuilder {
        ToastManagerBuilder {
            policy,
            router,
            telemetry: Arc::new(NoopTelemetry),
        }
    }

    /// Spawns the manager task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn spawn(
        policy: ToastPolicy,
        router: Arc<dyn PresentationRouter>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let actor = ManagerActor::new(policy, router, telemetry, command_rx);
        tokio::spawn(actor.run());
        Self { command_tx }
    }

    /// Submits a toast for presentation.
    ///
    /// Depending on the policy the toast is shown now, queued, merged into a
    /// live toast with the same dedupe key, promoted over the current toast,
    /// or dropped.
    pub async fn show(&self, item: ToastItem) {
        self.request(|ack| Command::Show { item, ack }).await
    }

    /// Builds a toast from its parts, submits it and returns its id.
    pub async fn show_message(
        &self,
        message: impl Into<String>,
        kind: ToastKind,
        options: ToastOptions,
        action: Option<ToastAction>,
    ) -> ToastId {
        let mut item = ToastItem::new(kind, message).with_options(options);
        if let Some(action) = action {
            item = item.with_action(action);
        }
        let id = item.id();
        self.show(item).await;
        id
    }

    /// Dismisses the toast `id`, whether visible or still queued.
    ///
    /// Unknown and already dismissed ids are ignored.
    pub async fn dismiss(&self, id: ToastId) {
        self.request(|ack| Command::Dismiss { id, ack }).await
    }

    /// Clears the queue and dismisses whatever is on screen.
    pub async fn dismiss_all(&self) {
        self.request(|ack| Command::DismissAll { ack }).await
    }

    /// Suspends presentation. Critical toasts are kept for restoration when
    /// the policy persists them; everything else is discarded.
    pub async fn enter_background(&self) {
        self.request(|ack| Command::EnterBackground { ack }).await
    }

    /// Resumes presentation, restored critical toasts first.
    pub async fn enter_foreground(&self) {
        self.request(|ack| Command::EnterForeground { ack }).await
    }

    /// Moves presentation to a new surface, e.g. after a scene change.
    pub async fn replace_router(&self, router: Arc<dyn PresentationRouter>) {
        self.request(|ack| Command::ReplaceRouter { router, ack }).await
    }

    /// Returns the manager's current state, or `None` once the task stopped.
    pub async fn snapshot(&self) -> Option<ManagerSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.command_tx.send(Command::Snapshot { reply }).ok()?;
        rx.await.ok()
    }

    /// Sends `command` and waits until the task has applied it. A stopped
    /// task makes every request a no-op.
    async fn request(&self, command: impl FnOnce(oneshot::Sender<()>) -> Command) {
        let (ack, rx) = oneshot::channel();
        if self.command_tx.send(command(ack)).is_ok() {
            let _ = rx.await;
        }
    }
}

/// Builder returned by [`ToastManager::builder`].
pub struct ToastManagerBuilder {
    policy: ToastPolicy,
    router: Arc<dyn PresentationRouter>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl ToastManagerBuilder {
    /// Routes lifecycle events to `sink`. Defaults to [`NoopTelemetry`].
    #[must_use]
    pub fn telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = sink;
        self
    }

    /// Spawns the manager task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn spawn(self) -> ToastManager {
        ToastManager::spawn(self.policy, self.router, self.telemetry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::toast::{Priority, PresentationStateKind};
    use crate::test_utils::{RecordingRouter, RouterCall};
    use std::time::Duration;

    fn spawn_default(router: &Arc<RecordingRouter>) -> ToastManager {
        ToastManager::builder(ToastPolicy::default(), router.clone()).spawn()
    }

    #[tokio::test(start_paused = true)]
    async fn show_presents_immediately_when_idle() {
        let router = RecordingRouter::new();
        let manager = spawn_default(&router);

        let item = ToastItem::success("Saved");
        let id = item.id();
        manager.show(item).await;

        assert_eq!(router.presented(), vec![id]);
        let snapshot = manager.snapshot().await.unwrap();
        assert_eq!(snapshot.state, PresentationState::Presenting(id));
        assert!(snapshot.last_presentation.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn show_message_returns_the_assigned_id() {
        let router = RecordingRouter::new();
        let manager = spawn_default(&router);

        let id = manager
            .show_message(
                "Copied",
                ToastKind::Info,
                ToastOptions::default().with_priority(Priority::Elevated),
                None,
            )
            .await;

        assert_eq!(router.presented(), vec![id]);
    }

    #[tokio::test(start_paused = true)]
    async fn toast_times_out_and_router_is_asked_to_dismiss() {
        let router = RecordingRouter::new();
        let manager = spawn_default(&router);

        manager
            .show(ToastItem::info("hi").with_duration(Duration::from_secs(2)))
            .await;
        tokio::time::sleep(Duration::from_millis(2100)).await;

        assert!(router
            .calls()
            .iter()
            .any(|call| matches!(call, RouterCall::Dismiss { animated: true })));
        let snapshot = manager.snapshot().await.unwrap();
        assert_eq!(snapshot.state.kind(), PresentationStateKind::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn calls_are_noops_once_the_task_is_gone() {
        let router = RecordingRouter::new();
        let (command_tx, command_rx) = mpsc::unbounded_channel::<Command>();
        drop(command_rx);
        let manager = ToastManager { command_tx };

        manager.show(ToastItem::info("x")).await;
        manager.dismiss_all().await;

        assert!(manager.snapshot().await.is_none());
        assert!(router.calls().is_empty());
    }
}
