// SPDX-License-Identifier: MPL-2.0
//! Test doubles for the presentation router and telemetry sink.
//!
//! Both record every call with a [`tokio::time::Instant`] timestamp, so tests
//! running under a paused clock can assert exact timings.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::time::Instant;

use crate::domain::toast::{
    DismissalMethod, DropReason, PresentationStateKind, ToastId, ToastItem,
};
use crate::notifications::{DismissalHandle, PresentationRouter};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A call received by [`RecordingRouter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterCall {
    Present(ToastId),
    Dismiss { animated: bool },
    Update(ToastId),
}

/// A [`RouterCall`] with the time it was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedCall {
    pub at: Instant,
    pub call: RouterCall,
}

#[derive(Default)]
struct RouterLog {
    calls: Vec<RecordedCall>,
    current: Option<(ToastId, DismissalHandle)>,
    last_message: Option<String>,
    overlapped: bool,
}

/// Router that records calls instead of rendering.
///
/// By default a `dismiss` request is acknowledged immediately with
/// [`DismissalMethod::Programmatic`], like a surface whose hide animation
/// completes at once. [`RecordingRouter::manual`] leaves acknowledgement to
/// the test.
pub struct RecordingRouter {
    log: Mutex<RouterLog>,
    auto_acknowledge: bool,
}

impl RecordingRouter {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            log: Mutex::new(RouterLog::default()),
            auto_acknowledge: true,
        })
    }

    /// A router that only reports dismissals when told to.
    #[must_use]
    pub fn manual() -> Arc<Self> {
        Arc::new(Self {
            log: Mutex::new(RouterLog::default()),
            auto_acknowledge: false,
        })
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RouterCall> {
        lock(&self.log).calls.iter().map(|recorded| recorded.call).collect()
    }

    #[must_use]
    pub fn timed_calls(&self) -> Vec<RecordedCall> {
        lock(&self.log).calls.clone()
    }

    /// Ids passed to `present`, in order.
    #[must_use]
    pub fn presented(&self) -> Vec<ToastId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RouterCall::Present(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Presentation start times, in order.
    #[must_use]
    pub fn presentation_times(&self) -> Vec<Instant> {
        lock(&self.log)
            .calls
            .iter()
            .filter(|recorded| matches!(recorded.call, RouterCall::Present(_)))
            .map(|recorded| recorded.at)
            .collect()
    }

    /// Ids passed to `update_current`, in order.
    #[must_use]
    pub fn updates(&self) -> Vec<ToastId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RouterCall::Update(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// The toast whose dismissal has not been reported yet.
    #[must_use]
    pub fn current(&self) -> Option<ToastId> {
        lock(&self.log).current.as_ref().map(|(id, _)| *id)
    }

    /// Text most recently put on screen by `present` or `update_current`.
    #[must_use]
    pub fn last_message(&self) -> Option<String> {
        lock(&self.log).last_message.clone()
    }

    /// True if `present` was ever called while a presentation was outstanding.
    #[must_use]
    pub fn overlapped(&self) -> bool {
        lock(&self.log).overlapped
    }

    /// Reports the current toast as dismissed by `method`, as a tap or swipe
    /// would. Returns false when nothing is on screen.
    pub fn user_dismiss(&self, method: DismissalMethod) -> bool {
        let current = lock(&self.log).current.take();
        match current {
            Some((_, handle)) => {
                handle.dismissed(method);
                true
            }
            None => false,
        }
    }

    /// Completes a pending `dismiss` request on a [`manual`](Self::manual) router.
    pub fn acknowledge_dismiss(&self) -> bool {
        self.user_dismiss(DismissalMethod::Programmatic)
    }

    fn push(log: &mut RouterLog, call: RouterCall) {
        log.calls.push(RecordedCall {
            at: Instant::now(),
            call,
        });
    }
}

impl PresentationRouter for RecordingRouter {
    fn present(&self, item: &ToastItem, on_dismiss: DismissalHandle) {
        let mut log = lock(&self.log);
        if log.current.is_some() {
            log.overlapped = true;
        }
        Self::push(&mut log, RouterCall::Present(item.id()));
        log.current = Some((item.id(), on_dismiss));
        log.last_message = Some(item.message().to_owned());
    }

    fn dismiss(&self, animated: bool) {
        let handle = {
            let mut log = lock(&self.log);
            Self::push(&mut log, RouterCall::Dismiss { animated });
            if self.auto_acknowledge {
                log.current.take()
            } else {
                None
            }
        };
        if let Some((_, handle)) = handle {
            handle.dismissed(DismissalMethod::Programmatic);
        }
    }

    fn update_current(&self, item: &ToastItem) {
        let mut log = lock(&self.log);
        Self::push(&mut log, RouterCall::Update(item.id()));
        if let Some((id, _)) = log.current.as_mut() {
            *id = item.id();
        }
        log.last_message = Some(item.message().to_owned());
    }
}

/// A [`TelemetryEvent`] with the time it was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub at: Instant,
    pub event: TelemetryEvent,
}

/// Sink that keeps every event in memory.
#[derive(Default)]
pub struct RecordingTelemetry {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingTelemetry {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[must_use]
    pub fn events(&self) -> Vec<TelemetryEvent> {
        lock(&self.events)
            .iter()
            .map(|recorded| recorded.event.clone())
            .collect()
    }

    #[must_use]
    pub fn timed_events(&self) -> Vec<RecordedEvent> {
        lock(&self.events).clone()
    }

    /// Ids of `toast_shown` events, in order.
    #[must_use]
    pub fn shown(&self) -> Vec<ToastId> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TelemetryEvent::ToastShown { id, .. } => Some(id),
                _ => None,
            })
            .collect()
    }

    /// `(id, method)` of `toast_dismissed` events, in order.
    #[must_use]
    pub fn dismissed(&self) -> Vec<(ToastId, DismissalMethod)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TelemetryEvent::ToastDismissed { id, method } => Some((id, method)),
                _ => None,
            })
            .collect()
    }

    /// `(original, updated)` of `toast_coalesced` events, in order.
    #[must_use]
    pub fn coalesced(&self) -> Vec<(ToastId, ToastId)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TelemetryEvent::ToastCoalesced { original, updated } => Some((original, updated)),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn dropped(&self) -> Vec<DropReason> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TelemetryEvent::ToastDropped { reason } => Some(reason),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn transitions(&self) -> Vec<(PresentationStateKind, PresentationStateKind)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TelemetryEvent::StateTransition { from, to } => Some((from, to)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        lock(&self.events).clear();
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn record(&self, event: TelemetryEvent) {
        lock(&self.events).push(RecordedEvent {
            at: Instant::now(),
            event,
        });
    }
}
