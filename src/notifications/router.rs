// SPDX-License-Identifier: MPL-2.0
//! Presentation surface contract.
//!
//! The manager never renders anything. It drives a [`PresentationRouter`]
//! that owns the UI surface and reports back, exactly once per presentation,
//! how the toast left the screen.

use std::fmt;

use tokio::sync::mpsc;

use crate::domain::toast::{DismissalMethod, ToastItem};

/// Identifies one `present` call. A fresh token is issued per call, so a
/// callback for an earlier presentation can always be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PresentationToken(u64);

impl PresentationToken {
    pub(crate) fn first() -> Self {
        Self(1)
    }

    #[must_use]
    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Messages from the presentation surface back to the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RouterEvent {
    Dismissed {
        token: PresentationToken,
        method: DismissalMethod,
    },
}

/// One-shot completion callback for a presentation.
///
/// Consumed by [`dismissed`](Self::dismissed), so a router cannot report the
/// same presentation twice. Dropping the handle without calling it leaves
/// the manager waiting; routers must always report.
pub struct DismissalHandle {
    token: PresentationToken,
    event_tx: mpsc::UnboundedSender<RouterEvent>,
}

impl DismissalHandle {
    pub(crate) fn new(token: PresentationToken, event_tx: mpsc::UnboundedSender<RouterEvent>) -> Self {
        Self { token, event_tx }
    }

    #[must_use]
    pub fn token(&self) -> PresentationToken {
        self.token
    }

    /// Reports that the presented toast left the screen.
    pub fn dismissed(self, method: DismissalMethod) {
        // The manager may already be gone; nothing left to notify then.
        let _ = self.event_tx.send(RouterEvent::Dismissed {
            token: self.token,
            method,
        });
    }
}

impl fmt::Debug for DismissalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissalHandle")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

/// The UI surface that renders toasts.
///
/// Obligations on implementors:
/// - at most one active presentation;
/// - call the [`DismissalHandle`] exactly once per `present`, whatever the
///   cause (timeout request, tap, swipe, action, forced dismissal, scene
///   teardown), and promptly after [`dismiss`](Self::dismiss).
///
/// The manager in turn never calls `present` while a previous presentation's
/// handle is still outstanding.
///
/// Methods are called from the manager task and must not block.
pub trait PresentationRouter: Send + Sync {
    /// Shows `item` in the active scene.
    fn present(&self, item: &ToastItem, on_dismiss: DismissalHandle);

    /// Forces the current presentation off screen. Completion is reported
    /// through the presentation's [`DismissalHandle`].
    fn dismiss(&self, animated: bool);

    /// Swaps the displayed content without a dismiss/present cycle.
    fn update_current(&self, item: &ToastItem);
}
