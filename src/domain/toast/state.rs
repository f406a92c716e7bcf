// SPDX-License-Identifier: MPL-2.0
//! Presentation state machine vocabulary.

use super::newtypes::ToastId;

/// Reported cause of a toast leaving the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissalMethod {
    /// The auto-dismiss interval elapsed.
    Timeout,
    UserTap,
    UserSwipe,
    ActionTap,
    /// `dismiss(id)` or `dismiss_all()` from code.
    Programmatic,
    /// A higher-priority toast took over the screen.
    Interrupted,
    /// The hosting scene went away (backgrounding, scene teardown).
    SceneInactive,
}

impl DismissalMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DismissalMethod::Timeout => "timeout",
            DismissalMethod::UserTap => "user_tap",
            DismissalMethod::UserSwipe => "user_swipe",
            DismissalMethod::ActionTap => "action_tap",
            DismissalMethod::Programmatic => "programmatic",
            DismissalMethod::Interrupted => "interrupted",
            DismissalMethod::SceneInactive => "scene_inactive",
        }
    }

    /// Returns true for dismissals that originate from the user.
    #[must_use]
    pub fn is_user_initiated(self) -> bool {
        matches!(
            self,
            DismissalMethod::UserTap | DismissalMethod::UserSwipe | DismissalMethod::ActionTap
        )
    }
}

/// Why an admitted toast was discarded without being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    QueueFull,
    /// Non-critical toast discarded when the app moved to the background.
    Backgrounded,
}

impl DropReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DropReason::QueueFull => "queue_full",
            DropReason::Backgrounded => "backgrounded",
        }
    }
}

/// Discriminant of [`PresentationState`], used for transition reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentationStateKind {
    Idle,
    Presenting,
    Dismissing,
    Interrupted,
}

impl PresentationStateKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PresentationStateKind::Idle => "idle",
            PresentationStateKind::Presenting => "presenting",
            PresentationStateKind::Dismissing => "dismissing",
            PresentationStateKind::Interrupted => "interrupted",
        }
    }
}

/// The manager's presentation state, the single authority on what is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationState {
    #[default]
    Idle,
    Presenting(ToastId),
    Dismissing {
        id: ToastId,
        reason: DismissalMethod,
    },
    /// `current` is being preempted by `next`.
    Interrupted {
        current: ToastId,
        next: ToastId,
    },
}

impl PresentationState {
    #[must_use]
    pub fn kind(&self) -> PresentationStateKind {
        match self {
            PresentationState::Idle => PresentationStateKind::Idle,
            PresentationState::Presenting(_) => PresentationStateKind::Presenting,
            PresentationState::Dismissing { .. } => PresentationStateKind::Dismissing,
            PresentationState::Interrupted { .. } => PresentationStateKind::Interrupted,
        }
    }

    /// Returns the toast currently on screen, if any.
    #[must_use]
    pub fn visible(&self) -> Option<ToastId> {
        match *self {
            PresentationState::Idle => None,
            PresentationState::Presenting(id) => Some(id),
            PresentationState::Dismissing { id, .. } => Some(id),
            PresentationState::Interrupted { current, .. } => Some(current),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, PresentationState::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_initiated_methods() {
        assert!(DismissalMethod::UserTap.is_user_initiated());
        assert!(DismissalMethod::UserSwipe.is_user_initiated());
        assert!(DismissalMethod::ActionTap.is_user_initiated());
        assert!(!DismissalMethod::Timeout.is_user_initiated());
        assert!(!DismissalMethod::Interrupted.is_user_initiated());
    }

    #[test]
    fn visible_reports_the_on_screen_item() {
        let a = ToastId::new();
        let b = ToastId::new();
        assert_eq!(PresentationState::Idle.visible(), None);
        assert_eq!(PresentationState::Presenting(a).visible(), Some(a));
        assert_eq!(
            PresentationState::Interrupted { current: a, next: b }.visible(),
            Some(a)
        );
    }

    #[test]
    fn kinds_match_variants() {
        let id = ToastId::new();
        assert_eq!(
            PresentationState::Dismissing {
                id,
                reason: DismissalMethod::Timeout
            }
            .kind(),
            PresentationStateKind::Dismissing
        );
        assert_eq!(PresentationState::default().kind(), PresentationStateKind::Idle);
    }
}
