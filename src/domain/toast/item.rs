// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `ToastItem` value and everything it carries:
//! its kind, per-item options, priority and optional action.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::newtypes::{ToastDuration, ToastId};

/// Accent color for custom toasts (sRGB, 8 bits per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccentColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl AccentColor {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Visual category of a toast.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
    Warning,
    /// Caller-supplied icon name and accent color.
    Custom { icon: String, accent: AccentColor },
}

impl ToastKind {
    /// Returns a stable label used in logs and telemetry.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
            ToastKind::Warning => "warning",
            ToastKind::Custom { .. } => "custom",
        }
    }
}

/// Haptic pattern the presentation surface may play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticFeedback {
    Success,
    Warning,
    Error,
    Selection,
    Impact,
}

/// How a toast decides which haptic, if any, accompanies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HapticsPolicy {
    /// Derive the haptic from the toast kind.
    #[default]
    Auto,
    Explicit(HapticFeedback),
    None,
}

impl HapticsPolicy {
    /// Resolves the haptic to play for a toast of the given kind.
    #[must_use]
    pub fn resolve(self, kind: &ToastKind) -> Option<HapticFeedback> {
        match self {
            HapticsPolicy::Explicit(feedback) => Some(feedback),
            HapticsPolicy::None => None,
            HapticsPolicy::Auto => match kind {
                ToastKind::Success => Some(HapticFeedback::Success),
                ToastKind::Warning => Some(HapticFeedback::Warning),
                ToastKind::Error => Some(HapticFeedback::Error),
                ToastKind::Info | ToastKind::Custom { .. } => None,
            },
        }
    }
}

/// Screen edge the toast slides in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationEdge {
    #[default]
    Top,
    Bottom,
}

/// How the presentation surface treats the safe area insets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SafeAreaBehavior {
    #[default]
    Respect,
    Ignore,
}

/// Presentation priority. Ordered `Normal < Elevated < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    #[default]
    Normal,
    Elevated,
    Critical,
}

impl Priority {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::Elevated => "elevated",
            Priority::Critical => "critical",
        }
    }
}

/// Per-item configuration, independent of the global policy.
///
/// `safe_area`, `reduce_motion` and `max_width` are hints for the
/// presentation surface only; the manager never reads them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastOptions {
    pub duration: ToastDuration,
    pub allows_user_dismiss: AllowsUserDismiss,
    pub edge: PresentationEdge,
    pub haptics: HapticsPolicy,
    pub dedupe_key: Option<String>,
    pub priority: Priority,
    pub safe_area: SafeAreaBehavior,
    pub reduce_motion: bool,
    pub max_width: Option<f32>,
}

/// Whether the user may swipe or tap a toast away. Defaults to allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowsUserDismiss(pub bool);

impl Default for AllowsUserDismiss {
    fn default() -> Self {
        Self(true)
    }
}

impl ToastOptions {
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = ToastDuration::new(duration);
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_dedupe_key(mut self, key: impl Into<String>) -> Self {
        self.dedupe_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_edge(mut self, edge: PresentationEdge) -> Self {
        self.edge = edge;
        self
    }

    #[must_use]
    pub fn with_haptics(mut self, haptics: HapticsPolicy) -> Self {
        self.haptics = haptics;
        self
    }

    #[must_use]
    pub fn user_dismissible(mut self, allowed: bool) -> Self {
        self.allows_user_dismiss = AllowsUserDismiss(allowed);
        self
    }
}

/// Semantic role of a toast action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionRole {
    #[default]
    Default,
    Cancel,
    Destructive,
}

/// Single action attached to a toast (e.g. "Undo", "Retry").
///
/// The handler runs on the presentation side when the user taps the button;
/// the surface then reports the dismissal as an action tap.
#[derive(Clone)]
pub struct ToastAction {
    title: String,
    role: ActionRole,
    handler: Arc<dyn Fn() + Send + Sync>,
}

impl ToastAction {
    pub fn new(
        title: impl Into<String>,
        role: ActionRole,
        handler: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            role,
            handler: Arc::new(handler),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn role(&self) -> ActionRole {
        self.role
    }

    /// Runs the action handler.
    pub fn perform(&self) {
        (self.handler)();
    }
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("title", &self.title)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// A toast to be displayed to the user.
///
/// Items are immutable once submitted. Coalescing replaces a whole item
/// under the same dedupe key instead of editing one in place.
#[derive(Debug, Clone)]
pub struct ToastItem {
    id: ToastId,
    message: String,
    kind: ToastKind,
    options: ToastOptions,
    action: Option<ToastAction>,
}

impl ToastItem {
    /// Creates a new toast with default options.
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            id: ToastId::new(),
            message: message.into(),
            kind,
            options: ToastOptions::default(),
            action: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, message)
    }

    pub fn custom(message: impl Into<String>, icon: impl Into<String>, accent: AccentColor) -> Self {
        Self::new(
            ToastKind::Custom {
                icon: icon.into(),
                accent,
            },
            message,
        )
    }

    #[must_use]
    pub fn with_options(mut self, options: ToastOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn with_dedupe_key(mut self, key: impl Into<String>) -> Self {
        self.options.dedupe_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.options.priority = priority;
        self
    }

    /// Sets the auto-dismiss interval, clamped to 1–10 seconds.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.options.duration = ToastDuration::new(duration);
        self
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn kind(&self) -> &ToastKind {
        &self.kind
    }

    #[must_use]
    pub fn options(&self) -> &ToastOptions {
        &self.options
    }

    #[must_use]
    pub fn action(&self) -> Option<&ToastAction> {
        self.action.as_ref()
    }

    #[must_use]
    pub fn priority(&self) -> Priority {
        self.options.priority
    }

    #[must_use]
    pub fn dedupe_key(&self) -> Option<&str> {
        self.options.dedupe_key.as_deref()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.options.duration.value()
    }

    /// Haptic the surface should play when presenting this toast.
    #[must_use]
    pub fn haptic(&self) -> Option<HapticFeedback> {
        self.options.haptics.resolve(&self.kind)
    }
}
