// SPDX-License-Identifier: MPL-2.0
//! Telemetry event types for toast lifecycle tracking.
//!
//! Events are emitted by the manager and consumed by a
//! [`TelemetrySink`](super::TelemetrySink). They never feed back into
//! manager decisions.

use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::domain::toast::{
    DismissalMethod, DropReason, PresentationStateKind, ToastId, ToastKind,
};

/// Lifecycle events reported by the toast manager.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A toast began presenting.
    ToastShown {
        #[serde(serialize_with = "id_value")]
        id: ToastId,
        #[serde(serialize_with = "label")]
        kind: ToastKind,
        #[serde(rename = "duration_ms", serialize_with = "millis")]
        duration: Duration,
    },

    /// A presented toast reached its terminal dismissal.
    ToastDismissed {
        #[serde(serialize_with = "id_value")]
        id: ToastId,
        #[serde(serialize_with = "label")]
        method: DismissalMethod,
    },

    /// A newer toast replaced a live one sharing its dedupe key.
    ToastCoalesced {
        #[serde(serialize_with = "id_value")]
        original: ToastId,
        #[serde(serialize_with = "id_value")]
        updated: ToastId,
    },

    /// An admitted toast was discarded without being shown.
    ToastDropped {
        #[serde(serialize_with = "label")]
        reason: DropReason,
    },

    /// The presentation state machine changed state.
    StateTransition {
        #[serde(serialize_with = "label")]
        from: PresentationStateKind,
        #[serde(serialize_with = "label")]
        to: PresentationStateKind,
    },
}

impl TelemetryEvent {
    /// Returns the event name as it appears in serialized output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TelemetryEvent::ToastShown { .. } => "toast_shown",
            TelemetryEvent::ToastDismissed { .. } => "toast_dismissed",
            TelemetryEvent::ToastCoalesced { .. } => "toast_coalesced",
            TelemetryEvent::ToastDropped { .. } => "toast_dropped",
            TelemetryEvent::StateTransition { .. } => "state_transition",
        }
    }
}

/// Domain enums serialize as their stable snake_case labels.
trait Label {
    fn label(&self) -> &'static str;
}

impl Label for ToastKind {
    fn label(&self) -> &'static str {
        self.as_str()
    }
}

impl Label for DismissalMethod {
    fn label(&self) -> &'static str {
        self.as_str()
    }
}

impl Label for DropReason {
    fn label(&self) -> &'static str {
        self.as_str()
    }
}

impl Label for PresentationStateKind {
    fn label(&self) -> &'static str {
        self.as_str()
    }
}

fn label<T: Label, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.label())
}

fn id_value<S: Serializer>(id: &ToastId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(id.value())
}

#[allow(clippy::cast_possible_truncation)] // Toast durations are at most seconds long
fn millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shown_event_serializes_with_tag_and_millis() {
        let id = ToastId::new();
        let event = TelemetryEvent::ToastShown {
            id,
            kind: ToastKind::Warning,
            duration: Duration::from_secs(3),
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "toast_shown");
        assert_eq!(json["id"], id.value());
        assert_eq!(json["kind"], "warning");
        assert_eq!(json["duration_ms"], 3000);
    }

    #[test]
    fn enum_fields_serialize_as_labels() {
        let dismissed = TelemetryEvent::ToastDismissed {
            id: ToastId::new(),
            method: DismissalMethod::SceneInactive,
        };
        let json = serde_json::to_value(&dismissed).unwrap();
        assert_eq!(json["method"], "scene_inactive");

        let transition = TelemetryEvent::StateTransition {
            from: PresentationStateKind::Presenting,
            to: PresentationStateKind::Interrupted,
        };
        let json = serde_json::to_value(&transition).unwrap();
        assert_eq!(json["from"], "presenting");
        assert_eq!(json["to"], "interrupted");

        let dropped = TelemetryEvent::ToastDropped {
            reason: DropReason::QueueFull,
        };
        assert_eq!(
            serde_json::to_string(&dropped).unwrap(),
            r#"{"event":"toast_dropped","reason":"queue_full"}"#
        );
    }

    #[test]
    fn names_match_serialized_tags() {
        let event = TelemetryEvent::ToastCoalesced {
            original: ToastId::new(),
            updated: ToastId::new(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], event.name());
    }
}
