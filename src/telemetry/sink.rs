// SPDX-License-Identifier: MPL-2.0
//! Telemetry sink contract and the stock sinks.

use tracing::info;

use super::TelemetryEvent;

/// Passive consumer of toast lifecycle events.
///
/// Called from the manager task: implementations must return promptly and
/// must not block. Nothing a sink does can influence manager decisions.
pub trait TelemetrySink: Send + Sync {
    fn record(&self, event: TelemetryEvent);
}

/// Discards every event. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Writes every event to the `tracing` log at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn record(&self, event: TelemetryEvent) {
        match &event {
            TelemetryEvent::ToastShown { id, kind, duration } => info!(
                target: "agora_toast::telemetry",
                %id,
                kind = kind.as_str(),
                ?duration,
                "toast shown"
            ),
            TelemetryEvent::ToastDismissed { id, method } => info!(
                target: "agora_toast::telemetry",
                %id,
                method = method.as_str(),
                "toast dismissed"
            ),
            TelemetryEvent::ToastCoalesced { original, updated } => info!(
                target: "agora_toast::telemetry",
                %original,
                %updated,
                "toast coalesced"
            ),
            TelemetryEvent::ToastDropped { reason } => info!(
                target: "agora_toast::telemetry",
                reason = reason.as_str(),
                "toast dropped"
            ),
            TelemetryEvent::StateTransition { from, to } => info!(
                target: "agora_toast::telemetry",
                from = from.as_str(),
                to = to.as_str(),
                "state transition"
            ),
        }
    }
}
