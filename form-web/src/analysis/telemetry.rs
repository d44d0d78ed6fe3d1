//! Debug telemetry sinks for threshold tuning
//!
//! The engine only builds [`DebugTelemetry`] when a sink is attached, so a
//! session without one pays nothing for it.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use super::result::DebugTelemetry;

/// One analyzed frame as seen by tuning tools
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEvent {
    pub exercise: String,
    pub phase: String,
    pub timestamp_ms: f64,
    pub rep_completed: bool,
    pub debug: Option<DebugTelemetry>,
}

/// Receives telemetry events from a [`crate::engine::FormEngine`]
pub trait TelemetrySink: Send {
    fn record(&self, event: &TelemetryEvent);
}

/// Emits each event as structured `tracing` fields at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn record(&self, event: &TelemetryEvent) {
        let values = event.debug.clone().unwrap_or_default();
        tracing::debug!(
            exercise = %event.exercise,
            phase = %event.phase,
            timestamp_ms = event.timestamp_ms,
            rep_completed = event.rep_completed,
            angle = ?values.primary_angle,
            lean = ?values.trunk_lean,
            knee_forward = ?values.knee_forward,
            speed = ?values.descent_speed,
            peak = ?values.peak_signal,
            faults = ?values.queued_faults,
            "form telemetry"
        );
    }
}

/// Keeps events in memory; clones share the same buffer
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TelemetrySink for MemorySink {
    fn record(&self, event: &TelemetryEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_shares_buffer() {
        let sink = MemorySink::new();
        let handle = sink.clone();
        sink.record(&TelemetryEvent {
            exercise: "squat".into(),
            phase: "standing".into(),
            timestamp_ms: 0.0,
            rep_completed: false,
            debug: None,
        });
        assert_eq!(handle.len(), 1);
        assert_eq!(handle.events()[0].phase, "standing");
    }

    #[test]
    fn test_tracing_sink_accepts_debug_values() {
        let event = TelemetryEvent {
            exercise: "squat".into(),
            phase: "bottom".into(),
            timestamp_ms: 66.0,
            rep_completed: false,
            debug: Some(DebugTelemetry {
                primary_angle: Some(72.0),
                queued_faults: vec!["excessive_lean".into()],
                ..DebugTelemetry::default()
            }),
        };
        TracingSink.record(&event);
        TracingSink.record(&TelemetryEvent { debug: None, ..event });
    }
}
