//! WASM session handle - one per exercise attempt on the page
//!
//! JS creates a `FormSession` from the exercise config JSON, then feeds it
//! the pose landmarks of every captured frame as a flat Float32Array.

use wasm_bindgen::prelude::*;

use crate::analysis::{EngineError, ExerciseConfig, TelemetryEvent, TelemetrySink};
use crate::engine::FormEngine;

use super::landmarks::Frame;

// ============================================================================
// CONSOLE TELEMETRY
// ============================================================================

/// Writes each telemetry event to the browser console as JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl TelemetrySink for ConsoleSink {
    fn record(&self, event: &TelemetryEvent) {
        if let Ok(json) = serde_json::to_string(event) {
            web_sys::console::log_1(&format!("📐 {json}").into());
        }
    }
}

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// SESSION
// ============================================================================

#[wasm_bindgen]
pub struct FormSession {
    engine: FormEngine,
}

impl FormSession {
    /// Parse the config and build the engine (no JS calls)
    pub fn from_config_json(config_json: &str) -> Result<Self, EngineError> {
        let config = ExerciseConfig::from_json(config_json)?;
        Ok(Self { engine: FormEngine::new(config)? })
    }

    /// Decode, analyze and encode one frame (no JS calls)
    pub fn analyze_flat(&mut self, data: &[f32], timestamp_ms: f64) -> Result<String, EngineError> {
        let frame = Frame::from_flat(data, timestamp_ms)?;
        let result = self.engine.analyze(&frame);
        serde_json::to_string(&result).map_err(EngineError::Encode)
    }

    pub fn engine(&self) -> &FormEngine {
        &self.engine
    }
}

#[wasm_bindgen]
impl FormSession {
    /// Create a session from an exercise config JSON document
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<FormSession, JsValue> {
        let session = Self::from_config_json(config_json).map_err(to_js)?;
        if session.engine.is_fallback() {
            web_sys::console::warn_1(
                &format!("⚠️ No form analyzer for '{}', using generic scoring", session.engine.exercise()).into(),
            );
        } else {
            web_sys::console::log_1(
                &format!("✅ Form analyzer ready: {}", session.engine.analyzer_name()).into(),
            );
        }
        Ok(session)
    }

    /// Analyze one frame of landmarks; returns the result as JSON.
    /// Without a timestamp the current time is used.
    pub fn analyze_frame(&mut self, data: &[f32], timestamp_ms: Option<f64>) -> Result<String, JsValue> {
        let timestamp_ms = timestamp_ms.unwrap_or_else(js_sys::Date::now);
        self.analyze_flat(data, timestamp_ms).map_err(to_js)
    }

    /// Log per-frame telemetry to the console
    pub fn set_debug(&mut self, enabled: bool) {
        let sink: Option<Box<dyn TelemetrySink>> = if enabled { Some(Box::new(ConsoleSink)) } else { None };
        self.engine.set_telemetry(sink);
    }

    pub fn reps_completed(&self) -> u32 {
        self.engine.reps_completed()
    }

    #[wasm_bindgen(getter)]
    pub fn exercise(&self) -> String {
        self.engine.exercise().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn last_phase(&self) -> Option<String> {
        self.engine.last_phase().map(str::to_string)
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }
}
