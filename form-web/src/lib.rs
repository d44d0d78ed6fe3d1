//! Form Web - real-time exercise form analysis from pose landmarks
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - Re-exports of the public API
//! - wasm_bindgen entry points that delegate to submodules

pub mod analysis;
pub mod bridge;
pub mod engine;
pub mod exercises;
pub mod geometry;
pub mod trajectory;

use wasm_bindgen::prelude::*;

pub use analysis::{
    AnalysisResult, EngineError, ExerciseConfig, Finding, MemorySink, Severity, TelemetryEvent,
    TelemetrySink, Thresholds, TracingSink,
};
pub use bridge::{ConsoleSink, Frame, FormSession, Landmark};
pub use engine::{AnalyzerRegistry, FormEngine};
pub use exercises::ExerciseAnalyzer;

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}
