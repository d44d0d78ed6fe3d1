//! Analysis module - result types, per-rep bookkeeping, configuration
//!
//! Re-exports only. All logic in submodules.

mod error;
mod result;
mod faults;
mod tracker;
mod config;
mod telemetry;

pub use error::EngineError;
pub use result::{AnalysisResult, BodyPart, DebugTelemetry, Finding, Severity};
pub use faults::{FormFault, RepFaults};
pub use tracker::PeakTracker;
pub use config::{ExerciseConfig, Thresholds};
pub use telemetry::{MemorySink, TelemetryEvent, TelemetrySink, TracingSink};
