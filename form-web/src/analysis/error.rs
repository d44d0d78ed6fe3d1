//! Setup-time errors
//!
//! Per-frame analysis never fails; these only come out of frame decoding
//! and engine construction, where they point at a caller or config defect.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid landmark data length: {actual} (expected {expected})")]
    FrameLength { expected: usize, actual: usize },

    #[error("landmark index {index} out of range for {count}-point pose")]
    LandmarkIndex { index: usize, count: usize },

    #[error("threshold '{name}' must be finite, got {value}")]
    InvalidThreshold { name: String, value: f64 },

    #[error("invalid exercise config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to encode analysis result: {0}")]
    Encode(serde_json::Error),
}
