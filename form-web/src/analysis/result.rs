//! Per-frame analysis output

use serde::{Deserialize, Serialize};

/// How serious a finding is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Body region a finding refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyPart {
    Back,
    Knees,
    Hips,
    Elbows,
    Neck,
    Shoulders,
    Tempo,
    Depth,
}

/// A discrete form-quality finding for one completed repetition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Stable machine code, e.g. `speed_too_fast`
    pub kind: String,
    pub message: String,
    pub severity: Severity,
    pub timestamp_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_part: Option<BodyPart>,
}

/// Raw signal values for threshold tuning
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugTelemetry {
    /// The analyzer's phase-driving signal (thigh angle, trunk angle, ...)
    pub primary_angle: Option<f32>,
    pub trunk_lean: Option<f32>,
    pub knee_forward: Option<f32>,
    pub descent_speed: Option<f32>,
    /// Most extreme primary value reached this rep
    pub peak_signal: Option<f32>,
    pub queued_faults: Vec<String>,
}

/// Everything the engine reports for one frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub phase: String,
    /// 0-100
    pub form_score: f32,
    pub findings: Vec<Finding>,
    pub feedback: Option<String>,
    pub rep_completed: bool,
    /// 0-1, mean visibility of the joints the analyzer relies on
    pub confidence: f32,
    /// DTW similarity for the rep that just completed, when a reference exists
    pub trajectory_score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugTelemetry>,
}

impl AnalysisResult {
    /// In-progress result; score and confidence are clamped into range
    pub fn new(phase: impl Into<String>, form_score: f32, confidence: f32) -> Self {
        Self {
            phase: phase.into(),
            form_score: clamp_or_zero(form_score, 0.0, 100.0),
            findings: Vec::new(),
            feedback: None,
            rep_completed: false,
            confidence: clamp_or_zero(confidence, 0.0, 1.0),
            trajectory_score: None,
            debug: None,
        }
    }

    /// Mark this frame as the end of a repetition
    pub fn completed(mut self, findings: Vec<Finding>, feedback: Option<String>) -> Self {
        self.rep_completed = true;
        self.findings = findings;
        self.feedback = feedback;
        self
    }

    pub fn with_trajectory_score(mut self, score: f32) -> Self {
        self.trajectory_score = Some(clamp_or_zero(score, 0.0, 100.0));
        self
    }

    pub fn with_debug(mut self, debug: Option<DebugTelemetry>) -> Self {
        self.debug = debug;
        self
    }
}

fn clamp_or_zero(value: f32, min: f32, max: f32) -> f32 {
    if value.is_finite() { value.clamp(min, max) } else { min }
}
