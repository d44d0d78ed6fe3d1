//! Per-attempt form engine
//!
//! Owns exactly one analyzer instance plus the bookkeeping shared across
//! frames: the previous phase, the phase at which the last rep completed
//! and the rep count. Create one engine per concurrently tracked exercise
//! attempt; it is `Send` but not meant to be shared.

use tracing::{info, warn};

use crate::analysis::{
    AnalysisResult, EngineError, ExerciseConfig, TelemetryEvent, TelemetrySink, Thresholds,
};
use crate::bridge::{Frame, LANDMARK_COUNT};
use crate::exercises::{ExerciseAnalyzer, FrameContext};

use super::registry::AnalyzerRegistry;

pub struct FormEngine {
    config: ExerciseConfig,
    analyzer: Box<dyn ExerciseAnalyzer>,
    fallback: bool,
    telemetry: Option<Box<dyn TelemetrySink>>,
    last_phase: Option<String>,
    /// Phase reported on the frame of the most recent completion; cleared
    /// as soon as a different phase is seen
    completed_phase: Option<String>,
    reps_completed: u32,
}

impl FormEngine {
    /// Engine over the built-in analyzers
    pub fn new(config: ExerciseConfig) -> Result<Self, EngineError> {
        Self::with_registry(config, &AnalyzerRegistry::with_defaults())
    }

    /// Resolve `config` against `registry`, validating thresholds and the
    /// analyzer's landmark indices before any frame is seen
    pub fn with_registry(config: ExerciseConfig, registry: &AnalyzerRegistry) -> Result<Self, EngineError> {
        let thresholds = Thresholds::new(config.thresholds.clone())?;
        let resolved = registry.resolve(&config, &thresholds);
        let fallback = resolved.is_fallback();

        if let Some(&index) = resolved
            .analyzer
            .required_landmarks()
            .iter()
            .find(|&&i| i >= LANDMARK_COUNT)
        {
            return Err(EngineError::LandmarkIndex { index, count: LANDMARK_COUNT });
        }

        if fallback {
            warn!(exercise = config.label(), "no analyzer registered, using generic fallback");
        }

        Ok(Self {
            config,
            analyzer: resolved.analyzer,
            fallback,
            telemetry: None,
            last_phase: None,
            completed_phase: None,
            reps_completed: 0,
        })
    }

    /// Attach a telemetry sink; analyzers then fill in debug values
    pub fn with_telemetry(mut self, sink: Box<dyn TelemetrySink>) -> Self {
        self.telemetry = Some(sink);
        self
    }

    pub fn set_telemetry(&mut self, sink: Option<Box<dyn TelemetrySink>>) {
        self.telemetry = sink;
    }

    /// Analyze one frame
    pub fn analyze(&mut self, frame: &Frame) -> AnalysisResult {
        let ctx = FrameContext { debug: self.telemetry.is_some() };
        let mut result = self.analyzer.analyze(frame, &ctx);

        if result.rep_completed && self.is_double_trigger() {
            warn!(
                exercise = self.config.label(),
                phase = %result.phase,
                "suppressed repeated completion"
            );
            result.rep_completed = false;
            result.findings.clear();
            result.feedback = None;
            result.trajectory_score = None;
        }

        if result.rep_completed {
            self.reps_completed += 1;
            self.completed_phase = Some(result.phase.clone());
            info!(
                exercise = self.config.label(),
                reps = self.reps_completed,
                findings = result.findings.len(),
                trajectory_score = ?result.trajectory_score,
                "rep completed"
            );
        } else if self.completed_phase.as_deref() != Some(result.phase.as_str()) {
            self.completed_phase = None;
        }

        if let Some(sink) = &self.telemetry {
            sink.record(&TelemetryEvent {
                exercise: self.analyzer.name().to_string(),
                phase: result.phase.clone(),
                timestamp_ms: frame.timestamp_ms,
                rep_completed: result.rep_completed,
                debug: result.debug.clone(),
            });
        }

        self.last_phase = Some(result.phase.clone());
        result
    }

    /// Previous frame still sits in the phase the last rep completed in
    fn is_double_trigger(&self) -> bool {
        match (&self.completed_phase, &self.last_phase) {
            (Some(done), Some(last)) => done == last,
            _ => false,
        }
    }

    /// Label of the configured exercise (slug, then id)
    pub fn exercise(&self) -> &str {
        self.config.label()
    }

    /// Name of the analyzer serving this attempt
    pub fn analyzer_name(&self) -> &'static str {
        self.analyzer.name()
    }

    pub fn config(&self) -> &ExerciseConfig {
        &self.config
    }

    pub fn last_phase(&self) -> Option<&str> {
        self.last_phase.as_deref()
    }

    pub fn reps_completed(&self) -> u32 {
        self.reps_completed
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Start a new attempt with the same configuration
    pub fn reset(&mut self) {
        self.analyzer.reset();
        self.last_phase = None;
        self.completed_phase = None;
        self.reps_completed = 0;
    }
}
