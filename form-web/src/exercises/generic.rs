//! Fallback for exercises without a dedicated state machine
//!
//! Reports the first configured phase name and a visibility-only score.
//! Never counts reps.

use crate::analysis::{AnalysisResult, DebugTelemetry};
use crate::bridge::{Frame, KEY_LANDMARKS};
use crate::geometry::{average_visibility, base_form_score};

use super::analyzer::{ExerciseAnalyzer, FrameContext};

const DEFAULT_PHASE: &str = "neutral";

pub struct GenericAnalyzer {
    phase: String,
}

impl GenericAnalyzer {
    /// `phases` is the exercise's configured phase list, possibly empty
    pub fn new(phases: &[String]) -> Self {
        let phase = phases
            .first()
            .filter(|p| !p.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_PHASE.to_string());
        Self { phase }
    }

    pub fn phase(&self) -> &str {
        &self.phase
    }
}

impl Default for GenericAnalyzer {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl ExerciseAnalyzer for GenericAnalyzer {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn required_landmarks(&self) -> &'static [usize] {
        &KEY_LANDMARKS
    }

    fn analyze(&mut self, frame: &Frame, ctx: &FrameContext) -> AnalysisResult {
        let score = base_form_score(&frame.landmarks, &KEY_LANDMARKS);
        let confidence = average_visibility(&frame.landmarks, &KEY_LANDMARKS);
        AnalysisResult::new(self.phase.as_str(), score, confidence)
            .with_debug(ctx.debug.then(DebugTelemetry::default))
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::test_support::neutral_pose;

    #[test]
    fn test_reports_first_configured_phase() {
        let mut analyzer = GenericAnalyzer::new(&["plank".to_string(), "rest".to_string()]);
        let frame = Frame::new(neutral_pose(), 0.0);
        let result = analyzer.analyze(&frame, &FrameContext::default());
        assert_eq!(result.phase, "plank");
        assert_eq!(result.form_score, 100.0);
        assert!(!result.rep_completed);
    }

    #[test]
    fn test_defaults_to_neutral() {
        assert_eq!(GenericAnalyzer::default().phase(), "neutral");
        assert_eq!(GenericAnalyzer::new(&["  ".to_string()]).phase(), "neutral");
    }

    #[test]
    fn test_score_follows_visibility() {
        let mut pose = neutral_pose();
        for index in KEY_LANDMARKS {
            pose[index].visibility = 0.5;
        }
        let mut analyzer = GenericAnalyzer::default();
        let result = analyzer.analyze(&Frame::new(pose, 0.0), &FrameContext::default());
        assert_eq!(result.form_score, 50.0);
        assert_eq!(result.confidence, 0.5);
        assert!(result.findings.is_empty());
    }
}
