//! The per-exercise analyzer contract

use crate::analysis::{AnalysisResult, Finding};
use crate::bridge::Frame;
use crate::trajectory::TrajectoryScore;

/// Per-call options from the engine
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameContext {
    /// Fill in `AnalysisResult::debug`
    pub debug: bool,
}

/// A phase state machine for one exercise attempt
///
/// Implementations own their thresholds and per-attempt state; one instance
/// must never serve two concurrent attempts.
pub trait ExerciseAnalyzer: Send {
    /// Registry name, e.g. `squat`
    fn name(&self) -> &'static str;

    /// Landmark indices read by [`ExerciseAnalyzer::analyze`]
    fn required_landmarks(&self) -> &'static [usize];

    /// Analyze one frame. Never fails: degenerate input gives neutral values.
    fn analyze(&mut self, frame: &Frame, ctx: &FrameContext) -> AnalysisResult;

    /// Drop all per-attempt state
    fn reset(&mut self);
}

/// Build the spoken/displayed summary for a completed rep
///
/// Trajectory feedback leads when a reference exists, followed by the
/// first queued fault's cue.
pub fn rep_feedback(findings: &[Finding], trajectory: Option<&TrajectoryScore>) -> String {
    let mut text = match trajectory {
        Some(t) if t.distance.is_some() => format!("{} Rep score: {:.0}/100.", t.feedback, t.score),
        Some(t) => t.feedback.to_string(),
        None if findings.is_empty() => "Nice rep!".to_string(),
        None => String::new(),
    };

    if let Some(first) = findings.first() {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&first.message);
    }
    text
}
