//! Hip hinge analyzer (good morning, Romanian deadlift pattern)
//!
//! The trunk pitches forward from the hips while the knees stay soft but
//! mostly straight and the back stays flat.

use tracing::debug;

use crate::analysis::{AnalysisResult, DebugTelemetry, FormFault, PeakTracker, RepFaults, Thresholds};
use crate::bridge::{
    Frame, LEFT_ANKLE, LEFT_EAR, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, RIGHT_ANKLE, RIGHT_EAR,
    RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER,
};
use crate::geometry::{angle_between, average_visibility, base_form_score, signed_tilt};

use super::analyzer::{rep_feedback, ExerciseAnalyzer, FrameContext};
use super::body::{mean_knee_angle, Midline};

const REQUIRED_LANDMARKS: [usize; 10] = [
    LEFT_EAR, RIGHT_EAR,
    LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
    LEFT_ANKLE, RIGHT_ANKLE,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HipHingePhase {
    Standing,
    Hinging,
}

impl HipHingePhase {
    pub fn name(&self) -> &'static str {
        match self {
            HipHingePhase::Standing => "standing",
            HipHingePhase::Hinging => "hinging",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HipHingeThresholds {
    /// Trunk angle from vertical below this counts as standing
    pub standing_angle: f32,
    /// Deepest trunk angle needed for the return to count as a rep
    pub min_hinge_angle: f32,
    /// Knee angle below this means the knees are doing the work
    pub min_knee_angle: f32,
    /// Ear-shoulder-hip angle below this means the upper back rounded
    pub min_back_angle: f32,
}

impl Default for HipHingeThresholds {
    fn default() -> Self {
        Self {
            standing_angle: 15.0,
            min_hinge_angle: 45.0,
            min_knee_angle: 140.0,
            min_back_angle: 140.0,
        }
    }
}

impl HipHingeThresholds {
    pub fn from_thresholds(t: &Thresholds) -> Self {
        let d = Self::default();
        Self {
            standing_angle: t.get("standing_angle", d.standing_angle),
            min_hinge_angle: t.get("min_hinge_angle", d.min_hinge_angle),
            min_knee_angle: t.get("min_knee_angle", d.min_knee_angle),
            min_back_angle: t.get("min_back_angle", d.min_back_angle),
        }
    }
}

pub struct HipHingeAnalyzer {
    thresholds: HipHingeThresholds,
    phase: HipHingePhase,
    max_trunk: PeakTracker,
    faults: RepFaults,
}

impl HipHingeAnalyzer {
    pub fn new(thresholds: HipHingeThresholds) -> Self {
        Self {
            thresholds,
            phase: HipHingePhase::Standing,
            max_trunk: PeakTracker::new(),
            faults: RepFaults::new(),
        }
    }

    pub fn from_thresholds(t: &Thresholds) -> Self {
        Self::new(HipHingeThresholds::from_thresholds(t))
    }

    pub fn phase(&self) -> HipHingePhase {
        self.phase
    }
}

impl Default for HipHingeAnalyzer {
    fn default() -> Self {
        Self::new(HipHingeThresholds::default())
    }
}

impl ExerciseAnalyzer for HipHingeAnalyzer {
    fn name(&self) -> &'static str {
        "hip-hinge"
    }

    fn required_landmarks(&self) -> &'static [usize] {
        &REQUIRED_LANDMARKS
    }

    fn analyze(&mut self, frame: &Frame, ctx: &FrameContext) -> AnalysisResult {
        let body = Midline::from_frame(frame);
        let trunk = signed_tilt(&body.hip, &body.shoulder).abs();
        let knee = mean_knee_angle(frame);
        let back = angle_between(&body.ear, &body.shoulder, &body.hip);

        let previous = self.phase;
        let next = if trunk >= self.thresholds.standing_angle {
            HipHingePhase::Hinging
        } else {
            HipHingePhase::Standing
        };

        if next == HipHingePhase::Hinging {
            if previous == HipHingePhase::Standing {
                self.faults.clear();
                self.max_trunk.reset();
            }
            self.max_trunk.update(trunk);
            self.faults.check(knee < self.thresholds.min_knee_angle, FormFault::SquattingNotHinging);
            self.faults.check(back < self.thresholds.min_back_angle, FormFault::RoundedBack);
        }

        if next != previous {
            debug!(from = previous.name(), to = next.name(), trunk, "hip hinge phase change");
        }
        self.phase = next;

        let score = base_form_score(&frame.landmarks, &REQUIRED_LANDMARKS);
        let confidence = average_visibility(&frame.landmarks, &REQUIRED_LANDMARKS);
        let mut result = AnalysisResult::new(next.name(), score, confidence);

        let debug = ctx.debug.then(|| DebugTelemetry {
            primary_angle: Some(trunk),
            trunk_lean: Some(back),
            peak_signal: self.max_trunk.value(),
            queued_faults: self.faults.codes(),
            ..DebugTelemetry::default()
        });

        if previous == HipHingePhase::Hinging && next == HipHingePhase::Standing {
            let deepest = self.max_trunk.value_or_zero();
            self.max_trunk.reset();
            if deepest >= self.thresholds.min_hinge_angle {
                let findings = self.faults.drain_findings(frame.timestamp_ms);
                let feedback = rep_feedback(&findings, None);
                result = result.completed(findings, Some(feedback));
            } else {
                debug!(deepest, "shallow hinge ignored");
                self.faults.clear();
            }
        }

        result.with_debug(debug)
    }

    fn reset(&mut self) {
        let thresholds = self.thresholds.clone();
        *self = Self::new(thresholds);
    }
}
