//! Standing side bend analyzer (front view)
//!
//! Tracks the signed tilt of the shoulder midpoint over the hip midpoint.
//! Hip position and shoulder width are re-baselined on every centered
//! frame, so drift between reps is not counted against the next one.

use tracing::debug;

use crate::analysis::{AnalysisResult, DebugTelemetry, FormFault, PeakTracker, RepFaults, Thresholds};
use crate::bridge::{Frame, LEFT_HIP, LEFT_SHOULDER, RIGHT_HIP, RIGHT_SHOULDER};
use crate::geometry::{average_visibility, base_form_score, distance_2d, signed_tilt};

use super::analyzer::{rep_feedback, ExerciseAnalyzer, FrameContext};
use super::body::Midline;

const REQUIRED_LANDMARKS: [usize; 4] = [LEFT_SHOULDER, RIGHT_SHOULDER, LEFT_HIP, RIGHT_HIP];

/// Sides are in image coordinates: left = towards smaller x
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SideBendPhase {
    Center,
    BendingLeft,
    BendingRight,
}

impl SideBendPhase {
    pub fn name(&self) -> &'static str {
        match self {
            SideBendPhase::Center => "center",
            SideBendPhase::BendingLeft => "bending_left",
            SideBendPhase::BendingRight => "bending_right",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, SideBendPhase::Center)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SideBendThresholds {
    pub bend_angle: f32,
    pub center_angle: f32,
    pub min_rep_angle: f32,
    /// Sideways hip travel as a fraction of baseline shoulder width
    pub max_hip_shift: f32,
    /// Apparent shoulder width over the baseline; lower means twisting
    pub min_shoulder_width_ratio: f32,
}

impl Default for SideBendThresholds {
    fn default() -> Self {
        Self {
            bend_angle: 15.0,
            center_angle: 8.0,
            min_rep_angle: 20.0,
            max_hip_shift: 0.25,
            min_shoulder_width_ratio: 0.75,
        }
    }
}

impl SideBendThresholds {
    pub fn from_thresholds(t: &Thresholds) -> Self {
        let d = Self::default();
        Self {
            bend_angle: t.get("bend_angle", d.bend_angle),
            center_angle: t.get("center_angle", d.center_angle),
            min_rep_angle: t.get("min_rep_angle", d.min_rep_angle),
            max_hip_shift: t.get("max_hip_shift", d.max_hip_shift),
            min_shoulder_width_ratio: t.get("min_shoulder_width_ratio", d.min_shoulder_width_ratio),
        }
    }
}

/// Upright reference captured while centered
#[derive(Clone, Copy, Debug, PartialEq)]
struct Baseline {
    hip_x: f32,
    shoulder_width: f32,
}

pub struct SideBendAnalyzer {
    thresholds: SideBendThresholds,
    phase: SideBendPhase,
    baseline: Option<Baseline>,
    peak_tilt: PeakTracker,
    faults: RepFaults,
}

impl SideBendAnalyzer {
    pub fn new(thresholds: SideBendThresholds) -> Self {
        Self {
            thresholds,
            phase: SideBendPhase::Center,
            baseline: None,
            peak_tilt: PeakTracker::new(),
            faults: RepFaults::new(),
        }
    }

    pub fn from_thresholds(t: &Thresholds) -> Self {
        Self::new(SideBendThresholds::from_thresholds(t))
    }

    pub fn phase(&self) -> SideBendPhase {
        self.phase
    }

    fn classify(&self, tilt: f32) -> SideBendPhase {
        let t = &self.thresholds;
        if tilt <= -t.bend_angle {
            SideBendPhase::BendingLeft
        } else if tilt >= t.bend_angle {
            SideBendPhase::BendingRight
        } else if tilt.abs() < t.center_angle {
            SideBendPhase::Center
        } else {
            self.phase
        }
    }

    /// (hip shift ratio, shoulder width ratio) against the baseline
    fn drift(&self, hip_x: f32, shoulder_width: f32) -> Option<(f32, f32)> {
        let base = self.baseline?;
        if base.shoulder_width <= 1e-4 {
            return None;
        }
        Some((
            (hip_x - base.hip_x).abs() / base.shoulder_width,
            shoulder_width / base.shoulder_width,
        ))
    }
}

impl Default for SideBendAnalyzer {
    fn default() -> Self {
        Self::new(SideBendThresholds::default())
    }
}

impl ExerciseAnalyzer for SideBendAnalyzer {
    fn name(&self) -> &'static str {
        "side-bend"
    }

    fn required_landmarks(&self) -> &'static [usize] {
        &REQUIRED_LANDMARKS
    }

    fn analyze(&mut self, frame: &Frame, ctx: &FrameContext) -> AnalysisResult {
        let body = Midline::from_frame(frame);
        let tilt = signed_tilt(&body.hip, &body.shoulder);
        let shoulder_width = distance_2d(frame.get(LEFT_SHOULDER), frame.get(RIGHT_SHOULDER));

        let previous = self.phase;
        let next = self.classify(tilt);

        if !previous.is_active() && next.is_active() {
            self.faults.clear();
            self.peak_tilt.reset();
        }

        let drift = self.drift(body.hip.x, shoulder_width);
        if next.is_active() {
            self.peak_tilt.update(tilt.abs());
            if let Some((hip_shift, width_ratio)) = drift {
                self.faults.check(hip_shift > self.thresholds.max_hip_shift, FormFault::HipsShifting);
                self.faults.check(
                    width_ratio < self.thresholds.min_shoulder_width_ratio,
                    FormFault::TorsoRotating,
                );
            }
        } else {
            self.baseline = Some(Baseline { hip_x: body.hip.x, shoulder_width });
        }

        if next != previous {
            debug!(from = previous.name(), to = next.name(), tilt, "side bend phase change");
        }
        self.phase = next;

        let score = base_form_score(&frame.landmarks, &REQUIRED_LANDMARKS);
        let confidence = average_visibility(&frame.landmarks, &REQUIRED_LANDMARKS);
        let mut result = AnalysisResult::new(next.name(), score, confidence);

        let peak = self.peak_tilt.value();
        let debug = ctx.debug.then(|| DebugTelemetry {
            primary_angle: Some(tilt),
            trunk_lean: Some(tilt.abs()),
            knee_forward: drift.map(|(shift, _)| shift),
            peak_signal: peak,
            queued_faults: self.faults.codes(),
            ..DebugTelemetry::default()
        });

        if previous.is_active() && !next.is_active() {
            let deepest = self.peak_tilt.value_or_zero();
            self.peak_tilt.reset();
            if deepest >= self.thresholds.min_rep_angle {
                let findings = self.faults.drain_findings(frame.timestamp_ms);
                let feedback = rep_feedback(&findings, None);
                result = result.completed(findings, Some(feedback));
            } else {
                debug!(deepest, "shallow side bend ignored");
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
