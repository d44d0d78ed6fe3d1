//! Squat analyzer
//!
//! standing → descending → bottom → ascending → standing, driven by the
//! thigh angle from vertical (0° standing, 90° thighs parallel), viewed
//! from the side.
//!
//! Per-rep checks: trunk lean, knees drifting past the ankles, peak descent
//! speed (evaluated once when the descent ends) and final depth. Completed
//! reps are also scored against the reference thigh-angle curve.

use tracing::debug;

use crate::analysis::{
    AnalysisResult, DebugTelemetry, Finding, FormFault, PeakTracker, RepFaults, Thresholds,
};
use crate::bridge::{
    Frame, LEFT_ANKLE, LEFT_FOOT_INDEX, LEFT_HEEL, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER,
    RIGHT_ANKLE, RIGHT_FOOT_INDEX, RIGHT_HEEL, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER,
};
use crate::geometry::{
    angle_from_vertical, average_visibility, base_form_score, distance_2d, horizontal_offset,
    signed_tilt, VelocityTracker,
};
use crate::trajectory::{ReferenceTrajectory, TrajectoryComparator, TrajectoryScore};

use super::analyzer::{rep_feedback, ExerciseAnalyzer, FrameContext};
use super::body::Midline;

const REQUIRED_LANDMARKS: [usize; 12] = [
    LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
    LEFT_ANKLE, RIGHT_ANKLE,
    LEFT_HEEL, RIGHT_HEEL,
    LEFT_FOOT_INDEX, RIGHT_FOOT_INDEX,
];

/// Squat phases
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SquatPhase {
    Standing,
    Descending,
    Bottom,
    Ascending,
}

impl SquatPhase {
    pub fn name(&self) -> &'static str {
        match self {
            SquatPhase::Standing => "standing",
            SquatPhase::Descending => "descending",
            SquatPhase::Bottom => "bottom",
            SquatPhase::Ascending => "ascending",
        }
    }

    /// Mid-repetition
    pub fn is_active(&self) -> bool {
        !matches!(self, SquatPhase::Standing)
    }
}

/// Squat thresholds (degrees unless noted)
#[derive(Clone, Debug, PartialEq)]
pub struct SquatThresholds {
    /// Thigh angle below this counts as standing
    pub standing_angle: f32,
    /// Thigh angle at or above this counts as bottom / full depth
    pub min_depth_angle: f32,
    /// Deepest angle a movement must reach to count as a rep
    pub min_rep_angle: f32,
    /// Trunk lean from vertical
    pub max_trunk_lean: f32,
    /// Knee travel past the ankle towards the toes, as a fraction of shin length
    pub max_knee_forward: f32,
    /// Hip drop speed in thigh lengths per second
    pub max_descent_speed: f32,
    /// How far below the deepest angle counts as rising
    pub ascent_hysteresis: f32,
    /// DTW distance that scores 0
    pub dtw_max_distance: f32,
}

impl Default for SquatThresholds {
    fn default() -> Self {
        Self {
            standing_angle: 20.0,
            min_depth_angle: 70.0,
            min_rep_angle: 40.0,
            max_trunk_lean: 45.0,
            max_knee_forward: 0.35,
            max_descent_speed: 3.0,
            ascent_hysteresis: 2.0,
            dtw_max_distance: crate::trajectory::DEFAULT_MAX_DISTANCE,
        }
    }
}

impl SquatThresholds {
    pub fn from_thresholds(t: &Thresholds) -> Self {
        let d = Self::default();
        Self {
            standing_angle: t.get("standing_angle", d.standing_angle),
            min_depth_angle: t.get("min_depth_angle", d.min_depth_angle),
            min_rep_angle: t.get("min_rep_angle", d.min_rep_angle),
            max_trunk_lean: t.get("max_trunk_lean", d.max_trunk_lean),
            max_knee_forward: t.get("max_knee_forward", d.max_knee_forward),
            max_descent_speed: t.get("max_descent_speed", d.max_descent_speed),
            ascent_hysteresis: t.get("ascent_hysteresis", d.ascent_hysteresis),
            dtw_max_distance: t.get("dtw_max_distance", d.dtw_max_distance),
        }
    }
}

/// Geometric signals for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SquatSignals {
    pub thigh_angle: f32,
    pub trunk_lean: f32,
    /// Knee ahead of the ankle towards the toes (shin lengths); negative
    /// when the knee sits behind the ankle
    pub knee_forward: f32,
    /// Hip drop speed (thigh lengths / s); `None` until two frames are seen
    pub descent_speed: Option<f32>,
}

impl SquatSignals {
    pub fn from_angle(thigh_angle: f32) -> Self {
        Self { thigh_angle, ..Self::default() }
    }
}

/// A rep that just finished
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedSquat {
    pub findings: Vec<Finding>,
    pub trajectory: TrajectoryScore,
    /// Deepest thigh angle reached during the rep
    pub max_thigh_angle: f32,
}

/// Outcome of one state-machine step
#[derive(Clone, Debug, PartialEq)]
pub struct SquatStep {
    pub phase: SquatPhase,
    pub completed: Option<CompletedSquat>,
}

/// Squat phase tracker and rep counter
pub struct SquatAnalyzer {
    thresholds: SquatThresholds,
    phase: SquatPhase,
    /// Deepest thigh angle this rep
    max_thigh: PeakTracker,
    /// Fastest hip drop during the current descent
    peak_descent: PeakTracker,
    hip_velocity: VelocityTracker,
    faults: RepFaults,
    trajectory: TrajectoryComparator,
    last_rep_depth: Option<f32>,
}

impl SquatAnalyzer {
    pub fn new(thresholds: SquatThresholds) -> Self {
        let reference =
            ReferenceTrajectory::squat_thigh().with_max_distance(thresholds.dtw_max_distance);
        Self {
            thresholds,
            phase: SquatPhase::Standing,
            max_thigh: PeakTracker::new(),
            peak_descent: PeakTracker::new(),
            hip_velocity: VelocityTracker::new(),
            faults: RepFaults::new(),
            trajectory: TrajectoryComparator::new(reference),
            last_rep_depth: None,
        }
    }

    pub fn from_thresholds(t: &Thresholds) -> Self {
        Self::new(SquatThresholds::from_thresholds(t))
    }

    pub fn phase(&self) -> SquatPhase {
        self.phase
    }

    pub fn thresholds(&self) -> &SquatThresholds {
        &self.thresholds
    }

    /// Deepest thigh angle of the most recently completed rep
    pub fn last_rep_depth(&self) -> Option<f32> {
        self.last_rep_depth
    }

    /// Fault codes queued for the rep in progress
    pub fn queued_faults(&self) -> Vec<String> {
        self.faults.codes()
    }

    /// Compute signals for a frame (also advances the hip velocity tracker)
    pub fn measure(&mut self, frame: &Frame) -> SquatSignals {
        let body = Midline::from_frame(frame);

        let thigh_length = distance_2d(&body.hip, &body.knee);
        let shin_length = distance_2d(&body.knee, &body.ankle);

        // y grows downwards, so a positive rate is the hip dropping
        let descent_speed = self
            .hip_velocity
            .update(body.hip.y, frame.timestamp_ms)
            .map(|v| if thigh_length > 1e-4 { v / thigh_length } else { 0.0 });

        SquatSignals {
            thigh_angle: angle_from_vertical(&body.hip, &body.knee),
            trunk_lean: signed_tilt(&body.hip, &body.shoulder).abs(),
            knee_forward: knee_forward(&body, shin_length),
            descent_speed,
        }
    }

    fn classify(&self, angle: f32) -> SquatPhase {
        let t = &self.thresholds;
        if angle < t.standing_angle {
            return SquatPhase::Standing;
        }
        if angle >= t.min_depth_angle {
            return SquatPhase::Bottom;
        }

        match self.phase {
            SquatPhase::Standing => SquatPhase::Descending,
            SquatPhase::Descending => {
                // Only turn around once the rep is deep enough to count,
                // so jitter near the top keeps reading as descent
                let deepest = self.max_thigh.value_or_zero();
                if deepest >= t.min_rep_angle && angle < deepest - t.ascent_hysteresis {
                    SquatPhase::Ascending
                } else {
                    SquatPhase::Descending
                }
            }
            SquatPhase::Bottom | SquatPhase::Ascending => SquatPhase::Ascending,
        }
    }

    fn start_rep(&mut self) {
        self.faults.clear();
        self.max_thigh.reset();
        self.peak_descent.reset();
        self.trajectory.clear();
    }

    /// Advance the state machine with one frame's signals
    pub fn update(&mut self, signals: SquatSignals, timestamp_ms: f64) -> SquatStep {
        let angle = signals.thigh_angle;
        let previous = self.phase;

        if !previous.is_active() && angle >= self.thresholds.standing_angle {
            self.start_rep();
        }
        if angle >= self.thresholds.standing_angle {
            self.max_thigh.update(angle);
        }

        let next = self.classify(angle);

        // Velocity rule: peak over the whole descent, judged once it ends.
        // A drop from standing straight to bottom is a one-frame descent.
        let leaving_top = !previous.is_active() && next.is_active();
        let in_descent = previous == SquatPhase::Descending || leaving_top;
        if in_descent || next == SquatPhase::Descending {
            if let Some(speed) = signals.descent_speed {
                self.peak_descent.update(speed);
            }
        }
        if in_descent && next != SquatPhase::Descending {
            self.faults.check(
                self.peak_descent.exceeds(self.thresholds.max_descent_speed),
                FormFault::SpeedTooFast,
            );
            self.peak_descent.reset();
        }

        if next.is_active() {
            self.faults.check(signals.trunk_lean > self.thresholds.max_trunk_lean, FormFault::ExcessiveLean);
            self.faults.check(signals.knee_forward > self.thresholds.max_knee_forward, FormFault::KneesForward);
            self.trajectory.record(angle);
        }

        if next != previous {
            debug!(from = previous.name(), to = next.name(), angle, "squat phase change");
        }
        self.phase = next;

        let completed = if previous.is_active() && next == SquatPhase::Standing {
            self.finish_rep(angle, timestamp_ms)
        } else {
            None
        };

        SquatStep { phase: next, completed }
    }

    fn finish_rep(&mut self, angle: f32, timestamp_ms: f64) -> Option<CompletedSquat> {
        let deepest = self.max_thigh.value_or_zero();
        self.max_thigh.reset();
        self.peak_descent.reset();

        if deepest < self.thresholds.min_rep_angle {
            debug!(deepest, "shallow squat ignored");
            self.trajectory.clear();
            return None;
        }

        self.faults.check(deepest < self.thresholds.min_depth_angle, FormFault::InsufficientDepth);
        self.trajectory.record(angle);

        let findings = self.faults.drain_findings(timestamp_ms);
        let trajectory = self.trajectory.finish_rep();
        self.last_rep_depth = Some(deepest);

        Some(CompletedSquat { findings, trajectory, max_thigh_angle: deepest })
    }
}

/// Signed by facing direction; without one the offset is unsigned
fn knee_forward(body: &Midline, shin_length: f32) -> f32 {
    let facing = body.facing();
    if facing == 0.0 {
        return horizontal_offset(&body.knee, &body.ankle, shin_length);
    }
    if shin_length <= 1e-4 {
        return 0.0;
    }
    (body.knee.x - body.ankle.x) * facing / shin_length
}

impl Default for SquatAnalyzer {
    fn default() -> Self {
        Self::new(SquatThresholds::default())
    }
}

impl ExerciseAnalyzer for SquatAnalyzer {
    fn name(&self) -> &'static str {
        "squat"
    }

    fn required_landmarks(&self) -> &'static [usize] {
        &REQUIRED_LANDMARKS
    }

    fn analyze(&mut self, frame: &Frame, ctx: &FrameContext) -> AnalysisResult {
        let signals = self.measure(frame);
        let step = self.update(signals, frame.timestamp_ms);

        let score = base_form_score(&frame.landmarks, &REQUIRED_LANDMARKS);
        let confidence = average_visibility(&frame.landmarks, &REQUIRED_LANDMARKS);
        let mut result = AnalysisResult::new(step.phase.name(), score, confidence);

        let debug = ctx.debug.then(|| DebugTelemetry {
            primary_angle: Some(signals.thigh_angle),
            trunk_lean: Some(signals.trunk_lean),
            knee_forward: Some(signals.knee_forward),
            descent_speed: signals.descent_speed,
            peak_signal: match &step.completed {
                Some(rep) => Some(rep.max_thigh_angle),
                None => self.max_thigh.value(),
            },
            queued_faults: match &step.completed {
                Some(rep) => rep.findings.iter().map(|f| f.kind.clone()).collect(),
                None => self.faults.codes(),
            },
        });

        if let Some(rep) = step.completed {
            let feedback = rep_feedback(&rep.findings, Some(&rep.trajectory));
            result = result
                .completed(rep.findings, Some(feedback))
                .with_trajectory_score(rep.trajectory.score);
        }

        result.with_debug(debug)
    }

    fn reset(&mut self) {
        let thresholds = self.thresholds.clone();
        *self = Self::new(thresholds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::test_support::squat_frame;

    fn scenario_thresholds() -> SquatThresholds {
        SquatThresholds {
            standing_angle: 20.0,
            min_depth_angle: 70.0,
            min_rep_angle: 40.0,
            ..SquatThresholds::default()
        }
    }

    fn run(analyzer: &mut SquatAnalyzer, angles: &[f32]) -> Vec<SquatStep> {
        angles
            .iter()
            .enumerate()
            .map(|(i, &a)| analyzer.update(SquatSignals::from_angle(a), i as f64 * 33.0))
            .collect()
    }

    #[test]
    fn test_full_rep_phase_sequence() {
        let mut analyzer = SquatAnalyzer::new(scenario_thresholds());
        let steps = run(&mut analyzer, &[10.0, 30.0, 50.0, 72.0, 50.0, 30.0, 10.0]);

        let phases: Vec<&str> = steps.iter().map(|s| s.phase.name()).collect();
        assert_eq!(
            phases,
            ["standing", "descending", "descending", "bottom", "ascending", "ascending", "standing"]
        );

        let completions: Vec<usize> = steps
            .iter()
            .enumerate()
            .filter(|(_, s)| s.completed.is_some())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(completions, vec![6]);

        let rep = steps[6].completed.as_ref().unwrap();
        assert_eq!(rep.max_thigh_angle, 72.0);
        assert!(rep.findings.is_empty());
        assert_eq!(analyzer.last_rep_depth(), Some(72.0));
    }

    #[test]
    fn test_shallow_movement_is_not_a_rep() {
        let mut analyzer = SquatAnalyzer::new(scenario_thresholds());
        let steps = run(&mut analyzer, &[10.0, 25.0, 35.0, 38.0, 30.0, 22.0, 10.0]);
        assert!(steps.iter().all(|s| s.completed.is_none()));
        assert_eq!(analyzer.phase(), SquatPhase::Standing);
        assert_eq!(analyzer.last_rep_depth(), None);
    }

    #[test]
    fn test_partial_rep_reports_depth() {
        let mut analyzer = SquatAnalyzer::new(scenario_thresholds());
        let steps = run(&mut analyzer, &[10.0, 30.0, 55.0, 45.0, 30.0, 10.0]);
        assert_eq!(steps[3].phase, SquatPhase::Ascending);
        let rep = steps[5].completed.as_ref().unwrap();
        let kinds: Vec<&str> = rep.findings.iter().map(|f| f.kind.as_str()).collect();
        assert_eq!(kinds, ["insufficient_depth"]);
    }

    #[test]
    fn test_peak_descent_speed_flagged_once() {
        let mut analyzer = SquatAnalyzer::new(SquatThresholds {
            max_descent_speed: 5.0,
            ..scenario_thresholds()
        });
        let frames = [
            (10.0, None),
            (30.0, Some(5.5)),
            (50.0, Some(6.0)),
            (65.0, Some(5.2)),
            (72.0, Some(1.0)),
            (50.0, Some(-3.0)),
            (30.0, Some(-3.0)),
            (10.0, Some(-2.0)),
        ];

        let mut completed = Vec::new();
        for (i, (angle, speed)) in frames.into_iter().enumerate() {
            let signals = SquatSignals { descent_speed: speed, ..SquatSignals::from_angle(angle) };
            if let Some(rep) = analyzer.update(signals, i as f64 * 33.0).completed {
                completed.push(rep);
            }
        }

        assert_eq!(completed.len(), 1);
        let speed_findings = completed[0]
            .findings
            .iter()
            .filter(|f| f.kind == "speed_too_fast")
            .count();
        assert_eq!(speed_findings, 1);
    }

    #[test]
    fn test_drop_straight_to_bottom_flagged() {
        let mut analyzer = SquatAnalyzer::new(SquatThresholds {
            max_descent_speed: 5.0,
            ..scenario_thresholds()
        });
        let frames = [
            (10.0, None),
            (75.0, Some(9.0)),
            (50.0, Some(-2.0)),
            (30.0, Some(-2.0)),
            (10.0, Some(-2.0)),
        ];

        let mut phases = Vec::new();
        let mut completed = Vec::new();
        for (i, (angle, speed)) in frames.into_iter().enumerate() {
            let signals = SquatSignals { descent_speed: speed, ..SquatSignals::from_angle(angle) };
            let step = analyzer.update(signals, i as f64 * 33.0);
            phases.push(step.phase.name());
            completed.extend(step.completed);
        }

        assert_eq!(phases, ["standing", "bottom", "ascending", "ascending", "standing"]);
        assert_eq!(completed.len(), 1);
        let speed_findings = completed[0]
            .findings
            .iter()
            .filter(|f| f.kind == "speed_too_fast")
            .count();
        assert_eq!(speed_findings, 1);
    }

    #[test]
    fn test_slow_descent_not_flagged() {
        let mut analyzer = SquatAnalyzer::new(SquatThresholds {
            max_descent_speed: 5.0,
            ..scenario_thresholds()
        });
        let mut findings = Vec::new();
        for (i, angle) in [10.0, 30.0, 50.0, 72.0, 50.0, 10.0].into_iter().enumerate() {
            let signals = SquatSignals { descent_speed: Some(2.0), ..SquatSignals::from_angle(angle) };
            if let Some(rep) = analyzer.update(signals, i as f64 * 33.0).completed {
                findings = rep.findings;
            }
        }
        assert!(findings.iter().all(|f| f.kind != "speed_too_fast"));
    }

    #[test]
    fn test_faults_cleared_between_reps() {
        let mut analyzer = SquatAnalyzer::new(scenario_thresholds());
        let leaning = |a: f32| SquatSignals { trunk_lean: 60.0, ..SquatSignals::from_angle(a) };

        let mut reps = Vec::new();
        for (i, s) in [
            leaning(10.0), leaning(40.0), leaning(75.0), leaning(40.0), leaning(10.0),
            SquatSignals::from_angle(40.0), SquatSignals::from_angle(75.0),
            SquatSignals::from_angle(40.0), SquatSignals::from_angle(10.0),
        ]
        .into_iter()
        .enumerate()
        {
            if let Some(rep) = analyzer.update(s, i as f64 * 33.0).completed {
                reps.push(rep);
            }
        }

        assert_eq!(reps.len(), 2);
        assert_eq!(reps[0].findings.len(), 1);
        assert_eq!(reps[0].findings[0].kind, "excessive_lean");
        assert!(reps[1].findings.is_empty());
    }

    #[test]
    fn test_analyze_frames_from_landmarks() {
        let mut analyzer = SquatAnalyzer::new(scenario_thresholds());
        let ctx = FrameContext { debug: true };

        let mut results = Vec::new();
        for (i, angle) in [5.0, 30.0, 55.0, 85.0, 85.0, 55.0, 30.0, 5.0].into_iter().enumerate() {
            let hip_y = 0.4 + 0.001 * angle;
            let frame = squat_frame(angle, hip_y, i as f64 * 100.0);
            results.push(analyzer.analyze(&frame, &ctx));
        }

        let reps: Vec<&AnalysisResult> = results.iter().filter(|r| r.rep_completed).collect();
        assert_eq!(reps.len(), 1);
        let rep = reps[0];
        assert_eq!(rep.phase, "standing");
        assert!(rep.trajectory_score.is_some());
        assert!(rep.feedback.as_deref().unwrap().contains("Rep score"));
        assert_eq!(rep.confidence, 1.0);
        assert_eq!(rep.form_score, 100.0);

        let debug = rep.debug.as_ref().unwrap();
        assert!((debug.peak_signal.unwrap() - 85.0).abs() < 0.5);
        assert!(debug.trunk_lean.unwrap() < 1.0);
    }

    #[test]
    fn test_knee_forward_signed_by_facing() {
        let mut analyzer = SquatAnalyzer::new(scenario_thresholds());

        // Knees behind the ankles, toes pointing to +x
        let mut frame = squat_frame(45.0, 0.4, 0.0);
        for i in [LEFT_ANKLE, RIGHT_ANKLE, LEFT_HEEL, RIGHT_HEEL, LEFT_FOOT_INDEX, RIGHT_FOOT_INDEX] {
            frame.landmarks[i].x += 0.1;
        }
        let behind = analyzer.measure(&frame);
        assert!(behind.knee_forward < -0.35);

        // Toes turned to -x: the same knee now sits ahead of the ankle
        let mut frame = squat_frame(45.0, 0.4, 0.0);
        for i in [LEFT_ANKLE, RIGHT_ANKLE, LEFT_HEEL, RIGHT_HEEL] {
            frame.landmarks[i].x += 0.1;
        }
        for i in [LEFT_FOOT_INDEX, RIGHT_FOOT_INDEX] {
            frame.landmarks[i].x -= 0.1;
        }
        let ahead = analyzer.measure(&frame);
        assert!(ahead.knee_forward > 0.35);
    }

    #[test]
    fn test_knees_behind_ankles_not_flagged() {
        let mut analyzer = SquatAnalyzer::new(scenario_thresholds());
        let ctx = FrameContext::default();

        let mut results = Vec::new();
        for (i, angle) in [5.0, 30.0, 55.0, 85.0, 55.0, 30.0, 5.0].into_iter().enumerate() {
            let mut frame = squat_frame(angle, 0.4 + 0.001 * angle, i as f64 * 100.0);
            // Feet planted 0.1 ahead of the knees in the facing direction
            for foot in [LEFT_ANKLE, RIGHT_ANKLE, LEFT_HEEL, RIGHT_HEEL, LEFT_FOOT_INDEX, RIGHT_FOOT_INDEX] {
                frame.landmarks[foot].x += 0.1;
            }
            results.push(analyzer.analyze(&frame, &ctx));
        }

        let rep = results.iter().find(|r| r.rep_completed).unwrap();
        assert!(rep.findings.iter().all(|f| f.kind != "knees_forward"));
    }
}
