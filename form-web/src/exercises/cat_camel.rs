//! Cat-camel analyzer (quadruped spinal flexion / extension)
//!
//! The head drops below the shoulder line as the spine rounds (cat) and
//! lifts above it as the spine arches (camel). A rep is one visit to each
//! end, finished by the return to neutral. Going back to an end already
//! visited, or resting in neutral too long, abandons the half-done rep.

use tracing::debug;

use crate::analysis::{AnalysisResult, DebugTelemetry, FormFault, PeakTracker, RepFaults, Thresholds};
use crate::bridge::{
    Frame, LEFT_EAR, LEFT_ELBOW, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, RIGHT_EAR,
    RIGHT_ELBOW, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use crate::geometry::{average_visibility, base_form_score, horizontal_offset};

use super::analyzer::{rep_feedback, ExerciseAnalyzer, FrameContext};
use super::body::{mean_elbow_angle, Midline};

const REQUIRED_LANDMARKS: [usize; 12] = [
    LEFT_EAR, RIGHT_EAR,
    LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_ELBOW, RIGHT_ELBOW,
    LEFT_WRIST, RIGHT_WRIST,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatCamelPhase {
    Neutral,
    Cat,
    Camel,
}

impl CatCamelPhase {
    pub fn name(&self) -> &'static str {
        match self {
            CatCamelPhase::Neutral => "neutral",
            CatCamelPhase::Cat => "cat",
            CatCamelPhase::Camel => "camel",
        }
    }
}

/// Offsets are fractions of torso length, angles in degrees
#[derive(Clone, Debug, PartialEq)]
pub struct CatCamelThresholds {
    /// Head this far below the shoulder line reads as cat
    pub flexion_threshold: f32,
    /// Head this far above the shoulder line reads as camel
    pub extension_threshold: f32,
    /// Head within this band of the shoulder line reads as neutral
    pub neutral_band: f32,
    pub max_hip_offset: f32,
    pub min_elbow_angle: f32,
    /// Longest pause in neutral (ms) between the two ends of one rep
    pub max_rest_ms: f64,
}

impl Default for CatCamelThresholds {
    fn default() -> Self {
        Self {
            flexion_threshold: 0.15,
            extension_threshold: 0.15,
            neutral_band: 0.08,
            max_hip_offset: 0.25,
            min_elbow_angle: 150.0,
            max_rest_ms: 2000.0,
        }
    }
}

impl CatCamelThresholds {
    pub fn from_thresholds(t: &Thresholds) -> Self {
        let d = Self::default();
        Self {
            flexion_threshold: t.get("flexion_threshold", d.flexion_threshold),
            extension_threshold: t.get("extension_threshold", d.extension_threshold),
            neutral_band: t.get("neutral_band", d.neutral_band),
            max_hip_offset: t.get("max_hip_offset", d.max_hip_offset),
            min_elbow_angle: t.get("min_elbow_angle", d.min_elbow_angle),
            max_rest_ms: t.get_f64("max_rest_ms", d.max_rest_ms),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct CatCamelSignals {
    /// Positive = head above the shoulder line
    head_offset: f32,
    hip_offset: f32,
    elbow_angle: f32,
}

pub struct CatCamelAnalyzer {
    thresholds: CatCamelThresholds,
    phase: CatCamelPhase,
    visited_cat: bool,
    visited_camel: bool,
    /// First neutral frame of a pause between the two ends
    rest_started_ms: Option<f64>,
    /// Largest head excursion this rep, either direction
    peak_excursion: PeakTracker,
    faults: RepFaults,
}

impl CatCamelAnalyzer {
    pub fn new(thresholds: CatCamelThresholds) -> Self {
        Self {
            thresholds,
            phase: CatCamelPhase::Neutral,
            visited_cat: false,
            visited_camel: false,
            rest_started_ms: None,
            peak_excursion: PeakTracker::new(),
            faults: RepFaults::new(),
        }
    }

    pub fn from_thresholds(t: &Thresholds) -> Self {
        Self::new(CatCamelThresholds::from_thresholds(t))
    }

    pub fn phase(&self) -> CatCamelPhase {
        self.phase
    }

    fn measure(frame: &Frame) -> CatCamelSignals {
        let body = Midline::from_frame(frame);
        let torso = body.torso_length();
        let head_offset = if torso > 1e-4 { (body.shoulder.y - body.ear.y) / torso } else { 0.0 };

        CatCamelSignals {
            head_offset,
            hip_offset: horizontal_offset(&body.hip, &body.knee, torso),
            elbow_angle: mean_elbow_angle(frame),
        }
    }

    fn classify(&self, offset: f32) -> CatCamelPhase {
        let t = &self.thresholds;
        if offset >= t.extension_threshold {
            CatCamelPhase::Camel
        } else if offset <= -t.flexion_threshold {
            CatCamelPhase::Cat
        } else if offset.abs() < t.neutral_band {
            CatCamelPhase::Neutral
        } else {
            // Between the band and an end: hold the current phase
            self.phase
        }
    }

    fn in_rep(&self) -> bool {
        self.visited_cat || self.visited_camel
    }

    fn visited(&self, phase: CatCamelPhase) -> bool {
        match phase {
            CatCamelPhase::Cat => self.visited_cat,
            CatCamelPhase::Camel => self.visited_camel,
            CatCamelPhase::Neutral => false,
        }
    }

    /// Drop whatever the current rep has accumulated
    fn start_rep(&mut self) {
        self.visited_cat = false;
        self.visited_camel = false;
        self.rest_started_ms = None;
        self.peak_excursion.reset();
        self.faults.clear();
    }
}

impl Default for CatCamelAnalyzer {
    fn default() -> Self {
        Self::new(CatCamelThresholds::default())
    }
}

impl ExerciseAnalyzer for CatCamelAnalyzer {
    fn name(&self) -> &'static str {
        "cat-camel"
    }

    fn required_landmarks(&self) -> &'static [usize] {
        &REQUIRED_LANDMARKS
    }

    fn analyze(&mut self, frame: &Frame, ctx: &FrameContext) -> AnalysisResult {
        let signals = Self::measure(frame);
        let previous = self.phase;
        let next = self.classify(signals.head_offset);

        if next == CatCamelPhase::Neutral && self.in_rep() {
            let rest_started = *self.rest_started_ms.get_or_insert(frame.timestamp_ms);
            if frame.timestamp_ms - rest_started > self.thresholds.max_rest_ms {
                debug!(rested_ms = frame.timestamp_ms - rest_started, "cat-camel half rep abandoned");
                self.start_rep();
            }
        } else {
            self.rest_started_ms = None;
        }

        let leaving_neutral = previous == CatCamelPhase::Neutral && next != CatCamelPhase::Neutral;
        if leaving_neutral && (!self.in_rep() || self.visited(next)) {
            self.start_rep();
        }
        match next {
            CatCamelPhase::Cat => self.visited_cat = true,
            CatCamelPhase::Camel => self.visited_camel = true,
            CatCamelPhase::Neutral => {}
        }

        if self.in_rep() {
            self.peak_excursion.update(signals.head_offset.abs());
            self.faults.check(signals.hip_offset > self.thresholds.max_hip_offset, FormFault::HipsNotOverKnees);
            self.faults.check(signals.elbow_angle < self.thresholds.min_elbow_angle, FormFault::ArmsBent);
        }

        if next != previous {
            debug!(from = previous.name(), to = next.name(), offset = signals.head_offset, "cat-camel phase change");
        }
        self.phase = next;

        let score = base_form_score(&frame.landmarks, &REQUIRED_LANDMARKS);
        let confidence = average_visibility(&frame.landmarks, &REQUIRED_LANDMARKS);
        let mut result = AnalysisResult::new(next.name(), score, confidence);

        let debug = ctx.debug.then(|| DebugTelemetry {
            primary_angle: Some(signals.head_offset),
            knee_forward: Some(signals.hip_offset),
            peak_signal: self.peak_excursion.value(),
            queued_faults: self.faults.codes(),
            ..DebugTelemetry::default()
        });

        let finished = previous != CatCamelPhase::Neutral
            && next == CatCamelPhase::Neutral
            && self.visited_cat
            && self.visited_camel;
        if finished {
            let findings = self.faults.drain_findings(frame.timestamp_ms);
            let feedback = rep_feedback(&findings, None);
            self.start_rep();
            result = result.completed(findings, Some(feedback));
        }

        result.with_debug(debug)
    }

    fn reset(&mut self) {
        let thresholds = self.thresholds.clone();
        *self = Self::new(thresholds);
    }
}
