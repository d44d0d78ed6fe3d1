//! Prone press-up / cobra analyzer
//!
//! prone → lift → hold → lower → prone, driven by the elevation of the
//! shoulders above the hips. The rep is counted when the hold is released;
//! pressing back into the hold before reaching prone starts the next rep.

use tracing::debug;

use crate::analysis::{AnalysisResult, DebugTelemetry, FormFault, PeakTracker, RepFaults, Thresholds};
use crate::bridge::{
    Frame, LEFT_ELBOW, LEFT_HIP, LEFT_SHOULDER, LEFT_WRIST, RIGHT_ELBOW, RIGHT_HIP,
    RIGHT_SHOULDER, RIGHT_WRIST,
};
use crate::geometry::{average_visibility, base_form_score, elevation};

use super::analyzer::{rep_feedback, ExerciseAnalyzer, FrameContext};
use super::body::{mean_elbow_angle, Midline};

const REQUIRED_LANDMARKS: [usize; 8] = [
    LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_ELBOW, RIGHT_ELBOW,
    LEFT_WRIST, RIGHT_WRIST,
    LEFT_HIP, RIGHT_HIP,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProneExtensionPhase {
    Prone,
    Lift,
    Hold,
    Lower,
}

impl ProneExtensionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            ProneExtensionPhase::Prone => "prone",
            ProneExtensionPhase::Lift => "lift",
            ProneExtensionPhase::Hold => "hold",
            ProneExtensionPhase::Lower => "lower",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProneExtensionThresholds {
    /// Elevation below this counts as lying flat
    pub prone_angle: f32,
    /// Elevation at or above this counts as the top hold
    pub hold_angle: f32,
    /// How far under `hold_angle` the hold survives
    pub release_hysteresis: f32,
    pub min_hold_ms: f64,
    pub max_elbow_angle: f32,
}

impl Default for ProneExtensionThresholds {
    fn default() -> Self {
        Self {
            prone_angle: 10.0,
            hold_angle: 25.0,
            release_hysteresis: 5.0,
            min_hold_ms: 1000.0,
            max_elbow_angle: 170.0,
        }
    }
}

impl ProneExtensionThresholds {
    pub fn from_thresholds(t: &Thresholds) -> Self {
        let d = Self::default();
        Self {
            prone_angle: t.get("prone_angle", d.prone_angle),
            hold_angle: t.get("hold_angle", d.hold_angle),
            release_hysteresis: t.get("release_hysteresis", d.release_hysteresis),
            min_hold_ms: t.get_f64("min_hold_ms", d.min_hold_ms),
            max_elbow_angle: t.get("max_elbow_angle", d.max_elbow_angle),
        }
    }
}

pub struct ProneExtensionAnalyzer {
    thresholds: ProneExtensionThresholds,
    phase: ProneExtensionPhase,
    hold_started_ms: Option<f64>,
    peak_elevation: PeakTracker,
    faults: RepFaults,
}

impl ProneExtensionAnalyzer {
    pub fn new(thresholds: ProneExtensionThresholds) -> Self {
        Self {
            thresholds,
            phase: ProneExtensionPhase::Prone,
            hold_started_ms: None,
            peak_elevation: PeakTracker::new(),
            faults: RepFaults::new(),
        }
    }

    pub fn from_thresholds(t: &Thresholds) -> Self {
        Self::new(ProneExtensionThresholds::from_thresholds(t))
    }

    pub fn phase(&self) -> ProneExtensionPhase {
        self.phase
    }

    fn classify(&self, elevation: f32) -> ProneExtensionPhase {
        let t = &self.thresholds;
        match self.phase {
            ProneExtensionPhase::Hold if elevation >= t.hold_angle - t.release_hysteresis => {
                ProneExtensionPhase::Hold
            }
            ProneExtensionPhase::Hold => ProneExtensionPhase::Lower,
            _ if elevation < t.prone_angle => ProneExtensionPhase::Prone,
            ProneExtensionPhase::Lower if elevation < t.hold_angle => ProneExtensionPhase::Lower,
            _ if elevation >= t.hold_angle => ProneExtensionPhase::Hold,
            _ => ProneExtensionPhase::Lift,
        }
    }
}

impl Default for ProneExtensionAnalyzer {
    fn default() -> Self {
        Self::new(ProneExtensionThresholds::default())
    }
}

impl ExerciseAnalyzer for ProneExtensionAnalyzer {
    fn name(&self) -> &'static str {
        "prone-extension"
    }

    fn required_landmarks(&self) -> &'static [usize] {
        &REQUIRED_LANDMARKS
    }

    fn analyze(&mut self, frame: &Frame, ctx: &FrameContext) -> AnalysisResult {
        let body = Midline::from_frame(frame);
        let lift = elevation(&body.hip, &body.shoulder);
        let elbow = mean_elbow_angle(frame);

        let previous = self.phase;
        let next = self.classify(lift);

        // Pressing back up from a partial lower starts a fresh rep too
        let starting = matches!(previous, ProneExtensionPhase::Prone | ProneExtensionPhase::Lower);
        if starting && matches!(next, ProneExtensionPhase::Lift | ProneExtensionPhase::Hold) {
            self.faults.clear();
            self.peak_elevation.reset();
            self.hold_started_ms = None;
        }
        if matches!(next, ProneExtensionPhase::Lift | ProneExtensionPhase::Hold) {
            self.peak_elevation.update(lift);
            self.faults.check(elbow > self.thresholds.max_elbow_angle, FormFault::ElbowLock);
        }
        if next == ProneExtensionPhase::Hold && previous != ProneExtensionPhase::Hold {
            self.hold_started_ms = Some(frame.timestamp_ms);
        }

        if next != previous {
            debug!(from = previous.name(), to = next.name(), elevation = lift, "prone extension phase change");
        }
        self.phase = next;

        let hold_ms = self.hold_started_ms.map(|start| frame.timestamp_ms - start);

        let score = base_form_score(&frame.landmarks, &REQUIRED_LANDMARKS);
        let confidence = average_visibility(&frame.landmarks, &REQUIRED_LANDMARKS);
        let mut result = AnalysisResult::new(next.name(), score, confidence);

        let debug = ctx.debug.then(|| DebugTelemetry {
            primary_angle: Some(lift),
            trunk_lean: Some(elbow),
            peak_signal: self.peak_elevation.value(),
            queued_faults: self.faults.codes(),
            ..DebugTelemetry::default()
        });

        if previous == ProneExtensionPhase::Hold && next == ProneExtensionPhase::Lower {
            let held = hold_ms.unwrap_or(0.0);
            self.faults.check(held < self.thresholds.min_hold_ms, FormFault::ShortHold);
            let findings = self.faults.drain_findings(frame.timestamp_ms);
            let feedback = rep_feedback(&findings, None);
            debug!(held_ms = held, "prone extension hold released");
            self.hold_started_ms = None;
            result = result.completed(findings, Some(feedback));
        }

        result.with_debug(debug)
    }

    fn reset(&mut self) {
        let thresholds = self.thresholds.clone();
        *self = Self::new(thresholds);
    }
}
