//! Form faults and the per-rep fault queue
//!
//! Analyzers push faults on every mid-rep frame; the queue keeps each code
//! once and turns them into findings when the rep completes.

use super::result::{BodyPart, Finding, Severity};

/// Named form violations across all supported exercises
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormFault {
    // Squat
    ExcessiveLean,
    KneesForward,
    SpeedTooFast,
    InsufficientDepth,
    // Cat-camel
    HipsNotOverKnees,
    ArmsBent,
    // Side bend
    HipsShifting,
    TorsoRotating,
    // Hip hinge
    SquattingNotHinging,
    RoundedBack,
    // Prone extension
    ElbowLock,
    ShortHold,
}

impl FormFault {
    pub fn code(&self) -> &'static str {
        match self {
            FormFault::ExcessiveLean => "excessive_lean",
            FormFault::KneesForward => "knees_forward",
            FormFault::SpeedTooFast => "speed_too_fast",
            FormFault::InsufficientDepth => "insufficient_depth",
            FormFault::HipsNotOverKnees => "hips_not_over_knees",
            FormFault::ArmsBent => "arms_bent",
            FormFault::HipsShifting => "hips_shifting",
            FormFault::TorsoRotating => "torso_rotating",
            FormFault::SquattingNotHinging => "squatting_not_hinging",
            FormFault::RoundedBack => "rounded_back",
            FormFault::ElbowLock => "elbow_lock",
            FormFault::ShortHold => "short_hold",
        }
    }

    /// Coaching cue, suitable for display and speech
    pub fn message(&self) -> &'static str {
        match self {
            FormFault::ExcessiveLean => "Keep your chest up, you're leaning too far forward",
            FormFault::KneesForward => "Sit back into your hips, knees are drifting past your toes",
            FormFault::SpeedTooFast => "Slow down on the way down",
            FormFault::InsufficientDepth => "Try to go a little deeper",
            FormFault::HipsNotOverKnees => "Keep your hips stacked over your knees",
            FormFault::ArmsBent => "Keep your arms straight under your shoulders",
            FormFault::HipsShifting => "Keep your hips still and bend from the waist",
            FormFault::TorsoRotating => "Bend straight to the side without twisting",
            FormFault::SquattingNotHinging => "Push your hips back, don't bend your knees so much",
            FormFault::RoundedBack => "Keep your back flat as you hinge",
            FormFault::ElbowLock => "Keep a soft bend in your elbows",
            FormFault::ShortHold => "Hold the top position a little longer",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            FormFault::SpeedTooFast
            | FormFault::RoundedBack
            | FormFault::ExcessiveLean => Severity::Error,
            FormFault::InsufficientDepth | FormFault::ShortHold => Severity::Info,
            _ => Severity::Warning,
        }
    }

    pub fn body_part(&self) -> BodyPart {
        match self {
            FormFault::ExcessiveLean | FormFault::RoundedBack | FormFault::TorsoRotating => {
                BodyPart::Back
            }
            FormFault::KneesForward | FormFault::SquattingNotHinging => BodyPart::Knees,
            FormFault::SpeedTooFast | FormFault::ShortHold => BodyPart::Tempo,
            FormFault::InsufficientDepth => BodyPart::Depth,
            FormFault::HipsNotOverKnees | FormFault::HipsShifting => BodyPart::Hips,
            FormFault::ArmsBent | FormFault::ElbowLock => BodyPart::Elbows,
        }
    }

    pub fn to_finding(&self, timestamp_ms: f64) -> Finding {
        Finding {
            kind: self.code().to_string(),
            message: self.message().to_string(),
            severity: self.severity(),
            timestamp_ms,
            body_part: Some(self.body_part()),
        }
    }
}

/// Faults queued during the current repetition, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct RepFaults {
    faults: Vec<FormFault>,
}

impl RepFaults {
    pub fn new() -> Self {
        Self { faults: Vec::with_capacity(4) }
    }

    /// Queue a fault; repeats within the same rep are ignored
    pub fn push(&mut self, fault: FormFault) {
        if !self.faults.contains(&fault) {
            self.faults.push(fault);
        }
    }

    /// Queue `fault` when `failed` holds
    pub fn check(&mut self, failed: bool, fault: FormFault) {
        if failed {
            self.push(fault);
        }
    }

    pub fn contains(&self, fault: FormFault) -> bool {
        self.faults.contains(&fault)
    }

    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }

    pub fn len(&self) -> usize {
        self.faults.len()
    }

    /// Codes currently queued (for debug telemetry)
    pub fn codes(&self) -> Vec<String> {
        self.faults.iter().map(|f| f.code().to_string()).collect()
    }

    /// Flush into findings, leaving the queue empty
    pub fn drain_findings(&mut self, timestamp_ms: f64) -> Vec<Finding> {
        self.faults
            .drain(..)
            .map(|f| f.to_finding(timestamp_ms))
            .collect()
    }

    pub fn clear(&mut self) {
        self.faults.clear();
    }
}
