//! Records one signal per frame during a rep and scores it against a
//! reference trajectory when the rep completes.

use tracing::debug;

use super::dtw::dtw_distance;
use super::reference::ReferenceTrajectory;
use super::resample::resample;

/// Longer recordings are resampled down to this many points
pub const CANONICAL_LENGTH: usize = 20;

/// Recordings shorter than this are not compared
pub const MIN_TRAJECTORY_LENGTH: usize = 5;

pub const TOO_SHORT_FEEDBACK: &str = "Rep too short to analyze";

/// Outcome of comparing one rep
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryScore {
    /// `None` when the rep was too short to compare
    pub distance: Option<f32>,
    /// 0-100
    pub score: f32,
    pub feedback: &'static str,
}

/// Canned feedback for a similarity score
pub fn feedback_for_score(score: f32) -> &'static str {
    if score >= 80.0 {
        "Excellent form!"
    } else if score >= 60.0 {
        "Good form, keep it up!"
    } else if score >= 40.0 {
        "Work on consistency."
    } else {
        "Try to match the movement pattern."
    }
}

/// Per-rep trajectory buffer bound to one reference curve
#[derive(Clone, Debug)]
pub struct TrajectoryComparator {
    reference: ReferenceTrajectory,
    buffer: Vec<f32>,
}

impl TrajectoryComparator {
    pub fn new(reference: ReferenceTrajectory) -> Self {
        Self {
            reference,
            buffer: Vec::with_capacity(64),
        }
    }

    /// Append one frame's value; non-finite values are skipped
    pub fn record(&mut self, value: f32) {
        if value.is_finite() {
            self.buffer.push(value);
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn reference(&self) -> &ReferenceTrajectory {
        &self.reference
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Score a trajectory against the reference without touching the buffer
    pub fn score(&self, trajectory: &[f32]) -> TrajectoryScore {
        if trajectory.len() < MIN_TRAJECTORY_LENGTH {
            return TrajectoryScore {
                distance: None,
                score: 0.0,
                feedback: TOO_SHORT_FEEDBACK,
            };
        }

        let resampled = resample(trajectory, CANONICAL_LENGTH);
        let distance = dtw_distance(&resampled, &self.reference.samples);
        let score = self.reference.score(distance);
        debug!(
            reference = self.reference.name,
            samples = trajectory.len(),
            distance,
            score,
            "trajectory compared"
        );

        TrajectoryScore {
            distance: Some(distance),
            score,
            feedback: feedback_for_score(score),
        }
    }

    /// Score the recorded rep and empty the buffer for the next one
    pub fn finish_rep(&mut self) -> TrajectoryScore {
        let result = self.score(&self.buffer);
        self.buffer.clear();
        result
    }
}
