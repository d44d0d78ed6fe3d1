//! Canonical reference trajectories

/// Thigh angle from vertical (degrees) over one ideal bodyweight squat,
/// standing → parallel → standing
pub const SQUAT_THIGH_PROFILE: [f32; 10] =
    [5.0, 20.0, 40.0, 65.0, 85.0, 85.0, 65.0, 40.0, 20.0, 5.0];

/// DTW distance treated as a "very poor" repetition (score 0)
pub const DEFAULT_MAX_DISTANCE: f32 = 600.0;

/// A reference curve plus the distance scale it was calibrated with
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceTrajectory {
    pub name: &'static str,
    pub samples: Vec<f32>,
    /// Distance that maps to a score of 0
    pub max_distance: f32,
}

impl ReferenceTrajectory {
    pub fn new(name: &'static str, samples: Vec<f32>, max_distance: f32) -> Self {
        Self { name, samples, max_distance }
    }

    pub fn squat_thigh() -> Self {
        Self::new("squat_thigh", SQUAT_THIGH_PROFILE.to_vec(), DEFAULT_MAX_DISTANCE)
    }

    /// Recalibrate the distance scale; non-positive values are ignored
    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        if max_distance.is_finite() && max_distance > 0.0 {
            self.max_distance = max_distance;
        }
        self
    }

    /// `clamp(100 - distance / max_distance × 100, 0, 100)`
    pub fn score(&self, distance: f32) -> f32 {
        let score = 100.0 - (distance / self.max_distance) * 100.0;
        if score.is_nan() {
            return 0.0;
        }
        score.clamp(0.0, 100.0)
    }
}
