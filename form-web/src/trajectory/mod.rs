//! Trajectory module - DTW comparison of a rep against a reference curve
//!
//! Re-exports only. All logic in submodules.

mod resample;
mod dtw;
mod reference;
mod comparator;

pub use resample::resample;
pub use dtw::dtw_distance;
pub use reference::{ReferenceTrajectory, SQUAT_THIGH_PROFILE, DEFAULT_MAX_DISTANCE};
pub use comparator::{
    TrajectoryComparator, TrajectoryScore, feedback_for_score,
    CANONICAL_LENGTH, MIN_TRAJECTORY_LENGTH, TOO_SHORT_FEEDBACK,
};
