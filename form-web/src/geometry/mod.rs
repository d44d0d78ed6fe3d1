//! Geometry module - pure feature extraction from landmarks
//!
//! Re-exports only. All logic in submodules.

mod points;
mod angles;
mod visibility;
mod velocity;

pub use points::{midpoint, distance_2d, horizontal_offset};
pub use angles::{angle_between, angle_between_3d, angle_from_vertical, signed_tilt, elevation};
pub use visibility::{average_visibility, base_form_score};
pub use velocity::{VelocityTracker, MIN_INTERVAL_MS};
