//! Joint angle calculation using dot product
//!
//! The angle at vertex `b` between rays b→a and b→c:
//! cos(θ) = (v1 · v2) / (|v1| × |v2|), reported in degrees in [0, 180].

use nalgebra::{SVector, Vector2};

use crate::bridge::Landmark;

/// Rays shorter than this cannot define a direction
const MIN_RAY_LENGTH: f32 = 0.0001;

/// Angle between two rays in degrees. Degenerate rays give 0.
fn ray_angle<const D: usize>(v1: &SVector<f32, D>, v2: &SVector<f32, D>) -> f32 {
    let mag1 = v1.norm();
    let mag2 = v2.norm();

    // Also rejects NaN magnitudes
    if !(mag1 > MIN_RAY_LENGTH && mag2 > MIN_RAY_LENGTH) {
        return 0.0;
    }

    let cos_angle = (v1.dot(v2) / (mag1 * mag2)).clamp(-1.0, 1.0);
    let angle = cos_angle.acos().to_degrees();
    if angle.is_finite() { angle } else { 0.0 }
}

/// Planar angle at `b` formed by `a` and `c`
///
/// - 180° = the three points are collinear (joint straight)
/// - 90° = right angle
pub fn angle_between(a: &Landmark, b: &Landmark, c: &Landmark) -> f32 {
    ray_angle(&(a.xy() - b.xy()), &(c.xy() - b.xy()))
}

/// Same as [`angle_between`] but using the relative depth as well
pub fn angle_between_3d(a: &Landmark, b: &Landmark, c: &Landmark) -> f32 {
    ray_angle(&(a.xyz() - b.xyz()), &(c.xyz() - b.xyz()))
}

/// Angle of the segment `from → to` away from straight down
///
/// A vertical thigh (hip above knee) reads 0°, a horizontal one 90°.
pub fn angle_from_vertical(from: &Landmark, to: &Landmark) -> f32 {
    ray_angle(&(to.xy() - from.xy()), &Vector2::new(0.0, 1.0))
}

/// Lean of the segment `base → top` away from straight up, signed by
/// horizontal direction (positive when `top` sits at larger x).
pub fn signed_tilt(base: &Landmark, top: &Landmark) -> f32 {
    let tilt = ray_angle(&(top.xy() - base.xy()), &Vector2::new(0.0, -1.0));
    if top.x < base.x { -tilt } else { tilt }
}

/// Elevation of `to` above the horizontal through `from`, in degrees
///
/// Positive when `to` is higher in the image, negative when lower.
/// Degenerate segments read as 0°.
pub fn elevation(from: &Landmark, to: &Landmark) -> f32 {
    let from_up = ray_angle(&(to.xy() - from.xy()), &Vector2::new(0.0, -1.0));
    if from_up == 0.0 && (to.xy() - from.xy()).norm() <= MIN_RAY_LENGTH {
        return 0.0;
    }
    90.0 - from_up
}
