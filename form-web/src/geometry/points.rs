//! Point helpers - midpoints and planar distances

use crate::bridge::Landmark;

/// Component-wise mean of two landmarks, visibility included
pub fn midpoint(a: &Landmark, b: &Landmark) -> Landmark {
    Landmark {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
        z: (a.z + b.z) / 2.0,
        visibility: (a.visibility + b.visibility) / 2.0,
    }
}

/// Euclidean distance in the image plane (z ignored)
pub fn distance_2d(a: &Landmark, b: &Landmark) -> f32 {
    (b.xy() - a.xy()).norm()
}

/// Horizontal offset between two points as a fraction of a reference length
///
/// Returns 0.0 when the reference length is too small to divide by.
pub fn horizontal_offset(a: &Landmark, b: &Landmark, reference: f32) -> f32 {
    if !(reference > 1e-4) {
        return 0.0;
    }
    let ratio = (a.x - b.x).abs() / reference;
    if ratio.is_finite() { ratio } else { 0.0 }
}
