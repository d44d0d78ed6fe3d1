//! Body midline points shared by the analyzers

use crate::bridge::{
    Frame, LEFT_ANKLE, LEFT_EAR, LEFT_ELBOW, LEFT_FOOT_INDEX, LEFT_HEEL, LEFT_HIP, LEFT_KNEE,
    LEFT_SHOULDER, LEFT_WRIST, RIGHT_ANKLE, RIGHT_EAR, RIGHT_ELBOW, RIGHT_FOOT_INDEX, RIGHT_HEEL,
    RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST, Landmark,
};
use crate::geometry::{angle_between, distance_2d, midpoint};

/// Left/right midpoints along the body
#[derive(Clone, Copy, Debug)]
pub struct Midline {
    pub ear: Landmark,
    pub shoulder: Landmark,
    pub hip: Landmark,
    pub knee: Landmark,
    pub ankle: Landmark,
    pub heel: Landmark,
    pub toe: Landmark,
}

/// Heel-to-toe spans shorter than this give no facing direction
const MIN_FOOT_SPAN: f32 = 0.005;

impl Midline {
    pub fn from_frame(frame: &Frame) -> Self {
        let pair = |l: usize, r: usize| midpoint(frame.get(l), frame.get(r));
        Self {
            ear: pair(LEFT_EAR, RIGHT_EAR),
            shoulder: pair(LEFT_SHOULDER, RIGHT_SHOULDER),
            hip: pair(LEFT_HIP, RIGHT_HIP),
            knee: pair(LEFT_KNEE, RIGHT_KNEE),
            ankle: pair(LEFT_ANKLE, RIGHT_ANKLE),
            heel: pair(LEFT_HEEL, RIGHT_HEEL),
            toe: pair(LEFT_FOOT_INDEX, RIGHT_FOOT_INDEX),
        }
    }

    /// Side-view facing direction along x: +1 when the toes point towards
    /// larger x, -1 towards smaller x, 0 when the feet are foreshortened
    pub fn facing(&self) -> f32 {
        let span = self.toe.x - self.heel.x;
        if span.abs() > MIN_FOOT_SPAN {
            span.signum()
        } else {
            0.0
        }
    }

    /// Shoulder-to-hip length, the scale for normalized offsets
    pub fn torso_length(&self) -> f32 {
        distance_2d(&self.shoulder, &self.hip)
    }
}

/// Mean elbow angle over both arms (180° = straight)
pub fn mean_elbow_angle(frame: &Frame) -> f32 {
    let left = angle_between(frame.get(LEFT_SHOULDER), frame.get(LEFT_ELBOW), frame.get(LEFT_WRIST));
    let right = angle_between(frame.get(RIGHT_SHOULDER), frame.get(RIGHT_ELBOW), frame.get(RIGHT_WRIST));
    (left + right) / 2.0
}

/// Mean knee angle over both legs (180° = straight)
pub fn mean_knee_angle(frame: &Frame) -> f32 {
    let left = angle_between(frame.get(LEFT_HIP), frame.get(LEFT_KNEE), frame.get(LEFT_ANKLE));
    let right = angle_between(frame.get(RIGHT_HIP), frame.get(RIGHT_KNEE), frame.get(RIGHT_ANKLE));
    (left + right) / 2.0
}
