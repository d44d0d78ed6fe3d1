//! Synthetic frames for engine tests

use form_web::bridge::{
    Frame, Landmark, LANDMARK_COUNT, LEFT_ANKLE, LEFT_EAR, LEFT_FOOT_INDEX, LEFT_HEEL, LEFT_HIP,
    LEFT_KNEE, LEFT_SHOULDER, RIGHT_ANKLE, RIGHT_EAR, RIGHT_FOOT_INDEX, RIGHT_HEEL, RIGHT_HIP,
    RIGHT_KNEE, RIGHT_SHOULDER, VALUES_PER_LANDMARK,
};

pub const FRAME_INTERVAL_MS: f64 = 33.0;

/// Side-view squat pose with the thigh at `thigh_angle` degrees from vertical
pub fn squat_frame(thigh_angle: f32, timestamp_ms: f64) -> Frame {
    let mut pose = [Landmark::new(0.5, 0.5, 0.0, 1.0); LANDMARK_COUNT];
    let (sin, cos) = thigh_angle.to_radians().sin_cos();
    let hip = (0.5, 0.4);
    let knee = (hip.0 + 0.2 * sin, hip.1 + 0.2 * cos);

    let mut pair = |l: usize, r: usize, x: f32, y: f32| {
        pose[l] = Landmark::new(x, y, 0.0, 1.0);
        pose[r] = Landmark::new(x, y, 0.0, 1.0);
    };
    pair(LEFT_EAR, RIGHT_EAR, hip.0, hip.1 - 0.4);
    pair(LEFT_SHOULDER, RIGHT_SHOULDER, hip.0, hip.1 - 0.3);
    pair(LEFT_HIP, RIGHT_HIP, hip.0, hip.1);
    pair(LEFT_KNEE, RIGHT_KNEE, knee.0, knee.1);
    pair(LEFT_ANKLE, RIGHT_ANKLE, knee.0, knee.1 + 0.2);
    pair(LEFT_HEEL, RIGHT_HEEL, knee.0, knee.1 + 0.2);
    pair(LEFT_FOOT_INDEX, RIGHT_FOOT_INDEX, knee.0 + 0.1, knee.1 + 0.2);

    Frame::new(pose, timestamp_ms)
}

/// One frame per angle at a steady capture rate
pub fn squat_sequence(angles: &[f32]) -> Vec<Frame> {
    angles
        .iter()
        .enumerate()
        .map(|(i, &a)| squat_frame(a, i as f64 * FRAME_INTERVAL_MS))
        .collect()
}

/// Flatten a frame the way the JS side sends it
pub fn to_flat(frame: &Frame) -> Vec<f32> {
    let mut data = Vec::with_capacity(LANDMARK_COUNT * VALUES_PER_LANDMARK);
    for l in &frame.landmarks {
        data.extend_from_slice(&[l.x, l.y, l.z, l.visibility]);
    }
    data
}
