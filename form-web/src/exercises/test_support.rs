//! Synthetic pose builders for analyzer tests

use crate::bridge::*;

fn set_pair(pose: &mut [Landmark; LANDMARK_COUNT], left: usize, right: usize, x: f32, y: f32) {
    pose[left] = Landmark::new(x, y, 0.0, 1.0);
    pose[right] = Landmark::new(x, y, 0.0, 1.0);
}

/// Every landmark at the image centre, fully visible
pub fn neutral_pose() -> [Landmark; LANDMARK_COUNT] {
    [Landmark::new(0.5, 0.5, 0.0, 1.0); LANDMARK_COUNT]
}

/// Side view squat with the given thigh angle from vertical (degrees)
/// and hip height. Trunk upright, shins vertical, toes towards +x.
pub fn squat_frame(thigh_angle: f32, hip_y: f32, timestamp_ms: f64) -> Frame {
    let mut pose = neutral_pose();
    let (sin, cos) = thigh_angle.to_radians().sin_cos();
    let hip = (0.5, hip_y);
    let knee = (hip.0 + 0.2 * sin, hip.1 + 0.2 * cos);

    set_pair(&mut pose, LEFT_EAR, RIGHT_EAR, hip.0, hip_y - 0.4);
    set_pair(&mut pose, LEFT_SHOULDER, RIGHT_SHOULDER, hip.0, hip_y - 0.3);
    set_pair(&mut pose, LEFT_HIP, RIGHT_HIP, hip.0, hip.1);
    set_pair(&mut pose, LEFT_KNEE, RIGHT_KNEE, knee.0, knee.1);
    set_pair(&mut pose, LEFT_ANKLE, RIGHT_ANKLE, knee.0, knee.1 + 0.2);
    set_pair(&mut pose, LEFT_HEEL, RIGHT_HEEL, knee.0, knee.1 + 0.2);
    set_pair(&mut pose, LEFT_FOOT_INDEX, RIGHT_FOOT_INDEX, knee.0 + 0.1, knee.1 + 0.2);
    Frame::new(pose, timestamp_ms)
}

/// Quadruped (hands and knees) side view. `head_offset` raises the ears
/// above the shoulder line (negative drops them), as a fraction of torso
/// length. `hip_shift` moves the hips forward of the knees.
pub fn quadruped_frame(head_offset: f32, hip_shift: f32, timestamp_ms: f64) -> Frame {
    let mut pose = neutral_pose();
    let torso = 0.3;
    let shoulder = (0.3, 0.5);
    let hip = (0.6, 0.5);

    set_pair(&mut pose, LEFT_EAR, RIGHT_EAR, 0.22, shoulder.1 - head_offset * torso);
    set_pair(&mut pose, LEFT_SHOULDER, RIGHT_SHOULDER, shoulder.0, shoulder.1);
    set_pair(&mut pose, LEFT_ELBOW, RIGHT_ELBOW, shoulder.0, 0.6);
    set_pair(&mut pose, LEFT_WRIST, RIGHT_WRIST, shoulder.0, 0.7);
    set_pair(&mut pose, LEFT_HIP, RIGHT_HIP, hip.0 + hip_shift, hip.1);
    set_pair(&mut pose, LEFT_KNEE, RIGHT_KNEE, hip.0, 0.7);
    set_pair(&mut pose, LEFT_ANKLE, RIGHT_ANKLE, 0.8, 0.7);
    Frame::new(pose, timestamp_ms)
}

/// Front view standing pose with the trunk tilted sideways by `tilt`
/// degrees (positive towards larger x). `shoulder_width` scales the
/// apparent shoulder span, `hip_x` places the hips.
pub fn side_bend_frame(tilt: f32, hip_x: f32, shoulder_width: f32, timestamp_ms: f64) -> Frame {
    let mut pose = neutral_pose();
    let (sin, cos) = tilt.to_radians().sin_cos();
    let hip_y = 0.6;
    let shoulder = (hip_x + 0.3 * sin, hip_y - 0.3 * cos);
    let half = shoulder_width / 2.0;

    pose[LEFT_SHOULDER] = Landmark::new(shoulder.0 - half, shoulder.1, 0.0, 1.0);
    pose[RIGHT_SHOULDER] = Landmark::new(shoulder.0 + half, shoulder.1, 0.0, 1.0);
    pose[LEFT_HIP] = Landmark::new(hip_x - 0.08, hip_y, 0.0, 1.0);
    pose[RIGHT_HIP] = Landmark::new(hip_x + 0.08, hip_y, 0.0, 1.0);
    set_pair(&mut pose, LEFT_EAR, RIGHT_EAR, shoulder.0, shoulder.1 - 0.1);
    pose[LEFT_KNEE] = Landmark::new(hip_x - 0.08, 0.8, 0.0, 1.0);
    pose[RIGHT_KNEE] = Landmark::new(hip_x + 0.08, 0.8, 0.0, 1.0);
    Frame::new(pose, timestamp_ms)
}

/// Side view hip hinge: trunk pitched forward by `trunk_angle` degrees,
/// knees bent to `knee_angle` (180 = straight), head in line with the
/// trunk unless `head_drop` pulls the ears down towards the chest.
pub fn hinge_frame(trunk_angle: f32, knee_angle: f32, head_drop: f32, timestamp_ms: f64) -> Frame {
    let mut pose = neutral_pose();
    let hip = (0.5, 0.5);
    let (sin, cos) = trunk_angle.to_radians().sin_cos();
    let shoulder = (hip.0 - 0.3 * sin, hip.1 - 0.3 * cos);
    let ear = (hip.0 - 0.4 * sin, hip.1 - 0.4 * cos + head_drop);

    // Knee straight below the hip, shin rotated by the knee bend
    let knee = (hip.0, hip.1 + 0.2);
    let bend = (180.0 - knee_angle).to_radians();
    let ankle = (knee.0 - 0.2 * bend.sin(), knee.1 + 0.2 * bend.cos());

    set_pair(&mut pose, LEFT_EAR, RIGHT_EAR, ear.0, ear.1);
    set_pair(&mut pose, LEFT_SHOULDER, RIGHT_SHOULDER, shoulder.0, shoulder.1);
    set_pair(&mut pose, LEFT_HIP, RIGHT_HIP, hip.0, hip.1);
    set_pair(&mut pose, LEFT_KNEE, RIGHT_KNEE, knee.0, knee.1);
    set_pair(&mut pose, LEFT_ANKLE, RIGHT_ANKLE, ankle.0, ankle.1);
    Frame::new(pose, timestamp_ms)
}

/// Prone side view with the chest raised `elevation` degrees above the
/// hips and the given elbow angle (180 = locked straight).
pub fn prone_frame(elevation: f32, elbow_angle: f32, timestamp_ms: f64) -> Frame {
    let mut pose = neutral_pose();
    let hip = (0.6, 0.7);
    let (sin, cos) = elevation.to_radians().sin_cos();
    let shoulder = (hip.0 - 0.3 * cos, hip.1 - 0.3 * sin);

    // Upper arm hangs straight down, forearm opens by the elbow angle
    let elbow = (shoulder.0, shoulder.1 + 0.12);
    let open = (180.0 - elbow_angle).to_radians();
    let wrist = (elbow.0 - 0.12 * open.sin(), elbow.1 + 0.12 * open.cos());

    set_pair(&mut pose, LEFT_SHOULDER, RIGHT_SHOULDER, shoulder.0, shoulder.1);
    set_pair(&mut pose, LEFT_ELBOW, RIGHT_ELBOW, elbow.0, elbow.1);
    set_pair(&mut pose, LEFT_WRIST, RIGHT_WRIST, wrist.0, wrist.1);
    set_pair(&mut pose, LEFT_HIP, RIGHT_HIP, hip.0, hip.1);
    set_pair(&mut pose, LEFT_KNEE, RIGHT_KNEE, 0.8, 0.7);
    set_pair(&mut pose, LEFT_ANKLE, RIGHT_ANKLE, 0.95, 0.7);
    Frame::new(pose, timestamp_ms)
}
