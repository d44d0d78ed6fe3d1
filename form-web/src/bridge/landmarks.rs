//! Landmark layout and frame decoding
//!
//! Receives MediaPipe pose landmarks from JavaScript as a flat Float32Array
//! and turns them into a typed [`Frame`] for the analyzers.

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::analysis::EngineError;

// ============================================================================
// LANDMARK INDICES (MediaPipe Pose - 33 total)
// ============================================================================

pub const LANDMARK_COUNT: usize = 33;

pub const NOSE: usize = 0;
pub const LEFT_EYE_INNER: usize = 1;
pub const LEFT_EYE: usize = 2;
pub const LEFT_EYE_OUTER: usize = 3;
pub const RIGHT_EYE_INNER: usize = 4;
pub const RIGHT_EYE: usize = 5;
pub const RIGHT_EYE_OUTER: usize = 6;
pub const LEFT_EAR: usize = 7;
pub const RIGHT_EAR: usize = 8;
pub const MOUTH_LEFT: usize = 9;
pub const MOUTH_RIGHT: usize = 10;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_PINKY: usize = 17;
pub const RIGHT_PINKY: usize = 18;
pub const LEFT_INDEX: usize = 19;
pub const RIGHT_INDEX: usize = 20;
pub const LEFT_THUMB: usize = 21;
pub const RIGHT_THUMB: usize = 22;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;
pub const LEFT_HEEL: usize = 29;
pub const RIGHT_HEEL: usize = 30;
pub const LEFT_FOOT_INDEX: usize = 31;
pub const RIGHT_FOOT_INDEX: usize = 32;

/// Major body joints, used for confidence when no analyzer narrows it down
pub const KEY_LANDMARKS: [usize; 12] = [
    LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_ELBOW, RIGHT_ELBOW,
    LEFT_WRIST, RIGHT_WRIST,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
    LEFT_ANKLE, RIGHT_ANKLE,
];

/// Values per landmark in the full layout: x, y, z, visibility
pub const VALUES_PER_LANDMARK: usize = 4;

/// Legacy layout without visibility (x, y, z)
const VALUES_PER_LANDMARK_XYZ: usize = 3;

// ============================================================================
// LANDMARK DATA STRUCTURE
// ============================================================================

/// A single tracked body point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,          // 0-1 normalized
    pub y: f32,          // 0-1 normalized, grows downwards
    pub z: f32,          // Relative depth
    pub visibility: f32, // 0-1 confidence
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    /// Image-plane position
    pub fn xy(&self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }

    pub fn xyz(&self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// One captured frame of pose landmarks
#[derive(Clone, Debug)]
pub struct Frame {
    pub landmarks: [Landmark; LANDMARK_COUNT],
    /// Capture time in milliseconds
    pub timestamp_ms: f64,
}

impl Frame {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT], timestamp_ms: f64) -> Self {
        Self { landmarks, timestamp_ms }
    }

    /// Decode a flat array from JavaScript.
    ///
    /// Accepts 132 values (33 × x, y, z, visibility) or the older
    /// 99-value layout (33 × x, y, z) where visibility defaults to 1.0.
    pub fn from_flat(data: &[f32], timestamp_ms: f64) -> Result<Self, EngineError> {
        let stride = match data.len() {
            n if n == LANDMARK_COUNT * VALUES_PER_LANDMARK => VALUES_PER_LANDMARK,
            n if n == LANDMARK_COUNT * VALUES_PER_LANDMARK_XYZ => VALUES_PER_LANDMARK_XYZ,
            actual => {
                return Err(EngineError::FrameLength {
                    expected: LANDMARK_COUNT * VALUES_PER_LANDMARK,
                    actual,
                })
            }
        };

        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (landmark, chunk) in landmarks.iter_mut().zip(data.chunks_exact(stride)) {
            *landmark = Landmark {
                x: chunk[0],
                y: chunk[1],
                z: chunk[2],
                visibility: if stride == VALUES_PER_LANDMARK { chunk[3] } else { 1.0 },
            };
        }

        Ok(Self { landmarks, timestamp_ms })
    }

    /// Landmark by MediaPipe index
    ///
    /// Indices are the compile-time constants above; analyzers declare the
    /// ones they read and the engine checks them before the first frame.
    pub fn get(&self, index: usize) -> &Landmark {
        &self.landmarks[index]
    }
}
