//! Velocity tracking from timestamped samples
//!
//! Keeps the previous sample and its capture time, and reports the
//! rate of change in units per second.

/// Frames closer together than this are treated as duplicates
pub const MIN_INTERVAL_MS: f64 = 1.0;

/// Rate-of-change tracker for one scalar signal
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    /// Last accepted (value, timestamp_ms)
    last: Option<(f32, f64)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Update with a new sample, returns velocity in units per second
    ///
    /// Returns `None` for the first sample and for duplicate or
    /// out-of-order timestamps (the previous sample is kept).
    pub fn update(&mut self, value: f32, timestamp_ms: f64) -> Option<f32> {
        if !value.is_finite() || !timestamp_ms.is_finite() {
            return None;
        }

        let Some((prev_value, prev_ms)) = self.last else {
            self.last = Some((value, timestamp_ms));
            return None;
        };

        let dt_ms = timestamp_ms - prev_ms;
        if dt_ms < MIN_INTERVAL_MS {
            return None;
        }

        self.last = Some((value, timestamp_ms));
        Some(((value - prev_value) as f64 / (dt_ms / 1000.0)) as f32)
    }

    /// Forget history (new attempt)
    pub fn clear(&mut self) {
        self.last = None;
    }
}
