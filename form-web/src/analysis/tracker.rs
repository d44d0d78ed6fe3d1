//! Running maximum over one repetition

/// Tracks the most extreme value reached since the last reset
#[derive(Debug, Clone, Copy, Default)]
pub struct PeakTracker {
    peak: Option<f32>,
}

impl PeakTracker {
    pub fn new() -> Self {
        Self { peak: None }
    }

    /// Feed a sample; non-finite samples are ignored
    pub fn update(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        self.peak = Some(match self.peak {
            Some(peak) => peak.max(value),
            None => value,
        });
    }

    pub fn value(&self) -> Option<f32> {
        self.peak
    }

    /// Peak or 0.0 when nothing was recorded
    pub fn value_or_zero(&self) -> f32 {
        self.peak.unwrap_or(0.0)
    }

    pub fn exceeds(&self, threshold: f32) -> bool {
        self.peak.is_some_and(|peak| peak > threshold)
    }

    pub fn reset(&mut self) {
        self.peak = None;
    }
}
