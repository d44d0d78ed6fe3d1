//! Linear-interpolation resampling

/// Shrink `samples` to `target_len` points by linear interpolation
///
/// Sequences already at or below `target_len` are returned unchanged.
/// The first and last samples are always kept.
pub fn resample(samples: &[f32], target_len: usize) -> Vec<f32> {
    if samples.len() <= target_len || target_len < 2 {
        return samples.to_vec();
    }

    let last = (samples.len() - 1) as f32;
    let step = last / (target_len - 1) as f32;

    (0..target_len)
        .map(|i| {
            let pos = (i as f32 * step).min(last);
            let lo = pos.floor() as usize;
            let hi = (lo + 1).min(samples.len() - 1);
            let t = pos - lo as f32;
            samples[lo] + (samples[hi] - samples[lo]) * t
        })
        .collect()
}
