//! Visibility aggregates
//!
//! Mean landmark visibility doubles as per-frame confidence and as the
//! baseline form score while a repetition is still in progress.

use crate::bridge::Landmark;

/// Mean visibility over a joint subset, in [0, 1]
///
/// Non-finite visibilities count as 0. Indices past the end of the slice are
/// skipped; an empty subset gives 0.
pub fn average_visibility(landmarks: &[Landmark], indices: &[usize]) -> f32 {
    let (sum, count) = indices
        .iter()
        .filter_map(|&i| landmarks.get(i))
        .fold((0.0f32, 0usize), |(sum, count), l| {
            let v = if l.visibility.is_finite() { l.visibility.clamp(0.0, 1.0) } else { 0.0 };
            (sum + v, count + 1)
        });

    if count == 0 {
        return 0.0;
    }
    (sum / count as f32).clamp(0.0, 1.0)
}

/// Visibility-derived score, rounded and clamped to [0, 100]
pub fn base_form_score(landmarks: &[Landmark], indices: &[usize]) -> f32 {
    (average_visibility(landmarks, indices) * 100.0).round().clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn with_visibility(values: &[f32]) -> Vec<Landmark> {
        values.iter().map(|&v| Landmark::new(0.5, 0.5, 0.0, v)).collect()
    }

    #[test]
    fn test_average_over_subset() {
        let landmarks = with_visibility(&[1.0, 0.0, 0.5, 0.9]);
        let avg = average_visibility(&landmarks, &[0, 2]);
        assert!((avg - 0.75).abs() < 1e-6);
        assert_eq!(base_form_score(&landmarks, &[0, 2]), 75.0);
    }

    #[test]
    fn test_empty_subset_is_zero() {
        let landmarks = with_visibility(&[1.0]);
        assert_eq!(average_visibility(&landmarks, &[]), 0.0);
        assert_eq!(base_form_score(&landmarks, &[]), 0.0);
    }

    #[test]
    fn test_nan_visibility_counts_as_zero() {
        let landmarks = with_visibility(&[f32::NAN, 1.0]);
        assert!((average_visibility(&landmarks, &[0, 1]) - 0.5).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn test_visibility_and_score_ranges(
            values in prop::collection::vec(0.0f32..=1.0, 1..33),
            pick in prop::collection::vec(0usize..33, 1..12),
        ) {
            let landmarks = with_visibility(&values);
            let indices: Vec<usize> = pick.into_iter().map(|i| i % values.len()).collect();
            let avg = average_visibility(&landmarks, &indices);
            let score = base_form_score(&landmarks, &indices);
            prop_assert!((0.0..=1.0).contains(&avg));
            prop_assert!((0.0..=100.0).contains(&score));
        }
    }
}
