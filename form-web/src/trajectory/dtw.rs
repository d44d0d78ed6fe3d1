//! Dynamic time warping
//!
//! Minimum-cost monotonic alignment of two sequences with an
//! absolute-difference cost per matched pair.

/// Cumulative cost of the best alignment between `a` and `b`
///
/// Returns `f32::INFINITY` when either sequence is empty.
pub fn dtw_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return f32::INFINITY;
    }

    // Two rolling rows of the (a.len()+1) × (b.len()+1) cost matrix
    let width = b.len() + 1;
    let mut prev = vec![f32::INFINITY; width];
    let mut curr = vec![f32::INFINITY; width];
    prev[0] = 0.0;

    for &x in a {
        curr[0] = f32::INFINITY;
        for (j, &y) in b.iter().enumerate() {
            let cost = (x - y).abs();
            let best = prev[j].min(prev[j + 1]).min(curr[j]);
            curr[j + 1] = cost + best;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identical_is_zero() {
        let s = [0.0, 10.0, 40.0, 10.0, 0.0];
        assert_eq!(dtw_distance(&s, &s), 0.0);
    }

    #[test]
    fn test_time_stretch_is_free() {
        let a = [0.0, 10.0, 20.0, 10.0, 0.0];
        let b = [0.0, 0.0, 10.0, 10.0, 20.0, 20.0, 10.0, 0.0];
        assert_eq!(dtw_distance(&a, &b), 0.0);
    }

    #[test]
    fn test_constant_offset() {
        let a = [0.0, 0.0, 0.0];
        let b = [5.0, 5.0, 5.0];
        assert_relative_eq!(dtw_distance(&a, &b), 15.0);
    }

    #[test]
    fn test_symmetric() {
        let a = [1.0, 3.0, 4.0, 9.0];
        let b = [1.0, 2.0, 8.0];
        assert_relative_eq!(dtw_distance(&a, &b), dtw_distance(&b, &a));
    }

    #[test]
    fn test_empty_is_infinite() {
        assert!(dtw_distance(&[], &[1.0]).is_infinite());
    }
}
