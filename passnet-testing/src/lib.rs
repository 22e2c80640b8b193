//! Testing helpers.

use assert_float_eq::*;

/// Asserts that two slices have the same length and that every pair of elements is within
/// `distance` ULPs of one another. Infinite elements must match exactly.
pub fn assert_slice_f64_near(expected: &[f64], actual: &[f64], distance: u32) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert!(
                expected.is_finite() && actual.is_finite(),
                "non-finite mismatch at index {index}: {expected} ≠ {actual}"
            );
            assert_f64_near!(expected, actual, distance);
        }
    }
}

/// Asserts that two slices have the same length and that every pair of elements agrees to within
/// a relative `epsilon`.
pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert!(
                expected.is_finite() && actual.is_finite(),
                "non-finite mismatch at index {index}: {expected} ≠ {actual}"
            );
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_slices() {
        assert_slice_f64_near(&[0.1 + 0.2, 1.0, f64::INFINITY], &[0.3, 1.0, f64::INFINITY], 1);
    }

    #[test]
    #[should_panic(expected = "lengths do not match: 2 ≠ 1")]
    fn near_slices_length_mismatch() {
        assert_slice_f64_near(&[0.0, 1.0], &[0.0], 1);
    }

    #[test]
    #[should_panic(expected = "non-finite mismatch at index 1")]
    fn relative_slices_infinite_mismatch() {
        assert_slice_f64_relative(&[0.0, f64::INFINITY], &[0.0, 1.0], 1e-6);
    }

    #[test]
    fn relative_slices() {
        assert_slice_f64_relative(&[100.0, 0.5], &[100.0000001, 0.5], 1e-6);
    }
}
