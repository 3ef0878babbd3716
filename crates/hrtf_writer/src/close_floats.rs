//! Threshold-based float asserts for normalized samples.
//!
//! Normalization divides by one more than the type's maximum, so results are only exact at the extremes.

#[track_caller]
pub(crate) fn close_floats64(a: f64, b: f64, threshold: f64) {
    let diff = (a - b).abs();
    assert!(
        diff < threshold,
        "{a} vs {b}, difference {diff} is greater than threshold {threshold}"
    );
}

/// Compare two sample slices element by element.
#[track_caller]
pub(crate) fn close_samples(actual: &[f64], expected: &[f64], threshold: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Lengths differ: {actual:?} vs {expected:?}"
    );

    for (i, (a, b)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - b).abs();
        assert!(
            diff < threshold,
            "Sample {i}: {a} vs {b}, difference {diff} is greater than threshold {threshold}"
        );
    }
}
