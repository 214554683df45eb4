//! Interquartile-range outlier removal for axis samples.
//!
//! Frames inside scene transitions or fades can report crop extents far away
//! from the file's true picture area. Dropping everything outside
//! `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]` before reduction keeps those detections
//! from skewing the final decision.

use crate::analysis::AxisSample;
use crate::error::{CoreError, CoreResult};

/// Removes samples whose `length` falls outside the IQR fences.
///
/// Quartiles use the simple order-statistic rule `sorted[floor(n * p)]`, no
/// interpolation. Bounds are inclusive; the lower fence may be negative,
/// which retains every sample on that side.
pub fn filter_outliers(samples: &[AxisSample]) -> CoreResult<Vec<AxisSample>> {
    if samples.is_empty() {
        return Err(CoreError::MissingSamples(
            "outlier filter called with an empty sample pool".to_string(),
        ));
    }

    let mut sorted: Vec<AxisSample> = samples.to_vec();
    sorted.sort_by_key(|s| s.length);

    let q1 = i64::from(quantile(&sorted, 0.25).length);
    let q3 = i64::from(quantile(&sorted, 0.75).length);
    let iqr = q3 - q1;

    // 1.5*IQR stays integral when scaled by 2 to avoid float fences.
    let lower = 2 * q1 - 3 * iqr;
    let upper = 2 * q3 + 3 * iqr;

    let retained: Vec<AxisSample> = samples
        .iter()
        .filter(|s| {
            let doubled = 2 * i64::from(s.length);
            doubled >= lower && doubled <= upper
        })
        .copied()
        .collect();

    log::trace!(
        "outlier filter retained {}/{} samples (fences {}..={} over doubled lengths)",
        retained.len(),
        samples.len(),
        lower,
        upper
    );

    Ok(retained)
}

fn quantile(sorted: &[AxisSample], p: f64) -> AxisSample {
    let idx = ((sorted.len() as f64) * p).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AxisSample;

    fn lengths(samples: &[AxisSample]) -> Vec<u32> {
        samples.iter().map(|s| s.length).collect()
    }

    #[test]
    fn test_empty_pool_is_rejected() {
        assert!(matches!(
            filter_outliers(&[]),
            Err(CoreError::MissingSamples(_))
        ));
    }

    #[test]
    fn test_uniform_samples_all_retained() {
        let samples: Vec<AxisSample> = (0..8).map(|_| AxisSample::y(800, 140)).collect();
        let retained = filter_outliers(&samples).unwrap();
        assert_eq!(retained.len(), 8);
    }

    #[test]
    fn test_extreme_low_sample_is_dropped() {
        // Two windows: three consistent detections plus one collapsed frame.
        let samples = vec![
            AxisSample::x(1900, 10),
            AxisSample::x(1900, 10),
            AxisSample::x(1900, 10),
            AxisSample::x(1000, 0),
        ];
        let retained = filter_outliers(&samples).unwrap();
        assert_eq!(lengths(&retained), vec![1900, 1900, 1900]);
    }

    #[test]
    fn test_mild_variation_is_retained() {
        let samples = vec![
            AxisSample::y(800, 140),
            AxisSample::y(802, 139),
            AxisSample::y(798, 141),
            AxisSample::y(800, 140),
        ];
        let retained = filter_outliers(&samples).unwrap();
        assert_eq!(retained.len(), 4);
    }

    #[test]
    fn test_retained_is_subset_within_fences() {
        let samples = vec![
            AxisSample::x(100, 0),
            AxisSample::x(400, 0),
            AxisSample::x(410, 0),
            AxisSample::x(420, 0),
            AxisSample::x(430, 0),
            AxisSample::x(900, 0),
        ];
        // sorted: 100,400,410,420,430,900 -> Q1 = idx 1 (400), Q3 = idx 4 (430)
        // IQR = 30, fences [355, 475]
        let retained = filter_outliers(&samples).unwrap();
        assert_eq!(lengths(&retained), vec![400, 410, 420, 430]);
        for s in &retained {
            assert!(samples.contains(s));
        }
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let samples = vec![
            AxisSample::x(420, 2),
            AxisSample::x(400, 1),
            AxisSample::x(410, 3),
            AxisSample::x(415, 4),
        ];
        let retained = filter_outliers(&samples).unwrap();
        assert_eq!(lengths(&retained), vec![420, 400, 410, 415]);
    }
}
