//! Reduction of a same-axis sample pool to one chosen value.

use crate::analysis::AxisSample;
use crate::error::{CoreError, CoreResult};

/// Policy used to pick the winning sample out of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReducerPolicy {
    /// Keep the largest detected extent seen in any window. Favors the least
    /// aggressive crop: anything that was picture somewhere stays picture.
    #[default]
    SafestCrop,
    /// Keep the `(length, offset)` pair detected most often across windows.
    MostSeenCrop,
}

/// Reduces a non-empty, same-axis sample pool to one `(length, offset)` pair.
///
/// Ties are broken by first appearance in the pool, so callers feeding
/// samples in window-start order get reproducible results regardless of
/// which window finished sampling first.
pub fn reduce_axis(samples: &[AxisSample], policy: ReducerPolicy) -> CoreResult<AxisSample> {
    if samples.is_empty() {
        return Err(CoreError::MissingSamples(
            "axis reducer called with an empty sample pool".to_string(),
        ));
    }

    let chosen = match policy {
        ReducerPolicy::SafestCrop => safest_crop(samples),
        ReducerPolicy::MostSeenCrop => most_seen_crop(samples),
    };

    log::trace!(
        "reduced {} samples on {:?} to length={} offset={} ({:?})",
        samples.len(),
        chosen.axis,
        chosen.length,
        chosen.offset,
        policy
    );

    Ok(chosen)
}

/// Running maximum by length; a strictly greater length adopts that sample's
/// offset as well, so equal lengths keep the first-seen offset.
fn safest_crop(samples: &[AxisSample]) -> AxisSample {
    let mut best = samples[0];
    for sample in &samples[1..] {
        if sample.length > best.length {
            best = *sample;
        }
    }
    best
}

/// Mode over `(length, offset)` pairs, grouped in insertion order so the
/// count tie-break is deterministic.
fn most_seen_crop(samples: &[AxisSample]) -> AxisSample {
    let mut groups: Vec<(AxisSample, usize)> = Vec::new();
    for sample in samples {
        match groups
            .iter_mut()
            .find(|(s, _)| s.length == sample.length && s.offset == sample.offset)
        {
            Some((_, count)) => *count += 1,
            None => groups.push((*sample, 1)),
        }
    }

    let mut best = groups[0];
    for group in &groups[1..] {
        if group.1 > best.1 {
            best = *group;
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AxisSample;

    #[test]
    fn test_empty_pool_is_rejected() {
        assert!(matches!(
            reduce_axis(&[], ReducerPolicy::SafestCrop),
            Err(CoreError::MissingSamples(_))
        ));
        assert!(matches!(
            reduce_axis(&[], ReducerPolicy::MostSeenCrop),
            Err(CoreError::MissingSamples(_))
        ));
    }

    #[test]
    fn test_safest_crop_picks_maximum_length() {
        let samples = vec![
            AxisSample::x(1880, 20),
            AxisSample::x(1920, 0),
            AxisSample::x(1900, 10),
        ];
        let chosen = reduce_axis(&samples, ReducerPolicy::SafestCrop).unwrap();
        assert_eq!((chosen.length, chosen.offset), (1920, 0));
    }

    #[test]
    fn test_safest_crop_tie_keeps_first_seen_offset() {
        let samples = vec![
            AxisSample::y(800, 140),
            AxisSample::y(800, 138),
            AxisSample::y(790, 145),
        ];
        let chosen = reduce_axis(&samples, ReducerPolicy::SafestCrop).unwrap();
        assert_eq!((chosen.length, chosen.offset), (800, 140));
    }

    #[test]
    fn test_most_seen_crop_picks_mode() {
        let samples = vec![
            AxisSample::y(1080, 0),
            AxisSample::y(800, 140),
            AxisSample::y(800, 140),
            AxisSample::y(800, 140),
            AxisSample::y(1080, 0),
        ];
        let chosen = reduce_axis(&samples, ReducerPolicy::MostSeenCrop).unwrap();
        assert_eq!((chosen.length, chosen.offset), (800, 140));
    }

    #[test]
    fn test_most_seen_crop_tie_keeps_first_seen_group() {
        let samples = vec![
            AxisSample::x(1900, 10),
            AxisSample::x(1920, 0),
            AxisSample::x(1900, 10),
            AxisSample::x(1920, 0),
        ];
        let chosen = reduce_axis(&samples, ReducerPolicy::MostSeenCrop).unwrap();
        assert_eq!((chosen.length, chosen.offset), (1900, 10));
    }

    #[test]
    fn test_most_seen_crop_distinguishes_offsets_with_equal_lengths() {
        let samples = vec![
            AxisSample::y(800, 140),
            AxisSample::y(800, 0),
            AxisSample::y(800, 0),
        ];
        let chosen = reduce_axis(&samples, ReducerPolicy::MostSeenCrop).unwrap();
        assert_eq!((chosen.length, chosen.offset), (800, 0));
    }

    #[test]
    fn test_single_sample_wins_under_both_policies() {
        let sample = AxisSample::x(1280, 0);
        for policy in [ReducerPolicy::SafestCrop, ReducerPolicy::MostSeenCrop] {
            let chosen = reduce_axis(&[sample], policy).unwrap();
            assert_eq!(chosen, sample);
        }
    }
}
