//! Growth classification
//!
//! Maps measured (size, time) pairs and per-element heap usage onto
//! qualitative complexity labels.

use crate::constants::{SPACE_CONSTANT_BYTES_PER_ELEMENT, SPACE_LINEAR_BYTES_PER_ELEMENT};
use crate::models::{Estimate, SpaceComplexity, TimeComplexity};

/// Upper bound of a growth band
#[derive(Debug, Clone, Copy)]
enum Threshold {
    /// Fixed ratio
    Absolute(f64),
    /// Multiple of the size ratio
    RelativeToSize(f64),
}

impl Threshold {
    fn bound(self, size_ratio: f64) -> f64 {
        match self {
            Self::Absolute(limit) => limit,
            Self::RelativeToSize(factor) => factor * size_ratio,
        }
    }
}

/// Bands checked in order; the first whose bound exceeds the time ratio wins
const GROWTH_BANDS: &[(Threshold, TimeComplexity)] = &[
    (Threshold::Absolute(1.5), TimeComplexity::Constant),
    (Threshold::RelativeToSize(1.5), TimeComplexity::Logarithmic),
    (Threshold::RelativeToSize(2.0), TimeComplexity::Linear),
    (Threshold::RelativeToSize(3.0), TimeComplexity::Linearithmic),
    (Threshold::RelativeToSize(4.0), TimeComplexity::Quadratic),
];

/// Classify how time grows with input size
///
/// `timings` holds `(size, seconds)` pairs in ascending size order.
pub fn classify_time(timings: &[(usize, f64)]) -> Estimate<TimeComplexity> {
    if timings.len() < 2 {
        return Estimate::Unknown("insufficient data".to_string());
    }

    let (time_ratios, size_ratios): (Vec<f64>, Vec<f64>) = timings
        .windows(2)
        .map(|pair| {
            let (prev_size, prev_time) = pair[0];
            let (size, time) = pair[1];
            let time_ratio = if prev_time > 0.0 { time / prev_time } else { 1.0 };
            (time_ratio, size as f64 / prev_size.max(1) as f64)
        })
        .unzip();

    let avg_time_ratio = mean(&time_ratios);
    let avg_size_ratio = mean(&size_ratios);

    let label = GROWTH_BANDS
        .iter()
        .find(|(threshold, _)| avg_time_ratio < threshold.bound(avg_size_ratio))
        .map(|(_, label)| *label)
        .unwrap_or(TimeComplexity::HigherPolynomial);

    tracing::debug!(
        avg_time_ratio,
        avg_size_ratio,
        label = label.notation(),
        "Classified time growth"
    );

    Estimate::Known(label)
}

/// Classify peak heap bytes per input element
pub fn classify_space(peak_bytes: usize, elements: usize) -> Estimate<SpaceComplexity> {
    if elements == 0 {
        return Estimate::Unknown("cannot determine input size".to_string());
    }

    let per_element = peak_bytes as f64 / elements as f64;
    let label = if per_element < SPACE_CONSTANT_BYTES_PER_ELEMENT {
        SpaceComplexity::Constant
    } else if per_element < SPACE_LINEAR_BYTES_PER_ELEMENT {
        SpaceComplexity::Linear
    } else {
        SpaceComplexity::QuadraticOrHigher
    };

    Estimate::Known(label)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Timings over a 10x size ladder where each step multiplies time by `factor`
    fn ladder(factor: f64) -> Vec<(usize, f64)> {
        let mut time = 0.001;
        [10, 100, 1000, 10000]
            .into_iter()
            .map(|size| {
                let point = (size, time);
                time *= factor;
                point
            })
            .collect()
    }

    #[test]
    fn test_time_bands() {
        assert_eq!(classify_time(&ladder(1.0)), Estimate::Known(TimeComplexity::Constant));
        assert_eq!(classify_time(&ladder(1.4)), Estimate::Known(TimeComplexity::Constant));
        assert_eq!(classify_time(&ladder(10.0)), Estimate::Known(TimeComplexity::Logarithmic));
        assert_eq!(classify_time(&ladder(18.0)), Estimate::Known(TimeComplexity::Linear));
        assert_eq!(classify_time(&ladder(25.0)), Estimate::Known(TimeComplexity::Linearithmic));
        assert_eq!(classify_time(&ladder(35.0)), Estimate::Known(TimeComplexity::Quadratic));
        assert_eq!(
            classify_time(&ladder(100.0)),
            Estimate::Known(TimeComplexity::HigherPolynomial)
        );
    }

    #[test]
    fn test_zero_previous_time_counts_as_flat() {
        let timings = vec![(10, 0.0), (100, 0.0), (1000, 0.0)];
        assert_eq!(classify_time(&timings), Estimate::Known(TimeComplexity::Constant));
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(
            classify_time(&[(10, 0.1)]),
            Estimate::Unknown("insufficient data".to_string())
        );
        assert!(classify_time(&[]).known().is_none());
    }

    #[test]
    fn test_space_bands() {
        assert_eq!(classify_space(50, 10), Estimate::Known(SpaceComplexity::Constant));
        assert_eq!(classify_space(8_000, 1_000), Estimate::Known(SpaceComplexity::Linear));
        assert_eq!(
            classify_space(5_000_000, 1_000),
            Estimate::Known(SpaceComplexity::QuadraticOrHigher)
        );
        assert_eq!(
            classify_space(1_000, 0),
            Estimate::Unknown("cannot determine input size".to_string())
        );
    }
}
