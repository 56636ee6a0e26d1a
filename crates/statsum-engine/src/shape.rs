use serde::Serialize;

use crate::Dataset;

/// Symmetry/skew classification of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, Serialize)]
pub enum ShapeLabel {
    #[display("Symmetrical")]
    Symmetrical,
    #[display("Right Skewed")]
    #[serde(rename = "Right Skewed")]
    RightSkewed,
    #[display("Left Skewed")]
    #[serde(rename = "Left Skewed")]
    LeftSkewed,
}

/// Which classification strategy to apply.
///
/// The two policies can disagree on the same data; they are deliberately kept
/// separate and the caller picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapePolicy {
    /// Compare mean against median: symmetrical when they differ by less
    /// than 0.01, otherwise skewed toward the larger of the two.
    MeanMedian,
    /// Threshold the sample skewness coefficient: symmetrical when its
    /// magnitude is below 0.5, otherwise skewed in its sign's direction.
    Moment,
}

const MEAN_MEDIAN_EPSILON: f64 = 0.01;
const MOMENT_THRESHOLD: f64 = 0.5;

/// Classifies the shape of `data` under the chosen policy.
///
/// # Examples
///
/// ```
/// use statsum_engine::{Dataset, ShapeLabel, ShapePolicy, classify_shape};
///
/// let data = Dataset::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert_eq!(
///     classify_shape(&data, ShapePolicy::MeanMedian),
///     ShapeLabel::Symmetrical
/// );
///
/// let tail = Dataset::new([1.0, 1.0, 1.0, 2.0, 30.0]).unwrap();
/// assert_eq!(
///     classify_shape(&tail, ShapePolicy::Moment),
///     ShapeLabel::RightSkewed
/// );
/// ```
#[must_use]
pub fn classify_shape(data: &Dataset, policy: ShapePolicy) -> ShapeLabel {
    match policy {
        ShapePolicy::MeanMedian => {
            let mean = data.mean();
            let median = data.median();
            if (mean - median).abs() < MEAN_MEDIAN_EPSILON {
                ShapeLabel::Symmetrical
            } else if mean > median {
                ShapeLabel::RightSkewed
            } else {
                ShapeLabel::LeftSkewed
            }
        }
        ShapePolicy::Moment => {
            let g1 = skewness(data);
            if g1.abs() < MOMENT_THRESHOLD {
                ShapeLabel::Symmetrical
            } else if g1 > 0.0 {
                ShapeLabel::RightSkewed
            } else {
                ShapeLabel::LeftSkewed
            }
        }
    }
}

/// The sample skewness coefficient `g1 = m3 / m2^(3/2)`, from the second and
/// third central moments.
///
/// Returns 0.0 when the spread is zero (all observations equal), so constant
/// data classifies as symmetrical rather than NaN.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn skewness(data: &Dataset) -> f64 {
    let n = data.len() as f64;
    let mean = data.mean();
    let mut m2 = 0.0;
    let mut m3 = 0.0;
    for &v in data.values() {
        let d = v - mean;
        m2 += d * d;
        m3 += d * d * d;
    }
    m2 /= n;
    m3 /= n;
    if m2 <= 0.0 {
        return 0.0;
    }
    m3 / m2.powf(1.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(values: &[f64]) -> Dataset {
        Dataset::new(values.iter().copied()).unwrap()
    }

    #[test]
    fn test_mean_median_policy() {
        let symmetric = dataset(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(
            classify_shape(&symmetric, ShapePolicy::MeanMedian),
            ShapeLabel::Symmetrical
        );

        // Mean 3.25 well above median 1
        let right = dataset(&[1.0, 1.0, 1.0, 10.0]);
        assert_eq!(
            classify_shape(&right, ShapePolicy::MeanMedian),
            ShapeLabel::RightSkewed
        );

        let left = dataset(&[-10.0, 9.0, 9.0, 9.0]);
        assert_eq!(
            classify_shape(&left, ShapePolicy::MeanMedian),
            ShapeLabel::LeftSkewed
        );
    }

    #[test]
    fn test_moment_policy() {
        let symmetric = dataset(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(skewness(&symmetric), 0.0);
        assert_eq!(
            classify_shape(&symmetric, ShapePolicy::Moment),
            ShapeLabel::Symmetrical
        );

        let right = dataset(&[1.0, 1.0, 1.0, 2.0, 30.0]);
        assert!(skewness(&right) > MOMENT_THRESHOLD);
        assert_eq!(
            classify_shape(&right, ShapePolicy::Moment),
            ShapeLabel::RightSkewed
        );

        let left = dataset(&[-30.0, 2.0, 1.0, 1.0, 1.0]);
        assert_eq!(
            classify_shape(&left, ShapePolicy::Moment),
            ShapeLabel::LeftSkewed
        );
    }

    #[test]
    fn test_policies_can_disagree() {
        // Mean 2.6 vs median 2: skewed for mean-median, but the moment
        // coefficient stays under the 0.5 threshold.
        let data = dataset(&[1.0, 2.0, 2.0, 4.0, 4.0]);
        assert_eq!(
            classify_shape(&data, ShapePolicy::MeanMedian),
            ShapeLabel::RightSkewed
        );
        assert_eq!(
            classify_shape(&data, ShapePolicy::Moment),
            ShapeLabel::Symmetrical
        );
    }

    #[test]
    fn test_shape_label_serialization() {
        let json = serde_json::to_value(ShapeLabel::RightSkewed).unwrap();
        assert_eq!(json, serde_json::json!("Right Skewed"));
        let json = serde_json::to_value(ShapeLabel::Symmetrical).unwrap();
        assert_eq!(json, serde_json::json!("Symmetrical"));
    }

    #[test]
    fn test_constant_data_is_symmetrical() {
        let data = dataset(&[7.0, 7.0, 7.0]);
        assert_eq!(skewness(&data), 0.0);
        assert_eq!(
            classify_shape(&data, ShapePolicy::Moment),
            ShapeLabel::Symmetrical
        );
    }
}
