use serde::Serialize;

use crate::{Dataset, DegenerateModalClassError, EmptyDatasetError, ParseError};

/// A single class interval of a grouped frequency distribution.
///
/// Midpoint and width are derived, not stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassInterval {
    pub lower: f64,
    pub upper: f64,
    pub frequency: u64,
}

impl ClassInterval {
    /// Builds a class interval.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvertedInterval`] if `upper` is not strictly
    /// above `lower`.
    pub fn new(lower: f64, upper: f64, frequency: u64) -> Result<Self, ParseError> {
        if upper <= lower {
            return Err(ParseError::InvertedInterval { lower, upper });
        }
        Ok(Self {
            lower,
            upper,
            frequency,
        })
    }

    /// The class midpoint `(lower + upper) / 2`.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// The class width `upper - lower`.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// One row of a grouped frequency/cumulative table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CumulativeRow {
    pub lower: f64,
    pub upper: f64,
    pub frequency: u64,
    pub relative_frequency: f64,
    pub cumulative_frequency: u64,
}

/// A validated grouped frequency distribution.
///
/// Intervals are ordered by lower bound ascending and never overlap.
/// Statistics use the midpoint approximation: every observation in a class is
/// treated as sitting at the class midpoint.
///
/// # Examples
///
/// ```
/// use statsum_engine::{ClassInterval, GroupedDistribution};
///
/// let dist = GroupedDistribution::new(vec![
///     ClassInterval::new(11.5, 11.9, 6).unwrap(),
///     ClassInterval::new(12.0, 12.4, 14).unwrap(),
/// ])
/// .unwrap();
/// assert_eq!(dist.total_frequency(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedDistribution {
    intervals: Vec<ClassInterval>,
}

impl GroupedDistribution {
    /// Builds a distribution, sorting intervals by lower bound.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NoValidLines`] when `intervals` is empty, and
    /// [`ParseError::OverlappingInterval`] when two intervals overlap after
    /// sorting.
    pub fn new(mut intervals: Vec<ClassInterval>) -> Result<Self, ParseError> {
        if intervals.is_empty() {
            return Err(ParseError::NoValidLines);
        }
        intervals.sort_by(|a, b| a.lower.total_cmp(&b.lower));
        for pair in intervals.windows(2) {
            if pair[1].lower < pair[0].upper {
                return Err(ParseError::OverlappingInterval {
                    lower: pair[1].lower,
                    upper: pair[1].upper,
                });
            }
        }
        Ok(Self { intervals })
    }

    /// The class intervals, ordered by lower bound ascending.
    #[must_use]
    pub fn intervals(&self) -> &[ClassInterval] {
        &self.intervals
    }

    /// Total frequency `N` across all classes.
    #[must_use]
    pub fn total_frequency(&self) -> u64 {
        self.intervals.iter().map(|iv| iv.frequency).sum()
    }

    /// The class width, taken from the first interval.
    ///
    /// The engine assumes uniform widths; widths of later intervals are not
    /// consulted except by the modal-class formula, which uses the modal
    /// interval's own width.
    #[must_use]
    pub fn class_width(&self) -> f64 {
        self.intervals[0].width()
    }

    /// The midpoint-approximation mean `sum(f_i * m_i) / N`.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyDatasetError`] when the total frequency is zero.
    #[expect(clippy::cast_precision_loss)]
    pub fn mean(&self) -> Result<f64, EmptyDatasetError> {
        let n = self.total_frequency();
        if n == 0 {
            return Err(EmptyDatasetError);
        }
        let weighted = self
            .intervals
            .iter()
            .map(|iv| iv.frequency as f64 * iv.midpoint())
            .sum::<f64>();
        Ok(weighted / n as f64)
    }

    /// The midpoint-approximation population variance
    /// `sum(f_i * (m_i - mean)^2) / N`.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyDatasetError`] when the total frequency is zero.
    #[expect(clippy::cast_precision_loss)]
    pub fn variance(&self) -> Result<f64, EmptyDatasetError> {
        let mean = self.mean()?;
        let n = self.total_frequency();
        let weighted = self
            .intervals
            .iter()
            .map(|iv| iv.frequency as f64 * (iv.midpoint() - mean).powi(2))
            .sum::<f64>();
        Ok(weighted / n as f64)
    }

    /// The midpoint-approximation population standard deviation.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyDatasetError`] when the total frequency is zero.
    pub fn std_dev(&self) -> Result<f64, EmptyDatasetError> {
        Ok(self.variance()?.sqrt())
    }

    /// The interpolated mode
    /// `L + ((f1 - f0) / (2*f1 - f0 - f2)) * width`, where `f1` is the modal
    /// class frequency and `f0`/`f2` its neighbors (zero at the edges).
    ///
    /// Frequency ties pick the earliest class as modal.
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateModalClassError`] when the denominator is zero
    /// instead of propagating infinity or NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// use statsum_engine::{ClassInterval, GroupedDistribution};
    ///
    /// let dist = GroupedDistribution::new(vec![
    ///     ClassInterval::new(0.0, 10.0, 4).unwrap(),
    ///     ClassInterval::new(10.0, 20.0, 12).unwrap(),
    ///     ClassInterval::new(20.0, 30.0, 8).unwrap(),
    /// ])
    /// .unwrap();
    /// // 10 + ((12 - 4) / (24 - 4 - 8)) * 10
    /// assert_eq!(dist.mode().unwrap(), 10.0 + (8.0 / 12.0) * 10.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn mode(&self) -> Result<f64, DegenerateModalClassError> {
        let mut modal = 0;
        for (idx, iv) in self.intervals.iter().enumerate() {
            if iv.frequency > self.intervals[modal].frequency {
                modal = idx;
            }
        }
        let f1 = self.intervals[modal].frequency as f64;
        let f0 = if modal == 0 {
            0.0
        } else {
            self.intervals[modal - 1].frequency as f64
        };
        let f2 = if modal + 1 == self.intervals.len() {
            0.0
        } else {
            self.intervals[modal + 1].frequency as f64
        };
        let denominator = 2.0 * f1 - f0 - f2;
        if denominator == 0.0 {
            return Err(DegenerateModalClassError);
        }
        let interval = &self.intervals[modal];
        Ok(interval.lower + ((f1 - f0) / denominator) * interval.width())
    }

    /// The frequency table with relative and running cumulative frequencies,
    /// in class order.
    ///
    /// The last row's cumulative frequency equals [`total_frequency`].
    ///
    /// [`total_frequency`]: GroupedDistribution::total_frequency
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn cumulative_table(&self) -> Vec<CumulativeRow> {
        let n = self.total_frequency();
        let mut running = 0;
        self.intervals
            .iter()
            .map(|iv| {
                running += iv.frequency;
                CumulativeRow {
                    lower: iv.lower,
                    upper: iv.upper,
                    frequency: iv.frequency,
                    relative_frequency: if n == 0 {
                        0.0
                    } else {
                        iv.frequency as f64 / n as f64
                    },
                    cumulative_frequency: running,
                }
            })
            .collect()
    }

    /// Reconstructs an approximate raw sample by repeating each class
    /// midpoint `frequency` times.
    ///
    /// Used to feed computations designed for raw data (shape classification,
    /// quantiles, plots). The result is an approximation, not the original
    /// observations.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyDatasetError`] when the total frequency is zero.
    #[expect(clippy::cast_possible_truncation)]
    pub fn expand(&self) -> Result<Dataset, EmptyDatasetError> {
        let values = self
            .intervals
            .iter()
            .flat_map(|iv| std::iter::repeat_n(iv.midpoint(), iv.frequency as usize))
            .collect::<Vec<_>>();
        Dataset::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(lower: f64, upper: f64, frequency: u64) -> ClassInterval {
        ClassInterval::new(lower, upper, frequency).unwrap()
    }

    fn example_distribution() -> GroupedDistribution {
        GroupedDistribution::new(vec![interval(11.5, 11.9, 6), interval(12.0, 12.4, 14)]).unwrap()
    }

    #[test]
    fn test_total_and_cumulative_frequency() {
        let dist = example_distribution();
        assert_eq!(dist.total_frequency(), 20);
        let table = dist.cumulative_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].cumulative_frequency, 6);
        assert_eq!(table[1].cumulative_frequency, 20);
        assert!((table[0].relative_frequency - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_midpoint_mean_and_variance() {
        // Midpoints 11.7 and 12.2; mean = (6*11.7 + 14*12.2) / 20 = 12.05
        let dist = example_distribution();
        let mean = dist.mean().unwrap();
        assert!((mean - 12.05).abs() < 1e-12);

        let expected_var = (6.0 * (11.7f64 - 12.05).powi(2) + 14.0 * (12.2f64 - 12.05).powi(2)) / 20.0;
        assert!((dist.variance().unwrap() - expected_var).abs() < 1e-12);
        assert!((dist.std_dev().unwrap() - expected_var.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_inverted_interval_rejected() {
        assert!(matches!(
            ClassInterval::new(5.0, 3.0, 10),
            Err(ParseError::InvertedInterval { .. })
        ));
    }

    #[test]
    fn test_overlapping_intervals_rejected() {
        let result =
            GroupedDistribution::new(vec![interval(0.0, 10.0, 5), interval(5.0, 15.0, 5)]);
        assert!(matches!(
            result,
            Err(ParseError::OverlappingInterval { .. })
        ));
    }

    #[test]
    fn test_intervals_sorted_on_construction() {
        let dist =
            GroupedDistribution::new(vec![interval(12.0, 12.4, 14), interval(11.5, 11.9, 6)])
                .unwrap();
        assert_eq!(dist, example_distribution());
    }

    #[test]
    fn test_zero_frequency_statistics_fail() {
        let dist = GroupedDistribution::new(vec![interval(0.0, 1.0, 0)]).unwrap();
        assert_eq!(dist.mean(), Err(EmptyDatasetError));
        assert_eq!(dist.variance(), Err(EmptyDatasetError));
        assert_eq!(dist.mode(), Err(DegenerateModalClassError));
        assert_eq!(dist.expand(), Err(EmptyDatasetError));
    }

    #[test]
    fn test_modal_class_interpolation_edges() {
        // Modal class first: f0 = 0
        let dist = GroupedDistribution::new(vec![interval(0.0, 10.0, 10), interval(10.0, 20.0, 5)])
            .unwrap();
        // 0 + ((10 - 0) / (20 - 0 - 5)) * 10
        assert!((dist.mode().unwrap() - 10.0 / 15.0 * 10.0).abs() < 1e-12);

        // Modal class last: f2 = 0
        let dist = GroupedDistribution::new(vec![interval(0.0, 10.0, 5), interval(10.0, 20.0, 10)])
            .unwrap();
        // 10 + ((10 - 5) / (20 - 5 - 0)) * 10
        assert!((dist.mode().unwrap() - (10.0 + 5.0 / 15.0 * 10.0)).abs() < 1e-12);
    }

    #[test]
    fn test_expand_reproduces_grouped_mean() {
        let dist = example_distribution();
        let expanded = dist.expand().unwrap();
        assert_eq!(expanded.len(), 20);
        assert!((expanded.mean() - dist.mean().unwrap()).abs() < 1e-9);
    }
}
