use serde::Serialize;

use crate::{EmptyDatasetError, InsufficientDataError};

/// Which divisor to use for variance and standard deviation.
///
/// The two variants are not interchangeable and there is no default: callers
/// must pick one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceKind {
    /// Bessel-corrected `N - 1` divisor; undefined for fewer than two values.
    Sample,
    /// Plain `N` divisor; defined for any non-empty dataset.
    Population,
}

/// Five-number summary of a dataset: extremes plus quartiles.
///
/// All quantiles are computed with the same linear-interpolation method, so
/// the summary is reproducible against [`Dataset::percentile`] to full
/// precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub minimum: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub maximum: f64,
}

impl FiveNumberSummary {
    /// The interquartile range `Q3 - Q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Inner and outer IQR fences used to flag outliers.
///
/// Inner fences sit `1.5 * IQR` beyond the quartiles, outer fences `3 * IQR`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FenceSet {
    pub inner_lower: f64,
    pub inner_upper: f64,
    pub outer_lower: f64,
    pub outer_upper: f64,
}

/// A validated, non-empty dataset of raw observations, sorted ascending.
///
/// Sorted order is established at construction and maintained for the
/// lifetime of the value, because the quantile and fence formulas depend on
/// it. All statistics are computed fresh on demand; nothing mutates the data.
///
/// # Examples
///
/// ```
/// use statsum_engine::Dataset;
///
/// let data = Dataset::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
/// assert_eq!(data.values(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(data.mean(), 3.0);
/// assert_eq!(data.median(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    values: Vec<f64>,
}

impl Dataset {
    /// Builds a dataset from unsorted values, sorting them ascending.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyDatasetError`] if no values are supplied.
    pub fn new<I>(values: I) -> Result<Self, EmptyDatasetError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(values)
    }

    /// Builds a dataset from values already sorted ascending.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyDatasetError`] if no values are supplied.
    ///
    /// # Panics
    ///
    /// Panics if `values` is not sorted in ascending order.
    pub fn from_sorted(values: Vec<f64>) -> Result<Self, EmptyDatasetError> {
        assert!(
            values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        if values.is_empty() {
            return Err(EmptyDatasetError);
        }
        Ok(Self { values })
    }

    /// The observations, sorted ascending.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The number of observations. Always at least 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; a `Dataset` is non-empty by construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The smallest observation.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.values[0]
    }

    /// The largest observation.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// The arithmetic mean.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// The value at percentile `p` (0.0 to 100.0), by linear interpolation
    /// between order statistics.
    ///
    /// This is the single quantile method used throughout the engine, so the
    /// median, quartiles, and fences are mutually consistent.
    ///
    /// # Examples
    ///
    /// ```
    /// use statsum_engine::Dataset;
    ///
    /// let data = Dataset::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    /// assert_eq!(data.percentile(25.0), 2.0);
    /// assert_eq!(data.percentile(50.0), 3.0);
    /// assert_eq!(data.percentile(62.5), 3.5);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn percentile(&self, p: f64) -> f64 {
        let last = self.values.len() - 1;
        let rank = (p.clamp(0.0, 100.0) / 100.0) * last as f64;
        let lo = rank.floor() as usize;
        let hi = rank.ceil() as usize;
        let frac = rank - rank.floor();
        self.values[lo] + (self.values[hi] - self.values[lo]) * frac
    }

    /// The median (50th percentile).
    #[must_use]
    pub fn median(&self) -> f64 {
        self.percentile(50.0)
    }

    /// The value(s) with maximum observed frequency, ascending.
    ///
    /// Ties are all returned. A dataset where every value is unique therefore
    /// yields every value; that degenerate outcome is deliberate and left to
    /// the caller to interpret.
    ///
    /// # Examples
    ///
    /// ```
    /// use statsum_engine::Dataset;
    ///
    /// let data = Dataset::new([1.0, 1.0, 2.0, 3.0, 3.0, 3.0]).unwrap();
    /// assert_eq!(data.mode(), vec![3.0]);
    ///
    /// let tied = Dataset::new([1.0, 1.0, 2.0, 2.0]).unwrap();
    /// assert_eq!(tied.mode(), vec![1.0, 2.0]);
    /// ```
    #[must_use]
    pub fn mode(&self) -> Vec<f64> {
        let mut modes = Vec::new();
        let mut max_count = 0;
        let mut idx = 0;
        while idx < self.values.len() {
            let mut end = idx + 1;
            while end < self.values.len() && self.values[end] == self.values[idx] {
                end += 1;
            }
            let count = end - idx;
            if count > max_count {
                max_count = count;
                modes.clear();
                modes.push(self.values[idx]);
            } else if count == max_count {
                modes.push(self.values[idx]);
            }
            idx = end;
        }
        modes
    }

    /// The variance under the chosen divisor.
    ///
    /// # Errors
    ///
    /// Returns [`InsufficientDataError`] for [`VarianceKind::Sample`] on a
    /// single observation, where the `N - 1` divisor is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use statsum_engine::{Dataset, VarianceKind};
    ///
    /// let data = Dataset::new([2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();
    /// assert_eq!(data.variance(VarianceKind::Population).unwrap(), 8.0);
    /// assert_eq!(data.variance(VarianceKind::Sample).unwrap(), 10.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn variance(&self, kind: VarianceKind) -> Result<f64, InsufficientDataError> {
        let n = self.values.len();
        let divisor = match kind {
            VarianceKind::Population => n as f64,
            VarianceKind::Sample => {
                if n < 2 {
                    return Err(InsufficientDataError {
                        required: 2,
                        actual: n,
                    });
                }
                (n - 1) as f64
            }
        };
        let mean = self.mean();
        let sum_sq = self.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        Ok(sum_sq / divisor)
    }

    /// The standard deviation under the chosen divisor.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Dataset::variance`].
    pub fn std_dev(&self, kind: VarianceKind) -> Result<f64, InsufficientDataError> {
        Ok(self.variance(kind)?.sqrt())
    }

    /// The five-number summary `{min, Q1, median, Q3, max}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use statsum_engine::Dataset;
    ///
    /// let data = Dataset::new([2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();
    /// let summary = data.five_number_summary();
    /// assert_eq!(summary.minimum, 2.0);
    /// assert_eq!(summary.q1, 4.0);
    /// assert_eq!(summary.median, 6.0);
    /// assert_eq!(summary.q3, 8.0);
    /// assert_eq!(summary.maximum, 10.0);
    /// ```
    #[must_use]
    pub fn five_number_summary(&self) -> FiveNumberSummary {
        FiveNumberSummary {
            minimum: self.min(),
            q1: self.percentile(25.0),
            median: self.percentile(50.0),
            q3: self.percentile(75.0),
            maximum: self.max(),
        }
    }

    /// The inner and outer IQR fences.
    ///
    /// # Examples
    ///
    /// ```
    /// use statsum_engine::Dataset;
    ///
    /// let data = Dataset::new([2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();
    /// let fences = data.fences();
    /// assert_eq!(fences.inner_lower, -2.0);
    /// assert_eq!(fences.inner_upper, 14.0);
    /// assert_eq!(fences.outer_lower, -8.0);
    /// assert_eq!(fences.outer_upper, 20.0);
    /// ```
    #[must_use]
    pub fn fences(&self) -> FenceSet {
        let summary = self.five_number_summary();
        let iqr = summary.iqr();
        FenceSet {
            inner_lower: summary.q1 - 1.5 * iqr,
            inner_upper: summary.q3 + 1.5 * iqr,
            outer_lower: summary.q1 - 3.0 * iqr,
            outer_upper: summary.q3 + 3.0 * iqr,
        }
    }
}
