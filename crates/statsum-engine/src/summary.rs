//! Frequency tables, stem-and-leaf plots, and histogram binning.

use serde::Serialize;

use crate::Dataset;

/// One row of an ungrouped frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyRow {
    pub value: f64,
    pub frequency: u64,
}

/// Groups equal values of the dataset into `(value, count)` rows, ascending.
///
/// # Examples
///
/// ```
/// use statsum_engine::{Dataset, frequency_table};
///
/// let data = Dataset::new([1.0, 1.0, 2.0, 3.0, 3.0, 3.0]).unwrap();
/// let rows = frequency_table(&data);
/// assert_eq!(rows.len(), 3);
/// assert_eq!((rows[0].value, rows[0].frequency), (1.0, 2));
/// assert_eq!((rows[1].value, rows[1].frequency), (2.0, 1));
/// assert_eq!((rows[2].value, rows[2].frequency), (3.0, 3));
/// ```
#[must_use]
pub fn frequency_table(data: &Dataset) -> Vec<FrequencyRow> {
    let values = data.values();
    let mut rows: Vec<FrequencyRow> = Vec::new();
    for &v in values {
        match rows.last_mut() {
            Some(row) if row.value == v => row.frequency += 1,
            _ => rows.push(FrequencyRow {
                value: v,
                frequency: 1,
            }),
        }
    }
    rows
}

/// One stem with its ordered leaf digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StemLeafEntry {
    pub stem: i64,
    pub leaves: Vec<u8>,
}

/// Decomposes the sorted dataset into stems and single-digit leaves.
///
/// Uses floor-division semantics: `stem = floor(v / 10)` toward negative
/// infinity and the leaf is the truncated non-negative remainder, so leaves
/// stay in `0..=9` for negative values too (`-23.5` becomes stem `-3`,
/// leaf `6`). Stems appear in first-encounter order over the sorted data,
/// which is ascending.
///
/// # Examples
///
/// ```
/// use statsum_engine::{Dataset, stem_leaf};
///
/// let data = Dataset::new([12.0, 15.0, 23.0, 15.5]).unwrap();
/// let entries = stem_leaf(&data);
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[0].stem, 1);
/// assert_eq!(entries[0].leaves, vec![2, 5, 5]);
/// assert_eq!(entries[1].stem, 2);
/// assert_eq!(entries[1].leaves, vec![3]);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn stem_leaf(data: &Dataset) -> Vec<StemLeafEntry> {
    let mut entries: Vec<StemLeafEntry> = Vec::new();
    for &v in data.values() {
        let stem = v.div_euclid(10.0) as i64;
        let leaf = v.rem_euclid(10.0).trunc() as u8;
        match entries.last_mut() {
            Some(entry) if entry.stem == stem => entry.leaves.push(leaf),
            _ => entries.push(StemLeafEntry {
                stem,
                leaves: vec![leaf],
            }),
        }
    }
    entries
}

/// A single equal-width histogram bin.
///
/// The bin covers `[lower, upper)`, except for the last bin, which includes
/// its upper edge so the maximum observation is counted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub frequency: u64,
    pub relative_frequency: f64,
}

/// An equal-width histogram spanning `[min, max]` of a dataset.
///
/// The bin count is `floor(sqrt(N))`, at least 1. Relative frequencies sum
/// to 1 within floating-point tolerance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Builds the histogram for `data`.
    ///
    /// # Examples
    ///
    /// ```
    /// use statsum_engine::{Dataset, Histogram};
    ///
    /// let data = Dataset::new((1..=9).map(f64::from)).unwrap();
    /// let histogram = Histogram::from_dataset(&data);
    /// assert_eq!(histogram.bins.len(), 3);
    /// let total: u64 = histogram.bins.iter().map(|b| b.frequency).sum();
    /// assert_eq!(total, 9);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_dataset(data: &Dataset) -> Self {
        let values = data.values();
        let n = values.len();
        let num_bins = ((n as f64).sqrt().floor() as usize).max(1);
        let min = data.min();
        let max = data.max();
        let range = max - min;

        if range <= 0.0 {
            // All observations equal: a single bin holds everything.
            return Self {
                bins: vec![HistogramBin {
                    lower: min,
                    upper: max,
                    frequency: n as u64,
                    relative_frequency: 1.0,
                }],
            };
        }

        let width = range / num_bins as f64;
        let mut bins = (0..num_bins)
            .map(|idx| HistogramBin {
                lower: min + idx as f64 * width,
                // Recompute the edge from the index so accumulated rounding
                // never leaves a gap before max.
                upper: if idx + 1 == num_bins {
                    max
                } else {
                    min + (idx + 1) as f64 * width
                },
                frequency: 0,
                relative_frequency: 0.0,
            })
            .collect::<Vec<_>>();

        for &v in values {
            let idx = (((v - min) / width).floor() as usize).min(num_bins - 1);
            bins[idx].frequency += 1;
        }
        for bin in &mut bins {
            bin.relative_frequency = bin.frequency as f64 / n as f64;
        }
        Self { bins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(values: &[f64]) -> Dataset {
        Dataset::new(values.iter().copied()).unwrap()
    }

    #[test]
    fn test_frequency_table_groups_and_orders() {
        let data = dataset(&[3.0, 1.0, 3.0, 2.0, 1.0, 3.0]);
        let rows = frequency_table(&data);
        assert_eq!(
            rows,
            vec![
                FrequencyRow {
                    value: 1.0,
                    frequency: 2
                },
                FrequencyRow {
                    value: 2.0,
                    frequency: 1
                },
                FrequencyRow {
                    value: 3.0,
                    frequency: 3
                },
            ]
        );
    }

    #[test]
    fn test_stem_leaf_basic() {
        let data = dataset(&[12.0, 15.0, 23.0]);
        let entries = stem_leaf(&data);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].stem, 1);
        assert_eq!(entries[0].leaves, vec![2, 5]);
        assert_eq!(entries[1].stem, 2);
        assert_eq!(entries[1].leaves, vec![3]);
    }

    #[test]
    fn test_stem_leaf_fractional_leaf_truncates() {
        let data = dataset(&[23.7]);
        let entries = stem_leaf(&data);
        assert_eq!(entries[0].stem, 2);
        assert_eq!(entries[0].leaves, vec![3]);
    }

    #[test]
    fn test_stem_leaf_negative_floor_convention() {
        let data = dataset(&[-23.5]);
        let entries = stem_leaf(&data);
        assert_eq!(entries[0].stem, -3);
        assert_eq!(entries[0].leaves, vec![6]);
    }

    #[test]
    fn test_histogram_bin_count_and_assignment() {
        // N = 10 -> 3 bins over [1, 10], width 3
        let data = dataset(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let histogram = Histogram::from_dataset(&data);
        assert_eq!(histogram.bins.len(), 3);
        assert_eq!(histogram.bins[0].frequency, 3); // 1, 2, 3
        assert_eq!(histogram.bins[1].frequency, 3); // 4, 5, 6
        assert_eq!(histogram.bins[2].frequency, 4); // 7, 8, 9, 10
        assert_eq!(histogram.bins[2].upper, 10.0);
    }

    #[test]
    fn test_histogram_relative_frequencies_sum_to_one() {
        for values in [
            vec![5.0],
            vec![1.0, 1.0, 1.0],
            vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0, 5.0],
        ] {
            let histogram = Histogram::from_dataset(&dataset(&values));
            let total: f64 = histogram.bins.iter().map(|b| b.relative_frequency).sum();
            assert!((total - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_histogram_single_value_dataset() {
        let histogram = Histogram::from_dataset(&dataset(&[4.0, 4.0, 4.0, 4.0]));
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.bins[0].frequency, 4);
        assert_eq!(histogram.bins[0].relative_frequency, 1.0);
    }
}
