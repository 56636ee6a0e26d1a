//! Request/report surface: one call computing many operations.
//!
//! The presentation layer builds a [`ComputeRequest`] naming the data source
//! and the operations it wants, and gets back a [`Report`] with one outcome
//! per operation. Errors are isolated per operation: a sample variance
//! request failing on a single observation does not stop the mean beside it.

use serde::Serialize;

use crate::{
    CumulativeRow, Dataset, EngineError, FenceSet, FiveNumberSummary, FrequencyRow,
    GroupedDistribution, ShapeLabel, ShapePolicy, StemLeafEntry, VarianceKind, classify_shape,
    frequency_table, stem_leaf, summary,
};

/// A single computation the engine can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    FiveNumberSummary,
    Mean,
    Median,
    Mode,
    Variance(VarianceKind),
    StdDev(VarianceKind),
    Fences,
    Shape(ShapePolicy),
    FrequencyTable,
    StemLeaf,
    Histogram,
    CumulativeTable,
}

impl Operation {
    /// A stable lowercase name for rendering and diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::FiveNumberSummary => "five number summary",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
            Self::Variance(VarianceKind::Sample) => "sample variance",
            Self::Variance(VarianceKind::Population) => "population variance",
            Self::StdDev(VarianceKind::Sample) => "sample standard deviation",
            Self::StdDev(VarianceKind::Population) => "population standard deviation",
            Self::Fences => "inner and outer fences",
            Self::Shape(_) => "shape",
            Self::FrequencyTable => "frequency table",
            Self::StemLeaf => "stem and leaf",
            Self::Histogram => "histogram",
            Self::CumulativeTable => "cumulative table",
        }
    }
}

/// An operation was requested on a data source it is not defined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("operation '{operation}' is not defined for this data source")]
pub struct UnsupportedOperationError {
    pub operation: &'static str,
}

/// The dataset a request runs against: raw observations or a pre-binned
/// frequency distribution.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Ungrouped(Dataset),
    Grouped(GroupedDistribution),
}

/// Everything needed for one engine invocation: the data plus the requested
/// operations, in the order results should come back.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeRequest {
    pub source: DataSource,
    pub operations: Vec<Operation>,
}

/// A computed value, one variant per result shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Scalar(f64),
    Set(Vec<f64>),
    FiveNumber(FiveNumberSummary),
    Fences(FenceSet),
    Shape(ShapeLabel),
    FrequencyTable(Vec<FrequencyRow>),
    StemLeaf(Vec<StemLeafEntry>),
    Histogram(summary::Histogram),
    CumulativeTable(Vec<CumulativeRow>),
}

/// Outcome of one requested operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportItem {
    pub operation: Operation,
    pub outcome: Result<StatValue, EngineError>,
}

/// Results for a whole request, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub items: Vec<ReportItem>,
}

/// Runs every requested operation against the request's data source.
///
/// # Examples
///
/// ```
/// use statsum_engine::{
///     ComputeRequest, DataSource, Operation, StatValue, VarianceKind, compute, parse_ungrouped,
/// };
///
/// let request = ComputeRequest {
///     source: DataSource::Ungrouped(parse_ungrouped("2, 4, 6, 8, 10").unwrap()),
///     operations: vec![Operation::Mean, Operation::Variance(VarianceKind::Population)],
/// };
/// let report = compute(&request);
/// assert_eq!(report.items[0].outcome, Ok(StatValue::Scalar(6.0)));
/// assert_eq!(report.items[1].outcome, Ok(StatValue::Scalar(8.0)));
/// ```
#[must_use]
pub fn compute(request: &ComputeRequest) -> Report {
    let items = request
        .operations
        .iter()
        .map(|&operation| ReportItem {
            operation,
            outcome: compute_one(&request.source, operation),
        })
        .collect();
    Report { items }
}

fn compute_one(source: &DataSource, operation: Operation) -> Result<StatValue, EngineError> {
    match source {
        DataSource::Ungrouped(data) => ungrouped_operation(data, operation),
        DataSource::Grouped(dist) => grouped_operation(dist, operation),
    }
}

fn ungrouped_operation(data: &Dataset, operation: Operation) -> Result<StatValue, EngineError> {
    let value = match operation {
        Operation::FiveNumberSummary => StatValue::FiveNumber(data.five_number_summary()),
        Operation::Mean => StatValue::Scalar(data.mean()),
        Operation::Median => StatValue::Scalar(data.median()),
        Operation::Mode => StatValue::Set(data.mode()),
        Operation::Variance(kind) => StatValue::Scalar(data.variance(kind)?),
        Operation::StdDev(kind) => StatValue::Scalar(data.std_dev(kind)?),
        Operation::Fences => StatValue::Fences(data.fences()),
        Operation::Shape(policy) => StatValue::Shape(classify_shape(data, policy)),
        Operation::FrequencyTable => StatValue::FrequencyTable(frequency_table(data)),
        Operation::StemLeaf => StatValue::StemLeaf(stem_leaf(data)),
        Operation::Histogram => StatValue::Histogram(summary::Histogram::from_dataset(data)),
        Operation::CumulativeTable => {
            return Err(UnsupportedOperationError {
                operation: operation.name(),
            }
            .into());
        }
    };
    Ok(value)
}

fn grouped_operation(
    dist: &GroupedDistribution,
    operation: Operation,
) -> Result<StatValue, EngineError> {
    let value = match operation {
        Operation::Mean => StatValue::Scalar(dist.mean()?),
        Operation::Variance(VarianceKind::Population) => StatValue::Scalar(dist.variance()?),
        Operation::StdDev(VarianceKind::Population) => StatValue::Scalar(dist.std_dev()?),
        Operation::Mode => StatValue::Scalar(dist.mode()?),
        Operation::CumulativeTable => StatValue::CumulativeTable(dist.cumulative_table()),
        // Grouped data only defines the population divisor (the midpoint
        // approximation already loses the raw sample).
        Operation::Variance(VarianceKind::Sample) | Operation::StdDev(VarianceKind::Sample) => {
            return Err(UnsupportedOperationError {
                operation: operation.name(),
            }
            .into());
        }
        // Everything else runs on the approximate midpoint expansion.
        Operation::FiveNumberSummary
        | Operation::Median
        | Operation::Fences
        | Operation::Shape(_)
        | Operation::FrequencyTable
        | Operation::StemLeaf
        | Operation::Histogram => {
            let expanded = dist.expand()?;
            return ungrouped_operation(&expanded, operation);
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InsufficientDataError, parse_grouped, parse_ungrouped};

    #[test]
    fn test_report_preserves_request_order() {
        let request = ComputeRequest {
            source: DataSource::Ungrouped(parse_ungrouped("1, 2, 3").unwrap()),
            operations: vec![Operation::Median, Operation::Mean, Operation::Mode],
        };
        let report = compute(&request);
        let names: Vec<_> = report.items.iter().map(|i| i.operation.name()).collect();
        assert_eq!(names, vec!["median", "mean", "mode"]);
    }

    #[test]
    fn test_per_operation_errors_are_isolated() {
        // N = 1: sample variance fails, mean and population variance succeed.
        let request = ComputeRequest {
            source: DataSource::Ungrouped(parse_ungrouped("5").unwrap()),
            operations: vec![
                Operation::Mean,
                Operation::Variance(VarianceKind::Sample),
                Operation::Variance(VarianceKind::Population),
            ],
        };
        let report = compute(&request);
        assert_eq!(report.items[0].outcome, Ok(StatValue::Scalar(5.0)));
        assert_eq!(
            report.items[1].outcome,
            Err(EngineError::InsufficientData(InsufficientDataError {
                required: 2,
                actual: 1
            }))
        );
        assert_eq!(report.items[2].outcome, Ok(StatValue::Scalar(0.0)));
    }

    #[test]
    fn test_cumulative_table_unsupported_for_ungrouped() {
        let request = ComputeRequest {
            source: DataSource::Ungrouped(parse_ungrouped("1, 2").unwrap()),
            operations: vec![Operation::CumulativeTable],
        };
        let report = compute(&request);
        assert!(matches!(
            report.items[0].outcome,
            Err(EngineError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_grouped_shape_runs_on_expansion() {
        let dist = parse_grouped("0 10 1\n10 20 1\n20 30 1").unwrap();
        let request = ComputeRequest {
            source: DataSource::Grouped(dist),
            operations: vec![
                Operation::Shape(ShapePolicy::MeanMedian),
                Operation::Median,
            ],
        };
        let report = compute(&request);
        assert_eq!(
            report.items[0].outcome,
            Ok(StatValue::Shape(ShapeLabel::Symmetrical))
        );
        // Midpoints 5, 15, 25
        assert_eq!(report.items[1].outcome, Ok(StatValue::Scalar(15.0)));
    }

    #[test]
    fn test_grouped_sample_variance_unsupported() {
        let dist = parse_grouped("0 10 5").unwrap();
        let request = ComputeRequest {
            source: DataSource::Grouped(dist),
            operations: vec![Operation::Variance(VarianceKind::Sample)],
        };
        let report = compute(&request);
        assert!(matches!(
            report.items[0].outcome,
            Err(EngineError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_stat_value_serializes_untagged() {
        let json = serde_json::to_value(StatValue::Scalar(6.0)).unwrap();
        assert_eq!(json, serde_json::json!(6.0));
        let json = serde_json::to_value(StatValue::Set(vec![1.0, 2.0])).unwrap();
        assert_eq!(json, serde_json::json!([1.0, 2.0]));
    }

    #[test]
    fn test_grouped_cumulative_round_trip() {
        let dist = parse_grouped("11.5 – 11.9 6\n12.0 – 12.4 14").unwrap();
        let n = dist.total_frequency();
        let request = ComputeRequest {
            source: DataSource::Grouped(dist),
            operations: vec![Operation::CumulativeTable],
        };
        let report = compute(&request);
        let Ok(StatValue::CumulativeTable(rows)) = &report.items[0].outcome else {
            panic!("expected cumulative table");
        };
        assert_eq!(rows.last().unwrap().cumulative_frequency, n);
    }
}
