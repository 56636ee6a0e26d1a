//! Descriptive statistics for one-dimensional numeric datasets.
//!
//! This crate is the computation engine behind the `statsum` tool. It accepts
//! either raw (ungrouped) observations or a pre-binned (grouped) frequency
//! distribution and produces numerically sound summaries:
//!
//! - **Central tendency**: mean, median, mode (all tied values)
//! - **Dispersion**: sample/population variance and standard deviation,
//!   five-number summary, IQR fences
//! - **Shape**: symmetry/skew classification under two selectable policies
//! - **Distribution summaries**: frequency tables, stem-and-leaf plots,
//!   equal-width histograms, cumulative class tables
//!
//! The engine is purely synchronous and stateless: every computation takes an
//! immutable input and returns a freshly computed value object. Presentation
//! (formatting, table layout, plotting) is the caller's concern; the engine
//! returns full-precision numbers.
//!
//! # Modules
//!
//! - [`parse`]: Turning free-form text into validated datasets/distributions
//! - [`dataset`]: Statistics over sorted raw observations
//! - [`grouped`]: Midpoint-approximation statistics over class intervals
//! - [`shape`]: Symmetry/skew classification
//! - [`summary`]: Frequency tables, stem-and-leaf plots, histograms
//! - [`report`]: Request/report surface bundling many operations in one call
//!
//! # Examples
//!
//! ## Parsing and describing a raw dataset
//!
//! ```
//! use statsum_engine::{VarianceKind, parse_ungrouped};
//!
//! let data = parse_ungrouped("2, 4, 6, 8, 10").unwrap();
//! assert_eq!(data.mean(), 6.0);
//! assert_eq!(data.variance(VarianceKind::Population).unwrap(), 8.0);
//! ```
//!
//! ## Parsing a grouped frequency distribution
//!
//! ```
//! use statsum_engine::parse_grouped;
//!
//! let dist = parse_grouped("11.5 – 11.9 6\n12.0 – 12.4 14").unwrap();
//! assert_eq!(dist.total_frequency(), 20);
//! ```

pub use self::{dataset::*, grouped::*, parse::*, report::*, shape::*, summary::*};

pub mod dataset;
pub mod grouped;
pub mod parse;
pub mod report;
pub mod shape;
pub mod summary;

/// A statistic was requested on a dataset with no observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("dataset contains no observations")]
pub struct EmptyDatasetError;

/// A sample statistic was requested on too few observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("statistic requires at least {required} observations, got {actual}")]
pub struct InsufficientDataError {
    /// Minimum number of observations the statistic is defined for.
    pub required: usize,
    /// Number of observations actually supplied.
    pub actual: usize,
}

/// The modal-class interpolation formula divides by zero.
///
/// Happens when `2*f1 - f0 - f2 == 0` for the modal class, which with the
/// first-maximum tie rule only occurs when every class frequency is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("modal class interpolation denominator (2*f1 - f0 - f2) is zero")]
pub struct DegenerateModalClassError;

/// Any error the engine can produce, for callers driving it through
/// [`report::compute`].
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EngineError {
    Parse(ParseError),
    EmptyDataset(EmptyDatasetError),
    InsufficientData(InsufficientDataError),
    DegenerateModalClass(DegenerateModalClassError),
    UnsupportedOperation(UnsupportedOperationError),
}
