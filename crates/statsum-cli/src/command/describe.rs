use std::path::PathBuf;

use clap::{Args, ValueEnum};
use statsum_engine::{
    ComputeRequest, DataSource, Operation, ShapePolicy, VarianceKind, compute, parse_ungrouped,
};

use crate::{render, util};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum KindArg {
    Sample,
    Population,
}

impl From<KindArg> for VarianceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Sample => Self::Sample,
            KindArg::Population => Self::Population,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PolicyArg {
    MeanMedian,
    Moment,
}

impl From<PolicyArg> for ShapePolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::MeanMedian => Self::MeanMedian,
            PolicyArg::Moment => Self::Moment,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct DescribeArg {
    /// Comma-separated observations, e.g. "2, 4, 6, 8, 10"
    #[arg(long, conflicts_with = "input")]
    data: Option<String>,

    /// Read the dataset from this file (stdin when neither --data nor --input is given)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Five-number summary (min, Q1, median, Q3, max)
    #[arg(long)]
    five_number: bool,

    /// Arithmetic mean
    #[arg(long)]
    mean: bool,

    /// Median (50th percentile)
    #[arg(long)]
    median: bool,

    /// Mode, listing every tied value
    #[arg(long)]
    mode: bool,

    /// Variance (see --kind)
    #[arg(long)]
    variance: bool,

    /// Standard deviation (see --kind)
    #[arg(long)]
    std_dev: bool,

    /// Inner and outer IQR fences
    #[arg(long)]
    fences: bool,

    /// Symmetry/skew classification (see --policy)
    #[arg(long)]
    shape: bool,

    /// Frequency table of distinct values
    #[arg(long)]
    frequency_table: bool,

    /// Stem-and-leaf plot
    #[arg(long)]
    stem_leaf: bool,

    /// Histogram class table with floor(sqrt(N)) bins
    #[arg(long)]
    histogram: bool,

    /// Run every computation (also the default when no computation flag is given)
    #[arg(long)]
    all: bool,

    /// Divisor for variance and standard deviation
    #[arg(long, value_enum, default_value_t = KindArg::Sample)]
    kind: KindArg,

    /// Shape classification policy
    #[arg(long, value_enum, default_value_t = PolicyArg::MeanMedian)]
    policy: PolicyArg,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

impl DescribeArg {
    fn operations(&self) -> Vec<Operation> {
        let any_selected = self.five_number
            || self.mean
            || self.median
            || self.mode
            || self.variance
            || self.std_dev
            || self.fences
            || self.shape
            || self.frequency_table
            || self.stem_leaf
            || self.histogram;
        let all = self.all || !any_selected;
        let kind = VarianceKind::from(self.kind);
        let policy = ShapePolicy::from(self.policy);

        let mut operations = Vec::new();
        if all || self.five_number {
            operations.push(Operation::FiveNumberSummary);
        }
        if all || self.mean {
            operations.push(Operation::Mean);
        }
        if all || self.median {
            operations.push(Operation::Median);
        }
        if all || self.mode {
            operations.push(Operation::Mode);
        }
        if all || self.variance {
            operations.push(Operation::Variance(kind));
        }
        if all || self.std_dev {
            operations.push(Operation::StdDev(kind));
        }
        if all || self.fences {
            operations.push(Operation::Fences);
        }
        if all || self.shape {
            operations.push(Operation::Shape(policy));
        }
        if all || self.frequency_table {
            operations.push(Operation::FrequencyTable);
        }
        if all || self.stem_leaf {
            operations.push(Operation::StemLeaf);
        }
        if all || self.histogram {
            operations.push(Operation::Histogram);
        }
        operations
    }
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let text = util::read_input(arg.data.as_deref(), arg.input.as_deref())?;
    let data = parse_ungrouped(&text)?;
    let request = ComputeRequest {
        source: DataSource::Ungrouped(data),
        operations: arg.operations(),
    };
    let report = compute(&request);
    if arg.json {
        println!("{}", serde_json::to_string_pretty(&render::to_json(&report))?);
    } else {
        render::print_text(&report);
    }
    Ok(())
}
