use std::path::PathBuf;

use clap::Args;
use statsum_engine::{
    ComputeRequest, DataSource, Operation, ShapePolicy, VarianceKind, compute, parse_grouped,
};

use crate::{command::describe::PolicyArg, render, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct GroupedArg {
    /// Class-interval lines, e.g. "11.5 – 11.9 6" (newline-separated)
    #[arg(long, conflicts_with = "input")]
    data: Option<String>,

    /// Read the class table from this file (stdin when neither --data nor --input is given)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Midpoint-approximation mean
    #[arg(long)]
    mean: bool,

    /// Population variance over class midpoints
    #[arg(long)]
    variance: bool,

    /// Population standard deviation over class midpoints
    #[arg(long)]
    std_dev: bool,

    /// Interpolated mode from the modal class
    #[arg(long)]
    mode: bool,

    /// Frequency table with relative and cumulative columns
    #[arg(long)]
    cumulative_table: bool,

    /// Symmetry/skew classification of the midpoint expansion (see --policy)
    #[arg(long)]
    shape: bool,

    /// Run every computation (also the default when no computation flag is given)
    #[arg(long)]
    all: bool,

    /// Shape classification policy
    #[arg(long, value_enum, default_value_t = PolicyArg::MeanMedian)]
    policy: PolicyArg,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

impl GroupedArg {
    fn operations(&self) -> Vec<Operation> {
        let any_selected = self.mean
            || self.variance
            || self.std_dev
            || self.mode
            || self.cumulative_table
            || self.shape;
        let all = self.all || !any_selected;
        let policy = ShapePolicy::from(self.policy);

        let mut operations = Vec::new();
        if all || self.mean {
            operations.push(Operation::Mean);
        }
        if all || self.variance {
            operations.push(Operation::Variance(VarianceKind::Population));
        }
        if all || self.std_dev {
            operations.push(Operation::StdDev(VarianceKind::Population));
        }
        if all || self.mode {
            operations.push(Operation::Mode);
        }
        if all || self.cumulative_table {
            operations.push(Operation::CumulativeTable);
        }
        if all || self.shape {
            operations.push(Operation::Shape(policy));
        }
        operations
    }
}

pub(crate) fn run(arg: &GroupedArg) -> anyhow::Result<()> {
    let text = util::read_input(arg.data.as_deref(), arg.input.as_deref())?;
    let dist = parse_grouped(&text)?;
    let request = ComputeRequest {
        source: DataSource::Grouped(dist),
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
