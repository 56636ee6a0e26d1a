use clap::{Parser, Subcommand};

mod describe;
mod grouped;

#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Descriptive statistics for raw or grouped one-dimensional datasets",
    long_about = None
)]
pub(crate) struct CommandArgs {
    /// What kind of input to analyze
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Statistics over a raw comma-separated dataset
    Describe(#[clap(flatten)] describe::DescribeArg),
    /// Statistics over a grouped class-interval table (one "lower upper frequency" line per class)
    Grouped(#[clap(flatten)] grouped::GroupedArg),
}

pub(crate) fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Describe(arg) => describe::run(&arg)?,
        Mode::Grouped(arg) => grouped::run(&arg)?,
    }
    Ok(())
}
