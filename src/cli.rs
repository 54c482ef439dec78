use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for the `breakfast-planner` binary.
#[derive(Debug, Parser)]
#[command(
    name = "breakfast-planner",
    version,
    about = "Breakfast consumption estimate and order planning"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (defaults to ./breakfast-planner.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory the data files are resolved against
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build an order plan for a target headcount
    Plan(PlanArgs),
    /// Consumption detail of a reference month
    Month(MonthArgs),
    /// Compare a category across months
    Compare(CompareArgs),
    /// Split a headcount over service days
    Distribute(DistributeArgs),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Reference month whose coefficients are used
    #[arg(long)]
    pub month: String,

    /// Target number of breakfasts
    #[arg(long)]
    pub headcount: u32,

    /// Safety buffer percent (defaults to the configured value)
    #[arg(long)]
    pub buffer: Option<u32>,

    /// Category to leave out (repeatable)
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,

    /// Stock CSV; when given, quantities on hand are netted out
    #[arg(long)]
    pub stock: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write the grouped order report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Write every planning column as CSV to this file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct MonthArgs {
    #[arg(long)]
    pub month: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Months to compare (repeatable)
    #[arg(long = "month", required = true)]
    pub months: Vec<String>,

    #[arg(long)]
    pub category: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct DistributeArgs {
    #[arg(long)]
    pub headcount: u32,

    /// Daily capacity (defaults to the configured value)
    #[arg(long)]
    pub capacity: Option<u32>,
}
