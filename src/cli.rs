use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "grader",
    version,
    about = "Grades a web project submission and records the result in a spreadsheet"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe, evaluate, score and append the row to the spreadsheet
    Run(RunCommand),
    /// Probe, evaluate and score without exporting
    Preview(RunCommand),
    /// Only check which submission files exist
    Probe(ProbeCommand),
}

#[derive(Args)]
pub struct RunCommand {
    #[arg(default_value = ".")]
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ProbeCommand {
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
