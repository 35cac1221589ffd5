use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use storepulse::telemetry;

use crate::analyze::run_analyze;
use crate::config::AppConfig;
use crate::demo::run_demo;
use crate::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "StorePulse",
    about = "Score and rank store recommendations from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a metric snapshot or a daily metrics export
    Analyze(AnalyzeArgs),
    /// Run the bundled demo store through the engine (default command)
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct AnalyzeArgs {
    /// Snapshot JSON produced by the metrics service
    #[arg(long, conflicts_with = "metrics_csv", required_unless_present = "metrics_csv")]
    pub(crate) snapshot: Option<PathBuf>,
    /// Daily store-metrics CSV export
    #[arg(long)]
    pub(crate) metrics_csv: Option<PathBuf>,
    /// Benchmark JSON overriding the built-in industry defaults
    #[arg(long)]
    pub(crate) benchmarks: Option<PathBuf>,
    /// Cap the number of recommendations returned
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Emit machine-readable JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Cap the number of recommendations returned
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Emit machine-readable JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.log_level)?;

    let cli = Cli::parse();
    let command = cli.command.unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Analyze(args) => run_analyze(args, &config),
        Command::Demo(args) => run_demo(args, &config),
    }
}
