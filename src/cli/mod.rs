//! CLI implementation using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config;
use crate::report::ReportKind;
use crate::score::Rating;

/// qgrade - Software quality rating from JUnit and JaCoCo reports.
#[derive(Parser)]
#[command(name = "qgrade")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JUnit/Surefire XML test report
    #[arg(long, global = true, env = "QGRADE_JUNIT")]
    pub junit: Option<PathBuf>,

    /// JaCoCo XML coverage report
    #[arg(long, global = true, env = "QGRADE_JACOCO")]
    pub jacoco: Option<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable coloured text output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the weighted quality score and letter rating
    #[command(alias = "wqs")]
    Score(ScoreArgs),

    /// Show test outcomes, failure density and failing tests
    #[command(alias = "rel")]
    Reliability,

    /// Show coverage metrics and the least covered modules
    #[command(alias = "cov")]
    Maintainability(TopArgs),

    /// Show execution times and the slowest tests
    #[command(alias = "perf")]
    Performance(TopArgs),

    /// Generate a text or HTML quality report
    Report(ReportArgs),

    /// Print the default configuration file
    Init,
}

#[derive(Args, Default)]
pub struct ScoreArgs {
    /// Exit non-zero when the weighted quality score is below this value
    #[arg(long)]
    pub fail_under: Option<f64>,

    /// Exit non-zero when the rating is worse than this letter (A-E)
    #[arg(long)]
    pub min_rating: Option<Rating>,
}

#[derive(Args, Default)]
pub struct TopArgs {
    /// Number of entries to list
    #[arg(short = 'n', long)]
    pub top: Option<usize>,
}

#[derive(Args, Default)]
pub struct ReportArgs {
    /// Report kind: text or html
    #[arg(short, long)]
    pub kind: Option<ReportKind>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stamp the report with the current time
    #[arg(long)]
    pub timestamp: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

impl From<OutputFormat> for config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => config::OutputFormat::Json,
            OutputFormat::Markdown => config::OutputFormat::Markdown,
            OutputFormat::Text => config::OutputFormat::Text,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
