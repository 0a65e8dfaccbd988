//! qgrade CLI - software quality rating from test and coverage reports.

use std::io::{stdout, IsTerminal};
use std::process::ExitCode;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use qgrade::cli::{Cli, Command, ReportArgs, ScoreArgs};
use qgrade::config::Config;
use qgrade::core::{Error, Result, Session};
use qgrade::ingest;
use qgrade::output::{
    Format, MaintainabilityView, PerformanceView, ReliabilityView, ScoreView, Style, View,
};
use qgrade::report::{write_report, QualityReportGenerator};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // RUST_LOG wins over --verbose.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default(".")?,
    };

    let format: Format = cli
        .format
        .map(qgrade::config::OutputFormat::from)
        .unwrap_or(config.output.format)
        .into();
    let style = Style::new(config.output.color && !cli.no_color && stdout().is_terminal());
    let top = config.report.top;

    let load = || -> Result<Session> {
        ingest::load_session(cli.junit.as_deref(), cli.jacoco.as_deref())?
            .with_performance_threshold(config.scoring.performance_threshold)
    };

    match &cli.command {
        Command::Init => print!("{}", Config::default_toml()),
        Command::Score(args) => {
            let session = load()?;
            let view = ScoreView::new(&session.calculator());
            emit(&view, format, &style)?;
            check_gate(&config, args, &view)?;
        }
        Command::Reliability => {
            let session = load()?;
            emit(&ReliabilityView::new(&session.calculator()), format, &style)?;
        }
        Command::Maintainability(args) => {
            let session = load()?;
            let view = MaintainabilityView::new(&session.calculator(), args.top.unwrap_or(top));
            emit(&view, format, &style)?;
        }
        Command::Performance(args) => {
            let session = load()?;
            let view = PerformanceView::new(&session.calculator(), args.top.unwrap_or(top));
            emit(&view, format, &style)?;
        }
        Command::Report(args) => run_report(&config, args, &load()?)?,
    }

    Ok(())
}

fn emit<V: View>(view: &V, format: Format, style: &Style) -> Result<()> {
    format.write(view, &mut stdout().lock(), style)
}

/// Apply the CLI gate, falling back to the configured one.
fn check_gate(config: &Config, args: &ScoreArgs, view: &ScoreView) -> Result<()> {
    let wqs = view.weighted_quality_score;

    if let Some(fail_under) = args.fail_under.or(config.gate.fail_under) {
        if wqs < fail_under {
            return Err(Error::threshold_violation(
                format!("weighted quality score {wqs:.2} is below {fail_under:.2}"),
                wqs,
            ));
        }
    }
    if let Some(min_rating) = args.min_rating.or(config.gate.min_rating) {
        if !view.rating.meets(min_rating) {
            return Err(Error::threshold_violation(
                format!("rating {} is worse than the required {min_rating}", view.rating),
                wqs,
            ));
        }
    }
    Ok(())
}

fn run_report(config: &Config, args: &ReportArgs, session: &Session) -> Result<()> {
    let mut generator = QualityReportGenerator::new()?;
    if args.timestamp || config.report.timestamp {
        generator = generator.with_timestamp(chrono::Utc::now());
    }
    let calc = session.calculator();
    let kind = args.kind.unwrap_or(config.report.kind);
    let contents = generator.render(kind, &calc)?;

    match &args.output {
        Some(path) => {
            write_report(path, &contents)?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{contents}"),
    }
    Ok(())
}
