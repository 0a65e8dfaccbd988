//! View models for the `score`, `reliability`, `maintainability` and
//! `performance` commands.

use std::io::Write;

use serde::Serialize;

use super::{markdown_table, Style, View};
use crate::core::{
    Availability, CoverageMetrics, ModuleCoverage, OutcomeDistribution, Result, Severity, Status,
    TestCase,
};
use crate::score::{QualityRatingCalculator, Rating, RatingDescription, ScoreBreakdown};
use crate::scorers::{maintainability, performance, reliability};

/// One row of the factor table.
#[derive(Debug, Clone, Serialize)]
pub struct FactorRow {
    pub factor: &'static str,
    pub score: f64,
    pub weight: f64,
    pub contribution: f64,
    pub status: Option<Status>,
    pub availability: Availability,
}

impl FactorRow {
    fn severity(&self) -> Option<Severity> {
        self.status.map(|s| s.severity())
    }

    fn status_label(&self) -> Option<&'static str> {
        self.status.map(|s| s.label())
    }
}

/// Overall score with per-factor contributions.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreView {
    pub rating: Rating,
    pub weighted_quality_score: f64,
    pub description: &'static RatingDescription,
    pub factors: Vec<FactorRow>,
    pub calculation: String,
    pub breakdown: ScoreBreakdown,
}

impl ScoreView {
    pub fn new(calc: &QualityRatingCalculator<'_>) -> Self {
        let breakdown = calc.breakdown();
        let factors = breakdown
            .factors()
            .into_iter()
            .map(|view| FactorRow {
                factor: view.factor.label(),
                score: view.score,
                weight: view.weight,
                contribution: view.contribution,
                status: view.status,
                availability: view.availability,
            })
            .collect();
        Self {
            rating: breakdown.rating,
            weighted_quality_score: breakdown.weighted_quality_score,
            description: breakdown.description(),
            factors,
            calculation: breakdown.calculation.clone(),
            breakdown,
        }
    }
}

impl View for ScoreView {
    fn write_markdown(&self, w: &mut dyn Write) -> Result<()> {
        writeln!(w, "# Quality Rating: {}\n", self.rating)?;
        writeln!(
            w,
            "**WQS**: {:.2}/100 ({} {})\n",
            self.weighted_quality_score, self.description.icon, self.description.title
        )?;
        writeln!(w, "{}\n", self.description.narrative)?;
        writeln!(w, "_{}_\n", self.description.recommendation)?;
        writeln!(w, "## Factors\n")?;
        let rows: Vec<Vec<String>> = self
            .factors
            .iter()
            .map(|f| {
                vec![
                    f.factor.to_string(),
                    format!("{:.2}", f.score),
                    format!("{:.0}%", f.weight * 100.0),
                    format!("{:.2}", f.contribution),
                    f.status_label().unwrap_or("no data").to_string(),
                ]
            })
            .collect();
        markdown_table(
            w,
            &["Factor", "Score", "Weight", "Contribution", "Status"],
            &rows,
        )?;
        writeln!(w, "`{}`", self.calculation)?;
        Ok(())
    }

    fn write_text(&self, w: &mut dyn Write, style: &Style) -> Result<()> {
        writeln!(
            w,
            "Quality rating: {} ({} {})",
            style.rating(self.rating),
            self.description.icon,
            self.description.title
        )?;
        writeln!(w, "WQS: {:.2}/100", self.weighted_quality_score)?;
        writeln!(w, "{}", self.description.narrative)?;
        writeln!(w, "Recommendation: {}", self.description.recommendation)?;
        writeln!(w)?;
        for f in &self.factors {
            writeln!(
                w,
                "  {:<24} {:>6.2}  x {:.2} = {:>6.2}  [{}]",
                f.factor,
                f.score,
                f.weight,
                f.contribution,
                style.status(f.status_label(), f.severity())
            )?;
            if !f.availability.is_measured() {
                writeln!(w, "  {:<24} {}", "", f.availability.label())?;
            }
        }
        writeln!(w)?;
        writeln!(w, "{}", self.calculation)?;
        Ok(())
    }
}

/// Test outcome view.
#[derive(Debug, Clone, Serialize)]
pub struct ReliabilityView {
    pub score: f64,
    pub availability: Availability,
    pub status: Option<Status>,
    pub total_tests: u64,
    pub failure_density: f64,
    pub success_rate: f64,
    pub distribution: OutcomeDistribution,
    pub failing_tests: Vec<TestCase>,
    pub formula: &'static str,
    pub standard: &'static str,
    pub calculation: Option<String>,
}

impl ReliabilityView {
    pub fn new(calc: &QualityRatingCalculator<'_>) -> Self {
        let (score, detail) = calc.reliability_score();
        let run = calc.tests();
        let status = detail
            .availability
            .is_measured()
            .then(|| reliability::classify(detail.fault_density));
        Self {
            score,
            availability: detail.availability,
            status,
            total_tests: detail.total_tests,
            failure_density: run.map_or(0.0, reliability::failure_density),
            success_rate: run.map_or(0.0, reliability::success_rate),
            distribution: run.map(|r| r.distribution()).unwrap_or_default(),
            failing_tests: run
                .map(|r| r.faulty_cases().cloned().collect())
                .unwrap_or_default(),
            formula: detail.formula,
            standard: detail.standard,
            calculation: detail.calculation,
        }
    }
}

impl View for ReliabilityView {
    fn write_markdown(&self, w: &mut dyn Write) -> Result<()> {
        writeln!(w, "# Reliability\n")?;
        write_factor_markdown(
            w,
            self.score,
            self.status,
            &self.availability,
            &[self.standard],
            self.formula,
            self.calculation.as_deref(),
        )?;
        writeln!(w, "**Total Tests**: {}\n", self.total_tests)?;
        writeln!(w, "**Failure Density**: {:.2}%\n", self.failure_density)?;
        writeln!(w, "**Success Rate**: {:.2}%\n", self.success_rate)?;
        writeln!(w, "## Outcomes\n")?;
        let d = &self.distribution;
        markdown_table(
            w,
            &["Passed", "Failed", "Errored", "Skipped"],
            &[vec![
                d.passed.to_string(),
                d.failed.to_string(),
                d.errored.to_string(),
                d.skipped.to_string(),
            ]],
        )?;
        writeln!(w, "## Failing Tests\n")?;
        markdown_table(
            w,
            &["Class", "Test", "Status", "Time (s)", "Message"],
            &failing_rows(&self.failing_tests),
        )
    }

    fn write_text(&self, w: &mut dyn Write, style: &Style) -> Result<()> {
        writeln!(w, "{}", style.heading("Reliability"))?;
        write_factor_text(
            w,
            style,
            self.score,
            self.status,
            &self.availability,
            self.calculation.as_deref(),
        )?;
        writeln!(w, "  Total tests:     {}", self.total_tests)?;
        writeln!(w, "  Failure density: {:.2}%", self.failure_density)?;
        writeln!(w, "  Success rate:    {:.2}%", self.success_rate)?;
        let d = &self.distribution;
        writeln!(
            w,
            "  Outcomes:        {} passed, {} failed, {} errored, {} skipped",
            d.passed, d.failed, d.errored, d.skipped
        )?;
        if !self.failing_tests.is_empty() {
            writeln!(w)?;
            writeln!(w, "{}", style.heading("Failing tests"))?;
            for case in &self.failing_tests {
                write!(
                    w,
                    "  {:<7} {}.{} ({:.3}s)",
                    case.status, case.classname, case.name, case.time
                )?;
                match &case.message {
                    Some(message) => writeln!(w, ": {message}")?,
                    None => writeln!(w)?,
                }
            }
        }
        Ok(())
    }
}

/// Coverage view.
#[derive(Debug, Clone, Serialize)]
pub struct MaintainabilityView {
    pub score: f64,
    pub availability: Availability,
    pub status: Option<Status>,
    pub coverage: Option<CoverageMetrics>,
    pub least_covered: Vec<ModuleCoverage>,
    pub formula: String,
    pub standards: Vec<&'static str>,
    pub calculation: Option<String>,
}

impl MaintainabilityView {
    pub fn new(calc: &QualityRatingCalculator<'_>, top: usize) -> Self {
        let (score, detail) = calc.maintainability_score();
        let cov = calc.coverage();
        let status = detail
            .availability
            .is_measured()
            .then(|| maintainability::classify(score));
        Self {
            score,
            availability: detail.availability,
            status,
            coverage: cov.map(|c| c.totals.clone()),
            least_covered: cov
                .map(|c| c.least_covered(top).into_iter().cloned().collect())
                .unwrap_or_default(),
            formula: detail.formula,
            standards: detail.standards,
            calculation: detail.calculation,
        }
    }
}

impl View for MaintainabilityView {
    fn write_markdown(&self, w: &mut dyn Write) -> Result<()> {
        writeln!(w, "# Maintainability\n")?;
        write_factor_markdown(
            w,
            self.score,
            self.status,
            &self.availability,
            &self.standards,
            &self.formula,
            self.calculation.as_deref(),
        )?;
        if let Some(c) = &self.coverage {
            writeln!(w, "## Coverage\n")?;
            markdown_table(
                w,
                &["Line", "Branch", "Instruction", "Complexity"],
                &[vec![
                    format!("{:.2}%", c.line_coverage),
                    format!("{:.2}%", c.branch_coverage),
                    format!("{:.2}%", c.instruction_coverage),
                    format!("{:.2}%", c.complexity_coverage),
                ]],
            )?;
        }
        writeln!(w, "## Least Covered Modules\n")?;
        markdown_table(
            w,
            &["Module", "Line", "Branch"],
            &module_rows(&self.least_covered),
        )
    }

    fn write_text(&self, w: &mut dyn Write, style: &Style) -> Result<()> {
        writeln!(w, "{}", style.heading("Maintainability"))?;
        write_factor_text(
            w,
            style,
            self.score,
            self.status,
            &self.availability,
            self.calculation.as_deref(),
        )?;
        if let Some(c) = &self.coverage {
            writeln!(
                w,
                "  Line coverage:        {:.2}% ({}/{})",
                c.line_coverage, c.lines_covered, c.lines_total
            )?;
            writeln!(
                w,
                "  Branch coverage:      {:.2}% ({}/{})",
                c.branch_coverage, c.branches_covered, c.branches_total
            )?;
            writeln!(w, "  Instruction coverage: {:.2}%", c.instruction_coverage)?;
            writeln!(w, "  Complexity coverage:  {:.2}%", c.complexity_coverage)?;
        }
        if !self.least_covered.is_empty() {
            writeln!(w)?;
            writeln!(w, "{}", style.heading("Least covered modules"))?;
            for module in &self.least_covered {
                writeln!(
                    w,
                    "  {:>6.2}% line  {:>6.2}% branch  {}",
                    module.metrics.line_coverage, module.metrics.branch_coverage, module.name
                )?;
            }
        }
        Ok(())
    }
}

/// Execution time view.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceView {
    pub score: f64,
    pub availability: Availability,
    pub status: Option<Status>,
    pub total_execution_time: f64,
    pub total_tests: u64,
    pub avg_test_time: f64,
    pub threshold: f64,
    pub throughput: f64,
    pub slowest: Vec<TestCase>,
    pub formula: &'static str,
    pub standard: &'static str,
    pub calculation: Option<String>,
}

impl PerformanceView {
    pub fn new(calc: &QualityRatingCalculator<'_>, top: usize) -> Self {
        let (score, detail) = calc.performance_score();
        let status = detail
            .availability
            .is_measured()
            .then(|| performance::classify(detail.avg_test_time));
        Self {
            score,
            availability: detail.availability,
            status,
            total_execution_time: detail.total_execution_time,
            total_tests: detail.total_tests,
            avg_test_time: detail.avg_test_time,
            threshold: detail.threshold,
            throughput: detail.throughput,
            slowest: calc
                .tests()
                .map(|r| r.slowest(top).into_iter().cloned().collect())
                .unwrap_or_default(),
            formula: detail.formula,
            standard: detail.standard,
            calculation: detail.calculation,
        }
    }
}

impl View for PerformanceView {
    fn write_markdown(&self, w: &mut dyn Write) -> Result<()> {
        writeln!(w, "# Performance Efficiency\n")?;
        write_factor_markdown(
            w,
            self.score,
            self.status,
            &self.availability,
            &[self.standard],
            self.formula,
            self.calculation.as_deref(),
        )?;
        writeln!(w, "**Total Time**: {:.2}s\n", self.total_execution_time)?;
        writeln!(w, "**Average Test Time**: {:.3}s\n", self.avg_test_time)?;
        writeln!(w, "**Threshold**: {}s\n", self.threshold)?;
        writeln!(w, "**Throughput**: {:.2} tests/s\n", self.throughput)?;
        writeln!(w, "## Slowest Tests\n")?;
        markdown_table(
            w,
            &["Class", "Test", "Status", "Time (s)"],
            &case_rows(&self.slowest),
        )
    }

    fn write_text(&self, w: &mut dyn Write, style: &Style) -> Result<()> {
        writeln!(w, "{}", style.heading("Performance efficiency"))?;
        write_factor_text(
            w,
            style,
            self.score,
            self.status,
            &self.availability,
            self.calculation.as_deref(),
        )?;
        writeln!(w, "  Total time:   {:.2}s", self.total_execution_time)?;
        writeln!(w, "  Average time: {:.3}s (threshold {}s)", self.avg_test_time, self.threshold)?;
        writeln!(w, "  Throughput:   {:.2} tests/s", self.throughput)?;
        if !self.slowest.is_empty() {
            writeln!(w)?;
            writeln!(w, "{}", style.heading("Slowest tests"))?;
            for case in &self.slowest {
                writeln!(w, "  {:>8.3}s  {}.{}", case.time, case.classname, case.name)?;
            }
        }
        Ok(())
    }
}

fn write_factor_markdown(
    w: &mut dyn Write,
    score: f64,
    status: Option<Status>,
    availability: &Availability,
    standards: &[&str],
    formula: &str,
    calculation: Option<&str>,
) -> Result<()> {
    writeln!(w, "**Score**: {score:.2}/100\n")?;
    writeln!(
        w,
        "**Status**: {}\n",
        status.map_or("no data", |s| s.label())
    )?;
    if !availability.is_measured() {
        writeln!(w, "**Data**: {}\n", availability.label())?;
    }
    writeln!(w, "**Standards**: {}\n", standards.join("; "))?;
    writeln!(w, "**Formula**: `{formula}`\n")?;
    if let Some(calculation) = calculation {
        writeln!(w, "**Calculation**: `{calculation}`\n")?;
    }
    Ok(())
}

fn write_factor_text(
    w: &mut dyn Write,
    style: &Style,
    score: f64,
    status: Option<Status>,
    availability: &Availability,
    calculation: Option<&str>,
) -> Result<()> {
    writeln!(
        w,
        "  Score: {score:.2}/100 [{}]",
        style.status(status.map(|s| s.label()), status.map(|s| s.severity()))
    )?;
    if !availability.is_measured() {
        writeln!(w, "  Data:  {}", availability.label())?;
    }
    if let Some(calculation) = calculation {
        writeln!(w, "  {calculation}")?;
    }
    Ok(())
}

fn case_rows(cases: &[TestCase]) -> Vec<Vec<String>> {
    cases
        .iter()
        .map(|c| {
            vec![
                c.classname.clone(),
                c.name.clone(),
                c.status.to_string(),
                format!("{:.3}", c.time),
            ]
        })
        .collect()
}

fn failing_rows(cases: &[TestCase]) -> Vec<Vec<String>> {
    cases
        .iter()
        .zip(case_rows(cases))
        .map(|(c, mut row)| {
            row.push(c.message.clone().unwrap_or_default());
            row
        })
        .collect()
}

fn module_rows(modules: &[ModuleCoverage]) -> Vec<Vec<String>> {
    modules
        .iter()
        .map(|m| {
            vec![
                m.name.clone(),
                format!("{:.2}%", m.metrics.line_coverage),
                format!("{:.2}%", m.metrics.branch_coverage),
            ]
        })
        .collect()
}
