//! Quality report generation.
//!
//! [`QualityReportGenerator`] turns a calculator's breakdown into a plain
//! text report or a standalone HTML document. Rendering is pure: identical
//! inputs produce byte-identical output. Writing to disk is left to
//! [`write_report`].

mod render;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::core::{Result, Severity};
use crate::score::{Factor, QualityRatingCalculator, Rating, RatingDescription, ScoreBreakdown};

pub use render::Renderer;

const RULE_HEAVY: &str =
    "======================================================================";
const RULE_LIGHT: &str =
    "----------------------------------------------------------------------";

/// Report flavour requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Text,
    Html,
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportKind::Text),
            "html" => Ok(ReportKind::Html),
            _ => Err(format!("Unknown report kind: {s}. Use text or html")),
        }
    }
}

/// One factor section of the report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportFactor {
    pub index: usize,
    pub heading: &'static str,
    pub label: &'static str,
    pub weight: f64,
    pub score: f64,
    pub contribution: f64,
    pub standards: Vec<&'static str>,
    pub formula: String,
    /// Calculation trace, or the availability label when unmeasured.
    pub calculation: String,
    pub measured: bool,
    pub status: Option<&'static str>,
    pub severity: Option<Severity>,
    pub note: Option<String>,
}

/// Everything a report shows, flattened from a [`ScoreBreakdown`].
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub rating: Rating,
    pub rating_color: &'static str,
    pub weighted_quality_score: f64,
    pub description: &'static RatingDescription,
    pub factors: Vec<ReportFactor>,
    pub formula: &'static str,
    pub standard: &'static str,
    pub calculation: String,
}

impl ReportView {
    pub fn from_breakdown(breakdown: &ScoreBreakdown) -> Self {
        let factors = breakdown
            .factors()
            .into_iter()
            .enumerate()
            .map(|(i, view)| {
                let (standards, formula, calculation, note) = match view.factor {
                    Factor::Reliability => {
                        let d = &breakdown.details.reliability;
                        (
                            vec![d.standard],
                            d.formula.to_string(),
                            d.calculation.clone(),
                            Some(format!("Fault density: {:.2}%", d.fault_density)),
                        )
                    }
                    Factor::Maintainability => {
                        let d = &breakdown.details.maintainability;
                        (
                            d.standards.clone(),
                            d.formula.clone(),
                            d.calculation.clone(),
                            Some(format!(
                                "Line coverage: {:.2}%, branch coverage: {:.2}%",
                                d.line_coverage, d.branch_coverage
                            )),
                        )
                    }
                    Factor::Performance => {
                        let d = &breakdown.details.performance;
                        (
                            vec![d.standard],
                            d.formula.to_string(),
                            d.calculation.clone(),
                            Some(format!(
                                "Average test time: {:.3}s (threshold {}s)",
                                d.avg_test_time, d.threshold
                            )),
                        )
                    }
                };
                let measured = view.availability.is_measured();
                ReportFactor {
                    index: i + 1,
                    heading: heading(view.factor),
                    label: view.factor.label(),
                    weight: view.weight,
                    score: view.score,
                    contribution: view.contribution,
                    standards,
                    formula,
                    calculation: calculation.unwrap_or_else(|| view.availability.label()),
                    measured,
                    status: view.status.map(|s| s.label()),
                    severity: view.status.map(|s| s.severity()),
                    note: note.filter(|_| measured),
                }
            })
            .collect();

        Self {
            rating: breakdown.rating,
            rating_color: breakdown.rating_color,
            weighted_quality_score: breakdown.weighted_quality_score,
            description: breakdown.description(),
            factors,
            formula: breakdown.formula,
            standard: breakdown.standard,
            calculation: breakdown.calculation.clone(),
        }
    }
}

fn heading(factor: Factor) -> &'static str {
    match factor {
        Factor::Reliability => "RELIABILITY",
        Factor::Maintainability => "MAINTAINABILITY",
        Factor::Performance => "PERFORMANCE EFFICIENCY",
    }
}

/// Formats a calculator's output as text or HTML reports.
pub struct QualityReportGenerator {
    renderer: Renderer,
    generated_at: Option<DateTime<Utc>>,
}

impl QualityReportGenerator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            renderer: Renderer::new()?,
            generated_at: None,
        })
    }

    /// Stamp reports with a generation time. Without one, output depends
    /// only on the calculator's inputs.
    pub fn with_timestamp(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn render(&self, kind: ReportKind, calc: &QualityRatingCalculator<'_>) -> Result<String> {
        match kind {
            ReportKind::Text => Ok(self.render_text(calc)),
            ReportKind::Html => self.render_structured(calc),
        }
    }

    /// Plain-text report.
    pub fn render_text(&self, calc: &QualityRatingCalculator<'_>) -> String {
        let view = ReportView::from_breakdown(&calc.breakdown());
        let desc = view.description;

        let mut lines: Vec<String> = vec![
            RULE_HEAVY.into(),
            "SOFTWARE QUALITY REPORT".into(),
            "Based on IEEE/ISO standards".into(),
        ];
        if let Some(ts) = self.generated_at {
            lines.push(format!("Generated: {}", ts.format("%Y-%m-%d %H:%M:%S UTC")));
        }
        lines.extend([
            RULE_HEAVY.into(),
            String::new(),
            format!(
                "OVERALL RATING: {} {} - {}",
                desc.icon, view.rating, desc.title
            ),
            format!("WQS score: {:.2}/100", view.weighted_quality_score),
            String::new(),
            format!("Description: {}", desc.narrative),
            format!("Recommendation: {}", desc.recommendation),
            String::new(),
            RULE_LIGHT.into(),
        ]);

        for factor in &view.factors {
            lines.push(format!(
                "{}. {} - {:.0}% of the total score",
                factor.index,
                factor.heading,
                factor.weight * 100.0
            ));
            let standards_label = if factor.standards.len() > 1 {
                "Standards"
            } else {
                "Standard"
            };
            lines.push(format!(
                "   {standards_label}: {}",
                factor.standards.join(", ")
            ));
            lines.push(format!("   Score: {:.2}/100", factor.score));
            lines.push(format!(
                "   Status: {}",
                factor.status.unwrap_or("no data")
            ));
            lines.push(format!("   Formula: {}", factor.formula));
            lines.push(format!("   Calculation: {}", factor.calculation));
            if let Some(note) = &factor.note {
                lines.push(format!("   {note}"));
            }
            lines.push(String::new());
        }

        lines.extend([
            RULE_LIGHT.into(),
            "FINAL CALCULATION".into(),
            format!("Formula: {}", view.formula),
            format!("Calculation: {}", view.calculation),
            String::new(),
            format!("WEIGHTING ({})", view.standard),
        ]);
        for factor in &view.factors {
            lines.push(format!(
                "  • {}: {:.0}% × {:.2} = {:.2}",
                factor.label,
                factor.weight * 100.0,
                factor.score,
                factor.contribution
            ));
        }
        lines.push(format!(
            "  TOTAL: {:.2}",
            view.weighted_quality_score
        ));
        lines.push(RULE_HEAVY.into());

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Standalone HTML report.
    pub fn render_structured(&self, calc: &QualityRatingCalculator<'_>) -> Result<String> {
        let view = ReportView::from_breakdown(&calc.breakdown());
        self.renderer.render(&view, self.generated_at)
    }
}

/// Write a rendered report to disk, creating parent directories.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    info!("Report written to {}", path.display());
    Ok(())
}
