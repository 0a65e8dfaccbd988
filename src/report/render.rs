//! HTML report rendering using minijinja templating.

use chrono::{DateTime, Utc};
use minijinja::{context, Environment};

use super::ReportView;
use crate::core::Result;

/// The embedded HTML template.
const TEMPLATE_HTML: &str = include_str!("template.html");

/// Renderer handles HTML report generation.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Create a new renderer with the embedded template.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();

        env.add_filter("fixed2", fixed2);
        env.add_filter("pct", pct);
        env.add_filter("score_class", score_class);
        env.add_filter("severity_class", severity_class);

        // The .html suffix turns on HTML auto-escaping.
        env.add_template("report.html", TEMPLATE_HTML)?;

        Ok(Self { env })
    }

    /// Render the report view into a standalone HTML document.
    pub fn render(&self, view: &ReportView, generated_at: Option<DateTime<Utc>>) -> Result<String> {
        let tmpl = self.env.get_template("report.html")?;
        let rendered = tmpl.render(context! {
            report => view,
            generated_at => generated_at.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        })?;
        Ok(rendered)
    }
}

fn fixed2(value: f64) -> String {
    format!("{value:.2}")
}

/// Weight fraction as a whole percentage, e.g. `0.4` -> `40%`.
fn pct(weight: f64) -> String {
    format!("{:.0}%", weight * 100.0)
}

fn score_class(score: f64) -> &'static str {
    if score >= 80.0 {
        "good"
    } else if score >= 60.0 {
        "warning"
    } else {
        "danger"
    }
}

fn severity_class(severity: Option<String>) -> String {
    severity.unwrap_or_else(|| "muted".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed2() {
        assert_eq!(fixed2(89.6), "89.60");
        assert_eq!(fixed2(100.0), "100.00");
    }

    #[test]
    fn test_pct() {
        assert_eq!(pct(0.4), "40%");
        assert_eq!(pct(0.2), "20%");
    }

    #[test]
    fn test_score_class() {
        assert_eq!(score_class(85.0), "good");
        assert_eq!(score_class(80.0), "good");
        assert_eq!(score_class(60.0), "warning");
        assert_eq!(score_class(59.9), "danger");
    }

    #[test]
    fn test_severity_class() {
        assert_eq!(severity_class(Some("info".to_string())), "info");
        assert_eq!(severity_class(None), "muted");
    }

    #[test]
    fn test_template_parses() {
        assert!(Renderer::new().is_ok());
    }
}
