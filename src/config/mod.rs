//! Configuration loading and management.

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::report::ReportKind;
use crate::score::Rating;
use crate::scorers::performance::DEFAULT_THRESHOLD;

const ENV_PREFIX: &str = "QGRADE_";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Scoring parameters.
    pub scoring: ScoringConfig,
    /// CI gate thresholds.
    pub gate: GateConfig,
    /// Output configuration.
    pub output: OutputConfig,
    /// Report export defaults.
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration from an explicit file path.
    ///
    /// Errors if the file does not exist. Use this for explicit `--config` flags.
    /// Env vars with `QGRADE_` prefix override file values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Self::extract(Self::base().merge(Toml::file_exact(path)))
    }

    /// Load configuration from directory, looking for qgrade.toml or
    /// .qgrade/qgrade.toml.
    ///
    /// Missing files are silently skipped (defaults are used).
    pub fn load_default(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Self::extract(
            Self::base()
                .merge(Toml::file(dir.join("qgrade.toml")))
                .merge(Toml::file(dir.join(".qgrade/qgrade.toml"))),
        )
    }

    /// Default config file content.
    pub fn default_toml() -> &'static str {
        include_str!("default_config.toml")
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no scorer can work with.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.scoring.performance_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(Error::config(format!(
                "scoring.performance_threshold must be a positive number of seconds, got {threshold}"
            )));
        }
        if let Some(fail_under) = self.gate.fail_under {
            if !(0.0..=100.0).contains(&fail_under) {
                return Err(Error::config(format!(
                    "gate.fail_under must be within 0-100, got {fail_under}"
                )));
            }
        }
        Ok(())
    }
}

/// Scoring parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Average seconds per test at or below which performance scores 100.
    pub performance_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            performance_threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Quality gate applied by `qgrade score`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    /// Fail when the weighted quality score is below this value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_under: Option<f64>,
    /// Fail when the rating is worse than this letter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<Rating>,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,
    /// Colorize rating and status labels in text output.
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

/// Report export defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub kind: ReportKind,
    /// Rows shown in slowest-test and least-covered listings.
    pub top: usize,
    /// Stamp exported reports with the generation time.
    pub timestamp: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            kind: ReportKind::Text,
            top: 10,
            timestamp: false,
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// Markdown format.
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(format!("Unknown format: {s}. Use 'text', 'json', or 'md'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scoring.performance_threshold, 0.5);
        assert!(config.gate.fail_under.is_none());
        assert!(config.gate.min_rating.is_none());
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.color);
        assert_eq!(config.report.kind, ReportKind::Text);
        assert_eq!(config.report.top, 10);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            "md".parse::<OutputFormat>().unwrap(),
            OutputFormat::Markdown
        );
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("unknown".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_config_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "qgrade.toml",
                "[scoring]\nperformance_threshold = 0.25\n\n[gate]\nfail_under = 75.0\nmin_rating = \"C\"",
            )?;
            let config = Config::from_file("qgrade.toml").unwrap();
            assert_eq!(config.scoring.performance_threshold, 0.25);
            assert_eq!(config.gate.fail_under, Some(75.0));
            assert_eq!(config.gate.min_rating, Some(Rating::C));
            Ok(())
        });
    }

    #[test]
    fn test_config_load_default_qgrade_toml() {
        Jail::expect_with(|jail| {
            jail.create_file("qgrade.toml", "[report]\ntop = 3\nkind = \"html\"")?;
            let config = Config::load_default(".").unwrap();
            assert_eq!(config.report.top, 3);
            assert_eq!(config.report.kind, ReportKind::Html);
            Ok(())
        });
    }

    #[test]
    fn test_config_load_default_dot_qgrade() {
        Jail::expect_with(|jail| {
            std::fs::create_dir(jail.directory().join(".qgrade")).unwrap();
            jail.create_file(".qgrade/qgrade.toml", "[output]\nformat = \"json\"")?;
            let config = Config::load_default(".").unwrap();
            assert_eq!(config.output.format, OutputFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn test_config_load_default_no_file() {
        Jail::expect_with(|_jail| {
            let config = Config::load_default(".").unwrap();
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_from_file_errors_on_missing_file() {
        let err = Config::from_file("/nonexistent/path/qgrade.toml")
            .unwrap_err()
            .to_string();
        assert!(err.contains("not found"), "expected 'not found' in: {err}");
    }

    #[test]
    fn test_env_var_overrides_file_value() {
        Jail::expect_with(|jail| {
            jail.create_file("qgrade.toml", "[scoring]\nperformance_threshold = 0.25")?;
            jail.set_env("QGRADE_SCORING__PERFORMANCE_THRESHOLD", "2.0");
            let config = Config::from_file("qgrade.toml").unwrap();
            assert_eq!(config.scoring.performance_threshold, 2.0);
            Ok(())
        });
    }

    #[test]
    fn test_env_var_sets_gate() {
        Jail::expect_with(|jail| {
            jail.set_env("QGRADE_GATE__MIN_RATING", "B");
            let config = Config::load_default(".").unwrap();
            assert_eq!(config.gate.min_rating, Some(Rating::B));
            Ok(())
        });
    }

    #[test]
    fn test_non_positive_threshold_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("qgrade.toml", "[scoring]\nperformance_threshold = 0.0")?;
            let err = Config::load_default(".").unwrap_err();
            assert!(matches!(err, Error::Config(_)));
            Ok(())
        });
    }

    #[test]
    fn test_out_of_range_gate_is_rejected() {
        let mut config = Config::default();
        config.gate.fail_under = Some(120.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_toml_matches_defaults() {
        let parsed: Config = toml::from_str(Config::default_toml()).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
