//! JaCoCo XML coverage report reader.

use std::path::Path;
use std::time::Instant;

use quick_xml::de::from_str;
use serde::Deserialize;

use super::root_element;
use crate::core::{CoverageMetrics, CoverageSummary, Error, ModuleCoverage, Result};

#[derive(Debug, Deserialize)]
struct RawReport {
    #[serde(rename = "group", default)]
    groups: Vec<RawGroup>,
    #[serde(rename = "package", default)]
    packages: Vec<RawPackage>,
    #[serde(rename = "counter", default)]
    counters: Vec<RawCounter>,
}

/// Multi-module reports nest packages inside (possibly nested) groups.
#[derive(Debug, Deserialize)]
struct RawGroup {
    #[serde(rename = "group", default)]
    groups: Vec<RawGroup>,
    #[serde(rename = "package", default)]
    packages: Vec<RawPackage>,
}

#[derive(Debug, Deserialize)]
struct RawPackage {
    #[serde(rename = "@name", default)]
    name: String,
    #[serde(rename = "counter", default)]
    counters: Vec<RawCounter>,
}

#[derive(Debug, Deserialize)]
struct RawCounter {
    #[serde(rename = "@type")]
    kind: String,
    #[serde(rename = "@missed", default)]
    missed: u64,
    #[serde(rename = "@covered", default)]
    covered: u64,
}

fn percentage(covered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64 * 100.0
    }
}

/// Fold direct-child counters into coverage metrics. Unknown counter
/// types (METHOD, CLASS) are ignored.
fn metrics_from(counters: &[RawCounter], path: &Path) -> Result<CoverageMetrics> {
    let mut metrics = CoverageMetrics::default();
    for counter in counters {
        let total = counter.covered.checked_add(counter.missed).ok_or_else(|| {
            Error::ingest(path, format!("{} counter total overflows", counter.kind))
        })?;
        let pct = percentage(counter.covered, total);
        match counter.kind.as_str() {
            "LINE" => {
                metrics.line_coverage = pct;
                metrics.lines_covered = counter.covered;
                metrics.lines_total = total;
            }
            "BRANCH" => {
                metrics.branch_coverage = pct;
                metrics.branches_covered = counter.covered;
                metrics.branches_total = total;
            }
            "INSTRUCTION" => metrics.instruction_coverage = pct,
            "COMPLEXITY" => metrics.complexity_coverage = pct,
            _ => {}
        }
    }
    Ok(metrics)
}

fn collect_packages(groups: Vec<RawGroup>, out: &mut Vec<RawPackage>) {
    for group in groups {
        out.extend(group.packages);
        collect_packages(group.groups, out);
    }
}

/// Parse a JaCoCo XML document held in memory.
pub fn parse_str(xml: &str) -> Result<CoverageSummary> {
    parse(xml, Path::new("<memory>"))
}

/// Read and parse a JaCoCo XML report from disk.
pub fn load(path: impl AsRef<Path>) -> Result<CoverageSummary> {
    let path = path.as_ref();
    let start = Instant::now();
    let xml = std::fs::read_to_string(path).map_err(|e| Error::ingest(path, e.to_string()))?;
    let summary = parse(&xml, path)?;
    tracing::info!(
        "JaCoCo report loaded in {:?}: {} modules, line coverage {:.2}%",
        start.elapsed(),
        summary.module_details.len(),
        summary.totals.line_coverage
    );
    Ok(summary)
}

fn parse(xml: &str, path: &Path) -> Result<CoverageSummary> {
    let invalid = |e: String| Error::ingest(path, format!("invalid JaCoCo XML: {e}"));

    let root = root_element(xml).map_err(|e| invalid(e.to_string()))?;
    if root != "report" {
        return Err(Error::ingest(
            path,
            format!("expected <report> root, found <{root}>"),
        ));
    }
    let raw: RawReport = from_str(xml).map_err(|e| invalid(e.to_string()))?;

    let mut packages = raw.packages;
    collect_packages(raw.groups, &mut packages);

    let module_details = packages
        .into_iter()
        .map(|package| {
            Ok(ModuleCoverage {
                metrics: metrics_from(&package.counters, path)?,
                name: if package.name.is_empty() {
                    "default".to_string()
                } else {
                    package.name
                },
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CoverageSummary {
        totals: metrics_from(&raw.counters, path)?,
        module_details,
    })
}
