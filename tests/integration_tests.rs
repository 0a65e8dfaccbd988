use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn qgrade() -> Command {
    let mut cmd = Command::cargo_bin("qgrade").expect("binary exists");
    cmd.env_remove("QGRADE_JUNIT")
        .env_remove("QGRADE_JACOCO")
        .env_remove("RUST_LOG");
    cmd
}

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

/// Command running in an empty directory with both fixture reports loaded.
fn with_reports(dir: &TempDir) -> Command {
    let mut cmd = qgrade();
    cmd.current_dir(dir.path()).args([
        "--junit",
        &fixture("TEST-calculator.xml"),
        "--jacoco",
        &fixture("jacoco.xml"),
    ]);
    cmd
}

// ---------------------------------------------------------------------------
// CLI smoke tests
// ---------------------------------------------------------------------------

#[test]
fn test_help_output() {
    qgrade()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("quality rating"));
}

#[test]
fn test_init_prints_default_config() {
    let dir = TempDir::new().unwrap();
    qgrade()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("performance_threshold = 0.5"));
}

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

#[test]
fn test_score_text() {
    let dir = TempDir::new().unwrap();
    with_reports(&dir)
        .arg("score")
        .assert()
        .success()
        .stdout(predicate::str::contains("WQS: 86.20/100"))
        .stdout(predicate::str::contains(
            "WQS = (0.40 × 90.00) + (0.40 × 75.50) + (0.20 × 100.00) = 86.20",
        ));
}

#[test]
fn test_score_json() {
    let dir = TempDir::new().unwrap();
    let output = with_reports(&dir)
        .args(["-f", "json", "score"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["rating"], "B");
    assert_eq!(json["breakdown"]["rating_color"], "#5cb85c");
    assert_eq!(json["breakdown"]["reliability_score"], 90.0);
    assert_eq!(json["breakdown"]["performance_score"], 100.0);
    assert_eq!(json["factors"][0]["status"], "Acceptable");
}

#[test]
fn test_score_markdown() {
    let dir = TempDir::new().unwrap();
    with_reports(&dir)
        .args(["-f", "markdown", "score"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Quality Rating: B"))
        .stdout(predicate::str::contains("| Factor | Score | Weight |"));
}

#[test]
fn test_score_without_reports_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    qgrade()
        .current_dir(dir.path())
        .arg("score")
        .assert()
        .success()
        .stdout(predicate::str::contains("WQS: 20.00/100"))
        .stdout(predicate::str::contains("no data"));
}

#[test]
fn test_fail_under_gate() {
    let dir = TempDir::new().unwrap();
    with_reports(&dir)
        .args(["score", "--fail-under", "90"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Threshold violation"));

    with_reports(&dir)
        .args(["score", "--fail-under", "80"])
        .assert()
        .success();
}

#[test]
fn test_min_rating_gate() {
    let dir = TempDir::new().unwrap();
    with_reports(&dir)
        .args(["score", "--min-rating", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("worse than the required A"));

    with_reports(&dir)
        .args(["score", "--min-rating", "B"])
        .assert()
        .success();
}

#[test]
fn test_gate_from_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("qgrade.toml"), "[gate]\nmin_rating = \"A\"\n").unwrap();
    with_reports(&dir).arg("score").assert().failure();
}

#[test]
fn test_threshold_from_env() {
    let dir = TempDir::new().unwrap();
    // 0.2s average against a 0.1s threshold halves performance.
    let output = with_reports(&dir)
        .env("QGRADE_SCORING__PERFORMANCE_THRESHOLD", "0.1")
        .args(["-f", "json", "performance"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["threshold"], 0.1);
    let score = json["score"].as_f64().unwrap();
    assert!((score - 50.0).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Factor views
// ---------------------------------------------------------------------------

#[test]
fn test_reliability_lists_failing_tests() {
    let dir = TempDir::new().unwrap();
    with_reports(&dir)
        .arg("reliability")
        .assert()
        .success()
        .stdout(predicate::str::contains("Failure density: 10.00%"))
        .stdout(predicate::str::contains("com.example.CalculatorTest.dividesByZero"))
        .stdout(predicate::str::contains("expected ArithmeticException"));
}

#[test]
fn test_maintainability_least_covered() {
    let dir = TempDir::new().unwrap();
    with_reports(&dir)
        .args(["maintainability", "--top", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Line coverage:        80.00% (40/50)"))
        .stdout(predicate::str::contains("com/example/parser"))
        .stdout(predicate::str::contains("com/example/calculator").not());
}

#[test]
fn test_performance_slowest() {
    let dir = TempDir::new().unwrap();
    with_reports(&dir)
        .args(["performance", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Average time: 0.200s"))
        .stdout(predicate::str::contains("dividesByZero"));
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[test]
fn test_text_report_to_stdout() {
    let dir = TempDir::new().unwrap();
    with_reports(&dir)
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("SOFTWARE QUALITY REPORT"))
        .stdout(predicate::str::contains("OVERALL RATING: ✅ B - Good"));
}

#[test]
fn test_html_report_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("reports/quality.html");
    with_reports(&dir)
        .args(["report", "--kind", "html", "-o"])
        .arg(&out)
        .assert()
        .success();

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("86.20/100"));
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn test_missing_report_file_fails() {
    let dir = TempDir::new().unwrap();
    qgrade()
        .current_dir(dir.path())
        .args(["--junit", "does-not-exist.xml", "score"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to ingest"));
}

#[test]
fn test_swapped_reports_fail() {
    let dir = TempDir::new().unwrap();
    qgrade()
        .current_dir(dir.path())
        .args(["--junit", &fixture("jacoco.xml"), "score"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected <testsuite> or <testsuites> root"));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    qgrade()
        .current_dir(dir.path())
        .args(["-c", "missing.toml", "score"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
