//! Normalised report model and the transformation that builds it.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::category::SuiteCategory;
use crate::raw::{RawCoverageMetric, RawCoverageSummary, RawSuite, RawTestRun};

/// The report consumed by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReport {
    /// Generation time, RFC 3339 UTC with milliseconds.
    pub generated_at: String,
    /// Run totals and per-category counts.
    pub summary: ReportSummary,
    /// Coverage percentages formatted to two decimals.
    pub coverage: CoverageReport,
    /// One entry per suite, in runner order.
    pub suites: Vec<SuiteReport>,
}

/// Run totals copied from the raw document plus per-category counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Suites executed.
    pub total_suites: u64,
    /// Suites that passed.
    pub passed_suites: u64,
    /// Suites that failed.
    pub failed_suites: u64,
    /// Assertions executed.
    pub total_tests: u64,
    /// Assertions that passed.
    pub passed_tests: u64,
    /// Assertions that failed.
    pub failed_tests: u64,
    /// Assertions pending.
    pub pending_tests: u64,
    /// Whether the run succeeded.
    pub test_success: bool,
    /// Tallied assertions in unit suites.
    pub unit_tests: usize,
    /// Tallied assertions in integration suites.
    pub integration_tests: usize,
    /// Tallied assertions in API suites.
    pub api_tests: usize,
    /// Tallied assertions in database suites.
    pub database_tests: usize,
}

/// Coverage percentages as two-decimal strings, e.g. `"87.50"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Statement coverage.
    pub statements: String,
    /// Branch coverage.
    pub branches: String,
    /// Function coverage.
    pub functions: String,
    /// Line coverage.
    pub lines: String,
}

/// Normalised view of one suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    /// Path relative to the project root.
    pub file: String,
    /// Inferred category.
    #[serde(rename = "type")]
    pub category: SuiteCategory,
    /// Suite status as reported by the runner.
    pub status: String,
    /// Assertions with status `passed`.
    pub passing: usize,
    /// Assertions with status `failed`.
    pub failing: usize,
    /// Assertions with status `pending`.
    pub pending: usize,
    /// Assertion outcomes in source order.
    pub tests: Vec<TestOutcome>,
}

impl SuiteReport {
    /// Number of passing, failing and pending assertions together.
    #[must_use]
    pub const fn tallied(&self) -> usize {
        self.passing + self.failing + self.pending
    }
}

/// One assertion in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestOutcome {
    /// Fully qualified test name.
    pub name: String,
    /// Outcome as reported by the runner.
    pub status: String,
}

/// Format a coverage percentage; anything non-numeric becomes `"0.00"`.
///
/// # Examples
///
/// ```
/// use test_report::format_percentage;
///
/// assert_eq!(format_percentage(Some(87.5)), "87.50");
/// assert_eq!(format_percentage(None), "0.00");
/// ```
#[must_use]
pub fn format_percentage(value: Option<f64>) -> String {
    let pct = value.filter(|number| number.is_finite()).unwrap_or_default();
    format!("{pct:.2}")
}

fn metric_percentage(metric: Option<&RawCoverageMetric>) -> String {
    format_percentage(metric.and_then(RawCoverageMetric::percentage))
}

fn count_status(suite: &RawSuite, status: &str) -> usize {
    suite
        .assertion_results
        .iter()
        .filter(|assertion| assertion.status == status)
        .count()
}

fn suite_report(suite: &RawSuite, root_prefix: &str) -> SuiteReport {
    let file = suite
        .name
        .strip_prefix(root_prefix)
        .unwrap_or(&suite.name)
        .to_owned();
    let category = SuiteCategory::infer(&file);
    SuiteReport {
        category,
        status: suite.status.clone(),
        passing: count_status(suite, "passed"),
        failing: count_status(suite, "failed"),
        pending: count_status(suite, "pending"),
        tests: suite
            .assertion_results
            .iter()
            .map(|assertion| TestOutcome {
                name: assertion.full_name.clone(),
                status: assertion.status.clone(),
            })
            .collect(),
        file,
    }
}

fn category_total(suites: &[SuiteReport], category: SuiteCategory) -> usize {
    suites
        .iter()
        .filter(|suite| suite.category == category)
        .map(SuiteReport::tallied)
        .sum()
}

/// Build the report from parsed inputs.
///
/// `root_prefix` is stripped from the start of each suite path, so pass the
/// project root followed by a path separator.
#[must_use]
pub fn build_report(
    run: &RawTestRun,
    coverage: &RawCoverageSummary,
    root_prefix: &str,
    generated_at: DateTime<Utc>,
) -> TestReport {
    let suites: Vec<SuiteReport> = run
        .test_results
        .iter()
        .map(|suite| suite_report(suite, root_prefix))
        .collect();

    let summary = ReportSummary {
        total_suites: run.num_total_test_suites,
        passed_suites: run.num_passed_test_suites,
        failed_suites: run.num_failed_test_suites,
        total_tests: run.num_total_tests,
        passed_tests: run.num_passed_tests,
        failed_tests: run.num_failed_tests,
        pending_tests: run.num_pending_tests,
        test_success: run.success,
        unit_tests: category_total(&suites, SuiteCategory::Unit),
        integration_tests: category_total(&suites, SuiteCategory::Integration),
        api_tests: category_total(&suites, SuiteCategory::Api),
        database_tests: category_total(&suites, SuiteCategory::Database),
    };

    let totals = &coverage.total;
    TestReport {
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        summary,
        coverage: CoverageReport {
            statements: metric_percentage(totals.statements.as_ref()),
            branches: metric_percentage(totals.branches.as_ref()),
            functions: metric_percentage(totals.functions.as_ref()),
            lines: metric_percentage(totals.lines.as_ref()),
        },
        suites,
    }
}
