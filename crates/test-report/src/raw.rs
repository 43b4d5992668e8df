//! Serde shapes of the raw input documents.
//!
//! Only the fields the report needs are modelled; everything else in the
//! runner's output is ignored. Missing counters read as zero.

use serde::Deserialize;
use serde_json::Value;

/// Raw test-run document (`coverage/jest-report.json`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTestRun {
    /// Number of suites executed.
    pub num_total_test_suites: u64,
    /// Number of suites that passed.
    pub num_passed_test_suites: u64,
    /// Number of suites that failed.
    pub num_failed_test_suites: u64,
    /// Number of assertions executed.
    pub num_total_tests: u64,
    /// Number of assertions that passed.
    pub num_passed_tests: u64,
    /// Number of assertions that failed.
    pub num_failed_tests: u64,
    /// Number of assertions skipped or pending.
    pub num_pending_tests: u64,
    /// Whether the run as a whole succeeded.
    pub success: bool,
    /// Per-suite results in runner order.
    pub test_results: Vec<RawSuite>,
}

/// One suite (test file) in the raw run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSuite {
    /// Absolute path of the test file.
    pub name: String,
    /// Suite status, usually `passed` or `failed`.
    pub status: String,
    /// Assertion outcomes in source order.
    pub assertion_results: Vec<RawAssertion>,
}

/// One assertion outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAssertion {
    /// Fully qualified test name.
    pub full_name: String,
    /// `passed`, `failed`, `pending`, or another runner-specific value.
    pub status: String,
}

/// Raw coverage summary (`coverage/coverage-summary.json`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawCoverageSummary {
    /// Totals across all instrumented files.
    pub total: RawCoverageTotals,
}

/// Coverage totals per metric; any metric may be absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawCoverageTotals {
    /// Statement coverage.
    pub statements: Option<RawCoverageMetric>,
    /// Branch coverage.
    pub branches: Option<RawCoverageMetric>,
    /// Function coverage.
    pub functions: Option<RawCoverageMetric>,
    /// Line coverage.
    pub lines: Option<RawCoverageMetric>,
}

/// A single coverage metric.
///
/// `pct` is kept as raw JSON: coverage tools emit a number normally but may
/// write a string such as `"Unknown"` when nothing was instrumented.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawCoverageMetric {
    /// Percentage covered.
    pub pct: Option<Value>,
}

impl RawCoverageMetric {
    /// Numeric percentage, if `pct` holds a number or numeric text.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        match self.pct.as_ref()? {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }
}
