//! Build the dashboard test report from raw test-run and coverage JSON.
//!
//! The tool reads two documents below a root directory:
//!
//! - `coverage/jest-report.json`: per-suite assertion outcomes and run totals
//! - `coverage/coverage-summary.json`: `total.{statements,branches,functions,lines}.pct`
//!
//! and writes `public/test-report.json`, replacing any previous report in a
//! single rename. Every run rebuilds the report from scratch.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use test_report::{RawCoverageSummary, RawTestRun, build_report};
//!
//! let run: RawTestRun = serde_json::from_str(r#"{
//!     "numTotalTests": 2,
//!     "numPassedTests": 2,
//!     "success": true,
//!     "testResults": [{
//!         "name": "/repo/tests/users.api.test.js",
//!         "status": "passed",
//!         "assertionResults": [
//!             {"fullName": "creates a user", "status": "passed"},
//!             {"fullName": "lists users", "status": "passed"}
//!         ]
//!     }]
//! }"#).expect("valid run");
//! let coverage = RawCoverageSummary::default();
//! let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid time");
//!
//! let report = build_report(&run, &coverage, "/repo/", at);
//! assert_eq!(report.suites[0].file, "tests/users.api.test.js");
//! assert_eq!(report.summary.api_tests, 2);
//! ```

mod atomic_io;
mod category;
mod error;
mod files;
mod raw;
mod report;

pub use category::SuiteCategory;
pub use error::ReportError;
pub use files::{
    COVERAGE_SUMMARY_PATH, REPORT_OUTPUT_PATH, TEST_RESULTS_PATH, generate_report, resolve_root,
};
pub use raw::{RawAssertion, RawCoverageMetric, RawCoverageSummary, RawCoverageTotals, RawSuite, RawTestRun};
pub use report::{
    CoverageReport, ReportSummary, SuiteReport, TestOutcome, TestReport, build_report,
    format_percentage,
};
