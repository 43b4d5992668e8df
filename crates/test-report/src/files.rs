//! Filesystem side of report generation.

use std::path::MAIN_SEPARATOR;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::de::DeserializeOwned;

use crate::atomic_io::write_atomic;
use crate::error::ReportError;
use crate::raw::{RawCoverageSummary, RawTestRun};
use crate::report::build_report;

/// Raw test-run document, relative to the root.
pub const TEST_RESULTS_PATH: &str = "coverage/jest-report.json";
/// Coverage summary document, relative to the root.
pub const COVERAGE_SUMMARY_PATH: &str = "coverage/coverage-summary.json";
/// Generated report, relative to the root.
pub const REPORT_OUTPUT_PATH: &str = "public/test-report.json";

const REPORT_DIR: &str = "public";
const REPORT_FILE: &str = "test-report.json";

/// Resolve `root` to an absolute, canonical directory path.
///
/// # Errors
///
/// Returns [`ReportError::Root`] when the path does not exist or is not
/// valid UTF-8 once resolved.
pub fn resolve_root(root: &Utf8Path) -> Result<Utf8PathBuf, ReportError> {
    root.canonicalize_utf8().map_err(|err| ReportError::Root {
        path: root.to_path_buf(),
        message: err.to_string(),
    })
}

/// Read both inputs below `root`, build the report and write it to
/// [`REPORT_OUTPUT_PATH`]. Returns the absolute path of the written report.
///
/// Both inputs are checked before either is read, so a missing file never
/// leaves a stale or partial report behind.
///
/// # Errors
///
/// Returns [`ReportError::MissingInputs`] when either input is absent, and
/// the other variants for read, parse or write failures.
pub fn generate_report(root: &Utf8Path, clock: &impl Clock) -> Result<Utf8PathBuf, ReportError> {
    let resolved = resolve_root(root)?;
    let dir = Dir::open_ambient_dir(&resolved, ambient_authority()).map_err(|err| {
        ReportError::Root {
            path: resolved.clone(),
            message: err.to_string(),
        }
    })?;

    let missing: Vec<Utf8PathBuf> = [TEST_RESULTS_PATH, COVERAGE_SUMMARY_PATH]
        .into_iter()
        .filter(|path| !dir.is_file(path))
        .map(Utf8PathBuf::from)
        .collect();
    if !missing.is_empty() {
        return Err(ReportError::MissingInputs { missing });
    }

    let run: RawTestRun = read_json(&dir, Utf8Path::new(TEST_RESULTS_PATH))?;
    let coverage: RawCoverageSummary = read_json(&dir, Utf8Path::new(COVERAGE_SUMMARY_PATH))?;
    let generated_at: DateTime<Utc> = clock.utc();
    let report = build_report(&run, &coverage, &root_prefix(&resolved), generated_at);

    let json = serde_json::to_string_pretty(&report).map_err(|err| ReportError::Serialise {
        message: err.to_string(),
    })?;
    let output_path = resolved.join(REPORT_OUTPUT_PATH);
    let write_error = |message: String| ReportError::Write {
        path: output_path.clone(),
        message,
    };
    dir.create_dir_all(REPORT_DIR)
        .map_err(|err| write_error(err.to_string()))?;
    let report_dir = dir
        .open_dir(REPORT_DIR)
        .map_err(|err| write_error(err.to_string()))?;
    write_atomic(&report_dir, Utf8Path::new(REPORT_FILE), &output_path, &json)?;
    Ok(output_path)
}

fn root_prefix(root: &Utf8Path) -> String {
    let text = root.as_str();
    if text.ends_with(MAIN_SEPARATOR) {
        text.to_owned()
    } else {
        format!("{text}{MAIN_SEPARATOR}")
    }
}

fn read_json<T: DeserializeOwned>(dir: &Dir, path: &Utf8Path) -> Result<T, ReportError> {
    let contents = dir.read_to_string(path).map_err(|err| ReportError::Read {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|err| ReportError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::TimeZone;
    use mockable::MockClock;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};
    use tempfile::TempDir;

    use super::*;

    struct Project {
        _temp: TempDir,
        root: Utf8PathBuf,
    }

    impl Project {
        fn write(&self, relative: &str, contents: &str) {
            let path = self.root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("create parent");
            }
            fs::write(path, contents).expect("write fixture");
        }

        fn report(&self) -> Value {
            let text = fs::read_to_string(self.root.join(REPORT_OUTPUT_PATH)).expect("read report");
            serde_json::from_str(&text).expect("report is JSON")
        }
    }

    #[fixture]
    fn project() -> Project {
        let temp = tempfile::tempdir().expect("temp dir");
        let root = Utf8Path::from_path(temp.path())
            .expect("utf-8 temp path")
            .canonicalize_utf8()
            .expect("canonical temp path");
        Project { _temp: temp, root }
    }

    #[fixture]
    fn clock() -> MockClock {
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
        );
        clock
    }

    fn write_inputs(project: &Project) {
        let suite_name = format!("{}/tests/users.api.test.js", project.root);
        let run = json!({
            "numTotalTestSuites": 1,
            "numPassedTestSuites": 1,
            "numTotalTests": 2,
            "numPassedTests": 2,
            "success": true,
            "testResults": [{
                "name": suite_name,
                "status": "passed",
                "assertionResults": [
                    { "fullName": "creates", "status": "passed" },
                    { "fullName": "lists", "status": "passed" }
                ]
            }]
        });
        project.write(TEST_RESULTS_PATH, &run.to_string());
        project.write(
            COVERAGE_SUMMARY_PATH,
            r#"{"total":{"statements":{"pct":91.234},"branches":{"pct":50},"functions":{"pct":100},"lines":{"pct":"Unknown"}}}"#,
        );
    }

    #[rstest]
    fn writes_report_below_root(project: Project, clock: MockClock) {
        write_inputs(&project);

        let written = generate_report(&project.root, &clock).expect("report generated");

        assert_eq!(written, project.root.join(REPORT_OUTPUT_PATH));
        let report = project.report();
        assert_eq!(report["generatedAt"], "2024-03-01T12:00:00.000Z");
        assert_eq!(report["summary"]["apiTests"], 2);
        assert_eq!(report["coverage"]["statements"], "91.23");
        assert_eq!(report["coverage"]["lines"], "0.00");
        assert_eq!(report["suites"][0]["file"], "tests/users.api.test.js");
        assert_eq!(report["suites"][0]["type"], "api");
    }

    #[rstest]
    fn report_is_pretty_printed(project: Project, clock: MockClock) {
        write_inputs(&project);
        generate_report(&project.root, &clock).expect("report generated");

        let text =
            fs::read_to_string(project.root.join(REPORT_OUTPUT_PATH)).expect("read report");
        assert!(text.starts_with("{\n  \"generatedAt\""));
    }

    #[rstest]
    fn replaces_previous_report(project: Project, clock: MockClock) {
        write_inputs(&project);
        project.write(REPORT_OUTPUT_PATH, "stale");

        generate_report(&project.root, &clock).expect("report generated");
        assert_eq!(project.report()["summary"]["totalTests"], 2);
    }

    #[rstest]
    #[case::no_results(&[COVERAGE_SUMMARY_PATH], &[TEST_RESULTS_PATH])]
    #[case::no_coverage(&[TEST_RESULTS_PATH], &[COVERAGE_SUMMARY_PATH])]
    #[case::neither(&[], &[TEST_RESULTS_PATH, COVERAGE_SUMMARY_PATH])]
    fn missing_inputs_write_nothing(
        project: Project,
        #[case] present: &[&str],
        #[case] expected_missing: &[&str],
    ) {
        for path in present {
            project.write(path, "{}");
        }
        let mut idle_clock = MockClock::new();
        idle_clock.expect_utc().never();

        let err = generate_report(&project.root, &idle_clock).expect_err("inputs missing");

        let expected: Vec<Utf8PathBuf> = expected_missing
            .iter()
            .copied()
            .map(Utf8PathBuf::from)
            .collect();
        assert_eq!(err, ReportError::MissingInputs { missing: expected });
        assert_eq!(
            err.to_string(),
            "Missing report files. Run the test suite first."
        );
        assert!(!project.root.join(REPORT_OUTPUT_PATH).exists());
    }

    #[rstest]
    fn malformed_input_is_a_parse_error(project: Project, clock: MockClock) {
        write_inputs(&project);
        project.write(TEST_RESULTS_PATH, "{ not json");

        let err = generate_report(&project.root, &clock).expect_err("parse fails");
        assert!(matches!(err, ReportError::Parse { ref path, .. } if path == TEST_RESULTS_PATH));
        assert!(!project.root.join(REPORT_OUTPUT_PATH).exists());
    }

    #[rstest]
    fn unknown_root_is_reported(project: Project, clock: MockClock) {
        let missing = project.root.join("does-not-exist");
        let err = generate_report(&missing, &clock).expect_err("root missing");
        assert!(matches!(err, ReportError::Root { .. }));
    }
}
