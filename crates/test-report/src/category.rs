//! Suite categories inferred from test file names.

use serde::Serialize;

/// Kind of test a suite holds, judged from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuiteCategory {
    /// Persistence tests (`*.db.*`).
    Database,
    /// HTTP API tests (`*.api.*`).
    Api,
    /// Unit tests (`*.unit.*`).
    Unit,
    /// Integration tests (`*.integration.*` or any path mentioning `routes`).
    Integration,
    /// Anything else.
    Other,
}

impl SuiteCategory {
    /// Infer the category of a suite from its path.
    ///
    /// The lower-cased path is checked for `.db.`, `.api.`, `.unit.`, then
    /// `.integration.` or `routes`; the first match wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use test_report::SuiteCategory;
    ///
    /// assert_eq!(SuiteCategory::infer("tests/userApi.API.test.js"), SuiteCategory::Api);
    /// assert_eq!(SuiteCategory::infer("tests/userRoutes.test.js"), SuiteCategory::Integration);
    /// assert_eq!(SuiteCategory::infer("tests/validateEmail.test.js"), SuiteCategory::Other);
    /// ```
    #[must_use]
    pub fn infer(path: &str) -> Self {
        let lowered = path.to_lowercase();
        if lowered.contains(".db.") {
            Self::Database
        } else if lowered.contains(".api.") {
            Self::Api
        } else if lowered.contains(".unit.") {
            Self::Unit
        } else if lowered.contains(".integration.") || lowered.contains("routes") {
            Self::Integration
        } else {
            Self::Other
        }
    }
}
