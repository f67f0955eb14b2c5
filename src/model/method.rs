//! Methods and their test coverage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A method of a [`Class`](super::Class).
///
/// Coverage figures are fractional and recorded separately for hand-written
/// tests and for fuzzing. A method is tied to the version it was recorded in;
/// a version owns many methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Method {
    pub method_id: i64,
    pub method_name: String,
    pub human_test_coverage: Option<f64>,
    pub fuzzer_test_coverage: Option<f64>,
    pub description: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub class_id: i64,
    /// Code of the version this method was recorded in
    pub version_id: Option<String>,
}

impl Method {
    pub fn new(method_id: i64, method_name: impl Into<String>, class_id: i64) -> Self {
        Self {
            method_id,
            method_name: method_name.into(),
            human_test_coverage: None,
            fuzzer_test_coverage: None,
            description: None,
            created: None,
            class_id,
            version_id: None,
        }
    }

    /// Set both coverage figures
    pub fn with_coverage(mut self, human: f64, fuzzer: f64) -> Self {
        self.human_test_coverage = Some(human);
        self.fuzzer_test_coverage = Some(fuzzer);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    pub fn with_version(mut self, version_code: impl Into<String>) -> Self {
        self.version_id = Some(version_code.into());
        self
    }
}
