//! Released versions of the tracked code base

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A release, keyed by its version code (e.g. `1.0.0`).
///
/// Both the code and the human-readable name are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Version {
    pub version_code: String,
    pub version_name: String,
    pub created: Option<DateTime<Utc>>,
}

impl Version {
    pub fn new(version_code: impl Into<String>, version_name: impl Into<String>) -> Self {
        Self {
            version_code: version_code.into(),
            version_name: version_name.into(),
            created: None,
        }
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}
