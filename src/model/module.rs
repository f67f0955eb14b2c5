//! Modules shipped in a version

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A module belonging to exactly one [`Version`](super::Version).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Module {
    pub module_id: i64,
    pub module_name: String,
    pub created: Option<DateTime<Utc>>,
    /// Code of the owning version
    pub version_id: String,
}

impl Module {
    pub fn new(module_id: i64, module_name: impl Into<String>, version_id: impl Into<String>) -> Self {
        Self {
            module_id,
            module_name: module_name.into(),
            created: None,
            version_id: version_id.into(),
        }
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}
