use serde::{Deserialize, Serialize};

/// A class defined in a [`Module`](super::Module).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Class {
    pub class_id: i64,
    pub class_name: String,
    pub description: Option<String>,
    pub module_id: i64,
}

impl Class {
    pub fn new(class_id: i64, class_name: impl Into<String>, module_id: i64) -> Self {
        Self {
            class_id,
            class_name: class_name.into(),
            description: None,
            module_id,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
