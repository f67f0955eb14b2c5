use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One argument of a [`Method`](super::Method).
///
/// `default_value` keeps whatever scalar the default is (`1337`, `"OMG"`),
/// so it is stored as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodArgs {
    pub argument_id: i64,
    pub argument_name: String,
    pub description: Option<String>,
    pub default_value: Option<Value>,
    pub method_id: i64,
    pub type_id: Option<i64>,
}

impl MethodArgs {
    pub fn new(argument_id: i64, argument_name: impl Into<String>, method_id: i64) -> Self {
        Self {
            argument_id,
            argument_name: argument_name.into(),
            description: None,
            default_value: None,
            method_id,
            type_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default_value: impl Into<Value>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn with_type(mut self, type_id: i64) -> Self {
        self.type_id = Some(type_id);
        self
    }
}
