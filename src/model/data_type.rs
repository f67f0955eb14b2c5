use serde::{Deserialize, Serialize};

/// Entry of the `types` lookup table (`String`, `Integer`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataType {
    pub type_id: i64,
    pub type_name: String,
}

impl DataType {
    pub fn new(type_id: i64, type_name: impl Into<String>) -> Self {
        Self {
            type_id,
            type_name: type_name.into(),
        }
    }
}
