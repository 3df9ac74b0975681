//! Form state returned to the caller for re-rendering

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field name → messages, in schema declaration order
pub type FieldErrors = IndexMap<String, Vec<String>>;

/// What a form needs to re-render after a rejected submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormState {
    /// Messages recorded for one field, empty if none
    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors
            .as_ref()
            .and_then(|errors| errors.get(field))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }
}
