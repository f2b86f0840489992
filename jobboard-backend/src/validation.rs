use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Body of a 400 response: `{ "errors": [ { field, code, message }, ... ] }`.
pub fn to_payload(issues: &[ValidationIssue]) -> serde_json::Value {
    serde_json::json!({ "errors": issues })
}
