use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SUMMARIZE_ROUTE: &str = "/api/moe/summarize";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl SummarizeResponse {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
        }
    }

    /// Reads a response body leniently: a missing field, a non-string value or
    /// a body that is not an object all yield `summary: None`.
    pub fn from_json_value(value: &Value) -> Self {
        let summary = value
            .get("summary")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { summary }
    }

    /// The summary text when it is present and non-empty.
    pub fn usable_summary(&self) -> Option<&str> {
        self.summary.as_deref().filter(|summary| !summary.is_empty())
    }
}
