use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `question` stays a raw JSON value so non-string input can be told apart
/// from a missing field.
#[derive(Debug, Default, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Value>,
    pub answer: String,
}
