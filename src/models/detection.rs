use serde::{Deserialize, Serialize};

/// Outcome of checking one email address.
///
/// Either a classification (`error` is `None`) or a failure (`error` is
/// `Some`, `is_disposable` is `false` and `domain` is empty), never both.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub is_disposable: bool,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetectionResult {
    pub fn classified(domain: impl Into<String>, is_disposable: bool) -> Self {
        Self {
            is_disposable,
            domain: domain.into(),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            is_disposable: false,
            domain: String::new(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
