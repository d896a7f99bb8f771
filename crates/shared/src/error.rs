use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const GENERIC_SIGNUP_FAILURE: &str = "Signup failed";

/// Failure body returned by the activities API: `{"detail": ...}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub detail: Option<Value>,
}

#[derive(Debug, Error)]
pub enum MalformedBody {
    #[error("response body is empty")]
    Empty,
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("error body carries no usable detail")]
    MissingDetail,
}

impl ApiError {
    pub fn detail_text(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(Value::as_str)
            .filter(|detail| !detail.is_empty())
    }

    /// Extracts a non-empty string `detail`; callers fall back to
    /// [`GENERIC_SIGNUP_FAILURE`] on any error.
    pub fn parse_detail(body: &[u8]) -> Result<String, MalformedBody> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(MalformedBody::Empty);
        }
        let parsed: ApiError = serde_json::from_slice(body)?;
        parsed
            .detail_text()
            .map(str::to_string)
            .ok_or(MalformedBody::MissingDetail)
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
