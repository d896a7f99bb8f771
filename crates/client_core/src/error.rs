use reqwest::StatusCode;
use shared::error::GENERIC_SIGNUP_FAILURE;
use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Please provide email and select an activity.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("missing email or activity selection")]
    Validation,
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("unexpected response body from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },
}

impl ClientError {
    /// Transport failures and non-success statuses.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Status { .. })
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text shown in the status slot when a signup ends with this error.
    pub fn signup_message(&self) -> String {
        match self {
            Self::Validation => VALIDATION_MESSAGE.to_string(),
            Self::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => GENERIC_SIGNUP_FAILURE.to_string(),
        }
    }
}
