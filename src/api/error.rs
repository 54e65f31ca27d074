use thiserror::Error;

/// Coarse classification of a failed fetch, kept in page state so the UI can
/// tell "nothing there" apart from "couldn't get it".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    NotFound,
    Rejected(u16),
    Decode,
}

impl FailureKind {
    pub fn notice(self) -> &'static str {
        match self {
            Self::Network => "Couldn't reach Unsplash",
            Self::NotFound => "Not found",
            Self::Rejected(401) | Self::Rejected(403) => "Unsplash rejected the access key",
            Self::Rejected(_) => "Unsplash returned an error",
            Self::Decode => "Unsplash sent something unexpected",
        }
    }
}

/// Errors raised by the Unsplash client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsplash API error: HTTP {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected payload, expected {0}")]
    UnexpectedPayload(&'static str),
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Network(_) | ApiError::InvalidUrl(_) => FailureKind::Network,
            ApiError::NotFound(_) => FailureKind::NotFound,
            ApiError::Status { status, .. } => FailureKind::Rejected(*status),
            ApiError::Decode(_) | ApiError::UnexpectedPayload(_) => FailureKind::Decode,
        }
    }

    /// Whether trying again could plausibly succeed. Nothing retries
    /// automatically; callers use this to suggest a retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(e) => format!("Network error: {}", e),
            ApiError::NotFound(id) => format!("Photo not found: {}", id),
            ApiError::Status { status: 401, .. } => {
                "Unsplash rejected the access key (set UNSPLASH_ACCESS_KEY)".to_string()
            }
            ApiError::Status { status: 403, message } => {
                format!("Access denied or rate limited: {}", message)
            }
            ApiError::Status { status, message } => {
                format!("Unsplash error ({}): {}", status, message)
            }
            ApiError::Decode(e) => format!("Unexpected response format: {}", e),
            ApiError::InvalidUrl(msg) => format!("Invalid API URL: {}", msg),
            ApiError::UnexpectedPayload(expected) => {
                format!("Unexpected response, expected {}", expected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_kind() {
        assert_eq!(ApiError::NotFound("x".into()).kind(), FailureKind::NotFound);
        let status = ApiError::Status {
            status: 401,
            message: "OAuth error".into(),
        };
        assert_eq!(status.kind(), FailureKind::Rejected(401));
        assert_eq!(
            ApiError::UnexpectedPayload("photos").kind(),
            FailureKind::Decode
        );
    }

    #[test]
    fn test_api_error_is_retryable() {
        let throttled = ApiError::Status {
            status: 429,
            message: "Rate Limit Exceeded".into(),
        };
        assert!(throttled.is_retryable());
        assert!(!ApiError::NotFound("x".into()).is_retryable());
    }

    #[test]
    fn test_api_error_user_message() {
        let error = ApiError::Status {
            status: 401,
            message: "OAuth error: The access token is invalid".into(),
        };
        assert!(error.user_message().contains("UNSPLASH_ACCESS_KEY"));
        assert!(ApiError::NotFound("abc".into()).user_message().contains("abc"));
    }

    #[test]
    fn test_failure_notice() {
        assert_eq!(FailureKind::Network.notice(), "Couldn't reach Unsplash");
        assert_eq!(
            FailureKind::Rejected(401).notice(),
            "Unsplash rejected the access key"
        );
    }
}
