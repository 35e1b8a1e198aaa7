//! Error types for calls to the external services.
//!
//! Validation problems are not errors; they live in `FormErrors`. Everything
//! that can go wrong while talking to the webhook, the content API or the
//! chat backend is an [`ApiError`].

use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to one of the external services
#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint URL is empty in the configuration
    #[error("{0} endpoint is not configured")]
    NotConfigured(&'static str),

    /// Connection refused, DNS failure, broken body stream, ...
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP 401 from the backend; the caller redirects to the auth page
    #[error("not authorized")]
    Unauthorized,

    /// Any other non-2xx status
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// 2xx but the payload did not have the expected shape
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Stable short code, used in log fields
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotConfigured(_) => ErrorCode::NotConfigured,
            Self::Transport(_) => ErrorCode::Transport,
            Self::Unauthorized => ErrorCode::Unauthorized,
            Self::Status { .. } => ErrorCode::Status,
            Self::Decode(_) => ErrorCode::Decode,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotConfigured,
    Transport,
    Unauthorized,
    Status,
    Decode,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotConfigured => "not_configured",
            Self::Transport => "transport",
            Self::Unauthorized => "unauthorized",
            Self::Status => "status",
            Self::Decode => "decode",
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
