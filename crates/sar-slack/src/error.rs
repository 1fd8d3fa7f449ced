//! Error types for the Slack client.

use sar_core::{ApiError, ApiErrorKind};

/// Error from Slack Web API calls.
#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[source] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Slack answered `{"ok": false}`.
    #[error("{method} failed: {code}")]
    Api {
        /// API method name (e.g., "files.list").
        method: &'static str,
        /// Slack error code (e.g., "invalid_auth").
        code: String,
    },

    /// Response body is not the expected JSON.
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    /// Successful response without the expected payload.
    #[error("{method} response is missing {field}")]
    MissingField {
        /// API method name.
        method: &'static str,
        /// Absent field.
        field: &'static str,
    },
}

impl From<ureq::Error> for SlackError {
    fn from(err: ureq::Error) -> Self {
        match err {
            // body arrived but is not the envelope we expect
            ureq::Error::Json(err) => Self::Json(err),
            other => Self::HttpRequest(other),
        }
    }
}

impl SlackError {
    /// Semantic category of this error.
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::HttpRequest(_) => ApiErrorKind::Unavailable,
            Self::HttpResponse { status, .. } => match status {
                401 | 403 => ApiErrorKind::Unauthorized,
                404 => ApiErrorKind::NotFound,
                429 => ApiErrorKind::RateLimited,
                500..=599 => ApiErrorKind::Unavailable,
                _ => ApiErrorKind::Other,
            },
            Self::Api { code, .. } => match code.as_str() {
                "invalid_auth" | "not_authed" | "token_revoked" | "token_expired"
                | "account_inactive" | "missing_scope" => ApiErrorKind::Unauthorized,
                "file_not_found" | "file_deleted" | "channel_not_found" | "user_not_found" => {
                    ApiErrorKind::NotFound
                }
                "ratelimited" => ApiErrorKind::RateLimited,
                "fatal_error" | "internal_error" | "service_unavailable" => {
                    ApiErrorKind::Unavailable
                }
                _ => ApiErrorKind::Other,
            },
            Self::Json(_) | Self::MissingField { .. } => ApiErrorKind::InvalidResponse,
        }
    }
}

impl From<SlackError> for ApiError {
    fn from(err: SlackError) -> Self {
        ApiError::new(err.kind()).with_backend("Slack").with_source(err)
    }
}
