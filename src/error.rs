//! Error types for the props proxy
//!
//! Upstream failures are represented as a tagged taxonomy so retry eligibility
//! and HTTP status mapping switch on a variant, never on message text.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorBody;

// == Upstream Error Taxonomy ==
/// Classified failure from the upstream props endpoint.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    /// Upstream did not respond within the configured timeout
    #[error("upstream request timed out")]
    Timeout,

    /// Upstream returned 429; optionally carries its Retry-After seconds
    #[error("upstream rate limited")]
    RateLimited { retry_after: Option<u64> },

    /// Upstream returned 503/504
    #[error("upstream unavailable (status {status})")]
    Unavailable { status: u16 },

    /// Any other non-2xx status, or a transport failure before a status arrived
    #[error("upstream error (status {status}): {body}")]
    Service { status: u16, body: String },

    /// Payload did not match the expected shape
    #[error("upstream payload invalid: {0}")]
    Validation(String),
}

impl UpstreamError {
    // == Retry Eligibility ==
    /// Whether another attempt may succeed within this request's lifetime.
    ///
    /// Rate-limited and malformed-payload failures repeat deterministically,
    /// so retrying them only burns the attempt budget.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            UpstreamError::Timeout
                | UpstreamError::Unavailable { .. }
                | UpstreamError::Service { .. }
        )
    }

    // == Stable Code ==
    /// Machine-readable code surfaced to the UI for retry affordances.
    pub fn code(&self) -> &'static str {
        match self {
            UpstreamError::Timeout => "TIMEOUT_ERROR",
            UpstreamError::RateLimited { .. } => "UPSTREAM_RATE_LIMITED",
            UpstreamError::Unavailable { .. } => "UPSTREAM_UNAVAILABLE",
            UpstreamError::Service { .. } => "UPSTREAM_ERROR",
            UpstreamError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    // == HTTP Status ==
    /// Status this failure maps to on the proxy's own boundary.
    pub fn http_status(&self) -> StatusCode {
        match self {
            UpstreamError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            UpstreamError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            UpstreamError::Unavailable { .. } => StatusCode::GATEWAY_TIMEOUT,
            UpstreamError::Service { .. } => StatusCode::SERVICE_UNAVAILABLE,
            UpstreamError::Validation(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    // == User Message ==
    /// Human-readable message for the JSON error body.
    ///
    /// The rate-limited wording makes clear the *external* provider is
    /// throttling, as opposed to this service's own limiter.
    pub fn user_message(&self) -> &'static str {
        match self {
            UpstreamError::Timeout => "The sports data provider took too long to respond",
            UpstreamError::RateLimited { .. } => {
                "The external sports data provider is rate limiting requests, please retry later"
            }
            UpstreamError::Unavailable { .. } => {
                "The sports data provider is temporarily unavailable"
            }
            UpstreamError::Service { .. } => "Failed to fetch player data from the provider",
            UpstreamError::Validation(_) => "The sports data provider returned unusable data",
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody::new(
            "upstream_error",
            self.user_message(),
            self.code(),
        ));

        let mut response = (self.http_status(), body).into_response();

        // An upstream 429 still tells the caller when to come back
        if let UpstreamError::RateLimited { retry_after } = &self {
            let secs = retry_after.unwrap_or(60);
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }

        response
    }
}

// == Result Type Alias ==
/// Convenience Result type for upstream operations.
pub type UpstreamResult<T> = std::result::Result<T, UpstreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classes() {
        assert!(UpstreamError::Timeout.is_retryable());
        assert!(UpstreamError::Unavailable { status: 503 }.is_retryable());
        assert!(UpstreamError::Service {
            status: 500,
            body: "boom".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_non_retryable_classes() {
        assert!(!UpstreamError::RateLimited { retry_after: None }.is_retryable());
        assert!(!UpstreamError::Validation("missing props".to_string()).is_retryable());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            UpstreamError::Timeout.http_status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            UpstreamError::RateLimited { retry_after: None }.http_status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            UpstreamError::Unavailable { status: 504 }.http_status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            UpstreamError::Validation("bad".to_string()).http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_stable_codes() {
        assert_eq!(UpstreamError::Timeout.code(), "TIMEOUT_ERROR");
        assert_eq!(
            UpstreamError::RateLimited { retry_after: Some(30) }.code(),
            "UPSTREAM_RATE_LIMITED"
        );
        assert_eq!(
            UpstreamError::Validation("x".to_string()).code(),
            "VALIDATION_ERROR"
        );
    }
}
