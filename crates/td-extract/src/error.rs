//! Extraction errors.

use td_core::DesignError;
use thiserror::Error;

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Recoverable, typed failures of the delegated strategy.
///
/// The keyword strategy never produces these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// The service reply is not parseable JSON of the design shape.
    #[error("Malformed service response: {reason}")]
    MalformedResponse { reason: String },

    /// The reply parsed but violates a design invariant.
    #[error("Invalid design: {0}")]
    InvalidDesign(#[from] DesignError),

    /// The service call timed out, errored, or was unreachable.
    /// `retryable` is false for rejections another attempt cannot fix
    /// (bad request, bad credentials).
    #[error("Text generation service unavailable: {reason}")]
    ServiceUnavailable { reason: String, retryable: bool },
}

impl ExtractError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ExtractError::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Whether another attempt against the service could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ExtractError::ServiceUnavailable {
                retryable: true,
                ..
            }
        )
    }
}

/// Errors reported by a `TextGenerationService` implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Transport-level failure (connect, TLS, body read).
    #[error("Request failed: {message}")]
    Request { message: String },

    /// The service answered with a non-success status.
    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered but carried no text.
    #[error("Service returned an empty response")]
    EmptyResponse,
}

impl ServiceError {
    /// Transport failures, empty replies, timeouts (408), rate limiting (429)
    /// and server-side statuses (5xx) may clear up on another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            ServiceError::Request { .. } | ServiceError::EmptyResponse => true,
            ServiceError::Status { status, .. } => {
                matches!(*status, 408 | 429) || (500..600).contains(status)
            }
        }
    }
}

impl From<ServiceError> for ExtractError {
    fn from(err: ServiceError) -> Self {
        ExtractError::ServiceUnavailable {
            retryable: err.is_transient(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_core::Component;

    #[test]
    fn error_display() {
        let err = ExtractError::malformed("truncated");
        assert!(err.to_string().contains("truncated"));

        let err = ExtractError::from(DesignError::DuplicateComponent {
            component: Component::Pump,
        });
        assert!(err.to_string().contains("Pump"));
    }

    #[test]
    fn service_error_is_unavailable() {
        let err: ExtractError = ServiceError::Status {
            status: 503,
            body: "overloaded".into(),
        }
        .into();
        assert!(err.is_transient());
        assert!(err.to_string().contains("503"));
        assert!(!ExtractError::malformed("x").is_transient());
    }

    #[test]
    fn client_rejections_are_not_transient() {
        for status in [400, 401, 403, 404, 422] {
            let err: ExtractError = ServiceError::Status {
                status,
                body: String::new(),
            }
            .into();
            assert!(
                matches!(err, ExtractError::ServiceUnavailable { retryable: false, .. }),
                "status {status} should not be retried"
            );
            assert!(!err.is_transient());
        }
    }

    #[test]
    fn throttling_and_server_errors_are_transient() {
        for status in [408, 429, 500, 502, 529] {
            let err = ServiceError::Status {
                status,
                body: String::new(),
            };
            assert!(err.is_transient(), "status {status} should be retried");
        }
        assert!(ServiceError::EmptyResponse.is_transient());
        assert!(
            ServiceError::Request {
                message: "reset".into()
            }
            .is_transient()
        );
    }
}
