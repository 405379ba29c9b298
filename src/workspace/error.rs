//! Error types for workspace REST calls.

use thiserror::Error;

/// Errors produced while talking to the workspace REST services.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The service answered with a non-success HTTP status.
    ///
    /// `message` carries the service's own error message when the body could
    /// be decoded, otherwise the raw body text.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never reached the service (DNS, TLS, refused connection).
    #[error("network error: {message}")]
    Network { message: String },

    /// The request exceeded the client-side timeout.
    #[error("request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// A SQL statement finished in a terminal state other than `SUCCEEDED`.
    #[error("statement {state}: {message}")]
    Statement { state: String, message: String },

    /// The response body could not be decoded into the expected shape.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_status_and_message() {
        let err = ClientError::Api {
            status: 404,
            message: "Scope 'demo' does not exist!".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("does not exist"));
    }

    #[test]
    fn timeout_display_includes_seconds() {
        let err = ClientError::Timeout { seconds: 60 };
        assert!(err.to_string().contains("60 seconds"));
    }

    #[test]
    fn statement_display_includes_state() {
        let err = ClientError::Statement {
            state: "FAILED".to_string(),
            message: "TABLE_OR_VIEW_NOT_FOUND".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("FAILED"));
        assert!(text.contains("TABLE_OR_VIEW_NOT_FOUND"));
    }
}
