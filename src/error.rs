// Client Error Types
use reqwest::StatusCode;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the domain operation wrappers.
///
/// The gateway itself never builds one of these on its own account: transport
/// failures are passed through untouched, and only the wrappers turn a
/// non-success status into [`ClientError::Api`].
#[derive(Debug, Error)]
pub enum ClientError {
    // Network unreachable, DNS, TLS, body read failures
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    // Non-success HTTP status; message is what the user gets to see
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    // Status arrived but the body broke off mid-read
    #[error("Failed to read response body: {0}")]
    Body(String),

    // Success status but the body was not the JSON we expected
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    // Rejected locally before anything was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ClientError {
    pub fn api(status: StatusCode, message: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ClientError::InvalidInput(message.into())
    }

    /// HTTP status for API failures, `None` for everything else
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Get error code for CLI and JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Transport(_) => "TRANSPORT_ERROR",
            ClientError::Api { status, .. } => match status.as_u16() {
                400 => "BAD_REQUEST",
                401 => "UNAUTHORIZED",
                403 => "FORBIDDEN",
                404 => "NOT_FOUND",
                409 => "CONFLICT",
                422 => "UNPROCESSABLE_ENTITY",
                429 => "TOO_MANY_REQUESTS",
                500..=599 => "SERVER_ERROR",
                _ => "API_ERROR",
            },
            ClientError::Body(_) => "BODY_UNREADABLE",
            ClientError::Decode(_) => "INVALID_RESPONSE",
            ClientError::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    /// True when the backend rejected the credentials or the token
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_message_verbatim() {
        let err = ClientError::api(StatusCode::UNAUTHORIZED, "Invalid credentials");
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.error_code(), "UNAUTHORIZED");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn server_errors_share_a_code() {
        let err = ClientError::api(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.error_code(), "SERVER_ERROR");
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn invalid_input_has_no_status() {
        let err = ClientError::invalid_input("missing --file");
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Invalid input: missing --file");
    }
}
