use thiserror::Error;

use crate::debate::Agent;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),
}

/// Chat-completion API errors
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl CompletionError {
    /// HTTP status reported by the provider, if the call got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            CompletionError::Api { status, .. } => Some(*status),
            CompletionError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Errors raised by the request gate before any agent is dispatched
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Method not allowed: {method}")]
    MethodNotAllowed { method: String },

    #[error("Malformed request body: {message}")]
    MalformedBody { message: String },

    #[error("Validation failed: {field} - {reason}")]
    Validation { field: String, reason: String },
}

/// Errors from a debate run
#[derive(Debug, Error)]
pub enum DebateError {
    #[error("{agent} agent failed: {source}")]
    Agent {
        agent: Agent,
        #[source]
        source: CompletionError,
    },
}

impl DebateError {
    /// The completion error that aborted the batch
    pub fn completion_error(&self) -> &CompletionError {
        match self {
            DebateError::Agent { source, .. } => source,
        }
    }
}

/// Caller-facing classification of a failed debate.
///
/// Only two provider statuses are distinguished; everything else is
/// reported as a generic agent failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamFailure {
    /// Provider rejected the key (401)
    InvalidKey,
    /// Provider reported exhausted quota or balance (429)
    InsufficientBalance,
    /// Anything else
    Generic,
}

impl UpstreamFailure {
    /// Message returned to the caller
    pub fn message(&self) -> &'static str {
        match self {
            UpstreamFailure::InvalidKey => "Your API key is invalid or expired",
            UpstreamFailure::InsufficientBalance => "Your API key has insufficient balance",
            UpstreamFailure::Generic => "Agent service failed",
        }
    }
}

impl From<&CompletionError> for UpstreamFailure {
    fn from(err: &CompletionError) -> Self {
        match err.status() {
            Some(401) => UpstreamFailure::InvalidKey,
            Some(429) => UpstreamFailure::InsufficientBalance,
            _ => UpstreamFailure::Generic,
        }
    }
}

impl From<&DebateError> for UpstreamFailure {
    fn from(err: &DebateError) -> Self {
        err.completion_error().into()
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for completion calls
pub type CompletionResult<T> = Result<T, CompletionError>;

/// Result type alias for the request gate
pub type RequestResult<T> = Result<T, RequestError>;

/// Result type alias for debate runs
pub type DebateResult<T> = Result<T, DebateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_error_display() {
        let err = CompletionError::Api {
            status: 401,
            message: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 401 - unauthorized");

        let err = CompletionError::InvalidResponse {
            message: "no choices".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid response: no choices");

        let err = CompletionError::Timeout { timeout_ms: 5000 };
        assert_eq!(err.to_string(), "Request timeout after 5000ms");
    }

    #[test]
    fn test_request_error_display() {
        let err = RequestError::MethodNotAllowed {
            method: "GET".to_string(),
        };
        assert_eq!(err.to_string(), "Method not allowed: GET");

        let err = RequestError::Validation {
            field: "topic".to_string(),
            reason: "cannot be empty".to_string(),
        };
        assert_eq!(err.to_string(), "Validation failed: topic - cannot be empty");
    }

    #[test]
    fn test_debate_error_names_agent() {
        let err = DebateError::Agent {
            agent: Agent::Opponent,
            source: CompletionError::Api {
                status: 500,
                message: "boom".to_string(),
            },
        };
        assert_eq!(err.to_string(), "opponent agent failed: API error: 500 - boom");
    }

    #[test]
    fn test_status_accessor() {
        let err = CompletionError::Api {
            status: 429,
            message: String::new(),
        };
        assert_eq!(err.status(), Some(429));
        assert_eq!(CompletionError::Timeout { timeout_ms: 1 }.status(), None);
    }

    #[test]
    fn test_upstream_failure_classification() {
        let api = |status| CompletionError::Api {
            status,
            message: String::new(),
        };
        assert_eq!(UpstreamFailure::from(&api(401)), UpstreamFailure::InvalidKey);
        assert_eq!(
            UpstreamFailure::from(&api(429)),
            UpstreamFailure::InsufficientBalance
        );
        assert_eq!(UpstreamFailure::from(&api(403)), UpstreamFailure::Generic);
        assert_eq!(UpstreamFailure::from(&api(500)), UpstreamFailure::Generic);
        assert_eq!(
            UpstreamFailure::from(&CompletionError::InvalidResponse {
                message: "bad".to_string()
            }),
            UpstreamFailure::Generic
        );
    }

    #[test]
    fn test_upstream_failure_from_debate_error() {
        let err = DebateError::Agent {
            agent: Agent::Analyst,
            source: CompletionError::Api {
                status: 401,
                message: String::new(),
            },
        };
        assert_eq!(UpstreamFailure::from(&err), UpstreamFailure::InvalidKey);
        assert_eq!(
            UpstreamFailure::InvalidKey.message(),
            "Your API key is invalid or expired"
        );
    }

    #[test]
    fn test_completion_error_conversion_to_app_error() {
        let err: AppError = CompletionError::Timeout { timeout_ms: 1000 }.into();
        assert!(matches!(err, AppError::Completion(_)));
    }
}
