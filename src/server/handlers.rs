//! Debate route handler.
//!
//! Validates the request before any agent is dispatched, runs the debate,
//! and maps every failure to a JSON `{ "error": ... }` body.

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::{AppState, SharedState};
use crate::debate::{DebateRequest, DebateResponse};
use crate::error::{DebateError, RequestError, UpstreamFailure};

/// Methods the debate route answers
pub const ALLOWED_METHODS: &str = "POST, OPTIONS";

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Caller-facing message
    pub error: String,
}

/// A request that ended without a debate
#[derive(Debug)]
pub enum ApiError {
    /// Rejected by the request gate
    Request(RequestError),
    /// An agent call failed, already classified
    Upstream(UpstreamFailure),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Request(RequestError::MethodNotAllowed { .. }) => {
                StatusCode::METHOD_NOT_ALLOWED
            }
            ApiError::Request(RequestError::Validation { .. }) => StatusCode::BAD_REQUEST,
            // An unreadable body is reported like any other service failure.
            ApiError::Request(RequestError::MalformedBody { .. }) | ApiError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the caller
    pub fn message(&self) -> String {
        match self {
            ApiError::Request(RequestError::MethodNotAllowed { .. }) => {
                "Method Not Allowed".to_string()
            }
            ApiError::Request(RequestError::Validation { reason, .. }) => reason.clone(),
            ApiError::Request(RequestError::MalformedBody { .. }) => {
                UpstreamFailure::Generic.message().to_string()
            }
            ApiError::Upstream(failure) => failure.message().to_string(),
        }
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::Request(err)
    }
}

impl From<DebateError> for ApiError {
    fn from(err: DebateError) -> Self {
        ApiError::Upstream(UpstreamFailure::from(&err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorBody {
                error: self.message(),
            }),
        )
            .into_response()
    }
}

/// Handler for every method on the debate route
pub async fn debate_handler(
    State(state): State<SharedState>,
    method: Method,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    let span = info_span!("debate", request_id = %Uuid::new_v4());

    async move {
        match handle_debate(&state, &method, &body).await {
            Ok(response) => (StatusCode::OK, Json(response)).into_response(),
            Err(e) => e.into_response(),
        }
    }
    .instrument(span)
    .await
}

/// Gate, dispatch and translate one debate request
pub async fn handle_debate(
    state: &AppState,
    method: &Method,
    body: &[u8],
) -> Result<DebateResponse, ApiError> {
    if *method != Method::POST {
        warn!(method = %method, "Rejected request method");
        return Err(RequestError::MethodNotAllowed {
            method: method.to_string(),
        }
        .into());
    }

    let request = DebateRequest::from_json(body)
        .inspect_err(|e| error!(error = %e, "Unreadable request body"))?;

    let input = request
        .validate(&state.config.debate.credential_prefix)
        .inspect_err(|e| warn!(error = %e, "Request failed validation"))?;

    info!(topic_len = input.topic.chars().count(), "Dispatching debate agents");

    let response = state
        .orchestrator
        .run(&input)
        .await
        .inspect_err(|e| error!(error = %e, "Debate failed"))?;

    Ok(response)
}

/// Health response body
#[derive(Debug, Serialize)]
pub struct HealthBody {
    /// Always `"ok"`
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
}

/// Liveness probe
pub async fn health_handler() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompletionError;

    #[test]
    fn test_status_mapping() {
        let method = ApiError::from(RequestError::MethodNotAllowed {
            method: "GET".to_string(),
        });
        assert_eq!(method.status(), StatusCode::METHOD_NOT_ALLOWED);

        let validation = ApiError::from(RequestError::Validation {
            field: "topic".to_string(),
            reason: "Please enter a topic".to_string(),
        });
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.message(), "Please enter a topic");

        let malformed = ApiError::from(RequestError::MalformedBody {
            message: "EOF".to_string(),
        });
        assert_eq!(malformed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(malformed.message(), "Agent service failed");
    }

    #[test]
    fn test_upstream_messages_hide_detail() {
        let err = ApiError::from(DebateError::Agent {
            agent: crate::debate::Agent::Proponent,
            source: CompletionError::Api {
                status: 429,
                message: "secret internal detail".to_string(),
            },
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Your API key has insufficient balance");
    }
}
