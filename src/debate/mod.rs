//! Debate orchestration: request validation, agent fan-out and result
//! assembly.

mod agents;
mod orchestrator;
mod report;

pub use agents::Agent;
pub use orchestrator::DebateOrchestrator;
pub use report::{
    extract_report, fallback_report, strip_code_fence, Recovered, FALLBACK_CONFLICT_CORE,
    FALLBACK_CONTROVERSY_SCORE,
};

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RequestError, RequestResult};

/// Debate request body as sent by the front end
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct DebateRequest {
    /// Debate topic
    #[serde(default)]
    pub topic: Option<String>,
    /// Caller's own provider key
    #[serde(default, rename = "clientKey", alias = "credential")]
    pub credential: Option<String>,
}

/// A request that passed the gate
#[derive(Clone)]
pub struct DebateInput {
    /// Non-empty topic, passed to the agents verbatim
    pub topic: String,
    /// Key carrying the configured prefix
    pub credential: String,
}

/// The pro/con pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handbook {
    /// Proponent output
    pub pro: String,
    /// Opponent output
    pub con: String,
}

/// Successful debate result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateResponse {
    /// Free-text pro/con arguments
    pub handbook: Handbook,
    /// Analyst output as parsed, or the fallback report
    pub report: Value,
}

impl DebateRequest {
    /// Create a request from a topic and key
    pub fn new(topic: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
            credential: Some(credential.into()),
        }
    }

    /// Parse a raw JSON body
    pub fn from_json(body: &[u8]) -> RequestResult<Self> {
        serde_json::from_slice(body).map_err(|e| RequestError::MalformedBody {
            message: e.to_string(),
        })
    }

    /// Check the key and topic. The key is checked first.
    pub fn validate(self, credential_prefix: &str) -> RequestResult<DebateInput> {
        let credential = match self.credential {
            Some(key) if key.starts_with(credential_prefix) => key,
            _ => {
                return Err(RequestError::Validation {
                    field: "clientKey".to_string(),
                    reason: format!(
                        "Please provide a valid OpenAI API key (starting with {})",
                        credential_prefix
                    ),
                })
            }
        };

        let topic = match self.topic {
            Some(topic) if !topic.is_empty() => topic,
            _ => {
                return Err(RequestError::Validation {
                    field: "topic".to_string(),
                    reason: "Please enter a topic".to_string(),
                })
            }
        };

        Ok(DebateInput { topic, credential })
    }
}

// Keys never reach logs through Debug.
impl fmt::Debug for DebateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebateRequest")
            .field("topic", &self.topic)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl fmt::Debug for DebateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebateInput")
            .field("topic", &self.topic)
            .field("credential", &"<redacted>")
            .finish()
    }
}
