use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::report::extract_report;
use super::{Agent, DebateInput, DebateResponse, Handbook};
use crate::error::{DebateError, DebateResult};
use crate::openai::CompletionService;

/// Fans a topic out to the three agents and assembles their answers
#[derive(Clone)]
pub struct DebateOrchestrator {
    completion: Arc<dyn CompletionService>,
}

impl DebateOrchestrator {
    /// Create a new orchestrator over the given completion service
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    /// Run all three agents concurrently.
    ///
    /// Resolves once every agent has answered, or at the first failure. On
    /// failure the agents still in flight are dropped and nothing is
    /// assembled.
    pub async fn run(&self, input: &DebateInput) -> DebateResult<DebateResponse> {
        let start = Instant::now();

        let (pro, con, analysis) = tokio::try_join!(
            self.call_agent(Agent::Proponent, input),
            self.call_agent(Agent::Opponent, input),
            self.call_agent(Agent::Analyst, input),
        )?;

        let recovered = extract_report(&analysis);
        if recovered.is_fallback() {
            warn!(
                output_len = analysis.len(),
                "Analyst output was not valid JSON, using fallback report"
            );
        }

        info!(
            latency_ms = start.elapsed().as_millis(),
            "Debate completed"
        );

        Ok(DebateResponse {
            handbook: Handbook { pro, con },
            report: recovered.into_inner(),
        })
    }

    async fn call_agent(&self, agent: Agent, input: &DebateInput) -> DebateResult<String> {
        let start = Instant::now();
        debug!(agent = %agent, "Dispatching agent");

        let text = self
            .completion
            .complete(&input.credential, agent.messages(&input.topic))
            .await
            .map_err(|source| DebateError::Agent { agent, source })?;

        debug!(
            agent = %agent,
            latency_ms = start.elapsed().as_millis(),
            output_len = text.len(),
            "Agent answered"
        );
        Ok(text)
    }
}
