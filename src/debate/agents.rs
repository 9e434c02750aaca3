use std::fmt;

use serde::{Deserialize, Serialize};

use crate::openai::ChatMessage;
use crate::prompts::{ANALYST_PROMPT, OPPONENT_PROMPT, PROPONENT_PROMPT, TOPIC_LABEL};

/// One of the three fixed personas a debate is fanned out to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Agent {
    /// Argues for the topic
    Proponent,
    /// Argues against the topic
    Opponent,
    /// Produces the structured report
    Analyst,
}

impl Agent {
    /// Every agent, in dispatch order
    pub const ALL: [Agent; 3] = [Agent::Proponent, Agent::Opponent, Agent::Analyst];

    /// Fixed system-role instruction for this agent
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Agent::Proponent => PROPONENT_PROMPT,
            Agent::Opponent => OPPONENT_PROMPT,
            Agent::Analyst => ANALYST_PROMPT,
        }
    }

    /// Two-message exchange sent to the completion service
    pub fn messages(&self, topic: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system_prompt()),
            ChatMessage::user(format!("{}{}", TOPIC_LABEL, topic)),
        ]
    }

    /// Lowercase name used in logs and errors
    pub fn as_str(&self) -> &'static str {
        match self {
            Agent::Proponent => "proponent",
            Agent::Opponent => "opponent",
            Agent::Analyst => "analyst",
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
