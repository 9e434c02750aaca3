//! # Debate Smelter
//!
//! A bring-your-own-key debate service. A topic is fanned out to three
//! chat-completion agents in parallel and their answers are combined into
//! one JSON document:
//!
//! - **Proponent**: free-text arguments for the topic
//! - **Opponent**: free-text arguments against the topic
//! - **Analyst**: a structured report (conflict core, open questions,
//!   controversy score), parsed tolerantly with a fixed fallback
//!
//! ## Architecture
//!
//! ```text
//! Front end → axum handler (gate) → DebateOrchestrator ─┬→ proponent ─┐
//!                                                        ├→ opponent  ─┼→ chat completions API
//!                                                        └→ analyst   ─┘
//! ```
//!
//! The service stores nothing and holds no API key: every upstream call is
//! authenticated with the key the caller sent.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use debate_smelter::{server, AppState, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let state = Arc::new(AppState::from_config(config)?);
//!     server::serve(state).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Configuration management.
#[allow(missing_docs)]
pub mod config;
/// Debate types, agents, report extraction and orchestration.
pub mod debate;
/// Error types and result aliases for the application.
#[allow(missing_docs)]
pub mod error;
/// Chat-completion API client and wire types.
#[allow(missing_docs)]
pub mod openai;
/// System prompts for the debate agents.
pub mod prompts;
/// HTTP server and request handling.
pub mod server;

pub use config::Config;
pub use debate::{DebateOrchestrator, DebateRequest, DebateResponse};
pub use error::{AppError, AppResult};
pub use server::{AppState, SharedState};
