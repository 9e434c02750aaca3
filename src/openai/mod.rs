//! Chat-completion API client and wire types.

mod client;
mod types;


pub use client::{CompletionService, OpenAiClient};
pub use types::*;
