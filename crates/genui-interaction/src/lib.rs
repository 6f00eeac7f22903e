//! Session engine and model clients.
//!
//! # Module Structure
//!
//! - `engine`: [`SessionEngine`], the per-conversation state machine
//! - `model`: the [`ModelClient`] seam and its error type
//! - `claude_api_model` / `openai_api_model`: streaming HTTP clients
//! - `scripted_model`: offline client replaying canned replies
//! - `factory`: picks a client from `config.toml` and `secret.json`

pub mod claude_api_model;
pub mod engine;
pub mod factory;
mod http;
pub mod model;
pub mod openai_api_model;
pub mod scripted_model;
pub mod sse;

pub use claude_api_model::ClaudeApiModel;
pub use engine::{SessionEngine, SessionError};
pub use factory::model_from_config;
pub use model::{ChunkStream, GenerationRequest, ModelClient, ModelError};
pub use openai_api_model::OpenAiApiModel;
pub use scripted_model::{ScriptStep, ScriptedModel};
