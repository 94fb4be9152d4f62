//! LLM provider interface.
//!
//! Every call goes through schema-enforced tool calling: the caller supplies
//! a tool definition, the provider must answer with exactly that tool, and
//! the decoded arguments are validated again locally by the calling node.

pub mod anthropic;
pub mod prompts;
pub mod schemas;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use anthropic::AnthropicClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Request(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("no call to tool {expected} in response")]
    NoToolCall { expected: String },

    #[error("tool arguments did not match schema: {0}")]
    Parse(String),
}

/// A function-calling tool definition, JSON-schema parameters included.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: &'static str,
    pub description: String,
    pub parameters: Value,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One structured-output call: the model is forced to invoke `tool` and
    /// the parsed tool arguments are returned verbatim.
    async fn invoke(&self, prompt: &str, tool: &ToolSchema) -> Result<Value, LlmError>;
}
