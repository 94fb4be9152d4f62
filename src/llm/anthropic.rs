//! Claude messages-API client with forced tool calling.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{LlmClient, LlmError, ToolSchema};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";
const CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
    tools: Vec<ToolDefinition>,
    tool_choice: ToolChoice,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ToolDefinition {
    name: String,
    description: String,
    input_schema: Value,
}

#[derive(Debug, Serialize)]
struct ToolChoice {
    #[serde(rename = "type")]
    choice_type: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    name: Option<String>,
    input: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

pub struct AnthropicClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    /// Load the API key from `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| LlmError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Point the client at a different host (used by the HTTP-level tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn invoke(&self, prompt: &str, tool: &ToolSchema) -> Result<Value, LlmError> {
        let request = MessagesRequest {
            model: CLAUDE_MODEL.to_string(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            tools: vec![ToolDefinition {
                name: tool.name.to_string(),
                description: tool.description.clone(),
                input_schema: tool.parameters.clone(),
            }],
            tool_choice: ToolChoice {
                choice_type: "tool".to_string(),
                name: tool.name.to_string(),
            },
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        if !status.is_success() {
            if let Ok(error_resp) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(LlmError::Api(error_resp.error.message));
            }
            return Err(LlmError::Api(format!("HTTP {status}: {body}")));
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Parse(e.to_string()))?;

        // Accept only an invocation of the requested tool; anything else is
        // a contract violation, not something to repair.
        parsed
            .content
            .into_iter()
            .find(|block| {
                block.content_type == "tool_use" && block.name.as_deref() == Some(tool.name)
            })
            .and_then(|block| block.input)
            .ok_or_else(|| LlmError::NoToolCall {
                expected: tool.name.to_string(),
            })
    }
}
