//! LLM Client: the single point of entry for all Claude API calls in the service.
//!
//! ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
//! Every AI-backed operation receives a `&dyn TextGenerator` and goes through it.
//!
//! The client is built once from `Config` and carried in `AppState`. Without an API key
//! it runs unconfigured: single-shot calls fail with `LlmError::Unconfigured` (callers
//! substitute their fallbacks) and streams yield a single notice fragment.
use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;
pub mod schema;
mod sse;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Sole fragment of a stream produced while no API key is configured.
pub const FALLBACK_STREAM_NOTICE: &str =
    "AI assistant is running in fallback mode: no LLM provider is configured.";

/// Lazy, finite stream of text fragments. Never yields an error item.
pub type TextStream = BoxStream<'static, String>;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM provider is not configured")]
    Unconfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Text generation boundary. `LlmClient` is the production implementation; tests
/// substitute scripted doubles.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Whether calls can reach a provider at all.
    fn is_configured(&self) -> bool;

    /// Single-shot generation returning the full response text.
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError>;

    /// Incremental generation. Failures surface as one truncated error fragment.
    fn stream(&self, prompt: &str, system: &str) -> TextStream;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Wraps the Anthropic Messages API with single-shot and streaming helpers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
}

impl LlmClient {
    pub fn new(api_key: Option<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn request(&self, api_key: &str, prompt: &str, system: &str, stream: bool) -> reqwest::RequestBuilder {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
            stream,
        };

        self.client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
    }

    /// Makes a raw call to the Claude API, returning the full response object.
    /// One attempt only: callers own the fallback.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::Unconfigured)?;

        let response = self.request(api_key, prompt, system, false).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}: {}", status, body);
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        response
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .ok_or(LlmError::EmptyContent)
    }

    fn stream(&self, prompt: &str, system: &str) -> TextStream {
        match self.api_key.as_deref() {
            Some(api_key) => sse::relay(self.request(api_key, prompt, system, true)),
            None => {
                warn!("LLM stream requested without a configured provider");
                Box::pin(stream::once(async { FALLBACK_STREAM_NOTICE.to_string() }))
            }
        }
    }
}

/// Calls the generator and deserializes the response text as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn generate_json<T: DeserializeOwned>(
    llm: &dyn TextGenerator,
    prompt: &str,
    system: &str,
) -> Result<T, LlmError> {
    let text = llm.generate(prompt, system).await?;
    serde_json::from_str(extract_json_payload(&text)).map_err(LlmError::Parse)
}

/// Narrows free-form model output to the JSON it is expected to contain.
/// Handles code fences and prose around a single top-level object.
fn extract_json_payload(text: &str) -> &str {
    let text = strip_json_fences(text);
    if text.starts_with('{') || text.starts_with('[') {
        return text;
    }
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedGenerator;
    use super::*;
    use futures::StreamExt;
    use std::collections::BTreeMap;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_payload_from_surrounding_prose() {
        let input = "Here are the scores: {\"verbal_ability\": 80} Hope this helps!";
        assert_eq!(extract_json_payload(input), "{\"verbal_ability\": 80}");
    }

    #[test]
    fn test_extract_json_payload_keeps_arrays() {
        assert_eq!(extract_json_payload(" [1, 2] "), "[1, 2]");
    }

    #[test]
    fn test_unconfigured_client_reports_state() {
        let client = LlmClient::new(Some("   ".to_string())).unwrap();
        assert!(!client.is_configured());
        let client = LlmClient::new(Some("sk-test".to_string())).unwrap();
        assert!(client.is_configured());
    }

    #[tokio::test]
    async fn test_unconfigured_client_call_fails_without_network() {
        let client = LlmClient::new(None).unwrap();
        let err = client.generate("hi", "system").await.unwrap_err();
        assert!(matches!(err, LlmError::Unconfigured));
    }

    #[tokio::test]
    async fn test_unconfigured_client_streams_single_notice() {
        let client = LlmClient::new(None).unwrap();
        let fragments: Vec<String> = client.stream("hi", "system").collect().await;
        assert_eq!(fragments, vec![FALLBACK_STREAM_NOTICE.to_string()]);
    }

    #[tokio::test]
    async fn test_generate_json_parses_fenced_output() {
        let llm = ScriptedGenerator::replying("```json\n{\"a\": 1.5}\n```");
        let parsed: BTreeMap<String, f64> = generate_json(&llm, "p", "s").await.unwrap();
        assert_eq!(parsed.get("a"), Some(&1.5));
    }

    #[tokio::test]
    async fn test_generate_json_rejects_prose() {
        let llm = ScriptedGenerator::replying("I cannot help with that.");
        let result: Result<BTreeMap<String, f64>, _> = generate_json(&llm, "p", "s").await;
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }
}
