//! Groq implementation of the extraction oracle.
//!
//! Talks to Groq's OpenAI-compatible chat completions endpoint and constrains
//! the model with a `json_schema` response format derived from the draft
//! types. Rate-limit responses (HTTP 429) get a bounded retry with
//! exponential backoff; everything else fails fast.

use std::time::Duration;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::pipeline::prompts::{format_event_prompt, format_result_prompt};
use crate::security::SecretString;
use crate::traits::oracle::ExtractionOracle;
use crate::types::{EventDraft, ResultDraft};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Retry ceiling for throttling responses. Applies to 429s only; other
/// faults are not retried.
const MAX_ATTEMPTS: u32 = 3;

/// Groq-backed extraction oracle.
#[derive(Clone)]
pub struct GroqOracle {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
    base_url: String,
    max_attempts: u32,
}

impl GroqOracle {
    /// Create a new oracle with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: SecretString::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_attempts: MAX_ATTEMPTS,
        }
    }

    /// Create from the `GROQ_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| PipelineError::Config("GROQ_API_KEY not set".to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Set the chat model (default: llama-3.3-70b-versatile).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (proxies, OpenAI itself, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the throttling retry ceiling.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// One structured-output completion, constrained to `T`'s JSON schema.
    async fn extract_structured<T>(&self, schema_name: &str, prompt: &str) -> Result<T>
    where
        T: DeserializeOwned + JsonSchema,
    {
        let schema = schemars::gen::SchemaGenerator::default().into_root_schema_for::<T>();
        let schema_value = serde_json::to_value(&schema)
            .map_err(|e| PipelineError::SchemaConformance(e.to_string()))?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "You extract structured sports data. Respond with JSON matching the \
                              required schema exactly."
                        .to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_schema".to_string(),
                json_schema: JsonSchemaFormat {
                    name: schema_name.to_string(),
                    strict: true,
                    schema: schema_value,
                },
            },
        };

        let content = self.complete_with_retry(&request).await?;
        parse_draft(&content)
    }

    /// Send the completion, retrying with backoff on 429 only.
    async fn complete_with_retry(&self, request: &ChatRequest) -> Result<String> {
        let mut attempt = 0;
        loop {
            attempt += 1;

            let response = self
                .client
                .post(format!("{}/chat/completions", self.base_url))
                .header("Authorization", format!("Bearer {}", self.api_key.expose()))
                .header("Content-Type", "application/json")
                .json(request)
                .send()
                .await
                .map_err(|e| PipelineError::Oracle(Box::new(e)))?;

            if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                if attempt >= self.max_attempts {
                    return Err(PipelineError::RateLimited { attempts: attempt });
                }
                let delay = Duration::from_millis(500 * (1 << attempt));
                tracing::warn!(attempt, ?delay, "oracle throttled, backing off");
                tokio::time::sleep(delay).await;
                continue;
            }

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(PipelineError::Oracle(Box::new(std::io::Error::other(
                    format!("provider error {status}: {body}"),
                ))));
            }

            let chat_response: ChatResponse = response
                .json()
                .await
                .map_err(|e| PipelineError::Oracle(Box::new(e)))?;

            return chat_response
                .choices
                .into_iter()
                .next()
                .map(|c| c.message.content)
                .ok_or_else(|| {
                    PipelineError::SchemaConformance("empty completion from provider".to_string())
                });
        }
    }
}

/// Parse a completion into a draft, tolerating a markdown code fence around
/// the JSON. Anything else is a conformance failure, never a partial value.
fn parse_draft<T: DeserializeOwned>(content: &str) -> Result<T> {
    serde_json::from_str(content)
        .or_else(|_| {
            let stripped = content
                .trim()
                .trim_start_matches("```json")
                .trim_start_matches("```")
                .trim_end_matches("```")
                .trim();
            serde_json::from_str(stripped)
        })
        .map_err(|e| PipelineError::SchemaConformance(e.to_string()))
}

#[async_trait]
impl ExtractionOracle for GroqOracle {
    async fn extract_event(
        &self,
        event_name: &str,
        context: &str,
        current_year: i32,
    ) -> Result<EventDraft> {
        let prompt = format_event_prompt(event_name, context, current_year);
        self.extract_structured("event_draft", &prompt).await
    }

    async fn extract_result(
        &self,
        athlete_name: &str,
        event_name: &str,
        year: i32,
        context: &str,
    ) -> Result<ResultDraft> {
        let prompt = format_result_prompt(athlete_name, event_name, year, context);
        self.extract_structured("result_draft", &prompt).await
    }
}

// Wire types for the OpenAI-compatible API.

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
    json_schema: JsonSchemaFormat,
}

#[derive(Serialize)]
struct JsonSchemaFormat {
    name: String,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides() {
        let oracle = GroqOracle::new("gsk-test")
            .with_model("llama-3.1-8b-instant")
            .with_base_url("http://localhost:8080")
            .with_max_attempts(5);

        assert_eq!(oracle.model, "llama-3.1-8b-instant");
        assert_eq!(oracle.base_url, "http://localhost:8080");
        assert_eq!(oracle.max_attempts, 5);
    }

    #[test]
    fn max_attempts_floor_is_one() {
        let oracle = GroqOracle::new("gsk-test").with_max_attempts(0);
        assert_eq!(oracle.max_attempts, 1);
    }

    #[test]
    fn parse_draft_accepts_plain_json() {
        let draft: ResultDraft =
            parse_draft(r#"{"official_time":"3:41:27","overall_position":120,"category_position":null,"average_pace":null}"#)
                .unwrap();
        assert_eq!(draft.official_time.as_deref(), Some("3:41:27"));
        assert_eq!(draft.overall_position, Some(120));
    }

    #[test]
    fn parse_draft_strips_markdown_fence() {
        let fenced = "```json\n{\"official_time\":null,\"overall_position\":null,\"category_position\":null,\"average_pace\":null}\n```";
        let draft: ResultDraft = parse_draft(fenced).unwrap();
        assert!(draft.is_empty());
    }

    #[test]
    fn parse_draft_rejects_prose() {
        let err = parse_draft::<ResultDraft>("Sorry, I could not find the athlete.").unwrap_err();
        assert!(matches!(err, PipelineError::SchemaConformance(_)));
    }
}
