use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{DomainError, Message};

/// Default target: Groq's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const COMPLETIONS_PATH: &str = "/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-r1-distill-llama-70b";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for OpenAI-style `/chat/completions` endpoints (Groq by default).
///
/// Sends the whole history in one non-streaming request with the credential as
/// a bearer token, and returns the first choice's text. Any transport, status,
/// or decoding problem comes back as [`DomainError::Completion`].
pub struct OpenAiChatClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiChatClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self::with_timeout(api_key, model, base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn build_request<'a>(&'a self, system: &'a str, history: &'a [Message]) -> ApiRequest<'a> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ApiMessage {
            role: "system",
            content: system,
        });
        messages.extend(history.iter().map(|m| ApiMessage {
            role: m.role().as_str(),
            content: m.content(),
        }));

        ApiRequest {
            model: &self.model,
            messages,
            stream: false,
        }
    }

    /// Pull `error.message` out of an error body when the API sent JSON.
    fn error_detail(body: &str) -> Option<String> {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()?
            .get("error")?
            .get("message")?
            .as_str()
            .map(String::from)
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, system: &str, history: &[Message]) -> Result<String, DomainError> {
        let request = self.build_request(system, history);
        debug!(
            "OpenAiChatClient: POST {} ({} messages, model {})",
            self.url,
            request.messages.len(),
            self.model
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::completion(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiChatClient: API returned {status}: {body}");
            let detail = Self::error_detail(&body).unwrap_or(body);
            return Err(DomainError::completion(format!(
                "API returned {status}: {detail}"
            )));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| DomainError::completion(format!("failed to parse response: {e}")))?;

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| DomainError::completion("response contained no completion choice"))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
