use crate::config::ServiceConfig;
use crate::core::response::parse_recommendations;
use crate::domain::model::{RecommendationQuery, RecommendationRecord, RECOMMENDATION_COUNT};
use crate::domain::ports::RecommendationProvider;
use crate::utils::error::{ProviderFailure, Result, UnimatchError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are a knowledgeable university admissions advisor. \
Answer only with a valid JSON array and no commentary.";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

pub fn build_prompt(query: &RecommendationQuery) -> String {
    let location = if query.has_country() {
        format!("in {}", query.country)
    } else {
        "anywhere in the world".to_string()
    };

    format!(
        "Recommend exactly {count} real universities {location} for a student who wants to study \
{subject}. Return a JSON array of {count} objects ordered from best to fifth best, each with \
these fields: \"id\" (1-{count}), \"institutionName\", \"programName\", \"country\", \
\"rank\" (1-{count}), \"description\" (one or two sentences), \"acceptanceRate\" \
(e.g. \"15%\"), \"tuition\" (yearly, e.g. \"$35,000\") and \"websiteUrl\".",
        count = RECOMMENDATION_COUNT,
        location = location,
        subject = query.subject.replace('-', " "),
    )
}

/// Client for an OpenAI-style `POST {base_url}/chat/completions` endpoint.
pub struct ChatCompletionProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl ChatCompletionProvider {
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let api_key = config
            .usable_api_key()
            .ok_or_else(|| UnimatchError::MissingConfigError {
                field: "provider.api_key".to_string(),
            })?
            .to_string();

        let timeout = config.request_timeout();
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/chat/completions",
                config.provider.base_url.trim_end_matches('/')
            ),
            api_key,
            model: config.provider.model.clone(),
            temperature: config.provider.temperature,
            max_tokens: config.provider.max_tokens,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn classify(&self, error: reqwest::Error) -> ProviderFailure {
        if error.is_timeout() {
            ProviderFailure::Timeout(self.timeout)
        } else if let Some(status) = error.status() {
            ProviderFailure::from_status(status.as_u16())
        } else {
            ProviderFailure::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl RecommendationProvider for ChatCompletionProvider {
    async fn fetch(
        &self,
        query: &RecommendationQuery,
    ) -> std::result::Result<Vec<RecommendationRecord>, ProviderFailure> {
        let prompt = build_prompt(query);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!("Making chat completion request to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        tracing::debug!("Provider response status: {}", status);
        if !status.is_success() {
            return Err(ProviderFailure::from_status(status.as_u16()));
        }

        let text = response.text().await.map_err(|e| self.classify(e))?;
        let completion: ChatResponse =
            serde_json::from_str(&text).map_err(|e| ProviderFailure::MalformedJson(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ProviderFailure::EmptyResponse)?;

        parse_recommendations(&content)
    }
}
