use async_trait::async_trait;
use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::credential::Credential;
use crate::domain::diff::DiffText;
use crate::domain::summary::SummaryText;
use crate::error::{AppError, AppResult};
use crate::services::LanguageModelService;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const MODEL: &str = "gpt-3.5-turbo";

const SYSTEM_PROMPT: &str = "You are a senior developer who summarizes Git diff.";
const USER_PROMPT_PREFIX: &str =
    "Explain these Git changes: what was changed, why it was changed, and how:";

pub struct OpenAiClient {
    http: Client,
    base_url: String,
}

impl OpenAiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn completions_endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl Default for OpenAiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LanguageModelService for OpenAiClient {
    async fn summarize_diff(
        &self,
        diff: &DiffText,
        credential: &Credential,
    ) -> AppResult<SummaryText> {
        let url = self.completions_endpoint();
        let request_body = ChatCompletionRequest::summarize(diff);
        info!(%url, model = MODEL, diff_len = diff.as_str().len(), "requesting change summary");

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", credential.expose()))
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::LanguageModel(format!("failed to call OpenAI: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::LanguageModel(format!(
                "OpenAI responded with {status}: {body}"
            )));
        }

        let body = response.text().await.map_err(|err| {
            AppError::LanguageModel(format!("failed to read OpenAI response: {err}"))
        })?;
        let summary = parse_completion(&body)?;
        debug!(summary_len = summary.as_str().len(), "received change summary");
        Ok(summary)
    }
}

fn parse_completion(body: &str) -> AppResult<SummaryText> {
    let payload: ChatCompletionResponse = serde_json::from_str(body).map_err(|err| {
        AppError::LanguageModel(format!("failed to parse OpenAI response: {err}"))
    })?;

    let content = payload
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| {
            AppError::LanguageModel("OpenAI response contained no choices".to_string())
        })?
        .message
        .content
        .ok_or_else(|| {
            AppError::LanguageModel("OpenAI response choice has no content".to_string())
        })?;

    Ok(SummaryText::new(&content))
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
}

impl ChatCompletionRequest {
    fn summarize(diff: &DiffText) -> Self {
        Self {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("{USER_PROMPT_PREFIX}\n\n{}", diff.as_str()),
                },
            ],
        }
    }
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
