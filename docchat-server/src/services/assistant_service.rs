use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::{collections::HashMap, sync::Arc, time::Duration, time::Instant};

use shared::{
    config::llm::LlmConfig,
    models::{ChatCompletionRequest, ChatCompletionResponse, CompletionMessage},
};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("llm configuration error: {0}")]
    Config(String),
    #[error("llm request failed: {0}")]
    Request(String),
    #[error("llm upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("llm response could not be decoded: {0}")]
    Decode(String),
    #[error("llm response contained no answer")]
    EmptyAnswer,
}

/// Answers prompts within a conversation thread.
#[async_trait]
pub trait AssistantRuntime: Send + Sync {
    async fn chat(&self, prompt: &str, thread_id: &str) -> Result<String, AssistantError>;
}

/// Assistant backed by an OpenAI-compatible `/chat/completions` endpoint.
///
/// Conversation memory lives in process, keyed by thread id, and is lost on
/// restart.
#[derive(Clone)]
pub struct AssistantService {
    client: Client,
    config: Arc<LlmConfig>,
    threads: Arc<RwLock<HashMap<String, Vec<CompletionMessage>>>>,
}

impl AssistantService {
    /// # Errors
    /// Returns [`AssistantError::Config`] when the HTTP client cannot be built.
    pub fn new(config: LlmConfig) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|err| AssistantError::Config(err.to_string()))?;

        if config.api_key.is_none() {
            warn!(base_url = %config.base_url, "no API key configured for the LLM upstream");
        }
        info!(model = %config.model, base_url = %config.base_url, "assistant initialised");

        Ok(Self {
            client,
            config: Arc::new(config),
            threads: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Messages replayed for `thread_id`, oldest first.
    pub async fn history(&self, thread_id: &str) -> Vec<CompletionMessage> {
        self.threads
            .read()
            .await
            .get(thread_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn build_request(&self, prompt: &str, thread_id: &str) -> ChatCompletionRequest {
        let mut messages = Vec::new();
        if let Some(system) = &self.config.system_prompt {
            messages.push(CompletionMessage::system(system.clone()));
        }
        messages.extend(self.history(thread_id).await);
        messages.push(CompletionMessage::user(prompt));

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            temperature: Some(self.config.temperature),
        }
    }

    async fn remember(&self, thread_id: &str, prompt: &str, answer: &str) {
        let mut threads = self.threads.write().await;
        let history = threads.entry(thread_id.to_string()).or_default();
        history.push(CompletionMessage::user(prompt));
        history.push(CompletionMessage::assistant(answer));

        let limit = self.config.max_history_messages;
        if history.len() > limit {
            let excess = history.len() - limit;
            history.drain(..excess);
        }
    }

    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String, AssistantError> {
        let mut builder = self.client.post(self.config.completions_url()).json(request);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| AssistantError::Request(err.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let message = response.text().await.unwrap_or_default();
            return Err(AssistantError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| AssistantError::Decode(err.to_string()))?;

        body.first_content()
            .map(str::to_string)
            .ok_or(AssistantError::EmptyAnswer)
    }
}

#[async_trait]
impl AssistantRuntime for AssistantService {
    async fn chat(&self, prompt: &str, thread_id: &str) -> Result<String, AssistantError> {
        let request = self.build_request(prompt, thread_id).await;
        let started = Instant::now();
        let result = self.complete(&request).await;

        let outcome = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!("llm_requests_total", "status" => outcome).increment(1);
        metrics::histogram!("llm_request_duration_seconds").record(started.elapsed().as_secs_f64());

        let answer = result?;
        debug!(thread_id, history = request.messages.len(), "assistant answered");
        self.remember(thread_id, prompt, &answer).await;
        Ok(answer)
    }
}
