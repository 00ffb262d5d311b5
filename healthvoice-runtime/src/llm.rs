use healthvoice_core::config::ChatEndpointConfig;
use healthvoice_core::error::PipelineError;
use healthvoice_core::types::{DiagnosisPrompt, RawModelResponse};
use healthvoice_engine::traits::ChatProvider;
use healthvoice_providers::openai_compatible::{
    ChatMessage, OpenAiCompatibleChatConfig, build_chat_completions_request,
};
use healthvoice_providers::parse::{ChatCompletionError, parse_openai_chat_completion};
use healthvoice_providers::runtime::{self, Timeouts};
use std::time::Duration;

/// Chat provider for any OpenAI-compatible `/chat/completions` endpoint.
///
/// The credential is injected at construction and never leaves this value
/// except in the `Authorization` header.
#[derive(Clone)]
pub struct OpenAiCompatibleChatProvider {
    cfg: OpenAiCompatibleChatConfig,
    timeouts: Timeouts,
}

impl std::fmt::Debug for OpenAiCompatibleChatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleChatProvider")
            .field("base_url", &self.cfg.base_url)
            .field("model", &self.cfg.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OpenAiCompatibleChatProvider {
    pub fn new(endpoint: &ChatEndpointConfig, api_key: impl Into<String>) -> Self {
        Self {
            cfg: OpenAiCompatibleChatConfig {
                base_url: endpoint.base_url.clone(),
                api_key: api_key.into(),
                model: endpoint.model.clone(),
            },
            timeouts: Timeouts {
                connect: Duration::from_secs(endpoint.connect_timeout_secs),
                total: Duration::from_secs(endpoint.request_timeout_secs),
            },
        }
    }
}

#[async_trait::async_trait]
impl ChatProvider for OpenAiCompatibleChatProvider {
    fn model(&self) -> &str {
        &self.cfg.model
    }

    async fn complete(&self, prompt: &DiagnosisPrompt) -> Result<RawModelResponse, PipelineError> {
        let req = build_chat_completions_request(&self.cfg, &[ChatMessage::user(prompt.as_str())]);

        let resp = runtime::execute(&req, self.timeouts)
            .await
            .map_err(|e| PipelineError::Transport(format!("{e:#}")))?;

        if !resp.is_success() {
            return Err(PipelineError::Transport(format!(
                "OpenAI-compatible request failed: status={} body={}",
                resp.status,
                String::from_utf8_lossy(&resp.body)
            )));
        }

        match parse_openai_chat_completion(&resp.body) {
            Ok(text) => Ok(RawModelResponse(text)),
            Err(ChatCompletionError::NoChoices) => Err(PipelineError::EmptyResponse),
            Err(e @ ChatCompletionError::Decode(_)) => Err(PipelineError::Transport(e.to_string())),
        }
    }
}
