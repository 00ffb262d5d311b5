use async_trait::async_trait;
use healthvoice_core::error::PipelineError;
use healthvoice_core::types::{DiagnosisPrompt, RawModelResponse};

/// A chat-completion endpoint. One call, one outbound request, no retries.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Model identifier sent with every request.
    fn model(&self) -> &str;

    async fn complete(&self, prompt: &DiagnosisPrompt) -> Result<RawModelResponse, PipelineError>;
}

/// Text-to-speech output.
///
/// `speak` replaces whatever is currently being spoken.
#[async_trait]
pub trait Speaker: Send + Sync {
    async fn speak(&self, text: &str) -> anyhow::Result<()>;
    async fn cancel(&self) -> anyhow::Result<()>;
    async fn is_speaking(&self) -> bool;
}
