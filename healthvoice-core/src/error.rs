use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Terminal failure of one pipeline invocation. Nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PipelineError {
    #[error("diagnosis request failed: {0}")]
    Transport(String),

    #[error("diagnosis service returned no completion choices")]
    EmptyResponse,

    #[error("no JSON found in model response")]
    NoJsonFound,

    #[error("model response JSON is invalid: {0}")]
    JsonParse(String),

    #[error("model response JSON has the wrong shape: {0}")]
    MalformedResult(String),
}

impl PipelineError {
    /// Stable label for logs and UI.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Transport(_) => "transport",
            PipelineError::EmptyResponse => "empty_response",
            PipelineError::NoJsonFound => "no_json_found",
            PipelineError::JsonParse(_) => "json_parse",
            PipelineError::MalformedResult(_) => "malformed_result",
        }
    }

    /// True when the endpoint could not be reached or answered with nothing usable.
    pub fn is_service_failure(&self) -> bool {
        matches!(
            self,
            PipelineError::Transport(_) | PipelineError::EmptyResponse
        )
    }
}
