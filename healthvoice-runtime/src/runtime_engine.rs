use std::sync::Arc;

use healthvoice_core::config::AppConfig;
use healthvoice_engine::engine::{DiagnosisPipeline, PipelineConfig};
use healthvoice_engine::traits::ChatProvider;

use crate::llm::OpenAiCompatibleChatProvider;

pub fn pipeline_config(cfg: &AppConfig) -> PipelineConfig {
    PipelineConfig {
        list_cap: cfg.list_cap,
        oversize_policy: cfg.oversize_policy,
    }
}

/// Build a runnable pipeline from config and an already-resolved credential.
pub fn build_pipeline(cfg: &AppConfig, api_key: &str) -> DiagnosisPipeline {
    let chat: Arc<dyn ChatProvider> =
        Arc::new(OpenAiCompatibleChatProvider::new(&cfg.endpoint, api_key));
    DiagnosisPipeline::new(pipeline_config(cfg), chat)
}
