use crate::session::{Diagnosis, PipelineStage, PipelineTimings, ms};
use crate::traits::ChatProvider;
use healthvoice_core::error::PipelineError;
use healthvoice_core::interpret::{OversizePolicy, interpret_response};
use healthvoice_core::prompt::{ListCap, build_diagnosis_prompt};
use healthvoice_core::types::SymptomQuery;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    pub list_cap: ListCap,
    pub oversize_policy: OversizePolicy,
}

/// Prompt -> chat completion -> interpretation.
///
/// Holds no per-call state, so one pipeline can serve concurrent submissions.
pub struct DiagnosisPipeline {
    cfg: PipelineConfig,
    chat: Arc<dyn ChatProvider>,
}

impl DiagnosisPipeline {
    pub fn new(cfg: PipelineConfig, chat: Arc<dyn ChatProvider>) -> Self {
        Self { cfg, chat }
    }

    pub fn config(&self) -> PipelineConfig {
        self.cfg
    }

    pub async fn diagnose(&self, query: &SymptomQuery) -> Result<Diagnosis, PipelineError> {
        self.diagnose_with_hook(query, |_stage| async {}).await
    }

    /// Same as `diagnose`, but reports each stage as it starts.
    ///
    /// The hook is intended for UI progress and must be fast. The first failing
    /// stage ends the run; later stages are neither reported nor executed.
    pub async fn diagnose_with_hook<F, Fut>(
        &self,
        query: &SymptomQuery,
        on_stage: F,
    ) -> Result<Diagnosis, PipelineError>
    where
        F: Fn(PipelineStage) -> Fut,
        Fut: Future<Output = ()>,
    {
        let started = Instant::now();

        on_stage(PipelineStage::Prompting).await;
        let prompt = build_diagnosis_prompt(query, self.cfg.list_cap);

        on_stage(PipelineStage::Requesting).await;
        let r0 = Instant::now();
        let raw = self.chat.complete(&prompt).await.inspect_err(|e| {
            log::warn!("diagnosis request failed ({}): {e}", e.kind());
        })?;
        let request_ms = ms(r0.elapsed());
        log::debug!("AI response: {}", raw.as_str());

        on_stage(PipelineStage::Interpreting).await;
        let result = interpret_response(&raw, self.cfg.oversize_policy).inspect_err(|e| {
            log::warn!("could not interpret model response ({}): {e}", e.kind());
        })?;

        on_stage(PipelineStage::Done).await;
        Ok(Diagnosis {
            result,
            model: self.chat.model().to_string(),
            timings: PipelineTimings {
                request_ms: Some(request_ms),
                total_ms: Some(ms(started.elapsed())),
            },
        })
    }
}
