use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use healthvoice_core::config::AppConfig;
use healthvoice_core::error::PipelineError;
use healthvoice_core::render::{render_result, spoken_summary};
use healthvoice_core::types::{DiagnosisResult, SymptomQuery};
use healthvoice_engine::engine::DiagnosisPipeline;
use healthvoice_engine::session::PipelineStage;
use healthvoice_engine::traits::Speaker;
use healthvoice_platform::CommandSpeaker;
use healthvoice_runtime::runtime_engine::build_pipeline;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SERVICE_ERROR_MESSAGE: &str = "Error contacting the diagnosis service.";
pub const FORMAT_ERROR_MESSAGE: &str = "AI response is not in the correct format.";

/// Why a submission never reached the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("symptom description is empty")]
    Blank,

    #[error("a diagnosis is already in progress")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionSource {
    Typed,
    Spoken,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub query: String,

    // Lines for the status box: echo line, then result or error line.
    pub status_lines: Vec<String>,

    pub result: Option<DiagnosisResult>,
    pub error: Option<PipelineError>,
    pub spoken: Option<String>,
}

/// Short, actionable text for the status box; details go to the log.
pub fn user_facing_error(e: &PipelineError) -> &'static str {
    if e.is_service_failure() {
        SERVICE_ERROR_MESSAGE
    } else {
        FORMAT_ERROR_MESSAGE
    }
}

pub fn echo_line(source: SubmissionSource, query: &SymptomQuery) -> String {
    match source {
        SubmissionSource::Typed => format!("You entered: \"{query}\""),
        SubmissionSource::Spoken => format!("You said: \"{query}\""),
    }
}

#[derive(Clone)]
pub struct AppService {
    pipeline: Arc<DiagnosisPipeline>,
    speaker: Option<Arc<dyn Speaker>>,
    busy: Arc<AtomicBool>,
}

struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl AppService {
    pub fn new(pipeline: DiagnosisPipeline, speaker: Option<Arc<dyn Speaker>>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            speaker,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Wires the OpenAI-compatible pipeline and, when enabled, the command speaker.
    pub fn from_config(cfg: &AppConfig, api_key: &str) -> anyhow::Result<Self> {
        let speaker: Option<Arc<dyn Speaker>> = if cfg.speech.enabled {
            Some(Arc::new(CommandSpeaker::new(&cfg.speech.command)?))
        } else {
            None
        };
        Ok(Self::new(build_pipeline(cfg, api_key), speaker))
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub async fn submit_text(&self, raw: &str) -> Result<SubmissionOutcome, SubmitError> {
        self.submit_with_hook(SubmissionSource::Typed, raw, |_stage| async {})
            .await
    }

    pub async fn submit_transcript(&self, raw: &str) -> Result<SubmissionOutcome, SubmitError> {
        self.submit_with_hook(SubmissionSource::Spoken, raw, |_stage| async {})
            .await
    }

    /// Runs one submission. Pipeline failures are part of the outcome; only
    /// blank input and concurrent submissions are refused.
    pub async fn submit_with_hook<F, Fut>(
        &self,
        source: SubmissionSource,
        raw: &str,
        on_stage: F,
    ) -> Result<SubmissionOutcome, SubmitError>
    where
        F: Fn(PipelineStage) -> Fut + Send + Sync,
        Fut: Future<Output = ()> + Send,
    {
        let query = match source {
            SubmissionSource::Typed => SymptomQuery::new(raw),
            SubmissionSource::Spoken => SymptomQuery::from_transcript(raw),
        }
        .ok_or(SubmitError::Blank)?;

        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SubmitError::Busy);
        }
        let _guard = BusyGuard(self.busy.clone());

        let mut status_lines = vec![echo_line(source, &query)];

        let outcome = match self.pipeline.diagnose_with_hook(&query, on_stage).await {
            Ok(diagnosis) => {
                status_lines.push(String::new());
                status_lines.extend(render_result(&diagnosis.result).lines().map(String::from));

                let spoken = self.vocalize(&diagnosis.result).await;
                SubmissionOutcome {
                    query: query.to_string(),
                    status_lines,
                    result: Some(diagnosis.result),
                    error: None,
                    spoken,
                }
            }
            Err(e) => {
                log::error!("diagnosis failed kind={}: {e}", e.kind());
                status_lines.push(String::new());
                status_lines.push(user_facing_error(&e).to_string());
                SubmissionOutcome {
                    query: query.to_string(),
                    status_lines,
                    result: None,
                    error: Some(e),
                    spoken: None,
                }
            }
        };

        Ok(outcome)
    }

    // Speech failures never fail the submission; the text is already on screen.
    async fn vocalize(&self, result: &DiagnosisResult) -> Option<String> {
        let speaker = self.speaker.as_ref()?;
        let text = spoken_summary(result);
        match speaker.speak(&text).await {
            Ok(()) => Some(text),
            Err(e) => {
                log::warn!("speech output failed: {e:#}");
                None
            }
        }
    }

    pub async fn is_speaking(&self) -> bool {
        match &self.speaker {
            Some(s) => s.is_speaking().await,
            None => false,
        }
    }

    pub async fn stop_speaking(&self) -> anyhow::Result<()> {
        match &self.speaker {
            Some(s) if s.is_speaking().await => s.cancel().await,
            _ => Ok(()),
        }
    }

    /// Releases speech output; call before dropping the host.
    pub async fn shutdown(&self) -> anyhow::Result<()> {
        if let Some(s) = &self.speaker {
            s.cancel().await?;
        }
        Ok(())
    }
}
