use healthvoice_core::types::DiagnosisResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStage {
    Prompting,
    Requesting,
    Interpreting,
    Done,
}

impl PipelineStage {
    // A stable string label for UI display.
    // This is intentionally not derived from `Debug`.
    pub fn label(self) -> &'static str {
        match self {
            PipelineStage::Prompting => "prompting",
            PipelineStage::Requesting => "requesting",
            PipelineStage::Interpreting => "interpreting",
            PipelineStage::Done => "done",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineTimings {
    pub request_ms: Option<u64>,
    pub total_ms: Option<u64>,
}

/// A successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub result: DiagnosisResult,
    pub model: String,
    pub timings: PipelineTimings,
}

pub fn ms(d: Duration) -> u64 {
    d.as_millis().try_into().unwrap_or(u64::MAX)
}
