use serde::{Deserialize, Serialize};

use crate::text::{normalize_symptom_text, normalize_transcript};

/// A user's free-text symptom description, already normalized.
///
/// Construction is the only validation point: a blank description never
/// produces a `SymptomQuery`, so the pipeline is never invoked for one.
/// Deserialization goes through the same check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct SymptomQuery(String);

impl SymptomQuery {
    /// Typed input: trims whitespace and one trailing punctuation mark.
    pub fn new(raw: &str) -> Option<Self> {
        let text = normalize_symptom_text(raw);
        (!text.is_empty()).then_some(Self(text))
    }

    /// Speech-to-text input: same as `new`, but lowercased first.
    pub fn from_transcript(raw: &str) -> Option<Self> {
        let text = normalize_transcript(raw);
        (!text.is_empty()).then_some(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SymptomQuery {
    type Error = &'static str;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(&raw).ok_or("symptom description is empty")
    }
}

impl std::fmt::Display for SymptomQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisPrompt(pub String);

impl DiagnosisPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unstructured text returned by the inference endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawModelResponse(pub String);

impl RawModelResponse {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Two ordered lists, in the order the model produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub diagnoses: Vec<String>,
    pub remedies: Vec<String>,
}
