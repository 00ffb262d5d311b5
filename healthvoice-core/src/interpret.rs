use crate::error::PipelineError;
use crate::prompt::{DIAGNOSIS_KEY, REMEDIES_KEY};
use crate::types::{DiagnosisResult, RawModelResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What to do when the model returns more items than the prompt asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "max")]
pub enum OversizePolicy {
    #[default]
    Accept,
    Truncate(usize),
    Reject(usize),
}

/// Returns the substring from the first `{` to the last `}`, inclusive.
///
/// This is not a balanced-brace scan. Multiple objects or stray braces in the
/// surrounding prose produce a span that usually fails to parse.
pub fn extract_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

pub fn interpret_response(
    raw: &RawModelResponse,
    policy: OversizePolicy,
) -> Result<DiagnosisResult, PipelineError> {
    let block = extract_json_block(raw.as_str()).ok_or(PipelineError::NoJsonFound)?;

    let value: Value =
        serde_json::from_str(block).map_err(|e| PipelineError::JsonParse(e.to_string()))?;

    let obj = value.as_object().ok_or_else(|| {
        PipelineError::MalformedResult("top-level JSON value is not an object".into())
    })?;

    let diagnoses = apply_policy(DIAGNOSIS_KEY, string_list(obj, DIAGNOSIS_KEY)?, policy)?;
    let remedies = apply_policy(REMEDIES_KEY, string_list(obj, REMEDIES_KEY)?, policy)?;

    Ok(DiagnosisResult {
        diagnoses,
        remedies,
    })
}

fn string_list(
    obj: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<Vec<String>, PipelineError> {
    let items = obj
        .get(key)
        .ok_or_else(|| PipelineError::MalformedResult(format!("missing key {key}")))?
        .as_array()
        .ok_or_else(|| PipelineError::MalformedResult(format!("{key} is not an array")))?;

    let list = items
        .iter()
        .map(|v| {
            v.as_str()
                .map(String::from)
                .ok_or_else(|| PipelineError::MalformedResult(format!("{key} has a non-string item")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Items are kept as returned; only a list with nothing to show is rejected.
    if list.iter().all(|s| s.trim().is_empty()) {
        return Err(PipelineError::MalformedResult(format!("{key} is empty")));
    }

    Ok(list)
}

fn apply_policy(
    key: &str,
    mut list: Vec<String>,
    policy: OversizePolicy,
) -> Result<Vec<String>, PipelineError> {
    match policy {
        OversizePolicy::Accept => Ok(list),
        OversizePolicy::Truncate(0) | OversizePolicy::Reject(0) => Err(
            PipelineError::MalformedResult(format!("{key} cap of 0 leaves nothing to show")),
        ),
        OversizePolicy::Truncate(max) => {
            list.truncate(max);
            Ok(list)
        }
        OversizePolicy::Reject(max) if list.len() > max => Err(PipelineError::MalformedResult(
            format!("{key} has {} items, more than {max}", list.len()),
        )),
        OversizePolicy::Reject(_) => Ok(list),
    }
}

impl OversizePolicy {
    /// A cap of 0 can never yield a valid result.
    pub fn cap(self) -> Option<usize> {
        match self {
            OversizePolicy::Accept => None,
            OversizePolicy::Truncate(n) | OversizePolicy::Reject(n) => Some(n),
        }
    }
}
