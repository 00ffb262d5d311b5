use crate::types::{DiagnosisPrompt, SymptomQuery};
use serde::{Deserialize, Serialize};

pub const DIAGNOSIS_KEY: &str = "SYMPTOM_DIAGNOSIS";
pub const REMEDIES_KEY: &str = "SYMPTOM_REMEDIES";

pub const DEFAULT_MAX_ITEMS: usize = 6;

/// How many items per list the prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "max")]
pub enum ListCap {
    Bounded(usize),
    Unbounded,
}

impl Default for ListCap {
    fn default() -> Self {
        ListCap::Bounded(DEFAULT_MAX_ITEMS)
    }
}

pub fn build_diagnosis_prompt(query: &SymptomQuery, cap: ListCap) -> DiagnosisPrompt {
    let (diagnosis_line, remedies_line) = match cap {
        ListCap::Bounded(n) => (
            format!("1. {DIAGNOSIS_KEY}: A list of at most {n} possible conditions."),
            format!("2. {REMEDIES_KEY}: A list of at most {n} simple home remedies."),
        ),
        ListCap::Unbounded => (
            format!("1. {DIAGNOSIS_KEY}: A list of possible conditions."),
            format!("2. {REMEDIES_KEY}: A list of simple home remedies."),
        ),
    };

    let text = format!(
        "I have the following symptoms: \"{symptom}\".\n\n\
Based on this, provide:\n\
{diagnosis_line}\n\
{remedies_line}\n\
Format the response in JSON like this:\n\
{{\n    \"{DIAGNOSIS_KEY}\": [\"Condition1\", \"Condition2\"],\n    \"{REMEDIES_KEY}\": [\"Remedy1\", \"Remedy2\"]\n}}\n\
Only return valid JSON. Do not include extra explanations or text.",
        symptom = query.as_str(),
    );

    DiagnosisPrompt(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(s: &str) -> SymptomQuery {
        SymptomQuery::new(s).unwrap()
    }

    #[test]
    fn prompt_contains_symptom_and_keys() {
        for s in ["headache", "fever and chills", "pain in \"left\" knee", "头痛"] {
            let p = build_diagnosis_prompt(&query(s), ListCap::default());
            assert!(p.as_str().contains(s), "missing symptom {s}");
            assert!(p.as_str().contains(DIAGNOSIS_KEY));
            assert!(p.as_str().contains(REMEDIES_KEY));
            assert!(p.as_str().contains("Only return valid JSON"));
        }
    }

    #[test]
    fn prompt_keeps_inner_whitespace_of_symptom() {
        let raw = "sharp pain  left   side\n\nworse at night";
        let p = build_diagnosis_prompt(&query(raw), ListCap::default());
        assert!(p.as_str().contains(raw));
    }

    #[test]
    fn bounded_prompt_states_the_cap() {
        let p = build_diagnosis_prompt(&query("cough"), ListCap::Bounded(6));
        assert!(p.as_str().contains("at most 6 possible conditions"));
        assert!(p.as_str().contains("at most 6 simple home remedies"));
    }

    #[test]
    fn unbounded_prompt_has_no_cap() {
        let p = build_diagnosis_prompt(&query("cough"), ListCap::Unbounded);
        assert!(!p.as_str().contains("at most"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let a = build_diagnosis_prompt(&query("nausea"), ListCap::default());
        let b = build_diagnosis_prompt(&query("nausea"), ListCap::default());
        assert_eq!(a, b);
    }

    #[test]
    fn list_cap_serializes_with_tag() {
        let json = serde_json::to_string(&ListCap::Bounded(4)).unwrap();
        assert_eq!(json, r#"{"kind":"bounded","max":4}"#);
        let back: ListCap = serde_json::from_str(r#"{"kind":"unbounded"}"#).unwrap();
        assert_eq!(back, ListCap::Unbounded);
    }
}
