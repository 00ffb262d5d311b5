use crate::types::DiagnosisResult;

pub const DIAGNOSIS_HEADING: &str = "Diagnosis:";
pub const REMEDIES_HEADING: &str = "Remedies:";

/// Two labeled lists, one item per line.
pub fn render_result(result: &DiagnosisResult) -> String {
    format!(
        "{DIAGNOSIS_HEADING}\n{}\n\n{REMEDIES_HEADING}\n{}",
        result.diagnoses.join("\n"),
        result.remedies.join("\n")
    )
}

/// The sentence handed to speech synthesis. Lossy by nature.
pub fn spoken_summary(result: &DiagnosisResult) -> String {
    format!(
        "Possible diagnoses: {}. Remedies include: {}",
        result.diagnoses.join(", "),
        result.remedies.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DiagnosisResult {
        DiagnosisResult {
            diagnoses: vec!["Flu".into(), "Cold".into()],
            remedies: vec!["Rest".into(), "Fluids".into()],
        }
    }

    #[test]
    fn renders_labeled_lists_in_order() {
        assert_eq!(
            render_result(&sample()),
            "Diagnosis:\nFlu\nCold\n\nRemedies:\nRest\nFluids"
        );
    }

    #[test]
    fn spoken_summary_joins_with_commas() {
        assert_eq!(
            spoken_summary(&sample()),
            "Possible diagnoses: Flu, Cold. Remedies include: Rest, Fluids"
        );
    }
}
