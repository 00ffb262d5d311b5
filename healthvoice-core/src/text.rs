use regex::Regex;
use std::sync::OnceLock;

fn trailing_punct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // One mark only; "what?!" keeps its "?".
    RE.get_or_init(|| Regex::new(r"[.,!?]$").expect("valid trailing punctuation regex"))
}

/// Trims surrounding whitespace and one trailing `.,!?`. Inner text is untouched.
pub fn normalize_symptom_text(text: &str) -> String {
    let trimmed = text.trim();
    trailing_punct_re().replace(trimmed, "").trim().to_string()
}

pub fn normalize_transcript(text: &str) -> String {
    normalize_symptom_text(&text.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_single_trailing_mark() {
        assert_eq!(normalize_symptom_text("cough."), "cough");
        assert_eq!(normalize_symptom_text("cough?!"), "cough?");
        assert_eq!(normalize_symptom_text("cough, fever"), "cough, fever");
    }

    #[test]
    fn preserves_inner_whitespace() {
        let raw = "sharp pain  left   side\n\nworse at night";
        assert_eq!(normalize_symptom_text(&format!("  {raw} \n")), raw);
    }

    #[test]
    fn transcript_lowercases_before_stripping() {
        assert_eq!(normalize_transcript(" My Back Hurts. "), "my back hurts");
    }
}
