use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatCompletionError {
    #[error("decode chat JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no content in chat completion response")]
    NoChoices,
}

#[derive(Debug, Deserialize)]
struct OpenAiChatResponse {
    // Some gateways omit the field entirely on soft failures.
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

/// Returns the trimmed content of the first choice.
pub fn parse_openai_chat_completion(body: &[u8]) -> Result<String, ChatCompletionError> {
    let resp: OpenAiChatResponse = serde_json::from_slice(body)?;
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ChatCompletionError::NoChoices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_openai_chat_content() {
        let body = br#"{"choices":[{"message":{"content":"  hi \n"}}]}"#;
        assert_eq!(parse_openai_chat_completion(body).unwrap(), "hi");
    }

    #[test]
    fn missing_or_empty_choices_is_no_choices() {
        for body in [
            &br#"{"choices":[]}"#[..],
            &br#"{"id":"x"}"#[..],
            &br#"{"choices":[{"message":{}}]}"#[..],
            &br#"{"choices":[{"message":{"content":"   "}}]}"#[..],
        ] {
            assert!(matches!(
                parse_openai_chat_completion(body),
                Err(ChatCompletionError::NoChoices)
            ));
        }
    }

    #[test]
    fn non_json_body_is_decode_error() {
        assert!(matches!(
            parse_openai_chat_completion(b"<html>bad gateway</html>"),
            Err(ChatCompletionError::Decode(_))
        ));
    }
}
