use anyhow::anyhow;

use crate::secrets::{Keyring, SecretKey};

pub const API_KEY_ENV_VARS: [&str; 2] = ["HEALTHVOICE_API_KEY", "GROQ_API_KEY"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Env(&'static str),
    Keyring,
}

#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential {
    pub value: String,
    pub source: CredentialSource,
}

impl std::fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredential")
            .field("value", &"[REDACTED]")
            .field("source", &self.source)
            .finish()
    }
}

/// Environment first, then the OS keyring. Blank values are ignored.
pub fn resolve_api_key() -> anyhow::Result<Option<ApiCredential>> {
    if let Some(found) = from_env(|name| std::env::var(name).ok()) {
        return Ok(Some(found));
    }

    Ok(Keyring::default()
        .read(SecretKey::ChatApiKey)?
        .map(|value| ApiCredential {
            value,
            source: CredentialSource::Keyring,
        }))
}

/// Like `resolve_api_key`, but a missing key is an error naming where to put one.
pub fn require_api_key() -> anyhow::Result<ApiCredential> {
    resolve_api_key()?.ok_or_else(missing_key_error)
}

fn missing_key_error() -> anyhow::Error {
    anyhow!(
        "no API key configured; set {} or run `healthvoice key set`",
        API_KEY_ENV_VARS.join(" or ")
    )
}

fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<ApiCredential> {
    API_KEY_ENV_VARS.iter().find_map(|name| {
        lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|value| ApiCredential {
                value,
                source: CredentialSource::Env(*name),
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn own_variable_wins_over_vendor_variable() {
        let found = from_env(env(&[("GROQ_API_KEY", "g"), ("HEALTHVOICE_API_KEY", "h")])).unwrap();
        assert_eq!(found.value, "h");
        assert_eq!(found.source, CredentialSource::Env("HEALTHVOICE_API_KEY"));
    }

    #[test]
    fn blank_variables_are_skipped() {
        let found = from_env(env(&[("HEALTHVOICE_API_KEY", "  "), ("GROQ_API_KEY", " g ")])).unwrap();
        assert_eq!(found.value, "g");
        assert_eq!(from_env(env(&[])), None);
    }

    #[test]
    fn missing_key_error_names_every_source() {
        let msg = missing_key_error().to_string();
        assert!(msg.contains("HEALTHVOICE_API_KEY or GROQ_API_KEY"));
        assert!(msg.contains("healthvoice key set"));
    }

    #[test]
    fn debug_redacts_value() {
        let c = ApiCredential {
            value: "gsk-live".into(),
            source: CredentialSource::Keyring,
        };
        assert!(!format!("{c:?}").contains("gsk-live"));
    }
}
