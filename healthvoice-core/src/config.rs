use crate::interpret::OversizePolicy;
use crate::prompt::ListCap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEndpointConfig {
    pub base_url: String,
    pub model: String,

    // Transport hardening; not part of the request contract.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechConfig {
    pub enabled: bool,

    // Program and leading args for the command speaker; the text is appended last.
    #[serde(default)]
    pub command: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub endpoint: ChatEndpointConfig,

    #[serde(default)]
    pub list_cap: ListCap,
    #[serde(default)]
    pub oversize_policy: OversizePolicy,

    pub speech: SpeechConfig,

    // Secrets are stored outside this struct at rest.
    #[serde(default)]
    pub api_key_present: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("list_cap of 0 asks the model for nothing")]
    ZeroListCap,

    #[error("oversize_policy with a cap of 0 rejects every result")]
    ZeroOversizeCap,
}

impl AppConfig {
    /// Rejects settings that would make every diagnosis fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.list_cap == ListCap::Bounded(0) {
            return Err(ConfigError::ZeroListCap);
        }
        if self.oversize_policy.cap() == Some(0) {
            return Err(ConfigError::ZeroOversizeCap);
        }
        Ok(())
    }
}

pub fn default_connect_timeout_secs() -> u64 {
    10
}

pub fn default_request_timeout_secs() -> u64 {
    30
}
