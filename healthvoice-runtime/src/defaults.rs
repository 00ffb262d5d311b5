use healthvoice_core::config::{
    AppConfig, ChatEndpointConfig, SpeechConfig, default_connect_timeout_secs,
    default_request_timeout_secs,
};
use healthvoice_core::interpret::OversizePolicy;
use healthvoice_core::prompt::ListCap;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "mixtral-8x7b-32768";

pub fn default_endpoint() -> ChatEndpointConfig {
    ChatEndpointConfig {
        base_url: DEFAULT_BASE_URL.into(),
        model: DEFAULT_MODEL.into(),
        connect_timeout_secs: default_connect_timeout_secs(),
        request_timeout_secs: default_request_timeout_secs(),
    }
}

pub fn default_speech_command() -> Vec<String> {
    if cfg!(target_os = "macos") {
        vec!["say".into()]
    } else {
        vec!["espeak".into(), "-v".into(), "en-us".into()]
    }
}

pub fn default_app_config() -> AppConfig {
    AppConfig {
        endpoint: default_endpoint(),
        list_cap: ListCap::default(),
        oversize_policy: OversizePolicy::Accept,
        speech: SpeechConfig {
            enabled: true,
            command: default_speech_command(),
        },
        api_key_present: false,
    }
}
