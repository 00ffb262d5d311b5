use anyhow::{Context, bail};

/// Keyring service name. Changing it orphans keys stored by earlier builds.
pub const DEFAULT_SERVICE: &str = "healthvoice";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKey {
    ChatApiKey,
}

impl SecretKey {
    pub fn account(self) -> &'static str {
        match self {
            SecretKey::ChatApiKey => "chat_api_key",
        }
    }
}

/// OS keyring scoped to one service name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyring {
    service: String,
}

impl Default for Keyring {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE)
    }
}

impl Keyring {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: SecretKey) -> anyhow::Result<keyring::Entry> {
        keyring::Entry::new(&self.service, key.account()).with_context(|| {
            format!("open keyring entry {}/{}", self.service, key.account())
        })
    }

    /// A stored blank value reads as absent.
    pub fn read(&self, key: SecretKey) -> anyhow::Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(v) if v.trim().is_empty() => Ok(None),
            Ok(v) => Ok(Some(v.trim().to_string())),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e))
                .with_context(|| format!("read {} from keyring", key.account())),
        }
    }

    pub fn store(&self, key: SecretKey, value: &str) -> anyhow::Result<()> {
        let value = value.trim();
        if value.is_empty() {
            bail!("refusing to store an empty {}", key.account());
        }
        self.entry(key)?
            .set_password(value)
            .with_context(|| format!("store {} in keyring", key.account()))
    }

    /// Returns whether anything was removed.
    pub fn remove(&self, key: SecretKey) -> anyhow::Result<bool> {
        match self.entry(key)?.delete_credential() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(anyhow::Error::new(e))
                .with_context(|| format!("remove {} from keyring", key.account())),
        }
    }
}
