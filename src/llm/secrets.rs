use std::sync::Mutex;

use crate::utils::{strip_controls_and_escapes, trim_line};
use anyhow::{Context, Result};

use rpassword::read_password;

use keyring::{Entry, Error as KeyringError};

pub const API_KEY_ENV: &str = "CARDSMITH_API_KEY";

const SERVICE: &str = "com.cardsmith";
const USERNAME: &str = "gemini:default";

/// Where the API key is persisted between runs.
///
/// Storage failures never reach the caller: a broken backend behaves like an
/// empty one and is only visible in the logs.
pub trait CredentialStore {
    fn load(&self) -> Option<String>;
    fn save(&self, key: &str);
    /// Returns whether a key was present.
    fn clear(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Flag,
    Environment,
    Keyring,
}

impl ApiKeySource {
    pub fn description(&self) -> &'static str {
        match self {
            ApiKeySource::Flag => "command-line flag",
            ApiKeySource::Environment => "environment variable",
            ApiKeySource::Keyring => "local keyring",
        }
    }
}

/// OS keyring entry under a fixed service/user pair.
#[derive(Debug, Default, Clone)]
pub struct KeyringStore;

impl KeyringStore {
    fn entry() -> Result<Entry, KeyringError> {
        Entry::new(SERVICE, USERNAME)
    }
}

impl CredentialStore for KeyringStore {
    fn load(&self) -> Option<String> {
        match Self::entry().and_then(|entry| entry.get_password()) {
            Ok(password) => Some(password),
            Err(KeyringError::NoEntry) => None,
            Err(err) => {
                tracing::warn!(error = %err, "could not read API key from keyring");
                None
            }
        }
    }

    fn save(&self, key: &str) {
        if let Err(err) = Self::entry().and_then(|entry| entry.set_password(key)) {
            tracing::warn!(error = %err, "could not store API key in keyring");
        }
    }

    fn clear(&self) -> bool {
        match Self::entry().and_then(|entry| entry.delete_credential()) {
            Ok(()) => true,
            Err(KeyringError::NoEntry) => false,
            Err(err) => {
                tracing::warn!(error = %err, "could not remove API key from keyring");
                false
            }
        }
    }
}

/// Keeps the key for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    key: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Mutex::new(Some(key.into())),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.key.lock().ok().and_then(|key| key.clone())
    }

    fn save(&self, key: &str) {
        if let Ok(mut slot) = self.key.lock() {
            *slot = Some(key.to_string());
        }
    }

    fn clear(&self) -> bool {
        self.key
            .lock()
            .map(|mut slot| slot.take().is_some())
            .unwrap_or(false)
    }
}

impl<S: CredentialStore + ?Sized> CredentialStore for &S {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&self, key: &str) {
        (**self).save(key)
    }

    fn clear(&self) -> bool {
        (**self).clear()
    }
}

impl<S: CredentialStore + ?Sized> CredentialStore for Box<S> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&self, key: &str) {
        (**self).save(key)
    }

    fn clear(&self) -> bool {
        (**self).clear()
    }
}

/// Picks the key to use: an explicit flag wins, then the environment, then
/// whatever was stored by an earlier run. Blank values count as missing.
pub fn resolve_api_key(
    flag: Option<&str>,
    env: Option<&str>,
    store: &impl CredentialStore,
) -> Option<(String, ApiKeySource)> {
    if let Some(key) = flag.and_then(trim_line) {
        return Some((key, ApiKeySource::Flag));
    }
    if let Some(key) = env.and_then(trim_line) {
        return Some((key, ApiKeySource::Environment));
    }
    store
        .load()
        .as_deref()
        .and_then(trim_line)
        .map(|key| (key, ApiKeySource::Keyring))
}

pub fn prompt_for_api_key() -> Result<String> {
    let dim = "\x1b[2m";
    let reset = "\x1b[0m";
    let green = "\x1b[32m";

    println!(
        "{green}Enter your Gemini API key{reset} (https://aistudio.google.com/app/apikey). It's stored locally for future use."
    );
    println!("{dim}Input is hidden.{reset}");

    let mut input = read_password().context("Failed to read API key")?;
    // Keys end up in a URL query string
    input = strip_controls_and_escapes(&input);
    Ok(input.trim().to_string())
}
