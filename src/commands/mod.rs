pub mod generate;
pub mod key;
pub mod ui;

use crate::config::Settings;
use crate::controller::Controller;
use crate::llm::{
    ApiKeySource, CredentialStore, GeminiClient, KeyringStore, MemoryStore, resolve_api_key,
};

pub fn credential_store(settings: &Settings) -> Box<dyn CredentialStore> {
    if settings.use_keyring {
        Box::new(KeyringStore)
    } else {
        Box::new(MemoryStore::default())
    }
}

pub fn env_api_key() -> Option<String> {
    std::env::var(crate::llm::secrets::API_KEY_ENV).ok()
}

/// Resolves the startup key a single time and seeds the controller with it.
pub fn startup_controller<S: CredentialStore>(
    settings: &Settings,
    api_key_flag: Option<&str>,
    env_key: Option<&str>,
    store: S,
) -> (Controller<GeminiClient, S>, Option<ApiKeySource>) {
    let resolved = resolve_api_key(api_key_flag, env_key, &store);
    let (api_key, source) = match resolved {
        Some((key, source)) => {
            tracing::debug!(source = source.description(), "using configured API key");
            (key, Some(source))
        }
        None => (String::new(), None),
    };
    let client = GeminiClient::new(settings.provider.clone());
    (Controller::with_api_key(client, store, api_key), source)
}
