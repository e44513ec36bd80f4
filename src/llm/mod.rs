pub mod client;
pub mod prompt;
pub mod provider;
pub mod response;
pub mod secrets;

pub use client::{CardGenerator, GeminiClient};
pub use provider::Provider;
pub use secrets::{ApiKeySource, CredentialStore, KeyringStore, MemoryStore, resolve_api_key};
