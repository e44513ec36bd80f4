use anyhow::{Result, bail};

use super::{credential_store, env_api_key};
use crate::config::Settings;
use crate::llm::secrets::API_KEY_ENV;
use crate::llm::resolve_api_key;
use crate::palette::Palette;
use crate::utils::{strip_controls_and_escapes, trim_line};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Status,
    Set(String),
    Clear,
}

pub fn run(settings: &Settings, api_key_flag: Option<&str>, action: KeyAction) -> Result<()> {
    if !settings.use_keyring && action != KeyAction::Status {
        bail!("Key storage is disabled by --no-keyring");
    }
    let store = credential_store(settings);

    match action {
        KeyAction::Set(key) => {
            let Some(key) = trim_line(&strip_controls_and_escapes(&key)) else {
                bail!("Cannot store an empty API key");
            };
            store.save(&key);
            println!("{}", Palette::paint(Palette::SUCCESS, "API key stored in the local keyring."));
        }
        KeyAction::Clear => {
            if store.clear() {
                println!("Stored API key removed.");
            } else {
                println!("No stored API key to remove.");
            }
        }
        KeyAction::Status => {
            match resolve_api_key(api_key_flag, env_api_key().as_deref(), &store) {
                Some((_, source)) => println!("Using API key from the {}.", source.description()),
                None => println!(
                    "No API key configured. Set {} or run `cardsmith key --set <KEY>`.",
                    API_KEY_ENV
                ),
            }
        }
    }
    Ok(())
}
