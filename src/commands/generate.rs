use anyhow::{Result, anyhow};

use super::{credential_store, env_api_key, startup_controller};
use crate::config::Settings;
use crate::controller::Controller;
use crate::error::AppError;
use crate::llm::secrets::prompt_for_api_key;
use crate::llm::{CardGenerator, CredentialStore};
use crate::palette::Palette;
use crate::render::render_text;

#[derive(Debug, Clone, Copy, Default)]
pub struct AfterGenerate {
    pub export: bool,
    pub print: bool,
}

pub async fn run(
    settings: &Settings,
    api_key_flag: Option<&str>,
    topic: &str,
    after: AfterGenerate,
) -> Result<()> {
    let store = credential_store(settings);
    let (mut controller, source) =
        startup_controller(settings, api_key_flag, env_api_key().as_deref(), store);
    if source.is_none() {
        controller.set_api_key(prompt_for_api_key()?);
    }
    controller.set_topic(topic);

    let rendered = generate_and_render(&mut controller).await?;
    print!("{rendered}");

    if after.export {
        report(controller.export(&settings.output_dir), "Exported")?;
    }
    if after.print {
        report(controller.print(&settings.output_dir), "Opened for printing")?;
    }
    Ok(())
}

/// One generation cycle, rendered for the terminal.
pub async fn generate_and_render<G, S>(controller: &mut Controller<G, S>) -> Result<String>
where
    G: CardGenerator,
    S: CredentialStore,
{
    println!(
        "{} generating flashcards about {}...",
        Palette::paint(Palette::INFO, "cardsmith"),
        Palette::bold(controller.topic().trim())
    );
    match controller.generate().await {
        Ok(cards) => Ok(render_text(Some(cards))),
        Err(AppError::Input(err)) => Err(anyhow!(err)),
        Err(err) => Err(anyhow::Error::new(err)
            .context("An error occurred. Check your API key and your connection.")),
    }
}

fn report(result: Result<std::path::PathBuf, AppError>, done: &str) -> Result<()> {
    match result {
        Ok(path) => {
            println!("{} {}", Palette::paint(Palette::SUCCESS, done), path.display());
            Ok(())
        }
        Err(err) if err.is_warning() => {
            eprintln!("{} {err}", Palette::paint(Palette::WARNING, "warning:"));
            Ok(())
        }
        Err(err) => Err(anyhow!(err)),
    }
}
