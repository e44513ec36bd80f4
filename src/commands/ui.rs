use anyhow::Result;

use super::{credential_store, env_api_key, startup_controller};
use crate::config::Settings;
use crate::tui::app;

pub async fn run(settings: &Settings, api_key_flag: Option<&str>, topic: Option<String>) -> Result<()> {
    let store = credential_store(settings);
    let (mut controller, _) =
        startup_controller(settings, api_key_flag, env_api_key().as_deref(), store);
    if let Some(topic) = topic {
        controller.set_topic(topic);
    }

    app::run(controller, settings.output_dir.clone()).await
}
