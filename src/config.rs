use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

use crate::llm::Provider;

/// Everything the front ends need besides the user's inputs.
#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: Provider,
    pub output_dir: PathBuf,
    pub use_keyring: bool,
}

impl Settings {
    pub fn new(
        base_url: Option<&str>,
        model: Option<&str>,
        output_dir: Option<PathBuf>,
        use_keyring: bool,
    ) -> Self {
        Self {
            provider: Provider::new(base_url, model),
            output_dir: output_dir.unwrap_or_else(|| PathBuf::from(".")),
            use_keyring,
        }
    }
}

pub fn data_dir() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "cardsmith")
        .ok_or_else(|| anyhow!("Could not determine project directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

pub fn log_file() -> Result<PathBuf> {
    Ok(data_dir()?.join("cardsmith.log"))
}
