use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand, ValueHint};

use cardsmith::commands::generate::AfterGenerate;
use cardsmith::commands::key::KeyAction;
use cardsmith::commands::{generate, key, ui};
use cardsmith::config::{Settings, log_file};
use cardsmith::logging;

#[derive(Parser, Debug)]
#[command(
    name = "cardsmith",
    version,
    about = "Generate study flashcards with an LLM and export them for Anki.",
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
struct Cli {
    /// Gemini API key. Takes precedence over CARDSMITH_API_KEY and the stored key.
    #[arg(long, global = true)]
    api_key: Option<String>,
    /// Model used for generation
    #[arg(long, global = true, env = "CARDSMITH_MODEL")]
    model: Option<String>,
    /// Base URL of the generative-language API
    #[arg(long, global = true, env = "CARDSMITH_BASE_URL", value_hint = ValueHint::Url)]
    base_url: Option<String>,
    /// Directory for exported and printable files
    #[arg(
        long,
        global = true,
        env = "CARDSMITH_OUT_DIR",
        value_name = "DIR",
        value_hint = ValueHint::DirPath
    )]
    out_dir: Option<PathBuf>,
    /// Keep the API key in memory only
    #[arg(long, global = true)]
    no_keyring: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive flashcard generator
    Ui {
        /// Topic to prefill
        topic: Option<String>,
    },
    /// Generate flashcards for a topic and print them
    Generate {
        /// Subject of the flashcards
        #[arg(value_name = "TOPIC")]
        topic: String,
        /// Write an Anki-importable CSV afterwards
        #[arg(long)]
        export: bool,
        /// Open a printable page afterwards
        #[arg(long)]
        print: bool,
    },
    /// Manage the stored API key
    #[command(group(ArgGroup::new("key_action").args(["set", "clear"])))]
    Key {
        /// Store a new key
        #[arg(long, value_name = "KEY")]
        set: Option<String>,
        /// Remove the stored key
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(error) = run_cli().await {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::new(
        cli.base_url.as_deref(),
        cli.model.as_deref(),
        cli.out_dir,
        !cli.no_keyring,
    );
    let api_key = cli.api_key.as_deref();

    match cli.command {
        Command::Ui { topic } => {
            logging::init_file(&log_file()?)?;
            ui::run(&settings, api_key, topic).await?;
        }
        Command::Generate {
            topic,
            export,
            print,
        } => {
            logging::init_stderr()?;
            generate::run(&settings, api_key, &topic, AfterGenerate { export, print }).await?;
        }
        Command::Key { set, clear } => {
            logging::init_stderr()?;
            let action = match (set, clear) {
                (Some(value), _) => KeyAction::Set(value),
                (None, true) => KeyAction::Clear,
                (None, false) => KeyAction::Status,
            };
            key::run(&settings, api_key, action)?;
        }
    }

    Ok(())
}
