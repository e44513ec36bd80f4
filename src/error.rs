use ratatui::prelude::{Color, Style};
use ratatui::{text::Line, widgets::Paragraph, widgets::Wrap};
use thiserror::Error;

use crate::tui::theme::Theme;

/// Rejected before any network traffic. Nothing changes state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a topic for the flashcards.")]
    MissingTopic,
    #[error("Please enter your API key.")]
    MissingApiKey,
    #[error("A generation is already running.")]
    Busy,
}

/// Any way a generation attempt can fail after it was started.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Build with [`GenerationError::network`]; the request URL holds the key.
    #[error("network error: {0}")]
    Network(reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
    #[error("no content returned from model")]
    MissingContent,
    #[error("invalid flashcard JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl GenerationError {
    pub fn network(err: reqwest::Error) -> Self {
        GenerationError::Network(err.without_url())
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No cards to export. Generate the flashcards first.")]
    NoCards,
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors surfaced by the controller to whichever front end drives it.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("{0} is only available after a successful generation.")]
    Unavailable(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Warnings are user mistakes; everything else is a failure.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            AppError::Input(_) | AppError::Export(ExportError::NoCards) | AppError::Unavailable(_)
        )
    }
}

/// Formats an error and its context into a vector of error message lines
pub fn format_error_lines(context: &str, error: &dyn std::fmt::Display) -> Vec<String> {
    let mut lines = vec![context.to_string()];
    lines.extend(error.to_string().lines().map(String::from));
    lines
}

/// Blocking notification box drawn on top of the interactive screen.
pub fn notification(title: &str, msgs: &[String], warning: bool) -> Paragraph<'static> {
    let bg = if warning { Color::Yellow } else { Color::Red };
    let lines = msgs
        .iter()
        .map(|msg| Line::styled(msg.clone(), Style::default().bg(bg).fg(Color::Black)))
        .chain(std::iter::once(Line::styled(
            "Press any key to continue.",
            Style::default(),
        )))
        .collect::<Vec<_>>();
    Paragraph::new(lines)
        .style(Theme::body())
        .wrap(Wrap { trim: false })
        .block(Theme::panel(title, false))
}
