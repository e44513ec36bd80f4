use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use html_escape::encode_text;

use crate::card::Flashcard;
use crate::export::slug;

const PRINT_STYLE: &str = r#"
body { font-family: sans-serif; margin: 2em; }
h1 { font-size: 1.4em; }
.flashcard { border: 1px solid #888; border-radius: 6px; margin: 0 0 1em; padding: 1em; break-inside: avoid; page-break-inside: avoid; }
.front { font-weight: bold; border-bottom: 1px dashed #bbb; padding-bottom: .5em; margin-bottom: .5em; }
.back { white-space: pre-wrap; }
footer { color: #666; font-size: .8em; }
@media print { footer { display: none; } }
"#;

pub fn print_file_name(topic: &str) -> String {
    format!("flashcards_{}.html", slug(topic))
}

/// Standalone page with one block per card, ready for the browser's print dialog.
pub fn printable_html(topic: &str, cards: &[Flashcard]) -> String {
    let title = encode_text(topic.trim());
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Flashcards: {title}</title>\n<style>{PRINT_STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n"
    );
    for card in cards {
        html.push_str(&format!(
            "<div class=\"flashcard\">\n  <div class=\"front\">{}</div>\n  <div class=\"back\">{}</div>\n</div>\n",
            encode_text(&card.front),
            encode_text(&card.back)
        ));
    }
    html.push_str(&format!(
        "<footer>Generated {}</footer>\n</body>\n</html>\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    ));
    html
}

pub fn write_printable(topic: &str, cards: &[Flashcard], dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(print_file_name(topic));
    fs::write(&path, printable_html(topic, cards))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Writes the printable page and hands it to the system viewer.
pub fn print_cards(topic: &str, cards: &[Flashcard], dir: &Path) -> Result<PathBuf> {
    let path = write_printable(topic, cards, dir)?;
    open::that(&path).with_context(|| format!("failed to open {}", path.display()))?;
    tracing::info!(path = %path.display(), "opened printable flashcards");
    Ok(path)
}
