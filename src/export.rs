use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::card::Flashcard;
use crate::error::ExportError;

const BOM: &str = "\u{feff}";
const SEPARATOR: char = ';';
const FALLBACK_SLUG: &str = "export";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Anki-importable payload: BOM, then `"front";"back"` per line.
pub fn encode_csv(cards: &[Flashcard]) -> Vec<u8> {
    let rows = cards
        .iter()
        .map(|card| {
            format!(
                "{}{SEPARATOR}{}",
                quote_field(&card.front),
                quote_field(&card.back)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut payload = String::with_capacity(BOM.len() + rows.len());
    payload.push_str(BOM);
    payload.push_str(&rows);
    payload.into_bytes()
}

/// File-name-safe form of a topic: whitespace runs and characters that are
/// not allowed in file names become `_`.
pub fn slug(topic: &str) -> String {
    let slug = WHITESPACE_RE
        .replace_all(topic.trim(), "_")
        .to_lowercase()
        .chars()
        .map(|c| if is_reserved(c) { '_' } else { c })
        .collect::<String>();
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

fn is_reserved(c: char) -> bool {
    c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}

pub fn export_file_name(topic: &str) -> String {
    format!("flashcards_{}.csv", slug(topic))
}

/// Writes the CSV into `dir`, replacing any earlier export for the same topic.
pub fn export_cards(cards: &[Flashcard], topic: &str, dir: &Path) -> Result<PathBuf, ExportError> {
    if cards.is_empty() {
        return Err(ExportError::NoCards);
    }

    let path = dir.join(export_file_name(topic));
    let io_error = |source: std::io::Error| ExportError::Io {
        path: path.display().to_string(),
        source,
    };
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir).map_err(io_error)?;
    }
    fs::write(&path, encode_csv(cards)).map_err(io_error)?;

    tracing::info!(path = %path.display(), count = cards.len(), "exported flashcards");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Splits one exported line back into its two fields.
    fn decode_line(line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut chars = line.chars().peekable();
        let mut in_quotes = false;
        while let Some(ch) = chars.next() {
            match ch {
                '"' if in_quotes && chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = !in_quotes,
                ';' if !in_quotes => fields.push(std::mem::take(&mut current)),
                _ => current.push(ch),
            }
        }
        fields.push(current);
        fields
    }

    #[test]
    fn single_card_matches_anki_format() {
        let cards = vec![Flashcard::new("What is chlorophyll?", "A green pigment...")];
        let payload = encode_csv(&cards);

        assert_eq!(&payload[..3], &[0xEF, 0xBB, 0xBF]);
        assert_eq!(
            String::from_utf8(payload[3..].to_vec()).unwrap(),
            "\"What is chlorophyll?\";\"A green pigment...\""
        );
    }

    #[test]
    fn lines_are_joined_without_trailing_newline() {
        let cards = vec![Flashcard::new("a", "b"), Flashcard::new("c", "d")];
        let text = String::from_utf8(encode_csv(&cards)).unwrap();
        assert_eq!(text, "\u{feff}\"a\";\"b\"\n\"c\";\"d\"");
    }

    #[test]
    fn quotes_round_trip() {
        let card = Flashcard::new("Say \"hi\"; then leave", "\"\"");
        let text = String::from_utf8(encode_csv(std::slice::from_ref(&card))).unwrap();
        let line = text.trim_start_matches('\u{feff}');

        assert_eq!(line, "\"Say \"\"hi\"\"; then leave\";\"\"\"\"\"\"");
        assert_eq!(decode_line(line), vec![card.front, card.back]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let cards = vec![Flashcard::new("x", "y\nz")];
        assert_eq!(encode_csv(&cards), encode_csv(&cards));
    }

    #[test]
    fn slug_rules() {
        assert_eq!(slug("  Linear Algebra  "), "linear_algebra");
        assert_eq!(slug("Cell\t\tBiology  101"), "cell_biology_101");
        assert_eq!(slug(""), "export");
        assert_eq!(slug("   "), "export");
        assert_eq!(slug("TCP/IP"), "tcp_ip");
        assert_eq!(slug("a/../../x"), "a_.._.._x");
        assert_eq!(slug(r#"C:\Files "Q&A"?"#), "c__files__q&a__");
        assert_eq!(export_file_name("Photosynthesis"), "flashcards_photosynthesis.csv");
    }

    #[test]
    fn export_writes_file_named_after_topic() {
        let dir = TempDir::new().unwrap();
        let cards = vec![Flashcard::new("Q", "A")];

        let path = export_cards(&cards, "  Linear Algebra  ", dir.path()).unwrap();
        assert_eq!(path, dir.path().join("flashcards_linear_algebra.csv"));
        assert_eq!(fs::read(&path).unwrap(), encode_csv(&cards));

        // exporting again overwrites with identical bytes
        let again = export_cards(&cards, "  Linear Algebra  ", dir.path()).unwrap();
        assert_eq!(fs::read(again).unwrap(), encode_csv(&cards));
    }

    #[test]
    fn topic_with_path_separators_stays_in_dir() {
        let dir = TempDir::new().unwrap();
        let cards = vec![Flashcard::new("q", "a")];

        let path = export_cards(&cards, "TCP/IP", dir.path()).unwrap();
        assert_eq!(path, dir.path().join("flashcards_tcp_ip.csv"));
        assert!(path.is_file());

        let escaped = export_cards(&cards, "a/../../x", dir.path()).unwrap();
        assert_eq!(escaped.parent(), Some(dir.path()));
    }

    #[test]
    fn export_refuses_empty_sequence() {
        let dir = TempDir::new().unwrap();
        let err = export_cards(&[], "topic", dir.path()).unwrap_err();
        assert!(matches!(err, ExportError::NoCards));
        assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
