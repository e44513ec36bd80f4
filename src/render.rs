use ratatui::text::{Line, Span};

use crate::card::Flashcard;
use crate::palette::Palette;
use crate::tui::theme::Theme;

pub const EMPTY_MESSAGE: &str = "Could not generate the flashcards.";

fn non_empty(cards: Option<&[Flashcard]>) -> Option<&[Flashcard]> {
    cards.filter(|cards| !cards.is_empty())
}

/// Plain terminal rendering, one numbered block per card.
pub fn render_text(cards: Option<&[Flashcard]>) -> String {
    let Some(cards) = non_empty(cards) else {
        return format!("{}\n", Palette::paint(Palette::WARNING, EMPTY_MESSAGE));
    };

    let mut out = String::new();
    for (idx, card) in cards.iter().enumerate() {
        out.push_str(&format!(
            "{} {}\n",
            Palette::dim(format!("{:>2}.", idx + 1)),
            Palette::bold(&card.front)
        ));
        for line in card.back.lines() {
            out.push_str(&format!("    {line}\n"));
        }
        out.push('\n');
    }
    out
}

/// Same content as [`render_text`], styled for the card panel.
pub fn render_lines(cards: Option<&[Flashcard]>) -> Vec<Line<'static>> {
    let Some(cards) = non_empty(cards) else {
        return vec![Line::styled(EMPTY_MESSAGE, Theme::danger())];
    };

    let mut lines = Vec::new();
    for (idx, card) in cards.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2}. ", idx + 1), Theme::muted()),
            Span::styled(card.front.clone(), Theme::emphasis()),
        ]));
        for line in card.back.lines() {
            lines.push(Line::from(Span::styled(format!("    {line}"), Theme::body())));
        }
        lines.push(Line::default());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Flashcard> {
        vec![
            Flashcard::new("What is chlorophyll?", "A green pigment..."),
            Flashcard::new("Where does it happen?", "In the chloroplast\nof plant cells"),
        ]
    }

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn empty_or_absent_shows_fallback() {
        assert!(render_text(None).contains(EMPTY_MESSAGE));
        assert!(render_text(Some(&[])).contains(EMPTY_MESSAGE));

        let lines = render_lines(Some(&[]));
        assert_eq!(lines.len(), 1);
        assert_eq!(plain(&lines[0]), EMPTY_MESSAGE);
    }

    #[test]
    fn text_keeps_order_and_front_above_back() {
        let cards = sample();
        let text = render_text(Some(&cards));
        let front = text.find("What is chlorophyll?").unwrap();
        let back = text.find("A green pigment...").unwrap();
        let second = text.find("Where does it happen?").unwrap();
        assert!(front < back && back < second);
        assert!(text.contains("    of plant cells\n"));
    }

    #[test]
    fn lines_have_one_block_per_card() {
        let cards = sample();
        let lines = render_lines(Some(&cards));
        let rendered: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(
            rendered,
            vec![
                " 1. What is chlorophyll?",
                "    A green pigment...",
                "",
                " 2. Where does it happen?",
                "    In the chloroplast",
                "    of plant cells",
                "",
            ]
        );
    }
}
