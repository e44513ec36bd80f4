use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

/// Styles shared by the generator screen, the card panel and notices.
pub struct Theme;

impl Theme {
    const ACCENT: Color = Color::Blue;
    const BORDER: Color = Color::Gray;
    const FOCUS: Color = Color::Cyan;
    const WARNING: Color = Color::Yellow;
    const SUCCESS: Color = Color::Green;
    const MUTED: Color = Color::DarkGray;

    pub fn body() -> Style {
        Style::default()
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn emphasis() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn label() -> Style {
        Self::emphasis().fg(Self::ACCENT)
    }

    pub fn success() -> Style {
        Self::emphasis().fg(Self::SUCCESS)
    }

    pub fn danger() -> Style {
        Self::emphasis().fg(Self::WARNING)
    }

    /// Rounded box with a bold title; the border is highlighted when focused.
    pub fn panel<'a>(title: impl Into<String>, focused: bool) -> Block<'a> {
        let border = if focused { Self::FOCUS } else { Self::BORDER };
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(Span::styled(format!(" {} ", title.into()), Self::label()))
    }

    /// `[key] action` pair for the controls footer.
    pub fn key_hint(key: &str, action: &str) -> [Span<'static>; 2] {
        [
            Span::styled(
                format!(" {key} "),
                Self::emphasis().fg(Color::White).bg(Self::ACCENT),
            ),
            Span::styled(format!(" {action}"), Self::muted()),
        ]
    }

    pub fn separator() -> Span<'static> {
        Span::styled(" • ", Self::muted())
    }
}
