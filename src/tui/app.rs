use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};
use tokio::task::JoinHandle;

use super::input::InputField;
use super::theme::Theme;
use crate::card::Flashcard;
use crate::controller::{Controller, Phase};
use crate::error::{AppError, GenerationError, format_error_lines, notification};
use crate::llm::{CardGenerator, CredentialStore};
use crate::render::render_lines;

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];
const FLASH_SECS: f64 = 3.0;

type PendingGeneration = JoinHandle<Result<Vec<Flashcard>, GenerationError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Topic,
    ApiKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    Quit,
    Generate,
    Export,
    Print,
}

struct Notice {
    title: &'static str,
    lines: Vec<String>,
    warning: bool,
}

struct App<G, S> {
    controller: Controller<G, S>,
    topic: InputField,
    api_key: InputField,
    focus: Focus,
    notice: Option<Notice>,
    flash: Option<(String, Instant)>,
    scroll: u16,
    out_dir: PathBuf,
    started_at: Instant,
}

impl<G, S> App<G, S>
where
    G: CardGenerator + Clone + Send + Sync + 'static,
    S: CredentialStore,
{
    fn new(controller: Controller<G, S>, out_dir: PathBuf) -> Self {
        let topic = InputField::new(controller.topic());
        let api_key = InputField::new(controller.api_key()).masked();
        Self {
            controller,
            topic,
            api_key,
            focus: Focus::Topic,
            notice: None,
            flash: None,
            scroll: 0,
            out_dir,
            started_at: Instant::now(),
        }
    }

    fn focused_field(&mut self) -> &mut InputField {
        match self.focus {
            Focus::Topic => &mut self.topic,
            Focus::ApiKey => &mut self.api_key,
        }
    }

    fn show_error(&mut self, context: &str, err: &AppError) {
        self.notice = Some(Notice {
            title: if err.is_warning() { "Warning" } else { "Error" },
            lines: format_error_lines(context, err),
            warning: err.is_warning(),
        });
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.notice.take().is_some() {
            return Action::None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if ctrl => Action::Quit,
            KeyCode::Char('e') if ctrl => Action::Export,
            KeyCode::Char('p') if ctrl => Action::Print,
            KeyCode::Enter => Action::Generate,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    Focus::Topic => Focus::ApiKey,
                    Focus::ApiKey => Focus::Topic,
                };
                Action::None
            }
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(5);
                Action::None
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(5);
                Action::None
            }
            KeyCode::Char(c) if !ctrl => {
                self.focused_field().insert_char(c);
                Action::None
            }
            KeyCode::Backspace => {
                self.focused_field().backspace();
                Action::None
            }
            KeyCode::Delete => {
                self.focused_field().delete();
                Action::None
            }
            KeyCode::Left => {
                self.focused_field().move_left();
                Action::None
            }
            KeyCode::Right => {
                self.focused_field().move_right();
                Action::None
            }
            KeyCode::Home => {
                self.focused_field().move_home();
                Action::None
            }
            KeyCode::End => {
                self.focused_field().move_end();
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Starts a generation on a background task so frames keep drawing.
    fn start_generation(&mut self) -> Option<PendingGeneration> {
        if !self.controller.controls().generate_enabled {
            return None;
        }
        self.controller.set_topic(self.topic.value());
        self.controller.set_api_key(self.api_key.value());
        match self.controller.begin_generation() {
            Ok(request) => {
                self.scroll = 0;
                let generator = self.controller.generator().clone();
                Some(tokio::spawn(async move {
                    generator.generate(&request.topic, &request.api_key).await
                }))
            }
            Err(err) => {
                self.show_error("Cannot generate flashcards", &AppError::from(err));
                None
            }
        }
    }

    fn complete_generation(&mut self, result: Result<Vec<Flashcard>, GenerationError>) {
        if let Err(err) = self.controller.finish_generation(result) {
            self.show_error(
                "An error occurred. Check your API key and your connection.",
                &AppError::from(err),
            );
        }
    }

    fn run_action(&mut self, done: &str, failed: &str, result: Result<PathBuf, AppError>) {
        match result {
            Ok(path) => {
                self.flash = Some((format!("{done}: {}", path.display()), Instant::now()));
            }
            Err(err) => self.show_error(failed, &err),
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(area);

        let fields = [
            (Focus::Topic, "Topic", &self.topic, chunks[0]),
            (Focus::ApiKey, "Gemini API key", &self.api_key, chunks[1]),
        ];
        for (focus, title, field, rect) in fields {
            let widget = Paragraph::new(field.display())
                .block(Theme::panel(title, self.focus == focus));
            frame.render_widget(widget, rect);
            if self.focus == focus && self.notice.is_none() {
                let x = rect.x + 1 + (field.cursor() as u16).min(rect.width.saturating_sub(2));
                frame.set_cursor_position((x, rect.y + 1));
            }
        }

        frame.render_widget(Paragraph::new(self.status_line()), chunks[2]);

        let cards = match self.controller.phase() {
            Phase::Success => render_lines(Some(self.controller.cards())),
            _ => Vec::new(),
        };
        let count = self.controller.cards().len();
        let panel = Paragraph::new(cards)
            .style(Theme::body())
            .block(Theme::panel(format!("Flashcards ({count})"), false))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(panel, chunks[3]);

        let footer = Paragraph::new(self.instructions())
            .block(Theme::panel("Controls", false));
        frame.render_widget(footer, chunks[4]);

        if let Some(notice) = &self.notice {
            let rect = centered(area, 70, (notice.lines.len() as u16) + 3);
            frame.render_widget(Clear, rect);
            frame.render_widget(notification(notice.title, &notice.lines, notice.warning), rect);
        }
    }

    fn status_line(&self) -> Line<'static> {
        if self.controller.controls().loading {
            let tick = (self.started_at.elapsed().as_millis() / 100) as usize % SPINNER.len();
            return Line::from(vec![
                Span::styled(format!(" {} ", SPINNER[tick]), Theme::label()),
                Span::styled("Generating flashcards...", Theme::muted()),
            ]);
        }
        if let Some((message, at)) = &self.flash
            && at.elapsed().as_secs_f64() < FLASH_SECS
        {
            return Line::from(Span::styled(format!(" {message}"), Theme::success()));
        }
        Line::default()
    }

    fn instructions(&self) -> Line<'static> {
        let controls = self.controller.controls();
        let mut hints = Vec::new();
        if controls.generate_enabled {
            hints.push(("Enter", "generate"));
        }
        hints.push(("Tab", "switch field"));
        if controls.actions_visible {
            hints.extend([("Ctrl+E", "export"), ("Ctrl+P", "print")]);
        }
        hints.push(("Esc", "exit"));

        let mut spans = Vec::new();
        for (idx, (key, action)) in hints.into_iter().enumerate() {
            if idx > 0 {
                spans.push(Theme::separator());
            }
            spans.extend(Theme::key_hint(key, action));
        }
        Line::from(spans)
    }
}

fn centered(area: Rect, width_pct: u16, height: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_pct.min(100)) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub async fn run<G, S>(controller: Controller<G, S>, out_dir: PathBuf) -> Result<()>
where
    G: CardGenerator + Clone + Send + Sync + 'static,
    S: CredentialStore,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        )
    )
    .context("failed to configure terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to start terminal")?;

    let mut app = App::new(controller, out_dir);
    let mut pending: Option<PendingGeneration> = None;

    let loop_result: Result<()> = async {
        loop {
            if pending.as_ref().is_some_and(|handle| handle.is_finished())
                && let Some(handle) = pending.take()
            {
                let result = handle.await.context("generation task failed")?;
                app.complete_generation(result);
            }

            terminal
                .draw(|frame| app.draw(frame))
                .context("failed to render frame")?;

            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
            {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.handle_key(key) {
                    Action::Quit => break Ok(()),
                    Action::Generate => {
                        if let Some(handle) = app.start_generation() {
                            pending = Some(handle);
                        }
                    }
                    Action::Export => {
                        let result = app.controller.export(&app.out_dir);
                        app.run_action("Exported", "Export failed", result);
                    }
                    Action::Print => {
                        let result = app.controller.print(&app.out_dir);
                        app.run_action("Opened for printing", "Print failed", result);
                    }
                    Action::None => {}
                }
            }
        }
    }
    .await;

    if let Some(handle) = pending {
        handle.abort();
    }
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        PopKeyboardEnhancementFlags,
        LeaveAlternateScreen
    )
    .context("failed to restore terminal")?;
    terminal.show_cursor().context("failed to show cursor")?;

    loop_result
}
