//! Full-screen chat interface
//!
//! One logical thread of control: the event loop polls terminal input,
//! stages sends through the dispatcher, and drains resolved backend
//! exchanges from a channel in resolution order.

use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{
            self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
            KeyModifiers, MouseEventKind,
        },
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::{error::Error, io, time::Duration};
use tokio::sync::mpsc;

use crate::api::client::{BackendError, HttpBackend};
use crate::core::catalog::ProviderCatalog;
use crate::core::dispatcher::{ChatBackend, ChatOutcome, DispatchError, MessageDispatcher};
use crate::core::selection::SelectionController;
use crate::core::settings::Settings;
use crate::core::transcript::{Role, Transcript};
use crate::utils::logging::LoggingState;

struct ChatApp {
    transcript: Transcript,
    dispatcher: MessageDispatcher<HttpBackend>,
    catalog: ProviderCatalog,
    selection: SelectionController,
    logging: LoggingState,
    input: String,
    scroll_offset: u16,
    auto_scroll: bool,
}

impl ChatApp {
    fn build_display_lines(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::new();

        for msg in self.transcript.messages() {
            match msg.role {
                Role::User => {
                    lines.push(Line::from(vec![
                        Span::styled(
                            "You: ",
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(&msg.content, Style::default().fg(Color::Cyan)),
                    ]));
                    lines.push(Line::from(""));
                }
                Role::System => {
                    lines.push(Line::from(Span::styled(
                        &msg.content,
                        Style::default().fg(Color::DarkGray),
                    )));
                    lines.push(Line::from(""));
                }
                Role::Assistant => {
                    for content_line in msg.content.lines() {
                        if content_line.trim().is_empty() {
                            lines.push(Line::from(""));
                        } else {
                            lines.push(Line::from(Span::styled(
                                content_line,
                                Style::default().fg(Color::White),
                            )));
                        }
                    }
                    lines.push(Line::from(""));
                }
            }
        }

        lines
    }

    fn calculate_max_scroll_offset(&self, available_height: u16) -> u16 {
        let total_lines = self.build_display_lines().len() as u16;
        total_lines.saturating_sub(available_height)
    }

    fn scroll_to_bottom(&mut self, available_height: u16) {
        if self.auto_scroll {
            self.scroll_offset = self.calculate_max_scroll_offset(available_height);
        }
    }

    fn chat_title(&self) -> String {
        match (self.selection.provider(), self.selection.model()) {
            (Some(provider), Some(model)) => {
                let display_name = self
                    .catalog
                    .get(provider)
                    .map(|p| p.display_name.as_str())
                    .unwrap_or(provider);
                format!("Chat - causette ({display_name} / {model})")
            }
            _ => "Chat - causette (not configured - run 'causette setup')".to_string(),
        }
    }

    fn input_title(&self) -> &'static str {
        if self.dispatcher.is_busy() {
            "Waiting for reply... (Ctrl+C to quit)"
        } else {
            "Type your message (Press Enter to send, Ctrl+C to quit)"
        }
    }

    fn log_last_turn(&self) {
        if let Some(msg) = self.transcript.last() {
            if let Err(e) = self.logging.log_turn(msg) {
                tracing::warn!("failed to write chat log: {e}");
            }
        }
    }
}

fn ui(f: &mut Frame, app: &ChatApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let lines = app.build_display_lines();

    let available_height = chunks[0].height.saturating_sub(1);
    let total_lines = lines.len() as u16;
    let max_offset = total_lines.saturating_sub(available_height);
    let scroll_offset = app.scroll_offset.min(max_offset);

    let messages_paragraph = Paragraph::new(lines)
        .block(Block::default().title(app.chat_title()))
        .wrap(Wrap { trim: true })
        .scroll((scroll_offset, 0));

    f.render_widget(messages_paragraph, chunks[0]);

    let input_style = if app.dispatcher.is_busy() {
        Style::default()
    } else {
        Style::default().fg(Color::Yellow)
    };

    let input = Paragraph::new(app.input.as_str())
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.input_title()),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(input, chunks[1]);

    f.set_cursor_position((chunks[1].x + app.input.len() as u16 + 1, chunks[1].y + 1));
}

fn available_chat_height(terminal_height: u16) -> u16 {
    // 3 rows for the input area, 1 for the title line.
    terminal_height.saturating_sub(3).saturating_sub(1)
}

pub async fn run_chat(base_url: String, log_file: Option<String>) -> Result<(), Box<dyn Error>> {
    let client = reqwest::Client::new();

    // The catalog is fetched exactly once per session. A failed fetch has
    // already been logged and leaves it empty; chat stays driven by the
    // persisted settings either way.
    let catalog = ProviderCatalog::load(&client, &base_url).await;

    let settings = Settings::load();
    let mut selection = SelectionController::new();
    if !settings.provider.is_empty() {
        if let Err(e) = selection.restore(&catalog, &settings) {
            tracing::warn!("saved selection no longer matches the catalog: {e}");
        }
    }

    let logging = LoggingState::new(log_file)?;

    let mut app = ChatApp {
        transcript: Transcript::new(),
        dispatcher: MessageDispatcher::new(HttpBackend::new(client, base_url)),
        catalog,
        selection,
        logging,
        input: String::new(),
        scroll_offset: 0,
        auto_scroll: true,
    };

    // Set up the terminal only after the session pieces are in place so
    // startup failures print cleanly.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<Result<ChatOutcome, BackendError>>();

    let result = loop {
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break Ok(());
                    }
                    KeyCode::Enter => {
                        let text = app.input.clone();
                        // Persisted settings are read at the moment of
                        // sending, never from an unsaved edit.
                        let settings = Settings::load();
                        match app.dispatcher.begin(&text, &settings, &mut app.transcript) {
                            Ok(request) => {
                                app.input.clear();
                                app.log_last_turn();
                                let backend = app.dispatcher.backend().clone();
                                let tx = tx.clone();
                                tokio::spawn(async move {
                                    let _ = tx.send(backend.chat(&request).await);
                                });
                                let height = available_chat_height(terminal.size()?.height);
                                app.scroll_to_bottom(height);
                            }
                            Err(DispatchError::NotConfigured) => {
                                app.log_last_turn();
                                let height = available_chat_height(terminal.size()?.height);
                                app.scroll_to_bottom(height);
                            }
                            // Blank input is ignored; a busy dispatcher
                            // keeps the typed text for after the reply.
                            Err(DispatchError::EmptyMessage) | Err(DispatchError::Busy) => {}
                        }
                    }
                    KeyCode::Char(c) => {
                        app.input.push(c);
                    }
                    KeyCode::Backspace => {
                        app.input.pop();
                    }
                    KeyCode::Up => {
                        app.scroll_offset = app.scroll_offset.saturating_sub(1);
                        app.auto_scroll = false;
                        if app.scroll_offset == 0 {
                            app.auto_scroll = true;
                        }
                    }
                    KeyCode::Down => {
                        let height = available_chat_height(terminal.size()?.height);
                        let max_scroll = app.calculate_max_scroll_offset(height);
                        app.scroll_offset = app.scroll_offset.saturating_add(1).min(max_scroll);
                        if app.scroll_offset >= max_scroll {
                            app.auto_scroll = true;
                        }
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        app.scroll_offset = app.scroll_offset.saturating_sub(3);
                        app.auto_scroll = false;
                    }
                    MouseEventKind::ScrollDown => {
                        let height = available_chat_height(terminal.size()?.height);
                        let max_scroll = app.calculate_max_scroll_offset(height);
                        app.scroll_offset = app.scroll_offset.saturating_add(3).min(max_scroll);
                        if app.scroll_offset >= max_scroll {
                            app.auto_scroll = true;
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        // Resolved exchanges land here in resolution order.
        let mut received_any = false;
        while let Ok(outcome) = rx.try_recv() {
            app.dispatcher.finish(outcome, &mut app.transcript);
            app.log_last_turn();
            received_any = true;
        }
        if received_any {
            let height = available_chat_height(terminal.size()?.height);
            app.scroll_to_bottom(height);
        }
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
