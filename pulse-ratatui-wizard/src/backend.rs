//! Full-screen ratatui backend implementing [`SurveyBackend`].

use std::{
    cell::RefCell,
    io::{self, Stdout},
    rc::Rc,
    sync::Arc,
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pulse_survey::{Catalog, ResponseCollection, SurveyBackend, SurveyError, SurveyFlow};
use ratatui::{
    Frame, Terminal,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Style, Stylize},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use thiserror::Error;
use tracing::info;

use crate::{Theme, WizardAction, WizardView};

/// Shown once the last answer is submitted.
pub const THANK_YOU: &str = "Thank you for your feedback!";

/// Error type for the Ratatui backend.
#[derive(Debug, Error)]
pub enum RatatuiError {
    /// User closed the survey (pressed Esc).
    #[error("Survey cancelled by user")]
    Cancelled,

    /// An I/O error occurred while drawing or reading keys.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RatatuiError> for SurveyError {
    fn from(err: RatatuiError) -> Self {
        match err {
            RatatuiError::Cancelled => SurveyError::Cancelled,
            other => SurveyError::backend(other),
        }
    }
}

/// Terminal type used by the backend and the dashboard.
pub type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Enter raw mode and the alternate screen.
pub fn setup_terminal() -> Result<CrosstermTerminal, RatatuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Undo [`setup_terminal`].
pub fn restore_terminal(terminal: &mut CrosstermTerminal) -> Result<(), RatatuiError> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Ratatui-based TUI backend.
///
/// Presents the catalog one question at a time through a [`WizardView`],
/// then shows a thank-you screen until Enter or Esc is pressed.
#[derive(Debug, Clone)]
pub struct RatatuiBackend {
    /// Title shown on the outer border.
    title: String,
    /// Color theme for the UI.
    theme: Theme,
}

impl Default for RatatuiBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RatatuiBackend {
    /// Create a new Ratatui backend with default settings.
    pub fn new() -> Self {
        Self {
            title: "Pulse Survey".to_string(),
            theme: Theme::default(),
        }
    }

    /// Set the title shown on the outer border.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    fn draw(&self, frame: &mut Frame, view: &WizardView) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(self.theme.primary).bold());
        let area = frame.area();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if view.flow().is_done() {
            draw_completion(frame, inner, &self.theme);
        } else {
            view.render(frame, inner, &self.theme);
        }
    }

    fn run(
        &self,
        terminal: &mut CrosstermTerminal,
        view: &mut WizardView,
    ) -> Result<bool, RatatuiError> {
        loop {
            terminal.draw(|frame| self.draw(frame, view))?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if view.flow().is_done() {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    return Ok(true);
                }
                continue;
            }
            if view.handle_key(key.code) == WizardAction::CloseRequested {
                return Ok(false);
            }
        }
    }
}

fn draw_completion(frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.success))
        .title(" Complete ")
        .title_style(Style::default().fg(theme.success).bold());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = Paragraph::new(format!("{THANK_YOU}\n\nPress Enter to finish."))
        .style(Style::default().fg(theme.text))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    let centered = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Min(3),
            Constraint::Percentage(40),
        ])
        .split(inner);

    frame.render_widget(paragraph, centered[1]);
}

impl SurveyBackend for RatatuiBackend {
    type Error = RatatuiError;

    fn collect(&self, catalog: Arc<Catalog>) -> Result<ResponseCollection, Self::Error> {
        let result: Rc<RefCell<Option<ResponseCollection>>> = Rc::default();
        let sink = Rc::clone(&result);
        let flow = SurveyFlow::new(catalog, move |responses| {
            *sink.borrow_mut() = Some(responses);
        })
        .on_close(|| info!("survey closed from the terminal wizard"));
        let mut view = WizardView::new(flow);

        let mut terminal = setup_terminal()?;
        let outcome = self.run(&mut terminal, &mut view);
        let restored = restore_terminal(&mut terminal);

        let collected = result.borrow_mut().take();
        settle(view, outcome, restored, collected)
    }
}

/// Close the view unless it completed, then report the run outcome before
/// any restore failure.
fn settle(
    view: WizardView,
    outcome: Result<bool, RatatuiError>,
    restored: Result<(), RatatuiError>,
    collected: Option<ResponseCollection>,
) -> Result<ResponseCollection, RatatuiError> {
    view.close();
    let finished = outcome?;
    restored?;
    if !finished {
        return Err(RatatuiError::Cancelled);
    }
    collected.ok_or(RatatuiError::Cancelled)
}
