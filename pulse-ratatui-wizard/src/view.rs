//! Survey wizard view: key handling and drawing for one flow.

use crossterm::event::KeyCode;
use pulse_survey::{
    DraftAnswer, MAX_RATING, MIN_RATING, MultiSelectQuestion, QuestionKind, QuestionSpec,
    RatingQuestion, SurveyFlow, TextQuestion, Transition, rating_label,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::debug;

use crate::Theme;

/// Shown when Next is pressed on a rating question that has no answer yet.
pub const RATING_HINT: &str = "Please move the scaler to select an input";

const HEADER: &str = "Help us improve your experience!";

/// Which input of the current question receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The rating slider (Left/Right, 1-5).
    Scale,
    /// The optional rating comment.
    Comment,
    /// A multi-select row; rows past the last option are the custom input.
    Row(usize),
    /// The free-text answer.
    Answer,
}

/// What the host should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    /// Nothing changed outside the view.
    None,
    /// Moved to another question.
    Moved,
    /// The last answer was submitted; the completion callback has run.
    Completed,
    /// The user asked to close the survey.
    CloseRequested,
}

/// UI state for one survey flow.
///
/// Everything transient (focus, cursor, hint) lives here; the flow only ever
/// sees drafts and navigation requests.
#[derive(Debug)]
pub struct WizardView {
    flow: SurveyFlow,
    focus: Focus,
    hint: Option<&'static str>,
}

impl WizardView {
    pub fn new(flow: SurveyFlow) -> Self {
        let mut view = Self {
            flow,
            focus: Focus::Scale,
            hint: None,
        };
        view.reset_focus();
        view
    }

    pub fn flow(&self) -> &SurveyFlow {
        &self.flow
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn hint(&self) -> Option<&'static str> {
        self.hint
    }

    /// Close the survey, signalling the flow's close callback.
    pub fn close(self) {
        self.flow.close();
    }

    fn reset_focus(&mut self) {
        self.hint = None;
        self.focus = match self.flow.current_question().map(QuestionSpec::kind) {
            Some(QuestionKind::MultiSelect(_)) => Focus::Row(0),
            Some(QuestionKind::Text(_)) => Focus::Answer,
            _ => Focus::Scale,
        };
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyCode) -> WizardAction {
        if self.flow.is_done() {
            return WizardAction::None;
        }
        match key {
            KeyCode::Esc => WizardAction::CloseRequested,
            KeyCode::Enter => self.submit(),
            _ => {
                let Some(kind) = self.flow.current_question().map(|q| q.kind().clone()) else {
                    return WizardAction::None;
                };
                let consumed = match &kind {
                    QuestionKind::Rating(_) => self.rating_key(key),
                    QuestionKind::MultiSelect(question) => self.multi_select_key(question, key),
                    QuestionKind::Text(question) => self.text_key(question, key),
                };
                if consumed {
                    if self.flow.can_advance() {
                        self.hint = None;
                    }
                    return WizardAction::None;
                }
                if key == KeyCode::Backspace {
                    return self.back();
                }
                WizardAction::None
            }
        }
    }

    fn submit(&mut self) -> WizardAction {
        if !self.flow.can_advance() {
            let on_rating = self
                .flow
                .current_question()
                .is_some_and(|q| q.kind().is_rating());
            self.hint = on_rating.then_some(RATING_HINT);
            return WizardAction::None;
        }
        match self.flow.advance() {
            Transition::Moved { .. } => {
                self.reset_focus();
                WizardAction::Moved
            }
            Transition::Completed => {
                self.hint = None;
                WizardAction::Completed
            }
            Transition::Rejected => WizardAction::None,
        }
    }

    fn back(&mut self) -> WizardAction {
        match self.flow.retreat() {
            Transition::Moved { to, .. } => {
                debug!(to, "wizard went back");
                self.reset_focus();
                WizardAction::Moved
            }
            _ => WizardAction::None,
        }
    }

    /// Returns whether the key edited the draft or moved focus.
    fn rating_key(&mut self, key: KeyCode) -> bool {
        let focus = self.focus;
        let Some(draft) = self.flow.draft_mut().and_then(DraftAnswer::as_rating_mut) else {
            return false;
        };
        match (focus, key) {
            (_, KeyCode::Tab) | (_, KeyCode::BackTab) | (_, KeyCode::Down) | (_, KeyCode::Up) => {
                self.focus = if focus == Focus::Scale {
                    Focus::Comment
                } else {
                    Focus::Scale
                };
                true
            }
            (Focus::Scale, KeyCode::Left) => {
                draft.nudge(-1);
                true
            }
            (Focus::Scale, KeyCode::Right) => {
                draft.nudge(1);
                true
            }
            (Focus::Scale, KeyCode::Char(c)) => match c.to_digit(10) {
                Some(d) if (u32::from(MIN_RATING)..=u32::from(MAX_RATING)).contains(&d) => {
                    draft.set_rating(d as u8);
                    true
                }
                _ => false,
            },
            (Focus::Comment, KeyCode::Char(c)) => {
                draft.comment.push(c);
                true
            }
            (Focus::Comment, KeyCode::Backspace) => draft.comment.pop().is_some(),
            _ => false,
        }
    }

    fn multi_select_key(&mut self, question: &MultiSelectQuestion, key: KeyCode) -> bool {
        let rows = question.options.len() + usize::from(question.allow_custom_option);
        let Focus::Row(row) = self.focus else {
            self.focus = Focus::Row(0);
            return false;
        };
        let on_custom = row >= question.options.len();
        let Some(draft) = self.flow.draft_mut().and_then(DraftAnswer::as_multi_select_mut) else {
            return false;
        };
        match key {
            KeyCode::Up | KeyCode::BackTab => {
                self.focus = Focus::Row(row.saturating_sub(1));
                true
            }
            KeyCode::Down | KeyCode::Tab => {
                self.focus = Focus::Row((row + 1).min(rows.saturating_sub(1)));
                true
            }
            KeyCode::Char(c) if on_custom => {
                draft.custom.push(c);
                true
            }
            KeyCode::Backspace if on_custom => draft.custom.pop().is_some(),
            KeyCode::Char(' ') => {
                if let Some(option) = question.options.get(row) {
                    draft.toggle(option);
                }
                true
            }
            _ => false,
        }
    }

    fn text_key(&mut self, question: &TextQuestion, key: KeyCode) -> bool {
        let Some(draft) = self.flow.draft_mut().and_then(DraftAnswer::as_text_mut) else {
            return false;
        };
        match key {
            // Refused characters past the limit still count as handled.
            KeyCode::Char(c) => {
                draft.push_char(c, question.max_chars);
                true
            }
            KeyCode::Backspace => draft.text.pop().is_some(),
            _ => false,
        }
    }

    /// Draw the wizard into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(2), // Progress
                Constraint::Min(8),    // Question
                Constraint::Length(3), // Footer
            ])
            .split(area);

        let header = Paragraph::new(Line::from(vec![
            Span::styled(HEADER, Style::default().fg(theme.primary).bold()),
            Span::styled("   (Esc to close)", Style::default().fg(theme.muted)),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );
        frame.render_widget(header, chunks[0]);

        self.render_progress(frame, chunks[1], theme);

        if let Some(question) = self.flow.current_question() {
            self.render_question(frame, chunks[2], question, theme);
        }

        self.render_footer(frame, chunks[3], theme);
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let progress = self.flow.progress();
        let label = format!("Question {} of {}", progress.position, progress.total);
        let percent = format!("{}% Complete", progress.percent());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(Rect::new(area.x, area.y, area.width, 1));
        frame.render_widget(
            Paragraph::new(label).style(Style::default().fg(theme.secondary)),
            columns[0],
        );
        frame.render_widget(
            Paragraph::new(percent)
                .style(Style::default().fg(theme.secondary))
                .alignment(Alignment::Right),
            columns[1],
        );

        if area.height < 2 {
            return;
        }
        let bar_width = area.width;
        let filled_width = (progress.ratio() * f64::from(bar_width)) as u16;
        let bar_y = area.y + 1;
        frame.render_widget(
            Paragraph::new("─".repeat(bar_width as usize))
                .style(Style::default().fg(theme.border)),
            Rect::new(area.x, bar_y, bar_width, 1),
        );
        if filled_width > 0 {
            frame.render_widget(
                Paragraph::new("━".repeat(filled_width as usize))
                    .style(Style::default().fg(theme.primary)),
                Rect::new(area.x, bar_y, filled_width, 1),
            );
        }
    }

    fn render_question(
        &self,
        frame: &mut Frame,
        area: Rect,
        question: &QuestionSpec,
        theme: &Theme,
    ) {
        let content = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Prompt
                Constraint::Min(3),    // Input
                Constraint::Length(1), // Hint
            ])
            .split(area);

        let prompt = Paragraph::new(question.prompt())
            .style(Style::default().fg(theme.text).bold())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary))
                    .title(" Question ")
                    .title_style(Style::default().fg(theme.highlight)),
            );
        frame.render_widget(prompt, content[0]);

        match question.kind() {
            QuestionKind::Rating(rating) => self.render_rating(frame, content[1], rating, theme),
            QuestionKind::MultiSelect(multi) => {
                self.render_multi_select(frame, content[1], multi, theme)
            }
            QuestionKind::Text(text) => self.render_text(frame, content[1], text, theme),
        }

        if let Some(hint) = self.hint {
            frame.render_widget(
                Paragraph::new(hint)
                    .style(Style::default().fg(theme.error).bold())
                    .alignment(Alignment::Center),
                content[2],
            );
        }
    }

    fn render_rating(
        &self,
        frame: &mut Frame,
        area: Rect,
        question: &RatingQuestion,
        theme: &Theme,
    ) {
        let Some(draft) = self.flow.draft().as_rating() else {
            return;
        };
        let rating = draft.effective_rating();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Endpoint labels
                Constraint::Length(1), // Track
                Constraint::Length(1), // Numbers
                Constraint::Length(1), // Rating label
                Constraint::Length(3), // Comment
            ])
            .split(area);

        let labels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        let labels_style = Style::default().fg(theme.muted);
        frame.render_widget(
            Paragraph::new(question.endpoint_labels.low.as_str()).style(labels_style),
            labels[0],
        );
        frame.render_widget(
            Paragraph::new(question.endpoint_labels.high.as_str())
                .style(labels_style)
                .alignment(Alignment::Right),
            labels[1],
        );

        let scale_focused = self.focus == Focus::Scale;
        let width = usize::from(rows[1].width.max(1));
        let steps = usize::from(MAX_RATING - MIN_RATING);
        let knob = usize::from(rating - MIN_RATING) * width.saturating_sub(1) / steps;
        let track = Line::from(vec![
            Span::styled("━".repeat(knob), Style::default().fg(theme.primary)),
            Span::styled(
                "●",
                if scale_focused {
                    Style::default().fg(theme.highlight).bold()
                } else {
                    Style::default().fg(theme.primary)
                },
            ),
            Span::styled(
                "─".repeat(width.saturating_sub(knob + 1)),
                Style::default().fg(theme.border),
            ),
        ]);
        frame.render_widget(Paragraph::new(track), rows[1]);

        let numbers: Vec<Span> = (MIN_RATING..=MAX_RATING)
            .map(|n| {
                let style = if n == rating {
                    Style::default().fg(theme.primary).bold()
                } else {
                    Style::default().fg(theme.muted)
                };
                Span::styled(format!(" {n} "), style)
            })
            .collect();
        frame.render_widget(
            Paragraph::new(Line::from(numbers)).alignment(Alignment::Center),
            rows[2],
        );

        frame.render_widget(
            Paragraph::new(format!("{rating}/5 - {}", rating_label(rating)))
                .style(Style::default().fg(theme.primary))
                .alignment(Alignment::Center),
            rows[3],
        );

        let comment_focused = self.focus == Focus::Comment;
        let comment = if draft.comment.is_empty() && !comment_focused {
            Span::styled("Add a comment (optional)", Style::default().fg(theme.muted))
        } else {
            Span::styled(draft.comment.as_str(), Style::default().fg(theme.text))
        };
        frame.render_widget(
            Paragraph::new(Line::from(comment)).block(self.input_block(
                " Comment ",
                comment_focused,
                theme,
            )),
            rows[4],
        );
        if comment_focused {
            let x = rows[4].x + 1 + draft.comment.chars().count() as u16;
            frame.set_cursor_position((x, rows[4].y + 1));
        }
    }

    fn render_multi_select(
        &self,
        frame: &mut Frame,
        area: Rect,
        question: &MultiSelectQuestion,
        theme: &Theme,
    ) {
        let Some(draft) = self.flow.draft().as_multi_select() else {
            return;
        };
        let cursor = match self.focus {
            Focus::Row(row) => row,
            _ => 0,
        };

        let mut items: Vec<ListItem> = question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let is_selected = draft.is_selected(option);
                let checkbox = if is_selected { "[✓]" } else { "[ ]" };
                let style = if i == cursor {
                    Style::default().fg(theme.highlight).bold()
                } else if is_selected {
                    Style::default().fg(theme.primary)
                } else {
                    Style::default().fg(theme.text)
                };
                ListItem::new(format!("  {checkbox} {option}")).style(style)
            })
            .collect();

        if question.allow_custom_option {
            let on_custom = cursor >= question.options.len();
            let text = if draft.custom.is_empty() && !on_custom {
                "  Add other...".to_string()
            } else {
                format!("  Other: {}", draft.custom)
            };
            let style = if on_custom {
                Style::default().fg(theme.highlight).bold()
            } else if draft.custom.trim().is_empty() {
                Style::default().fg(theme.muted)
            } else {
                Style::default().fg(theme.primary)
            };
            items.push(ListItem::new(text).style(style));
        }

        let selected_count = draft.selected.len() + usize::from(!draft.custom.trim().is_empty());
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border))
                    .title(format!(" Select all that apply: ({selected_count} selected) "))
                    .title_style(Style::default().fg(theme.secondary)),
            )
            .highlight_symbol("► ");
        let mut list_state = ListState::default();
        list_state.select(Some(cursor));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_text(&self, frame: &mut Frame, area: Rect, question: &TextQuestion, theme: &Theme) {
        let Some(draft) = self.flow.draft().as_text() else {
            return;
        };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let body = if draft.text.is_empty() {
            Paragraph::new(question.placeholder.as_str()).style(Style::default().fg(theme.muted))
        } else {
            Paragraph::new(draft.text.as_str()).style(Style::default().fg(theme.text))
        };
        frame.render_widget(
            body.wrap(Wrap { trim: false })
                .block(self.input_block(" Answer ", true, theme)),
            rows[0],
        );

        let count = draft.char_count();
        let counter_style = if count >= question.max_chars {
            Style::default().fg(theme.error)
        } else {
            Style::default().fg(theme.muted)
        };
        frame.render_widget(
            Paragraph::new(format!("{count}/{}", question.max_chars))
                .style(counter_style)
                .alignment(Alignment::Right),
            rows[1],
        );
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let back_style = if self.flow.can_retreat() {
            Style::default().fg(theme.text)
        } else {
            Style::default().fg(theme.muted)
        };
        let next_label = if self.flow.is_last_question() {
            "Submit →"
        } else {
            "Next →"
        };
        let next_style = if self.flow.can_advance() {
            Style::default().fg(theme.success).bold()
        } else {
            Style::default().fg(theme.muted)
        };

        let keys = match self.flow.current_question().map(QuestionSpec::kind) {
            Some(QuestionKind::Rating(_)) => "←/→ or 1-5: Rate  Tab: Comment",
            Some(QuestionKind::MultiSelect(_)) => "↑/↓: Navigate  Space: Toggle",
            _ => "Type your answer",
        };

        let line = Line::from(vec![
            Span::styled("← Back", back_style),
            Span::styled(format!("   {keys}   "), Style::default().fg(theme.border)),
            Span::styled(format!("Enter: {next_label}"), next_style),
        ]);
        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(theme.border)),
            ),
            area,
        );
    }

    fn input_block<'a>(&self, title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused { theme.primary } else { theme.border }))
            .title(title)
            .title_style(Style::default().fg(theme.secondary))
    }
}
