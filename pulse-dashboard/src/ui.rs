//! Drawing for the dashboard views.

use pulse_ratatui_wizard::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Tabs, Wrap},
};

use crate::{
    app::{AdminTab, App, View},
    fixtures::{ENDORSEMENTS, INSIGHTS, KPIS, POLICIES, RECENT_FEEDBACK, SATISFACTION, Severity},
};

pub fn draw(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navigation
            Constraint::Min(10),   // Body
            Constraint::Length(1), // Key help
        ])
        .split(area);

    draw_nav(frame, chunks[0], app.view(), theme);
    match app.view() {
        View::Dashboard => draw_dashboard(frame, chunks[1], theme),
        View::Admin => draw_admin(frame, chunks[1], app, theme),
        View::Policies => draw_policies(frame, chunks[1], theme),
    }
    draw_help(frame, chunks[2], app, theme);

    if app.invitation_visible() {
        draw_invitation(frame, chunks[1], theme);
    }
    if let Some(wizard) = app.wizard() {
        let popup = centered(area, 80, 90);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);
        wizard.render(frame, inner, theme);
    }
    draw_notices(frame, chunks[1], app, theme);
}

fn draw_nav(frame: &mut Frame, area: Rect, view: View, theme: &Theme) {
    let titles = View::ALL
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{} {}", i + 1, v.title()));
    let tabs = Tabs::new(titles)
        .select(view.index())
        .style(Style::default().fg(theme.muted))
        .highlight_style(Style::default().fg(theme.primary).bold())
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border))
                .title(Span::styled(" loop ", Style::default().fg(theme.primary).bold())),
        );
    frame.render_widget(tabs, area);
}

fn draw_help(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let text = if app.wizard().is_some() {
        "Enter: Next  Backspace: Back  Esc: Close survey"
    } else if app.invitation_visible() {
        "Enter: Start survey  r: Remind me later  x: Close  Tab/1-3: Views  q: Quit"
    } else {
        match app.view() {
            View::Dashboard => "s: Take the survey  Tab/1-3: Views  q: Quit",
            View::Admin => "←/→: Overview / AI Insights  Tab/1-3: Views  q: Quit",
            View::Policies => "Tab/1-3: Views  q: Quit",
        }
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(theme.muted)),
        area,
    );
}

fn card<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(title)
        .title_style(Style::default().fg(theme.text).bold())
}

fn severity_color(severity: Severity, theme: &Theme) -> Color {
    match severity {
        Severity::High => theme.error,
        Severity::Medium => theme.highlight,
        Severity::Low => theme.success,
    }
}

fn draw_dashboard(frame: &mut Frame, area: Rect, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(6)])
        .split(area);

    let banner = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Manage policies with "),
            Span::styled("one excel sheet!", Style::default().bold()),
        ]),
        Line::from(Span::styled(
            "Add, remove or update employees and dependants in bulk with ease",
            Style::default().fg(theme.muted),
        )),
    ])
    .style(Style::default().fg(theme.text))
    .block(card(" Endorsements ", theme));
    frame.render_widget(banner, rows[0]);

    let items: Vec<ListItem> = ENDORSEMENTS
        .iter()
        .map(|e| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled("Endorsement open  ", Style::default().fg(theme.highlight)),
                    Span::styled(e.title, Style::default().fg(theme.text).bold()),
                ]),
                Line::from(Span::styled(
                    format!("{} • Policy ID: {} • Month: {}", e.insurer, e.policy_id, e.month),
                    Style::default().fg(theme.muted),
                )),
                Line::from(format!(
                    "Additions {}  Deletions {}  Corrections {}   Accepting changes till {}",
                    e.additions, e.deletions, e.corrections, e.open_till
                )),
                Line::default(),
            ])
        })
        .collect();
    frame.render_widget(
        List::new(items).block(card(" Track Endorsements ", theme)),
        rows[1],
    );
}

fn draw_invitation(frame: &mut Frame, area: Rect, theme: &Theme) {
    let width = 44.min(area.width);
    let height = 8.min(area.height);
    let popup = Rect::new(
        area.x + area.width - width,
        area.y + area.height - height,
        width,
        height,
    );
    frame.render_widget(Clear, popup);
    let text = vec![
        Line::from(Span::styled(
            "Help us improve your experience!",
            Style::default().fg(theme.text).bold(),
        )),
        Line::from(Span::styled("Only takes 60 seconds", Style::default().fg(theme.muted))),
        Line::default(),
        Line::from(Span::styled(
            "[Enter] Start now →",
            Style::default().fg(theme.primary).bold(),
        )),
        Line::from(Span::styled(
            "[r] Remind me later   [x] Close",
            Style::default().fg(theme.muted),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary)),
        ),
        popup,
    );
}

fn draw_notices(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let width = 50.min(area.width);
    let mut y = area.y;
    for notice in app.notices() {
        if y + 4 > area.y + area.height {
            break;
        }
        let rect = Rect::new(area.x + area.width - width, y, width, 4);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(notice.text)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(theme.text))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme.success)),
                ),
            rect,
        );
        y += 4;
    }
}

fn draw_admin(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(8)])
        .split(area);

    let tabs = Tabs::new(["Overview", "AI Insights"])
        .select(match app.admin_tab() {
            AdminTab::Overview => 0,
            AdminTab::Insights => 1,
        })
        .style(Style::default().fg(theme.muted))
        .highlight_style(Style::default().fg(theme.primary).bold());
    frame.render_widget(tabs, rows[0]);

    match app.admin_tab() {
        AdminTab::Overview => draw_overview(frame, rows[1], app, theme),
        AdminTab::Insights => draw_insights(frame, rows[1], theme),
    }
}

fn draw_overview(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(10),
            Constraint::Min(4),
        ])
        .split(area);

    let kpis = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);
    let total = app.submitted().len().to_string();
    let cards = std::iter::once(("Total Responses", total.as_str())).chain(KPIS);
    for (rect, (label, value)) in kpis.iter().zip(cards) {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(theme.muted)),
                Span::styled(value.to_string(), Style::default().fg(theme.primary).bold()),
            ]))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border)),
            ),
            *rect,
        );
    }

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let breakdown = card(" Satisfaction Breakdown ", theme);
    let inner = breakdown.inner(middle[0]);
    frame.render_widget(breakdown, middle[0]);
    let gauges = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2); 4])
        .split(inner);
    for (rect, row) in gauges.iter().zip(SATISFACTION) {
        frame.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(theme.primary))
                .percent(row.satisfied)
                .label(format!(
                    "{} {}% satisfied, {}% not",
                    row.category,
                    row.satisfied,
                    row.dissatisfied()
                )),
            *rect,
        );
    }

    let feedback: Vec<ListItem> = RECENT_FEEDBACK
        .iter()
        .map(|f| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    format!("\"{}\"", f.quote),
                    Style::default().fg(severity_color(f.severity, theme)),
                )),
                Line::from(Span::styled(f.age, Style::default().fg(theme.muted))),
            ])
        })
        .collect();
    frame.render_widget(
        List::new(feedback).block(card(" Recent Feedback ", theme)),
        middle[1],
    );

    let submitted = app.submitted();
    let items: Vec<ListItem> = if submitted.is_empty() {
        vec![
            ListItem::new("No responses submitted this session")
                .style(Style::default().fg(theme.muted)),
        ]
    } else {
        submitted
            .iter()
            .enumerate()
            .flat_map(|(i, collection)| {
                let heading =
                    ListItem::new(format!("Response #{}", i + 1)).style(Style::default().bold());
                std::iter::once(heading).chain(collection.iter().map(|r| {
                    ListItem::new(format!("  {}: {}", r.question_id(), r.answer_text()))
                }))
            })
            .collect()
    };
    frame.render_widget(
        List::new(items).block(card(" Submitted This Session ", theme)),
        rows[2],
    );
}

fn draw_insights(frame: &mut Frame, area: Rect, theme: &Theme) {
    let items: Vec<ListItem> = INSIGHTS
        .iter()
        .map(|insight| {
            let color = severity_color(insight.severity, theme);
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(color)),
                    Span::styled(insight.theme, Style::default().fg(theme.text).bold()),
                    Span::styled(
                        format!("   {} ({}% of responses)", insight.count, insight.percentage),
                        Style::default().fg(theme.muted),
                    ),
                ]),
                Line::from(vec![
                    Span::styled(insight.severity.label(), Style::default().fg(color)),
                    Span::styled(
                        format!("   Trend: {}", insight.trend.label()),
                        Style::default().fg(theme.muted),
                    ),
                ]),
            ];
            lines.extend(insight.samples.iter().map(|s| {
                Line::from(Span::styled(format!("  \"{s}\""), Style::default().italic()))
            }));
            lines.push(Line::default());
            ListItem::new(lines)
        })
        .collect();
    frame.render_widget(
        List::new(items).block(card(" AI-Powered Theme Analysis ", theme)),
        area,
    );
}

fn draw_policies(frame: &mut Frame, area: Rect, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);
    for (rect, policy) in rows.iter().zip(POLICIES) {
        let text = vec![
            Line::from(vec![
                Span::styled(format!("{}  ", policy.status), Style::default().fg(theme.success)),
                Span::styled(policy.insurer, Style::default().fg(theme.muted)),
            ]),
            Line::from(format!(
                "Sum Insured {}   Valid till {}   Policy Ref ID {}",
                policy.sum_insured, policy.valid_till, policy.policy_id
            )),
            Line::from(format!(
                "Employees {}   Dependents {}",
                policy.employees, policy.dependents
            )),
        ];
        frame.render_widget(
            Paragraph::new(text).block(card(policy.name, theme)),
            *rect,
        );
    }
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Instant};

    use crossterm::event::KeyCode;
    use pulse_survey::Catalog;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::config::Settings;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|frame| draw(frame, app, &Theme::default()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app(view: View) -> App {
        App::new(Arc::new(Catalog::hr_pulse()), &Settings::default(), view)
    }

    #[test]
    fn dashboard_shows_invitation() {
        let screen = screen(&app(View::Dashboard));
        assert!(screen.contains("Track Endorsements"));
        assert!(screen.contains("Only takes 60 seconds"));
        assert!(screen.contains("Remind me later"));
    }

    #[test]
    fn admin_counts_submissions() {
        let screen = screen(&app(View::Admin));
        assert!(screen.contains("Total Responses: 0"));
        assert!(screen.contains("Satisfaction Breakdown"));
        assert!(screen.contains("No responses submitted this session"));
    }

    #[test]
    fn insights_tab_lists_themes() {
        let mut app = app(View::Admin);
        app.handle_key(KeyCode::Right, Instant::now());
        let screen = screen(&app);
        assert!(screen.contains("Claims Processing Delays"));
        assert!(screen.contains("High Priority"));
    }

    #[test]
    fn policies_view_lists_cards() {
        let screen = screen(&app(View::Policies));
        assert!(screen.contains("Group health insurance"));
        assert!(screen.contains("Term life insurance"));
    }

    #[test]
    fn wizard_overlays_the_dashboard() {
        let mut app = app(View::Dashboard);
        app.handle_key(KeyCode::Enter, Instant::now());
        let screen = screen(&app);
        assert!(screen.contains("Question 1 of 6"));
        assert!(!screen.contains("Only takes 60 seconds"));
    }
}
