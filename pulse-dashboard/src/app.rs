//! Dashboard application state and key handling.

use std::{
    cell::RefCell,
    rc::Rc,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::event::KeyCode;
use pulse_ratatui_wizard::{THANK_YOU, WizardAction, WizardView};
use pulse_survey::{Catalog, ResponseCollection, SurveyFlow};
use tracing::{debug, info};

use crate::config::Settings;

pub const REMINDER: &str =
    "We'll remind you in 7 days. Meanwhile, reach out via support if you need anything";

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum View {
    #[default]
    Dashboard,
    Admin,
    Policies,
}

impl View {
    pub const ALL: [View; 3] = [View::Dashboard, View::Admin, View::Policies];

    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Admin => "Survey Analytics",
            View::Policies => "Policies",
        }
    }

    pub fn index(self) -> usize {
        match self {
            View::Dashboard => 0,
            View::Admin => 1,
            View::Policies => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Overview,
    Insights,
}

impl AdminTab {
    pub fn toggle(self) -> Self {
        match self {
            AdminTab::Overview => AdminTab::Insights,
            AdminTab::Insights => AdminTab::Overview,
        }
    }
}

/// A short-lived message that disappears at `deadline`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: &'static str,
    pub deadline: Instant,
}

pub struct App {
    catalog: Arc<Catalog>,
    view: View,
    admin_tab: AdminTab,
    invitation_visible: bool,
    wizard: Option<WizardView>,
    submitted: Rc<RefCell<Vec<ResponseCollection>>>,
    notices: Vec<Notice>,
    reminder_for: Duration,
    thank_you_for: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(catalog: Arc<Catalog>, settings: &Settings, view: View) -> Self {
        Self {
            catalog,
            view,
            admin_tab: AdminTab::default(),
            invitation_visible: true,
            wizard: None,
            submitted: Rc::default(),
            notices: Vec::new(),
            reminder_for: settings.reminder_duration(),
            thank_you_for: settings.thank_you_duration(),
            should_quit: false,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn admin_tab(&self) -> AdminTab {
        self.admin_tab
    }

    pub fn invitation_visible(&self) -> bool {
        self.invitation_visible && self.wizard.is_none() && self.view == View::Dashboard
    }

    pub fn wizard(&self) -> Option<&WizardView> {
        self.wizard.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Every collection submitted this session, oldest first.
    pub fn submitted(&self) -> std::cell::Ref<'_, Vec<ResponseCollection>> {
        self.submitted.borrow()
    }

    pub fn set_view(&mut self, view: View) {
        if view == self.view {
            return;
        }
        info!(from = ?self.view, to = ?view, "view switched");
        self.view = view;
        self.notices.clear();
    }

    pub fn start_survey(&mut self) {
        if self.wizard.is_some() {
            return;
        }
        let submitted = Rc::clone(&self.submitted);
        let flow = SurveyFlow::new(Arc::clone(&self.catalog), move |responses| {
            info!(answers = responses.len(), "survey submitted");
            submitted.borrow_mut().push(responses);
        })
        .on_close(|| info!("survey closed without submitting"));
        info!(questions = self.catalog.count(), "survey started");
        self.invitation_visible = false;
        self.wizard = Some(WizardView::new(flow));
    }

    pub fn remind_later(&mut self, now: Instant) {
        self.invitation_visible = false;
        self.push_notice(REMINDER, now + self.reminder_for);
    }

    pub fn dismiss_invitation(&mut self) {
        debug!("survey invitation dismissed");
        self.invitation_visible = false;
    }

    fn push_notice(&mut self, text: &'static str, deadline: Instant) {
        self.notices.retain(|notice| notice.text != text);
        self.notices.push(Notice { text, deadline });
    }

    /// Drop notices whose deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        self.notices.retain(|notice| notice.deadline > now);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.notices.iter().map(|notice| notice.deadline).min()
    }

    pub fn handle_key(&mut self, key: KeyCode, now: Instant) {
        if let Some(wizard) = self.wizard.as_mut() {
            match wizard.handle_key(key) {
                WizardAction::Completed => {
                    self.wizard = None;
                    self.push_notice(THANK_YOU, now + self.thank_you_for);
                }
                WizardAction::CloseRequested => {
                    if let Some(wizard) = self.wizard.take() {
                        wizard.close();
                    }
                }
                WizardAction::Moved | WizardAction::None => {}
            }
            return;
        }

        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.set_view(self.view.next()),
            KeyCode::Char('1') => self.set_view(View::Dashboard),
            KeyCode::Char('2') => self.set_view(View::Admin),
            KeyCode::Char('3') => self.set_view(View::Policies),
            _ => match self.view {
                View::Dashboard => self.dashboard_key(key, now),
                View::Admin => {
                    if matches!(key, KeyCode::Left | KeyCode::Right) {
                        self.admin_tab = self.admin_tab.toggle();
                    }
                }
                View::Policies => {}
            },
        }
    }

    fn dashboard_key(&mut self, key: KeyCode, now: Instant) {
        match key {
            KeyCode::Char('s') => self.start_survey(),
            KeyCode::Enter if self.invitation_visible() => self.start_survey(),
            KeyCode::Char('r') if self.invitation_visible() => self.remind_later(now),
            KeyCode::Char('x') | KeyCode::Esc if self.invitation_visible() => {
                self.dismiss_invitation()
            }
            _ => {}
        }
    }
}
