mod app;
mod cli;
mod config;
mod fixtures;
mod ui;

use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use pulse_ratatui_wizard::{
    CrosstermTerminal, RatatuiBackend, Theme, restore_terminal, setup_terminal,
};
use pulse_survey::{Catalog, ResponseCollection, SurveyBackend, SurveyError};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{app::App, cli::Cli, config::load_settings};

const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config)?;
    settings.apply_cli(&cli);

    init_logging(&settings.log_file)?;
    info!(?settings, "starting pulse");

    let catalog = Arc::new(load_catalog(settings.catalog.as_deref())?);

    if cli.survey_only {
        return run_survey_only(catalog);
    }

    let mut app = App::new(catalog, &settings, cli.view);
    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::hr_pulse());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog = Catalog::from_toml_str(&raw)
        .with_context(|| format!("invalid catalog {}", path.display()))?;
    info!(path = %path.display(), questions = catalog.count(), "catalog loaded");
    Ok(catalog)
}

fn run_survey_only(catalog: Arc<Catalog>) -> Result<()> {
    let outcome = RatatuiBackend::new().collect(catalog).map_err(SurveyError::from);
    match submitted_answers(outcome)? {
        Some(responses) => {
            print!("{}", toml::to_string(&responses).context("failed to encode answers")?);
        }
        None => eprintln!("Survey closed without submitting."),
    }
    Ok(())
}

/// Map a closed survey to `None` and keep backend failures as errors.
fn submitted_answers(
    outcome: Result<ResponseCollection, SurveyError>,
) -> Result<Option<ResponseCollection>> {
    match outcome {
        Ok(responses) => Ok(Some(responses)),
        Err(err) if err.is_cancelled() => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn run(terminal: &mut CrosstermTerminal, app: &mut App) -> Result<()> {
    let theme = Theme::default();
    while !app.should_quit() {
        terminal.draw(|frame| ui::draw(frame, app, &theme))?;

        let now = Instant::now();
        let timeout = app
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now).min(IDLE_POLL))
            .unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, Instant::now());
                }
            }
        }
        app.tick(Instant::now());
    }
    info!(submitted = app.submitted().len(), "pulse exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io;

    use pulse_ratatui_wizard::RatatuiError;

    use super::*;

    #[test]
    fn closed_survey_is_not_an_error() {
        let outcome = Err(SurveyError::from(RatatuiError::Cancelled));
        assert!(submitted_answers(outcome).unwrap().is_none());
    }

    #[test]
    fn terminal_failure_is_reported() {
        let outcome = Err(SurveyError::from(RatatuiError::Io(io::Error::other("tty gone"))));
        let err = submitted_answers(outcome).unwrap_err();
        assert!(err.to_string().contains("tty gone"));
    }

    #[test]
    fn submitted_survey_is_returned() {
        let answers = submitted_answers(Ok(ResponseCollection::new())).unwrap();
        assert!(answers.is_some_and(|responses| responses.is_empty()));
    }
}
