use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;

use crate::cli::Cli;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// TOML question catalog; the built-in HR survey when unset.
    pub catalog: Option<PathBuf>,
    pub log_file: PathBuf,
    /// How long the "remind me later" notice stays up.
    pub reminder_secs: f64,
    /// How long the thank-you notice stays up.
    pub thank_you_secs: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: None,
            log_file: "pulse.log".into(),
            reminder_secs: 4.4,
            thank_you_secs: 4.0,
        }
    }
}

impl Settings {
    pub fn reminder_duration(&self) -> Duration {
        secs(self.reminder_secs)
    }

    pub fn thank_you_duration(&self) -> Duration {
        secs(self.thank_you_secs)
    }

    /// Flags and their environment variables win over the file.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(catalog) = &cli.catalog {
            self.catalog = Some(catalog.clone());
        }
        if let Some(log_file) = &cli.log_file {
            self.log_file = log_file.clone();
        }
    }
}

fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or_default()
}

pub fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    toml::from_str(raw).context("invalid settings")
}

/// Read settings from `path`. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    match fs::read_to_string(path) {
        Ok(raw) => parse_settings(&raw).with_context(|| format!("in {}", path.display())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}
