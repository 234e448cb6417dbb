use std::path::PathBuf;

use clap::Parser;

use crate::app::View;

/// Terminal HR dashboard with an employee pulse survey
#[derive(Parser, Debug)]
#[command(name = "pulse", author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to read
    #[arg(short, long, default_value = "pulse.toml")]
    pub config: PathBuf,

    /// Question catalog in TOML (defaults to the built-in HR pulse survey)
    #[arg(long, env = "PULSE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Where to write logs
    #[arg(long, env = "PULSE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// View shown at startup
    #[arg(long, value_enum, default_value_t = View::Dashboard)]
    pub view: View,

    /// Run only the survey wizard and print the answers as TOML
    #[arg(long)]
    pub survey_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "pulse",
            "--catalog",
            "q.toml",
            "--view",
            "admin",
            "--survey-only",
        ])
        .unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("q.toml")));
        assert_eq!(cli.view, View::Admin);
        assert!(cli.survey_only);
        assert_eq!(cli.config, PathBuf::from("pulse.toml"));
    }

    #[test]
    fn rejects_unknown_view() {
        assert!(Cli::try_parse_from(["pulse", "--view", "claims"]).is_err());
    }
}
