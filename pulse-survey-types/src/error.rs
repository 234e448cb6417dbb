/// Backend-neutral outcome of a failed collection run.
///
/// Hosts match on this instead of each backend's own error type.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// The respondent closed the survey before the last answer was committed.
    #[error("Survey cancelled by user")]
    Cancelled,

    /// The backend itself failed, for example while driving the terminal.
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl SurveyError {
    /// Wrap a backend failure.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// Whether the respondent closed the survey.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Error type for building or loading a question catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog must contain at least one question")]
    Empty,

    #[error("Question at position {0} has an empty id")]
    EmptyId(usize),

    #[error("Duplicate question id: {0}")]
    DuplicateId(String),

    #[error("Multi-select question '{0}' has no options and does not allow a custom option")]
    NoOptions(String),

    #[error("Multi-select question '{id}' lists option '{option}' more than once")]
    DuplicateOption { id: String, option: String },

    #[error("Text question '{0}' must allow at least one character")]
    ZeroTextLimit(String),

    #[error("Question '{id}' is missing '{field}' required for {kind} questions")]
    MissingField {
        id: String,
        field: &'static str,
        kind: &'static str,
    },

    #[error("Invalid catalog file: {0}")]
    Parse(#[from] toml::de::Error),
}
