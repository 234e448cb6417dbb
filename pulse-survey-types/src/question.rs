/// Default character limit shown under free-text answers.
pub const DEFAULT_TEXT_LIMIT: usize = 500;

/// A single question in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSpec {
    /// Unique identifier, carried into every committed response.
    id: String,

    /// The prompt text shown to the user.
    prompt: String,

    /// The kind of question (determines input type and completion rule).
    kind: QuestionKind,
}

impl QuestionSpec {
    /// Create a new question.
    pub fn new(id: impl Into<String>, prompt: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            kind,
        }
    }

    /// Create a rating question with the given endpoint labels.
    pub fn rating(
        id: impl Into<String>,
        prompt: impl Into<String>,
        low: impl Into<String>,
        high: impl Into<String>,
    ) -> Self {
        Self::new(id, prompt, QuestionKind::Rating(RatingQuestion::new(low, high)))
    }

    /// Create a multi-select question.
    pub fn multi_select<I, S>(
        id: impl Into<String>,
        prompt: impl Into<String>,
        options: I,
        allow_custom_option: bool,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut question = MultiSelectQuestion::new(options);
        question.allow_custom_option = allow_custom_option;
        Self::new(id, prompt, QuestionKind::MultiSelect(question))
    }

    /// Create a free-text question with the given placeholder.
    pub fn text(
        id: impl Into<String>,
        prompt: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self::new(id, prompt, QuestionKind::Text(TextQuestion::new(placeholder)))
    }

    /// Get the question id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }
}

/// The kind of question, with its kind-specific configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    /// Five-point scale with labelled endpoints and an optional comment.
    Rating(RatingQuestion),

    /// Select any number of options, optionally plus one custom answer.
    MultiSelect(MultiSelectQuestion),

    /// Free-text answer.
    Text(TextQuestion),
}

impl QuestionKind {
    /// Short lowercase name, as used in catalog files and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rating(_) => "rating",
            Self::MultiSelect(_) => "multiselect",
            Self::Text(_) => "text",
        }
    }

    pub fn is_rating(&self) -> bool {
        matches!(self, Self::Rating(_))
    }
}

/// Labels shown at both ends of a rating scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointLabels {
    pub low: String,
    pub high: String,
}

/// Configuration for a rating question.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingQuestion {
    pub endpoint_labels: EndpointLabels,
}

impl RatingQuestion {
    /// Create with endpoint labels.
    pub fn new(low: impl Into<String>, high: impl Into<String>) -> Self {
        Self {
            endpoint_labels: EndpointLabels {
                low: low.into(),
                high: high.into(),
            },
        }
    }
}

/// Configuration for a multi-select question.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSelectQuestion {
    /// The available options, in display order.
    pub options: Vec<String>,

    /// Whether the user may type one answer of their own.
    pub allow_custom_option: bool,
}

impl MultiSelectQuestion {
    /// Create a new multi-select question without a custom option.
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            allow_custom_option: false,
        }
    }

    /// Allow a custom answer next to the listed options.
    pub fn with_custom_option(mut self) -> Self {
        self.allow_custom_option = true;
        self
    }

    /// Check whether `option` is one of the listed options.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Configuration for a free-text question.
#[derive(Debug, Clone, PartialEq)]
pub struct TextQuestion {
    /// Hint shown while the answer is empty.
    pub placeholder: String,

    /// Maximum number of characters the shell accepts.
    pub max_chars: usize,
}

impl TextQuestion {
    /// Create with a placeholder and the default limit.
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            max_chars: DEFAULT_TEXT_LIMIT,
        }
    }

    /// Set a custom character limit.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

impl Default for TextQuestion {
    fn default() -> Self {
        Self::new("Type your answer...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        let q = QuestionSpec::rating("q1", "How?", "Poor", "Excellent");
        assert!(q.kind().is_rating());
        assert_eq!(q.id(), "q1");

        let q = QuestionSpec::multi_select("q2", "Which?", ["A", "B"], true);
        match q.kind() {
            QuestionKind::MultiSelect(ms) => {
                assert_eq!(ms.options, vec!["A".to_string(), "B".to_string()]);
                assert!(ms.allow_custom_option);
                assert!(ms.has_option("B"));
                assert!(!ms.has_option("C"));
            }
            other => panic!("Expected MultiSelect, got {}", other.name()),
        }
    }

    #[test]
    fn text_defaults_to_500_chars() {
        let q = QuestionSpec::text("q3", "Anything else?", "Type your answer");
        let QuestionKind::Text(text) = q.kind() else {
            panic!("Expected Text question kind");
        };
        assert_eq!(text.max_chars, DEFAULT_TEXT_LIMIT);
        assert_eq!(text.placeholder, "Type your answer");
    }
}
