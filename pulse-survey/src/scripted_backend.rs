//! Scripted backend for running surveys without user interaction.
//!
//! `ScriptedBackend` replays a fixed sequence of answers and Back presses
//! through a real [`SurveyFlow`]. Each answer must satisfy the same gate the
//! interactive shells enforce, so a script that would leave Next disabled
//! fails with a [`ScriptError`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pulse_survey::{Catalog, QuestionSpec, ScriptedBackend, SurveyBackend};
//!
//! let catalog = Arc::new(Catalog::new(vec![
//!     QuestionSpec::rating("q1", "Rate us", "Poor", "Excellent"),
//!     QuestionSpec::multi_select("q2", "Pick", ["X", "Y"], true),
//! ]).unwrap());
//!
//! let responses = ScriptedBackend::new()
//!     .rating(4)
//!     .select(["X"], "Z")
//!     .collect(catalog)
//!     .unwrap();
//!
//! assert_eq!(responses.get("q2").unwrap().answer_text(), "X, Z");
//! ```

use std::{cell::RefCell, rc::Rc, sync::Arc};

use pulse_survey_types::{
    Catalog, DraftAnswer, MultiSelectDraft, QuestionKind, RatingDraft, ResponseCollection,
    SurveyBackend, TextDraft,
};

use crate::{SurveyFlow, Transition};

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    /// Replace the draft with this answer, then press Next.
    Answer(DraftAnswer),
    /// Press Back.
    Back,
}

/// A backend that replays pre-configured answers.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    steps: Vec<ScriptStep>,
}

/// Error type for ScriptedBackend.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Scripted answer for '{question_id}' is a {given} draft, expected {expected}")]
    KindMismatch {
        question_id: String,
        expected: &'static str,
        given: &'static str,
    },

    #[error("Scripted answer for '{question_id}' selects unknown option '{option}'")]
    UnknownOption { question_id: String, option: String },

    #[error("Scripted answer for '{0}' does not complete the question")]
    Incomplete(String),

    #[error("Cannot go back from the first question")]
    CannotGoBack,

    #[error("Script has {0} step(s) left after the survey completed")]
    TrailingSteps(usize),

    #[error("Script ended after {answered} of {total} questions")]
    Unfinished { answered: usize, total: usize },
}

impl ScriptedBackend {
    /// Create a new empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step.
    pub fn step(mut self, step: ScriptStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Answer the current question with `draft`.
    pub fn answer(self, draft: DraftAnswer) -> Self {
        self.step(ScriptStep::Answer(draft))
    }

    /// Answer a rating question.
    pub fn rating(self, rating: u8) -> Self {
        self.answer(DraftAnswer::Rating(RatingDraft::with_rating(rating)))
    }

    /// Answer a rating question with a comment.
    pub fn rating_with_comment(self, rating: u8, comment: impl Into<String>) -> Self {
        let mut draft = RatingDraft::with_rating(rating);
        draft.comment = comment.into();
        self.answer(DraftAnswer::Rating(draft))
    }

    /// Answer a multi-select question.
    pub fn select<I, S>(self, options: I, custom: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answer(DraftAnswer::MultiSelect(MultiSelectDraft {
            selected: options.into_iter().map(Into::into).collect(),
            custom: custom.into(),
        }))
    }

    /// Answer a free-text question.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.answer(DraftAnswer::Text(TextDraft::new(text)))
    }

    /// Press Back.
    pub fn back(self) -> Self {
        self.step(ScriptStep::Back)
    }
}

fn draft_kind(draft: &DraftAnswer) -> &'static str {
    match draft {
        DraftAnswer::Rating(_) => "rating",
        DraftAnswer::MultiSelect(_) => "multiselect",
        DraftAnswer::Text(_) => "text",
    }
}

impl SurveyBackend for ScriptedBackend {
    type Error = ScriptError;

    fn collect(&self, catalog: Arc<Catalog>) -> Result<ResponseCollection, Self::Error> {
        let total = catalog.count();
        let result: Rc<RefCell<Option<ResponseCollection>>> = Rc::default();
        let sink = Rc::clone(&result);
        let mut flow = SurveyFlow::new(catalog, move |responses| {
            *sink.borrow_mut() = Some(responses);
        });

        for (position, step) in self.steps.iter().enumerate() {
            if flow.is_done() {
                return Err(ScriptError::TrailingSteps(self.steps.len() - position));
            }
            match step {
                ScriptStep::Answer(draft) => {
                    let Some(question) = flow.current_question() else {
                        break;
                    };
                    if !draft.matches(question.kind()) {
                        return Err(ScriptError::KindMismatch {
                            question_id: question.id().to_string(),
                            expected: question.kind().name(),
                            given: draft_kind(draft),
                        });
                    }
                    let question_id = question.id().to_string();
                    if let (DraftAnswer::MultiSelect(draft), QuestionKind::MultiSelect(ms)) =
                        (draft, question.kind())
                    {
                        if let Some(option) = draft.selected.iter().find(|o| !ms.has_option(o)) {
                            return Err(ScriptError::UnknownOption {
                                question_id,
                                option: option.clone(),
                            });
                        }
                    }
                    flow.set_draft(draft.clone());
                    if !flow.can_advance() {
                        return Err(ScriptError::Incomplete(question_id));
                    }
                    flow.advance();
                }
                ScriptStep::Back => {
                    if flow.retreat() == Transition::Rejected {
                        return Err(ScriptError::CannotGoBack);
                    }
                }
            }
        }

        let answered = flow.committed().len();
        flow.close();
        let collected = result.borrow_mut().take();
        collected.ok_or(ScriptError::Unfinished { answered, total })
    }
}
