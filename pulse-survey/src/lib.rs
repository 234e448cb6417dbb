//! # pulse-survey
//!
//! Multi-step HR feedback survey. Backend-agnostic.
//!
//! A [`SurveyFlow`] walks a [`Catalog`] one question at a time. The
//! presentation shell edits the current [`DraftAnswer`], asks
//! [`SurveyFlow::can_advance`] to decide whether Next is enabled, and calls
//! [`SurveyFlow::advance`] / [`SurveyFlow::retreat`] on navigation. When the
//! last question is submitted the whole [`ResponseCollection`] is handed to
//! the completion callback, once.
//!
//! ## Usage
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc, sync::Arc};
//! use pulse_survey::{Catalog, DraftAnswer, QuestionSpec, RatingDraft, SurveyFlow, TextDraft};
//!
//! let catalog = Arc::new(Catalog::new(vec![
//!     QuestionSpec::rating("q1", "How satisfied are you?", "Poor", "Excellent"),
//!     QuestionSpec::text("q2", "What is missing?", "Type your answer"),
//! ]).unwrap());
//!
//! let submitted = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&submitted);
//! let mut flow = SurveyFlow::new(catalog, move |responses| sink.borrow_mut().push(responses));
//!
//! flow.set_draft(DraftAnswer::Rating(RatingDraft::with_rating(4)));
//! flow.advance();
//! flow.set_draft(DraftAnswer::Text(TextDraft::new("needs more docs")));
//! flow.advance();
//!
//! assert!(flow.is_done());
//! assert_eq!(submitted.borrow()[0].get("q2").unwrap().answer_text(), "needs more docs");
//! ```
//!
//! ## Backends
//!
//! Backends implement [`SurveyBackend`]:
//! - `pulse-ratatui-wizard` - TUI wizard
//! - [`ScriptedBackend`] - replays scripted answers, for tests

// Re-export all types from pulse-survey-types
pub use pulse_survey_types::*;

mod store;
pub use store::AnswerStore;

mod flow;
pub use flow::{FlowState, Progress, SurveyFlow, Transition};

// Scripted backend for driving surveys without user interaction
mod scripted_backend;
pub use scripted_backend::{ScriptError, ScriptStep, ScriptedBackend};
