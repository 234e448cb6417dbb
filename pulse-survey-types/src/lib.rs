//! Core types for the pulse survey.
//!
//! This crate provides the foundational, presentation-agnostic types:
//! - `Catalog` and `QuestionSpec` - The ordered, immutable question list
//! - `QuestionKind` - Rating, multi-select and free-text questions
//! - `DraftAnswer` - The answer currently being edited for one question
//! - `CommittedResponse` and `ResponseCollection` - Confirmed answers
//! - `SurveyBackend` - For implementing presentation shells

mod question;
pub use question::{
    DEFAULT_TEXT_LIMIT, EndpointLabels, MultiSelectQuestion, QuestionKind, QuestionSpec,
    RatingQuestion, TextQuestion,
};

mod catalog;
pub use catalog::Catalog;

mod draft;
pub use draft::{
    COMMENT_SEPARATOR, DEFAULT_RATING, DraftAnswer, MAX_RATING, MIN_RATING, MultiSelectDraft,
    OPTION_SEPARATOR, RatingDraft, TextDraft, rating_label,
};

mod response;
pub use response::{CommittedResponse, ResponseCollection};

mod error;
pub use error::{CatalogError, SurveyError};

mod traits;
pub use traits::SurveyBackend;
