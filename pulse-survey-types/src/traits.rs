use std::sync::Arc;

use crate::{Catalog, ResponseCollection};

/// Trait for presentation shells that walk a user through a survey.
///
/// Backends receive the catalog and return the committed responses.
/// They decide how to present the questions (terminal wizard, scripted
/// replay, etc.) and keep the Next control disabled until the current
/// draft is complete.
pub trait SurveyBackend {
    /// The error type for this backend.
    type Error: Into<anyhow::Error>;

    /// Run one survey flow to completion.
    ///
    /// # Returns
    /// * `Ok(responses)` once the last question is submitted
    /// * `Err` on cancellation or backend failure
    fn collect(&self, catalog: Arc<Catalog>) -> Result<ResponseCollection, Self::Error>;
}
