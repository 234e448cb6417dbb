//! # pulse-ratatui-wizard
//!
//! Terminal wizard for the pulse survey.
//!
//! [`WizardView`] renders one [`pulse_survey::SurveyFlow`] into any area of a
//! ratatui frame and turns key presses into draft edits and navigation, so a
//! host application can embed it in its own event loop. [`RatatuiBackend`]
//! runs it full screen as a [`pulse_survey::SurveyBackend`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pulse_survey::{Catalog, SurveyBackend};
//! use pulse_ratatui_wizard::RatatuiBackend;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let responses = RatatuiBackend::new().collect(Arc::new(Catalog::hr_pulse()))?;
//!     for response in &responses {
//!         println!("{}: {}", response.question_id(), response.answer_text());
//!     }
//!     Ok(())
//! }
//! ```

mod backend;
mod theme;
mod view;

pub use backend::{
    CrosstermTerminal, RatatuiBackend, RatatuiError, THANK_YOU, restore_terminal, setup_terminal,
};
pub use theme::Theme;
pub use view::{Focus, RATING_HINT, WizardAction, WizardView};
