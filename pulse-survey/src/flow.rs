use std::{fmt, sync::Arc};

use pulse_survey_types::{
    Catalog, CommittedResponse, DraftAnswer, QuestionSpec, ResponseCollection,
};
use tracing::{debug, info};

use crate::AnswerStore;

type CompletionCallback = Box<dyn FnOnce(ResponseCollection)>;
type CloseCallback = Box<dyn FnOnce()>;

/// Where a flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Showing the question at this catalog index.
    At(usize),
    /// The last question was submitted. Terminal.
    Done,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Moved from one question to another.
    Moved { from: usize, to: usize },
    /// The last answer was committed and the responses were handed off.
    Completed,
    /// The request was not valid in the current state; nothing changed.
    Rejected,
}

/// Position within a flow, for progress displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based number of the question on screen.
    pub position: usize,
    pub total: usize,
}

impl Progress {
    /// Share of the survey reached, rounded to whole percent.
    pub fn percent(&self) -> u16 {
        if self.total == 0 {
            return 100;
        }
        ((self.position * 100 + self.total / 2) / self.total) as u16
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.position as f64 / self.total as f64
    }
}

/// One run of the survey wizard, from the first question to completion.
///
/// The flow owns the draft for the question on screen and the responses
/// committed so far. Navigation requests that are not allowed (advancing with
/// an incomplete draft, going back from the first question, anything after
/// completion) are ignored and reported as [`Transition::Rejected`].
pub struct SurveyFlow {
    catalog: Arc<Catalog>,
    state: FlowState,
    draft: DraftAnswer,
    store: AnswerStore,
    on_complete: Option<CompletionCallback>,
    on_close: Option<CloseCallback>,
}

impl SurveyFlow {
    /// Open a flow at the first question.
    ///
    /// `on_complete` receives the full response collection once, when the
    /// last question is submitted.
    pub fn new(
        catalog: Arc<Catalog>,
        on_complete: impl FnOnce(ResponseCollection) + 'static,
    ) -> Self {
        let draft = DraftAnswer::empty_for(catalog.get(0).kind());
        let store = AnswerStore::new(catalog.count());
        debug!(questions = catalog.count(), "survey flow opened");
        Self {
            catalog,
            state: FlowState::At(0),
            draft,
            store,
            on_complete: Some(Box::new(on_complete)),
            on_close: None,
        }
    }

    /// Register a callback for [`SurveyFlow::close`].
    pub fn on_close(mut self, on_close: impl FnOnce() + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == FlowState::Done
    }

    /// Index of the question on screen, `None` once done.
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            FlowState::At(index) => Some(index),
            FlowState::Done => None,
        }
    }

    /// The question on screen, `None` once done.
    pub fn current_question(&self) -> Option<&QuestionSpec> {
        self.current_index().map(|index| self.catalog.get(index))
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index() == Some(self.catalog.count() - 1)
    }

    pub fn progress(&self) -> Progress {
        let total = self.catalog.count();
        let position = match self.state {
            FlowState::At(index) => index + 1,
            FlowState::Done => total,
        };
        Progress { position, total }
    }

    /// Responses committed so far.
    pub fn committed(&self) -> &ResponseCollection {
        self.store.responses()
    }

    pub fn draft(&self) -> &DraftAnswer {
        &self.draft
    }

    /// Edit the current draft in place. `None` once done.
    pub fn draft_mut(&mut self) -> Option<&mut DraftAnswer> {
        match self.state {
            FlowState::At(_) => Some(&mut self.draft),
            FlowState::Done => None,
        }
    }

    /// Replace the draft for the current question.
    ///
    /// The draft is conformed to the question (see [`DraftAnswer::conform`]);
    /// the completion rule is checked by [`SurveyFlow::can_advance`]. A draft
    /// of the wrong kind is ignored.
    pub fn set_draft(&mut self, draft: DraftAnswer) {
        let Some(question) = self.current_question() else {
            debug!("draft ignored: flow is done");
            return;
        };
        if !draft.matches(question.kind()) {
            debug!(
                question = question.id(),
                expected = question.kind().name(),
                "draft ignored: kind mismatch"
            );
            return;
        }
        let mut draft = draft;
        draft.conform(question.kind());
        self.draft = draft;
    }

    /// Whether the current draft satisfies its question's completion rule.
    pub fn can_advance(&self) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        let mut draft = self.draft.clone();
        draft.conform(question.kind());
        draft.is_complete()
    }

    /// Whether there is a previous question to go back to.
    pub fn can_retreat(&self) -> bool {
        matches!(self.state, FlowState::At(index) if index > 0)
    }

    /// Commit the current draft and move on.
    ///
    /// On the last question this finalizes the flow: the collection is
    /// handed to the completion callback and the flow becomes terminal.
    pub fn advance(&mut self) -> Transition {
        let FlowState::At(index) = self.state else {
            debug!("advance rejected: flow is done");
            return Transition::Rejected;
        };
        let question = self.catalog.get(index);
        self.draft.conform(question.kind());
        if !self.draft.is_complete() {
            debug!(index, "advance rejected: draft incomplete");
            return Transition::Rejected;
        }

        let response = CommittedResponse::new(
            question.id(),
            question.prompt(),
            self.draft.to_answer_text(),
        );
        debug!(question = question.id(), answer = response.answer_text(), "response committed");
        if !self.store.commit(response) {
            debug!(index, "advance rejected: answer store full");
            return Transition::Rejected;
        }

        let next = index + 1;
        if let Some(next_question) = self.catalog.try_get(next) {
            self.draft = DraftAnswer::empty_for(next_question.kind());
            self.state = FlowState::At(next);
            return Transition::Moved {
                from: index,
                to: next,
            };
        }

        self.finish();
        Transition::Completed
    }

    /// Go back one question, restoring its committed answer as the draft.
    pub fn retreat(&mut self) -> Transition {
        let FlowState::At(index) = self.state else {
            debug!("retreat rejected: flow is done");
            return Transition::Rejected;
        };
        if index == 0 {
            debug!("retreat rejected: already at first question");
            return Transition::Rejected;
        }
        let Some(removed) = self.store.take_last() else {
            debug!(index, "retreat rejected: nothing committed");
            return Transition::Rejected;
        };

        let previous = index - 1;
        let question = self.catalog.get(previous);
        self.draft = DraftAnswer::from_answer_text(question.kind(), removed.answer_text());
        self.state = FlowState::At(previous);
        debug!(question = question.id(), "response restored as draft");
        Transition::Moved {
            from: index,
            to: previous,
        }
    }

    /// Close the flow without submitting. Signals the close callback unless
    /// the flow already completed; all state is discarded.
    pub fn close(mut self) {
        if self.is_done() {
            return;
        }
        info!(
            answered = self.store.len(),
            total = self.catalog.count(),
            "survey closed before completion"
        );
        if let Some(on_close) = self.on_close.take() {
            on_close();
        }
    }

    fn finish(&mut self) {
        let capacity = self.catalog.count();
        let responses =
            std::mem::replace(&mut self.store, AnswerStore::new(capacity)).into_collection();
        let last = self.catalog.get(capacity - 1);
        self.draft = DraftAnswer::empty_for(last.kind());
        self.state = FlowState::Done;
        info!(responses = responses.len(), "survey completed");
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(responses);
        }
    }
}

impl fmt::Debug for SurveyFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurveyFlow")
            .field("state", &self.state)
            .field("draft", &self.draft)
            .field("committed", &self.store.len())
            .field("questions", &self.catalog.count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pulse_survey_types::{MultiSelectDraft, RatingDraft, TextDraft};

    use super::*;

    type Sink = Rc<RefCell<Vec<ResponseCollection>>>;

    fn rating_then_text() -> Arc<Catalog> {
        Arc::new(
            Catalog::new(vec![
                QuestionSpec::rating("q1", "Rate us", "Poor", "Excellent"),
                QuestionSpec::text("q2", "Tell us more", "Type your answer"),
            ])
            .unwrap(),
        )
    }

    fn flow_with_sink(catalog: Arc<Catalog>) -> (SurveyFlow, Sink) {
        let sink: Sink = Rc::default();
        let handle = Rc::clone(&sink);
        let flow = SurveyFlow::new(catalog, move |responses| handle.borrow_mut().push(responses));
        (flow, sink)
    }

    #[test]
    fn starts_at_first_question() {
        let (flow, _) = flow_with_sink(rating_then_text());
        assert_eq!(flow.state(), FlowState::At(0));
        assert_eq!(flow.current_question().unwrap().id(), "q1");
        assert!(flow.committed().is_empty());
        assert!(!flow.can_advance());
        assert!(!flow.can_retreat());
    }

    #[test]
    fn rating_then_text_scenario() {
        let (mut flow, sink) = flow_with_sink(rating_then_text());

        flow.set_draft(DraftAnswer::Rating(RatingDraft::with_rating(4)));
        assert_eq!(flow.advance(), Transition::Moved { from: 0, to: 1 });
        assert_eq!(flow.state(), FlowState::At(1));
        assert_eq!(flow.committed().len(), 1);
        assert_eq!(flow.committed().get("q1").unwrap().answer_text(), "4");
        assert!(sink.borrow().is_empty());

        flow.set_draft(DraftAnswer::Text(TextDraft::new("needs more docs")));
        assert_eq!(flow.advance(), Transition::Completed);
        assert_eq!(flow.state(), FlowState::Done);

        let sink = sink.borrow();
        assert_eq!(sink.len(), 1);
        let answers: Vec<_> = sink[0]
            .iter()
            .map(|r| (r.question_id(), r.answer_text()))
            .collect();
        assert_eq!(answers, vec![("q1", "4"), ("q2", "needs more docs")]);
        assert_eq!(sink[0].get("q1").unwrap().question_prompt(), "Rate us");
    }

    #[test]
    fn advance_with_incomplete_draft_is_noop() {
        let (mut flow, _) = flow_with_sink(rating_then_text());
        assert_eq!(flow.advance(), Transition::Rejected);
        assert_eq!(flow.state(), FlowState::At(0));
        assert!(flow.committed().is_empty());
    }

    #[test]
    fn retreat_at_first_question_is_noop() {
        let (mut flow, _) = flow_with_sink(rating_then_text());
        flow.set_draft(DraftAnswer::Rating(RatingDraft::with_rating(2)));
        assert_eq!(flow.retreat(), Transition::Rejected);
        assert_eq!(flow.state(), FlowState::At(0));
        assert_eq!(flow.draft().as_rating().unwrap().rating, Some(2));
    }

    #[test]
    fn retreat_restores_rating_and_comment() {
        let (mut flow, _) = flow_with_sink(rating_then_text());
        let draft = RatingDraft {
            rating: Some(5),
            comment: "great support".into(),
        };
        flow.set_draft(DraftAnswer::Rating(draft.clone()));
        flow.advance();

        assert_eq!(flow.retreat(), Transition::Moved { from: 1, to: 0 });
        assert_eq!(flow.draft(), &DraftAnswer::Rating(draft));
        assert!(flow.committed().is_empty());
    }

    #[test]
    fn comment_alone_passes_rating_gate() {
        let (mut flow, _) = flow_with_sink(rating_then_text());
        flow.draft_mut()
            .and_then(DraftAnswer::as_rating_mut)
            .unwrap()
            .comment = "no slider".into();
        assert!(flow.can_advance());
        flow.advance();
        assert_eq!(
            flow.committed().get("q1").unwrap().answer_text(),
            "3 | Comment: no slider"
        );
    }

    #[test]
    fn wrong_kind_draft_is_ignored() {
        let (mut flow, _) = flow_with_sink(rating_then_text());
        flow.set_draft(DraftAnswer::Text(TextDraft::new("not a rating")));
        assert!(flow.draft().as_rating().is_some());
        assert!(!flow.can_advance());
    }

    #[test]
    fn multiselect_round_trip() {
        let catalog = Arc::new(
            Catalog::new(vec![
                QuestionSpec::multi_select("friction", "Pain points?", ["A", "B", "C"], true),
                QuestionSpec::text("more", "Anything else?", ""),
            ])
            .unwrap(),
        );
        let (mut flow, _) = flow_with_sink(catalog);
        let draft = MultiSelectDraft {
            selected: vec!["A".into(), "C".into()],
            custom: "other reason".into(),
        };
        flow.set_draft(DraftAnswer::MultiSelect(draft.clone()));
        flow.advance();
        assert_eq!(
            flow.committed().get("friction").unwrap().answer_text(),
            "A, C, other reason"
        );

        flow.retreat();
        assert_eq!(flow.draft(), &DraftAnswer::MultiSelect(draft));
    }

    #[test]
    fn out_of_scale_rating_is_clamped_and_round_trips() {
        let (mut flow, _) = flow_with_sink(rating_then_text());
        flow.set_draft(DraftAnswer::Rating(RatingDraft {
            rating: Some(9),
            comment: String::new(),
        }));
        assert_eq!(flow.draft().as_rating().unwrap().rating, Some(5));
        let before = flow.draft().clone();

        flow.advance();
        assert_eq!(flow.committed().get("q1").unwrap().answer_text(), "5");
        flow.retreat();
        assert_eq!(flow.draft(), &before);
        assert!(flow.can_advance());
    }

    #[test]
    fn edited_rating_below_scale_commits_minimum() {
        let (mut flow, _) = flow_with_sink(rating_then_text());
        flow.draft_mut()
            .and_then(DraftAnswer::as_rating_mut)
            .unwrap()
            .rating = Some(0);
        flow.advance();
        assert_eq!(flow.committed().get("q1").unwrap().answer_text(), "1");
    }

    #[test]
    fn unknown_options_do_not_open_the_gate() {
        let question = QuestionSpec::multi_select("ms", "Pick", ["X", "Y"], false);
        let catalog = Arc::new(Catalog::new(vec![question]).unwrap());
        let (mut flow, sink) = flow_with_sink(catalog);
        flow.set_draft(DraftAnswer::MultiSelect(MultiSelectDraft {
            selected: vec!["Nope".into()],
            custom: "hidden".into(),
        }));
        assert_eq!(flow.draft(), &DraftAnswer::MultiSelect(MultiSelectDraft::default()));
        assert!(!flow.can_advance());

        flow.draft_mut()
            .and_then(DraftAnswer::as_multi_select_mut)
            .unwrap()
            .selected = vec!["Nope".into(), "Y".into()];
        assert!(flow.can_advance());
        assert_eq!(flow.advance(), Transition::Completed);
        assert_eq!(sink.borrow()[0].get("ms").unwrap().answer_text(), "Y");
    }

    #[test]
    fn multiselect_answer_string() {
        let catalog = Arc::new(
            Catalog::new(vec![QuestionSpec::multi_select("ms", "Pick", ["X", "Y"], true)]).unwrap(),
        );
        let (mut flow, sink) = flow_with_sink(catalog);
        let ms = flow.draft_mut().and_then(DraftAnswer::as_multi_select_mut).unwrap();
        ms.toggle("X");
        ms.custom = "Z".into();
        assert_eq!(flow.advance(), Transition::Completed);
        assert_eq!(sink.borrow()[0].get("ms").unwrap().answer_text(), "X, Z");
    }

    #[test]
    fn n_advances_reach_done_in_catalog_order() {
        let catalog = Arc::new(Catalog::hr_pulse());
        let (mut flow, sink) = flow_with_sink(Arc::clone(&catalog));

        for question in catalog.iter() {
            assert_eq!(flow.current_question().unwrap().id(), question.id());
            let draft = match question.kind() {
                pulse_survey_types::QuestionKind::Rating(_) => {
                    DraftAnswer::Rating(RatingDraft::with_rating(4))
                }
                pulse_survey_types::QuestionKind::MultiSelect(ms) => {
                    let mut draft = MultiSelectDraft::default();
                    draft.toggle(&ms.options[0]);
                    DraftAnswer::MultiSelect(draft)
                }
                pulse_survey_types::QuestionKind::Text(_) => {
                    DraftAnswer::Text(TextDraft::new("ok"))
                }
            };
            flow.set_draft(draft);
            assert!(flow.can_advance());
            flow.advance();
        }

        assert!(flow.is_done());
        let sink = sink.borrow();
        assert_eq!(sink.len(), 1);
        let ids: Vec<_> = sink[0].iter().map(|r| r.question_id()).collect();
        let expected: Vec<_> = catalog.iter().map(|q| q.id()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn done_is_terminal_and_handoff_happens_once() {
        let catalog = Arc::new(Catalog::new(vec![QuestionSpec::text("q", "Say", "")]).unwrap());
        let (mut flow, sink) = flow_with_sink(catalog);
        flow.set_draft(DraftAnswer::Text(TextDraft::new("hi")));
        assert_eq!(flow.advance(), Transition::Completed);

        assert!(flow.draft_mut().is_none());
        assert!(!flow.can_advance());
        assert_eq!(flow.advance(), Transition::Rejected);
        assert_eq!(flow.retreat(), Transition::Rejected);
        assert!(flow.committed().is_empty());
        assert_eq!(sink.borrow().len(), 1);
    }

    #[test]
    fn close_signals_once_and_not_after_completion() {
        let closed = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&closed);
        let (flow, _) = flow_with_sink(rating_then_text());
        let flow = flow.on_close(move || *counter.borrow_mut() += 1);
        flow.close();
        assert_eq!(*closed.borrow(), 1);

        let counter = Rc::clone(&closed);
        let catalog = Arc::new(Catalog::new(vec![QuestionSpec::text("q", "Say", "")]).unwrap());
        let (flow, _) = flow_with_sink(catalog);
        let mut flow = flow.on_close(move || *counter.borrow_mut() += 1);
        flow.set_draft(DraftAnswer::Text(TextDraft::new("hi")));
        flow.advance();
        flow.close();
        assert_eq!(*closed.borrow(), 1);
    }

    #[test]
    fn progress_reports_position() {
        let (mut flow, _) = flow_with_sink(rating_then_text());
        assert_eq!(flow.progress(), Progress { position: 1, total: 2 });
        assert_eq!(flow.progress().percent(), 50);
        assert!(!flow.is_last_question());

        flow.set_draft(DraftAnswer::Rating(RatingDraft::with_rating(1)));
        flow.advance();
        assert!(flow.is_last_question());
        assert_eq!(flow.progress().percent(), 100);
    }

    #[test]
    fn percent_rounds() {
        let progress = Progress { position: 1, total: 6 };
        assert_eq!(progress.percent(), 17);
        let progress = Progress { position: 4, total: 6 };
        assert_eq!(progress.percent(), 67);
    }
}
