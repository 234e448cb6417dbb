use crate::{MultiSelectQuestion, QuestionKind, TextQuestion};

/// Lowest point on the rating scale.
pub const MIN_RATING: u8 = 1;

/// Highest point on the rating scale.
pub const MAX_RATING: u8 = 5;

/// Rating shown (and committed) while the user has not moved the slider.
pub const DEFAULT_RATING: u8 = 3;

/// Separator between the parts of a committed multi-select answer.
pub const OPTION_SEPARATOR: &str = ", ";

/// Separator between a committed rating and its comment.
pub const COMMENT_SEPARATOR: &str = " | Comment: ";

/// Human-readable label for a point on the rating scale.
pub fn rating_label(rating: u8) -> &'static str {
    match rating {
        0 | 1 => "Poor",
        2 => "Below Average",
        3 => "Average",
        4 => "Good",
        _ => "Excellent",
    }
}

/// The answer currently being edited for one question.
///
/// The variant always matches the kind of the question it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftAnswer {
    Rating(RatingDraft),
    MultiSelect(MultiSelectDraft),
    Text(TextDraft),
}

impl DraftAnswer {
    /// The empty draft a question starts with.
    pub fn empty_for(kind: &QuestionKind) -> Self {
        match kind {
            QuestionKind::Rating(_) => Self::Rating(RatingDraft::default()),
            QuestionKind::MultiSelect(_) => Self::MultiSelect(MultiSelectDraft::default()),
            QuestionKind::Text(_) => Self::Text(TextDraft::default()),
        }
    }

    /// Check whether this draft has the shape required by `kind`.
    pub fn matches(&self, kind: &QuestionKind) -> bool {
        matches!(
            (self, kind),
            (Self::Rating(_), QuestionKind::Rating(_))
                | (Self::MultiSelect(_), QuestionKind::MultiSelect(_))
                | (Self::Text(_), QuestionKind::Text(_))
        )
    }

    /// Completion predicate: whether this draft may be committed.
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Rating(draft) => draft.is_complete(),
            Self::MultiSelect(draft) => draft.is_complete(),
            Self::Text(draft) => draft.is_complete(),
        }
    }

    /// Bring the draft within what `kind` allows: the rating onto the scale,
    /// the selection onto known options (each once), custom text only where
    /// the question accepts it, and text within its length limit.
    ///
    /// A draft of another kind is left unchanged.
    pub fn conform(&mut self, kind: &QuestionKind) {
        match (self, kind) {
            (Self::Rating(draft), QuestionKind::Rating(_)) => {
                if let Some(rating) = draft.rating {
                    draft.set_rating(rating);
                }
            }
            (Self::MultiSelect(draft), QuestionKind::MultiSelect(question)) => {
                draft.conform(question)
            }
            (Self::Text(draft), QuestionKind::Text(question)) => draft.conform(question),
            _ => {}
        }
    }

    /// Serialize into the answer string stored in a committed response.
    pub fn to_answer_text(&self) -> String {
        match self {
            Self::Rating(draft) => draft.to_answer_text(),
            Self::MultiSelect(draft) => draft.to_answer_text(),
            Self::Text(draft) => draft.to_answer_text(),
        }
    }

    /// Rebuild a draft from a committed answer string.
    ///
    /// This reverses [`DraftAnswer::to_answer_text`]. Parsing is lenient:
    /// anything that cannot be interpreted is dropped rather than reported.
    pub fn from_answer_text(kind: &QuestionKind, answer: &str) -> Self {
        match kind {
            QuestionKind::Rating(_) => Self::Rating(RatingDraft::from_answer_text(answer)),
            QuestionKind::MultiSelect(question) => {
                Self::MultiSelect(MultiSelectDraft::from_answer_text(question, answer))
            }
            QuestionKind::Text(_) => Self::Text(TextDraft::new(answer)),
        }
    }

    pub fn as_rating(&self) -> Option<&RatingDraft> {
        match self {
            Self::Rating(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn as_rating_mut(&mut self) -> Option<&mut RatingDraft> {
        match self {
            Self::Rating(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn as_multi_select(&self) -> Option<&MultiSelectDraft> {
        match self {
            Self::MultiSelect(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn as_multi_select_mut(&mut self) -> Option<&mut MultiSelectDraft> {
        match self {
            Self::MultiSelect(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextDraft> {
        match self {
            Self::Text(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextDraft> {
        match self {
            Self::Text(draft) => Some(draft),
            _ => None,
        }
    }
}

/// Draft for a rating question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingDraft {
    /// The rating the user picked, `None` until the slider is moved.
    pub rating: Option<u8>,

    /// Optional free-text comment.
    pub comment: String,
}

impl RatingDraft {
    /// Create a draft with an explicit rating.
    pub fn with_rating(rating: u8) -> Self {
        let mut draft = Self::default();
        draft.set_rating(rating);
        draft
    }

    /// The rating displayed on the scale, always within it.
    pub fn effective_rating(&self) -> u8 {
        self.rating
            .unwrap_or(DEFAULT_RATING)
            .clamp(MIN_RATING, MAX_RATING)
    }

    /// Set the rating, clamped to the scale.
    pub fn set_rating(&mut self, rating: u8) {
        self.rating = Some(rating.clamp(MIN_RATING, MAX_RATING));
    }

    /// Move the slider by `delta` steps from its displayed position.
    pub fn nudge(&mut self, delta: i8) {
        let moved = i16::from(self.effective_rating()) + i16::from(delta);
        let clamped = moved.clamp(i16::from(MIN_RATING), i16::from(MAX_RATING));
        self.rating = Some(clamped as u8);
    }

    /// A comment alone completes the answer, even with the slider untouched.
    pub fn is_complete(&self) -> bool {
        self.rating.is_some() || !self.comment.trim().is_empty()
    }

    fn to_answer_text(&self) -> String {
        let mut answer = self.effective_rating().to_string();
        let comment = self.comment.trim();
        if !comment.is_empty() {
            answer.push_str(COMMENT_SEPARATOR);
            answer.push_str(comment);
        }
        answer
    }

    fn from_answer_text(answer: &str) -> Self {
        let (rating, comment) = match answer.split_once(COMMENT_SEPARATOR) {
            Some((rating, comment)) => (rating, comment),
            None => (answer, ""),
        };
        Self {
            rating: rating
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|r| (MIN_RATING..=MAX_RATING).contains(r)),
            comment: comment.to_string(),
        }
    }
}

/// Draft for a multi-select question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiSelectDraft {
    /// Selected options, in the order they were picked.
    pub selected: Vec<String>,

    /// The user's own answer, if the question allows one.
    pub custom: String,
}

impl MultiSelectDraft {
    /// Select `option` if it is not selected, deselect it otherwise.
    pub fn toggle(&mut self, option: &str) {
        if let Some(pos) = self.selected.iter().position(|o| o == option) {
            self.selected.remove(pos);
        } else {
            self.selected.push(option.to_string());
        }
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.iter().any(|o| o == option)
    }

    pub fn is_complete(&self) -> bool {
        !self.selected.is_empty() || !self.custom.trim().is_empty()
    }

    fn conform(&mut self, question: &MultiSelectQuestion) {
        let mut kept: Vec<String> = Vec::with_capacity(self.selected.len());
        for option in self.selected.drain(..) {
            if question.has_option(&option) && !kept.contains(&option) {
                kept.push(option);
            }
        }
        self.selected = kept;
        if !question.allow_custom_option {
            self.custom.clear();
        }
    }

    fn to_answer_text(&self) -> String {
        let mut parts: Vec<&str> = self.selected.iter().map(String::as_str).collect();
        let custom = self.custom.trim();
        if !custom.is_empty() {
            parts.push(custom);
        }
        parts.join(OPTION_SEPARATOR)
    }

    /// Options are matched whole, longest first, so an option that itself
    /// contains the separator is still recognised. Whatever follows the last
    /// recognised option is the custom text.
    fn from_answer_text(question: &MultiSelectQuestion, answer: &str) -> Self {
        let mut draft = Self::default();
        let mut rest = answer;
        while !rest.is_empty() {
            let matched = question
                .options
                .iter()
                .filter(|option| {
                    rest.strip_prefix(option.as_str())
                        .is_some_and(|tail| tail.is_empty() || tail.starts_with(OPTION_SEPARATOR))
                })
                .max_by_key(|option| option.len());
            let Some(option) = matched else {
                break;
            };
            if !draft.is_selected(option) {
                draft.selected.push(option.clone());
            }
            rest = &rest[option.len()..];
            rest = rest.strip_prefix(OPTION_SEPARATOR).unwrap_or(rest);
        }
        if question.allow_custom_option {
            draft.custom = rest.to_string();
        }
        draft
    }
}

/// Draft for a free-text question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDraft {
    pub text: String,
}

impl TextDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Number of characters typed so far.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Append a character unless the answer already holds `max_chars`.
    ///
    /// Returns whether the character was accepted.
    pub fn push_char(&mut self, c: char, max_chars: usize) -> bool {
        if self.char_count() >= max_chars {
            return false;
        }
        self.text.push(c);
        true
    }

    pub fn is_complete(&self) -> bool {
        !self.text.trim().is_empty()
    }

    fn conform(&mut self, question: &TextQuestion) {
        if let Some((end, _)) = self.text.char_indices().nth(question.max_chars) {
            self.text.truncate(end);
        }
    }

    fn to_answer_text(&self) -> String {
        self.text.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn friction() -> QuestionKind {
        QuestionKind::MultiSelect(MultiSelectQuestion::new(["A", "B", "C"]).with_custom_option())
    }

    #[test]
    fn empty_drafts_are_incomplete() {
        assert!(!DraftAnswer::Rating(RatingDraft::default()).is_complete());
        assert!(!DraftAnswer::MultiSelect(MultiSelectDraft::default()).is_complete());
        assert!(!DraftAnswer::Text(TextDraft::default()).is_complete());
    }

    #[test]
    fn rating_comment_alone_completes() {
        let draft = RatingDraft {
            rating: None,
            comment: "  the app is slow ".into(),
        };
        assert!(draft.is_complete());
        assert_eq!(
            DraftAnswer::Rating(draft).to_answer_text(),
            "3 | Comment: the app is slow"
        );
    }

    #[test]
    fn rating_whitespace_comment_does_not_complete() {
        let draft = RatingDraft {
            rating: None,
            comment: "   ".into(),
        };
        assert!(!draft.is_complete());
    }

    #[test]
    fn rating_nudge_starts_from_midpoint_and_clamps() {
        let mut draft = RatingDraft::default();
        draft.nudge(1);
        assert_eq!(draft.rating, Some(4));
        draft.nudge(5);
        assert_eq!(draft.rating, Some(MAX_RATING));

        let mut draft = RatingDraft::default();
        draft.nudge(-10);
        assert_eq!(draft.rating, Some(MIN_RATING));
    }

    #[test]
    fn set_rating_clamps() {
        assert_eq!(RatingDraft::with_rating(9).rating, Some(5));
        assert_eq!(RatingDraft::with_rating(0).rating, Some(1));
    }

    #[test]
    fn rating_restores_comment_with_separator_inside() {
        let draft = RatingDraft {
            rating: Some(2),
            comment: "see | Comment: above".into(),
        };
        let text = DraftAnswer::Rating(draft.clone()).to_answer_text();
        let kind = QuestionKind::Rating(crate::RatingQuestion::new("low", "high"));
        assert_eq!(
            DraftAnswer::from_answer_text(&kind, &text),
            DraftAnswer::Rating(draft)
        );
    }

    #[test]
    fn rating_parse_rejects_out_of_scale() {
        let kind = QuestionKind::Rating(crate::RatingQuestion::new("low", "high"));
        let draft = DraftAnswer::from_answer_text(&kind, "7");
        assert_eq!(draft.as_rating().unwrap().rating, None);
    }

    #[test]
    fn multiselect_joins_options_then_custom() {
        let mut draft = MultiSelectDraft::default();
        draft.toggle("X");
        draft.custom = " Z ".into();
        assert_eq!(DraftAnswer::MultiSelect(draft).to_answer_text(), "X, Z");
    }

    #[test]
    fn multiselect_toggle_twice_deselects() {
        let mut draft = MultiSelectDraft::default();
        draft.toggle("A");
        draft.toggle("B");
        draft.toggle("A");
        assert_eq!(draft.selected, vec!["B".to_string()]);
        assert!(!draft.is_selected("A"));
    }

    #[test]
    fn multiselect_custom_only_completes() {
        let draft = MultiSelectDraft {
            selected: Vec::new(),
            custom: "other".into(),
        };
        assert!(draft.is_complete());
    }

    #[test]
    fn multiselect_restores_selection_and_custom() {
        let kind = friction();
        let draft = DraftAnswer::from_answer_text(&kind, "A, C, other reason");
        let draft = draft.as_multi_select().unwrap();
        assert_eq!(draft.selected, vec!["A".to_string(), "C".to_string()]);
        assert_eq!(draft.custom, "other reason");
    }

    #[test]
    fn multiselect_custom_with_separator_survives() {
        let kind = friction();
        let draft = DraftAnswer::from_answer_text(&kind, "B, red, green");
        let draft = draft.as_multi_select().unwrap();
        assert_eq!(draft.selected, vec!["B".to_string()]);
        assert_eq!(draft.custom, "red, green");
    }

    #[test]
    fn multiselect_restores_options_containing_separator() {
        let kind = QuestionKind::MultiSelect(MultiSelectQuestion::new([
            "Yes, with payroll systems",
            "Yes",
            "No, it works well",
        ]));
        let answer = "Yes, with payroll systems, No, it works well";
        let draft = DraftAnswer::from_answer_text(&kind, answer);
        let draft = draft.as_multi_select().unwrap();
        assert_eq!(
            draft.selected,
            vec![
                "Yes, with payroll systems".to_string(),
                "No, it works well".to_string()
            ]
        );
        assert_eq!(draft.custom, "");

        let draft = DraftAnswer::from_answer_text(&kind, "Yes, No, it works well");
        assert_eq!(
            draft.as_multi_select().unwrap().selected,
            vec!["Yes".to_string(), "No, it works well".to_string()]
        );
    }

    #[test]
    fn multiselect_without_custom_drops_leftover() {
        let kind = QuestionKind::MultiSelect(MultiSelectQuestion::new(["A", "B"]));
        let draft = DraftAnswer::from_answer_text(&kind, "A, something else");
        let draft = draft.as_multi_select().unwrap();
        assert_eq!(draft.selected, vec!["A".to_string()]);
        assert_eq!(draft.custom, "");
    }

    #[test]
    fn multiselect_custom_equal_to_option_is_not_duplicated() {
        let kind = friction();
        let draft = DraftAnswer::from_answer_text(&kind, "A, A");
        let mut draft = draft.as_multi_select().unwrap().clone();
        assert_eq!(draft.selected, vec!["A".to_string()]);
        draft.toggle("A");
        assert!(!draft.is_selected("A"));
    }

    #[test]
    fn conform_clamps_rating_and_filters_selection() {
        let kind = QuestionKind::Rating(crate::RatingQuestion::new("low", "high"));
        let mut draft = DraftAnswer::Rating(RatingDraft {
            rating: Some(9),
            comment: String::new(),
        });
        draft.conform(&kind);
        assert_eq!(draft.as_rating().unwrap().rating, Some(MAX_RATING));

        let kind = QuestionKind::MultiSelect(MultiSelectQuestion::new(["A", "B"]));
        let mut draft = DraftAnswer::MultiSelect(MultiSelectDraft {
            selected: vec!["Z".into(), "B".into(), "B".into()],
            custom: "hidden".into(),
        });
        draft.conform(&kind);
        let draft = draft.as_multi_select().unwrap();
        assert_eq!(draft.selected, vec!["B".to_string()]);
        assert_eq!(draft.custom, "");
    }

    #[test]
    fn conform_truncates_text_to_limit() {
        let kind = QuestionKind::Text(TextQuestion::new("").with_max_chars(3));
        let mut draft = DraftAnswer::Text(TextDraft::new("héllo"));
        draft.conform(&kind);
        assert_eq!(draft.as_text().unwrap().text, "hél");
    }

    #[test]
    fn effective_rating_stays_on_scale() {
        let draft = RatingDraft {
            rating: Some(0),
            comment: String::new(),
        };
        assert_eq!(draft.effective_rating(), MIN_RATING);
    }

    #[test]
    fn text_limit_refuses_overflow() {
        let mut draft = TextDraft::new("ab");
        assert!(draft.push_char('c', 3));
        assert!(!draft.push_char('d', 3));
        assert_eq!(draft.text, "abc");
        assert_eq!(draft.char_count(), 3);
    }

    #[test]
    fn draft_matches_kind() {
        let kind = friction();
        let draft = DraftAnswer::empty_for(&kind);
        assert!(draft.matches(&kind));
        assert!(!DraftAnswer::Text(TextDraft::default()).matches(&kind));
    }

    #[test]
    fn rating_labels() {
        assert_eq!(rating_label(1), "Poor");
        assert_eq!(rating_label(3), "Average");
        assert_eq!(rating_label(5), "Excellent");
    }
}
