use std::collections::HashSet;

use serde::Deserialize;

use crate::{
    CatalogError, MultiSelectQuestion, QuestionKind, QuestionSpec, RatingQuestion, TextQuestion,
};

/// The ordered, immutable list of questions a survey walks through.
///
/// A catalog is validated once when it is built and never mutated afterwards.
/// Question order defines traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    questions: Vec<QuestionSpec>,
}

impl Catalog {
    /// Build a catalog, validating ids and kind-specific configuration.
    pub fn new(questions: Vec<QuestionSpec>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for (position, question) in questions.iter().enumerate() {
            if question.id().trim().is_empty() {
                return Err(CatalogError::EmptyId(position));
            }
            if !seen.insert(question.id()) {
                return Err(CatalogError::DuplicateId(question.id().to_string()));
            }
            match question.kind() {
                QuestionKind::Rating(_) => {}
                QuestionKind::MultiSelect(ms) => {
                    if ms.options.is_empty() && !ms.allow_custom_option {
                        return Err(CatalogError::NoOptions(question.id().to_string()));
                    }
                    let mut options = HashSet::new();
                    for option in &ms.options {
                        if !options.insert(option.as_str()) {
                            return Err(CatalogError::DuplicateOption {
                                id: question.id().to_string(),
                                option: option.clone(),
                            });
                        }
                    }
                }
                QuestionKind::Text(text) => {
                    if text.max_chars == 0 {
                        return Err(CatalogError::ZeroTextLimit(question.id().to_string()));
                    }
                }
            }
        }

        Ok(Self { questions })
    }

    /// Get the question at `index`.
    ///
    /// An out-of-range index is a programming error: debug builds panic,
    /// release builds clamp to the last question.
    pub fn get(&self, index: usize) -> &QuestionSpec {
        debug_assert!(
            index < self.questions.len(),
            "question index {index} out of range for catalog of {}",
            self.questions.len()
        );
        let last = self.questions.len() - 1;
        &self.questions[index.min(last)]
    }

    /// Get the question at `index`, if it exists.
    pub fn try_get(&self, index: usize) -> Option<&QuestionSpec> {
        self.questions.get(index)
    }

    /// Get the number of questions.
    pub fn count(&self) -> usize {
        self.questions.len()
    }

    /// Find the position of the question with the given id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id() == id)
    }

    /// Get all questions in traversal order.
    pub fn questions(&self) -> &[QuestionSpec] {
        &self.questions
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionSpec> {
        self.questions.iter()
    }

    /// Load a catalog from TOML.
    ///
    /// # Example
    /// ```
    /// use pulse_survey_types::Catalog;
    ///
    /// let catalog = Catalog::from_toml_str(r#"
    ///     [[questions]]
    ///     id = "mood"
    ///     prompt = "How is the team doing?"
    ///     kind = "rating"
    ///     low = "Poor"
    ///     high = "Great"
    ///
    ///     [[questions]]
    ///     id = "ideas"
    ///     prompt = "What should we change?"
    ///     kind = "text"
    /// "#).unwrap();
    ///
    /// assert_eq!(catalog.count(), 2);
    /// assert_eq!(catalog.index_of("ideas"), Some(1));
    /// ```
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        let questions = file
            .questions
            .into_iter()
            .map(QuestionRecord::into_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(questions)
    }

    /// The built-in HR pulse survey shown on the dashboard.
    pub fn hr_pulse() -> Self {
        let questions = vec![
            QuestionSpec::rating(
                "benefits_satisfaction",
                "How satisfied are your employees with Loop Health benefits?",
                "😞 Poor",
                "Excellent 🤩",
            ),
            QuestionSpec::multi_select(
                "employee_friction",
                "What is the biggest friction point your employees face when using Loop Health?",
                [
                    "Finding the right doctor/provider",
                    "Understanding what's covered",
                    "Claim reimbursement process",
                    "Getting pre-approvals",
                    "Using the app/website",
                    "No major friction",
                ],
                true,
            ),
            QuestionSpec::rating(
                "support_helpfulness",
                "How helpful is Loop Health support when you need help?",
                "Not helpful",
                "Very helpful",
            ),
            QuestionSpec::text(
                "dashboard_missing_info",
                "Is there any important info or report missing from the dashboard that would help you in your work?",
                "Type your answer",
            ),
            QuestionSpec::multi_select(
                "hr_tools_integration",
                "Do you wish Loop Health worked better with your other HR tools?",
                [
                    "Yes, with HR management software",
                    "Yes, with payroll systems",
                    "Yes, for exporting/importing data",
                    "No, it works well",
                    "Not sure",
                ],
                false,
            ),
            QuestionSpec::text(
                "change_or_add",
                "Anything else you'd like to change or improve about Loop Health?",
                "Type your answer",
            ),
        ];

        Self { questions }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a QuestionSpec;
    type IntoIter = std::slice::Iter<'a, QuestionSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum KindTag {
    Rating,
    #[serde(alias = "multi_select")]
    Multiselect,
    Text,
}

/// One `[[questions]]` table as written in a catalog file.
#[derive(Debug, Deserialize)]
struct QuestionRecord {
    id: String,
    prompt: String,
    kind: KindTag,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    allow_custom_option: bool,
    low: Option<String>,
    high: Option<String>,
    placeholder: Option<String>,
    max_chars: Option<usize>,
}

impl QuestionRecord {
    fn into_spec(self) -> Result<QuestionSpec, CatalogError> {
        let kind = match self.kind {
            KindTag::Rating => {
                let missing = |field| CatalogError::MissingField {
                    id: self.id.clone(),
                    field,
                    kind: "rating",
                };
                let low = self.low.clone().ok_or_else(|| missing("low"))?;
                let high = self.high.clone().ok_or_else(|| missing("high"))?;
                QuestionKind::Rating(RatingQuestion::new(low, high))
            }
            KindTag::Multiselect => QuestionKind::MultiSelect(MultiSelectQuestion {
                options: self.options,
                allow_custom_option: self.allow_custom_option,
            }),
            KindTag::Text => {
                let mut text = match self.placeholder {
                    Some(placeholder) => TextQuestion::new(placeholder),
                    None => TextQuestion::default(),
                };
                if let Some(max_chars) = self.max_chars {
                    text = text.with_max_chars(max_chars);
                }
                QuestionKind::Text(text)
            }
        };
        Ok(QuestionSpec::new(self.id, self.prompt, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_questions() -> Catalog {
        Catalog::new(vec![
            QuestionSpec::rating("q1", "Rate us", "Poor", "Great"),
            QuestionSpec::text("q2", "Tell us more", "Type here"),
        ])
        .unwrap()
    }

    #[test]
    fn lookup() {
        let catalog = two_questions();
        assert_eq!(catalog.count(), 2);
        assert_eq!(catalog.get(1).id(), "q2");
        assert_eq!(catalog.index_of("q1"), Some(0));
        assert_eq!(catalog.index_of("missing"), None);
        assert!(catalog.try_get(2).is_none());
    }

    #[test]
    fn get_is_stable() {
        let catalog = two_questions();
        assert_eq!(catalog.get(0), catalog.get(0));
        assert_eq!(catalog.get(0).prompt(), "Rate us");
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "out of range"))]
    fn get_out_of_range_clamps_in_release() {
        let catalog = two_questions();
        assert_eq!(catalog.get(10).id(), "q2");
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = Catalog::new(vec![
            QuestionSpec::text("same", "One", ""),
            QuestionSpec::text("same", "Two", ""),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "same"));
    }

    #[test]
    fn rejects_blank_id() {
        let result = Catalog::new(vec![QuestionSpec::text("  ", "One", "")]);
        assert!(matches!(result, Err(CatalogError::EmptyId(0))));
    }

    #[test]
    fn rejects_multiselect_without_options() {
        let empty: [&str; 0] = [];
        let result = Catalog::new(vec![QuestionSpec::multi_select("ms", "Pick", empty, false)]);
        assert!(matches!(result, Err(CatalogError::NoOptions(_))));

        let custom_only = Catalog::new(vec![QuestionSpec::multi_select("ms", "Pick", empty, true)]);
        assert!(custom_only.is_ok());
    }

    #[test]
    fn rejects_duplicate_options() {
        let result = Catalog::new(vec![QuestionSpec::multi_select(
            "ms",
            "Pick",
            ["X", "X"],
            false,
        )]);
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateOption { option, .. }) if option == "X"
        ));
    }

    #[test]
    fn hr_pulse_is_valid() {
        let builtin = Catalog::hr_pulse();
        let validated = Catalog::new(builtin.questions().to_vec()).unwrap();
        assert_eq!(validated.count(), 6);
        assert_eq!(validated.get(0).id(), "benefits_satisfaction");
        assert_eq!(validated.get(5).id(), "change_or_add");
    }

    #[test]
    fn loads_all_kinds_from_toml() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[questions]]
            id = "q1"
            prompt = "Rate"
            kind = "rating"
            low = "Bad"
            high = "Good"

            [[questions]]
            id = "q2"
            prompt = "Pick"
            kind = "multiselect"
            options = ["X", "Y"]
            allow_custom_option = true

            [[questions]]
            id = "q3"
            prompt = "Write"
            kind = "text"
            max_chars = 80
            "#,
        )
        .unwrap();

        assert_eq!(catalog.count(), 3);
        match catalog.get(1).kind() {
            QuestionKind::MultiSelect(ms) => {
                assert_eq!(ms.options.len(), 2);
                assert!(ms.allow_custom_option);
            }
            _ => panic!("Expected MultiSelect question kind"),
        }
        match catalog.get(2).kind() {
            QuestionKind::Text(text) => {
                assert_eq!(text.max_chars, 80);
                assert_eq!(text.placeholder, "Type your answer...");
            }
            _ => panic!("Expected Text question kind"),
        }
    }

    #[test]
    fn toml_rating_requires_labels() {
        let result = Catalog::from_toml_str(
            r#"
            [[questions]]
            id = "q1"
            prompt = "Rate"
            kind = "rating"
            low = "Bad"
            "#,
        );
        assert!(matches!(
            result,
            Err(CatalogError::MissingField { field: "high", .. })
        ));
    }

    #[test]
    fn toml_syntax_error() {
        let result = Catalog::from_toml_str("questions = [");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn toml_unknown_kind() {
        let result = Catalog::from_toml_str(
            r#"
            [[questions]]
            id = "q1"
            prompt = "Slide"
            kind = "slider"
            "#,
        );
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }
}
