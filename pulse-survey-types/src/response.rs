use serde::Serialize;

/// A confirmed answer to one question.
///
/// Created when a draft is committed; never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommittedResponse {
    question_id: String,
    question_prompt: String,
    answer_text: String,
}

impl CommittedResponse {
    pub fn new(
        question_id: impl Into<String>,
        question_prompt: impl Into<String>,
        answer_text: impl Into<String>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            question_prompt: question_prompt.into(),
            answer_text: answer_text.into(),
        }
    }

    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    pub fn question_prompt(&self) -> &str {
        &self.question_prompt
    }

    pub fn answer_text(&self) -> &str {
        &self.answer_text
    }
}

/// Committed responses of one survey run, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseCollection {
    responses: Vec<CommittedResponse>,
}

impl ResponseCollection {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a response at the end.
    pub fn push(&mut self, response: CommittedResponse) {
        self.responses.push(response);
    }

    /// Remove and return the most recent response.
    pub fn pop(&mut self) -> Option<CommittedResponse> {
        self.responses.pop()
    }

    /// Get the most recent response.
    pub fn last(&self) -> Option<&CommittedResponse> {
        self.responses.last()
    }

    /// Get the response for a question id.
    pub fn get(&self, question_id: &str) -> Option<&CommittedResponse> {
        self.responses
            .iter()
            .find(|r| r.question_id() == question_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommittedResponse> {
        self.responses.iter()
    }

    pub fn as_slice(&self) -> &[CommittedResponse] {
        &self.responses
    }

    /// Get the number of responses.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Check if there are no responses.
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl FromIterator<CommittedResponse> for ResponseCollection {
    fn from_iter<T: IntoIterator<Item = CommittedResponse>>(iter: T) -> Self {
        Self {
            responses: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ResponseCollection {
    type Item = CommittedResponse;
    type IntoIter = std::vec::IntoIter<CommittedResponse>;

    fn into_iter(self) -> Self::IntoIter {
        self.responses.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResponseCollection {
    type Item = &'a CommittedResponse;
    type IntoIter = std::slice::Iter<'a, CommittedResponse>;

    fn into_iter(self) -> Self::IntoIter {
        self.responses.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_and_lookup() {
        let mut responses = ResponseCollection::new();
        responses.push(CommittedResponse::new("q1", "Rate", "4"));
        responses.push(CommittedResponse::new("q2", "Why", "docs"));

        assert_eq!(responses.len(), 2);
        assert_eq!(responses.get("q2").unwrap().answer_text(), "docs");

        let last = responses.pop().unwrap();
        assert_eq!(last.question_id(), "q2");
        assert_eq!(responses.last().unwrap().question_id(), "q1");
        assert!(responses.get("q2").is_none());
    }

    #[test]
    fn serializes_as_toml_tables() {
        let responses: ResponseCollection =
            [CommittedResponse::new("q1", "Rate", "4")].into_iter().collect();
        let rendered = toml::to_string(&responses).unwrap();
        assert!(rendered.contains("[[responses]]"));
        assert!(rendered.contains("question_id = \"q1\""));
        assert!(rendered.contains("answer_text = \"4\""));
    }
}
