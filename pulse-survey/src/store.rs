use pulse_survey_types::{CommittedResponse, ResponseCollection};

/// Responses committed so far in one flow.
///
/// Never holds more responses than the catalog has questions.
#[derive(Debug, Clone, Default)]
pub struct AnswerStore {
    responses: ResponseCollection,
    capacity: usize,
}

impl AnswerStore {
    /// Create an empty store for a catalog of `capacity` questions.
    pub fn new(capacity: usize) -> Self {
        Self {
            responses: ResponseCollection::new(),
            capacity,
        }
    }

    /// Record a response. Returns `false` (and drops it) when the store is full.
    pub fn commit(&mut self, response: CommittedResponse) -> bool {
        if self.is_full() {
            return false;
        }
        self.responses.push(response);
        true
    }

    /// Remove the most recently committed response.
    pub fn take_last(&mut self) -> Option<CommittedResponse> {
        self.responses.pop()
    }

    pub fn responses(&self) -> &ResponseCollection {
        &self.responses
    }

    pub fn into_collection(self) -> ResponseCollection {
        self.responses
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.responses.len() >= self.capacity
    }
}
