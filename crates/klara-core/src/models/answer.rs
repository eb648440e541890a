use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The option a patient chose for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Answer {
    /// Index of the chosen option within the question's option list.
    pub option: usize,
    /// Point value of that option.
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerEntry {
    pub question_id: String,
    pub answer: Answer,
}

/// Answers keyed by question id, kept in the order they were first
/// recorded. Re-recording a question replaces its answer in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    entries: Vec<AnswerEntry>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question_id: &str, answer: Answer) {
        match self.entries.iter_mut().find(|e| e.question_id == question_id) {
            Some(entry) => entry.answer = answer,
            None => self.entries.push(AnswerEntry {
                question_id: question_id.to_string(),
                answer,
            }),
        }
    }

    pub fn get(&self, question_id: &str) -> Option<Answer> {
        self.entries
            .iter()
            .find(|e| e.question_id == question_id)
            .map(|e| e.answer)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnswerEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
