use thiserror::Error;

use crate::scoring::InputError;

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("invalid scoring input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("malformed question bank: {0}")]
    BankFormat(#[from] serde_json::Error),

    #[error("invalid question bank: {0}")]
    InvalidBank(String),

    #[error("option {index} is out of range for question '{question_id}' ({option_count} options)")]
    OptionOutOfRange {
        question_id: String,
        index: usize,
        option_count: usize,
    },

    #[error("session does not fit this question bank: {0}")]
    InvalidSession(String),

    #[error("answer values overflow the total score")]
    ScoreOverflow,
}
