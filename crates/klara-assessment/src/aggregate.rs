use klara_core::models::answer::AnswerSet;
use klara_core::models::assessment::{RiskFactors, ScoringInput};
use klara_core::models::question::QuestionBank;

use crate::error::AssessmentError;
use crate::scoring::Thresholds;

/// Fold clinical answers into the scorer's input.
///
/// Answers for ids that are not clinical questions in `bank` are ignored.
/// A risk factor counts once no matter how many answers carry its flag.
pub fn scoring_input(
    bank: &QuestionBank,
    answers: &AnswerSet,
    thresholds: &Thresholds,
) -> Result<(ScoringInput, RiskFactors), AssessmentError> {
    let mut total_score: i32 = 0;
    let mut deq5_score: i32 = 0;
    let mut risk_factors = RiskFactors::default();

    for entry in answers.iter() {
        let Some(question) = bank.clinical_question(&entry.question_id) else {
            continue;
        };
        total_score = total_score
            .checked_add(entry.answer.value)
            .ok_or(AssessmentError::ScoreOverflow)?;
        if question.deq5 {
            deq5_score = deq5_score
                .checked_add(entry.answer.value)
                .ok_or(AssessmentError::ScoreOverflow)?;
        }
        if let Some(flag) = question.flag(entry.answer.option) {
            risk_factors.set(flag);
        }
    }

    let input = ScoringInput {
        total_score,
        deq5_score,
        deq5_positive: thresholds.is_deq5_positive(deq5_score),
        risk_factor_count: risk_factors.count(),
    };
    Ok((input, risk_factors))
}
