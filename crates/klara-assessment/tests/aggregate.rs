use klara_assessment::aggregate::scoring_input;
use klara_assessment::bank;
use klara_assessment::error::AssessmentError;
use klara_assessment::scoring::Thresholds;
use klara_core::models::answer::{Answer, AnswerSet};

#[test]
fn sums_clinical_answers_and_flags() {
    let mut answers = AnswerSet::new();
    answers.record("deq5_discomfort_frequency", Answer { option: 4, value: 4 });
    answers.record("deq5_dryness_frequency", Answer { option: 3, value: 3 });
    answers.record("eyelid_crusting", Answer { option: 2, value: 2 });
    answers.record("sudden_vision_loss", Answer { option: 1, value: 1 });

    let (input, factors) =
        scoring_input(bank::dry_eye(), &answers, &Thresholds::default()).unwrap();
    assert_eq!(input.total_score, 9);
    assert_eq!(input.deq5_score, 7);
    assert!(input.deq5_positive);
    assert_eq!(input.risk_factor_count, 1);
    assert!(factors.mgd);
}

#[test]
fn overflowing_answer_values_are_an_error() {
    let mut answers = AnswerSet::new();
    answers.record("screen_use", Answer { option: 3, value: i32::MAX });
    answers.record("dry_air", Answer { option: 3, value: i32::MAX });

    let err = scoring_input(bank::dry_eye(), &answers, &Thresholds::default()).unwrap_err();
    assert!(matches!(err, AssessmentError::ScoreOverflow));
}
