use klara_assessment::error::AssessmentError;
use klara_assessment::questionnaire::Phase;
use klara_assessment::{Event, Questionnaire, Session, State};
use klara_core::models::question::QuestionBank;
use klara_core::models::severity::Severity;
use proptest::prelude::*;

const NO: usize = 0;
const YES: usize = 1;

fn step(q: &Questionnaire, session: &Session, event: Event) -> Session {
    q.transition(session, event).unwrap()
}

fn choose(q: &Questionnaire, session: &Session, option: usize) -> Session {
    let selected = step(q, session, Event::Select(option));
    step(q, &selected, Event::Advance)
}

fn answer_all(q: &Questionnaire, mut session: Session, options: &[usize]) -> Session {
    for &option in options {
        session = choose(q, &session, option);
    }
    session
}

fn clear_screening(q: &Questionnaire) -> Session {
    answer_all(q, q.start(), &[NO; 7])
}

#[test]
fn starts_on_first_screening_question() {
    let q = Questionnaire::dry_eye();
    let session = q.start();
    assert_eq!(session.state(), &State::Screening { cursor: 0 });
    assert_eq!(session.selection(), None);
    assert!(!q.can_advance(&session));
    assert!(!q.can_retreat(&session));

    let progress = q.progress(&session).unwrap();
    assert_eq!((progress.phase, progress.position, progress.total), (Phase::Screening, 1, 7));
}

#[test]
fn advance_without_selection_is_a_no_op() {
    let q = Questionnaire::dry_eye();
    let session = q.start();
    assert_eq!(step(&q, &session, Event::Advance), session);
}

#[test]
fn retreat_on_first_question_is_a_no_op() {
    let q = Questionnaire::dry_eye();
    let session = q.start();
    assert_eq!(step(&q, &session, Event::Retreat), session);
}

#[test]
fn selecting_missing_option_is_an_error() {
    let q = Questionnaire::dry_eye();
    let err = q.transition(&q.start(), Event::Select(2)).unwrap_err();
    match err {
        AssessmentError::OptionOutOfRange {
            question_id,
            index,
            option_count,
        } => {
            assert_eq!(question_id, "sudden_vision_loss");
            assert_eq!(index, 2);
            assert_eq!(option_count, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn clear_screening_moves_to_assessment() {
    let q = Questionnaire::dry_eye();
    let session = clear_screening(&q);
    assert_eq!(session.state(), &State::Assessment { cursor: 0 });
    assert_eq!(session.screening_answers().len(), 7);
    assert!(session.red_flags().is_empty());

    let progress = q.progress(&session).unwrap();
    assert_eq!((progress.phase, progress.position, progress.total), (Phase::Assessment, 1, 12));
}

#[test]
fn first_question_red_flag_ends_in_referral() {
    let q = Questionnaire::dry_eye();
    let mut options = vec![YES];
    options.extend([NO; 6]);
    let session = answer_all(&q, q.start(), &options);

    let first_prompt = q.bank().screening[0].prompt.clone();
    assert_eq!(
        session.state(),
        &State::Referral {
            red_flags: vec![first_prompt]
        }
    );
    assert_eq!(session.red_flags().len(), 1);
}

#[test]
fn red_flag_on_last_question_still_refers() {
    let q = Questionnaire::dry_eye();
    let mut options = vec![NO; 6];
    options.push(YES);
    let session = answer_all(&q, q.start(), &options);
    assert_eq!(session.state().phase(), Phase::Referral);
}

#[test]
fn revisiting_a_red_flag_question_records_it_once() {
    let q = Questionnaire::dry_eye();
    let session = choose(&q, &q.start(), YES);
    let session = step(&q, &session, Event::Retreat);
    assert_eq!(session.selection(), Some(YES));
    let session = step(&q, &session, Event::Advance);
    assert_eq!(session.red_flags().len(), 1);
}

#[test]
fn red_flag_survives_a_changed_answer() {
    let q = Questionnaire::dry_eye();
    let session = choose(&q, &q.start(), YES);
    let session = step(&q, &session, Event::Retreat);
    let session = answer_all(&q, session, &[NO; 7]);
    assert_eq!(session.state().phase(), Phase::Referral);
}

#[test]
fn retreat_restores_previous_answers_without_changing_them() {
    let q = Questionnaire::dry_eye();
    let session = answer_all(&q, q.start(), &[NO, YES]);
    let answers_before = session.screening_answers().clone();

    let back_once = step(&q, &session, Event::Retreat);
    assert_eq!(back_once.state(), &State::Screening { cursor: 1 });
    assert_eq!(back_once.selection(), Some(YES));

    let back_twice = step(&q, &back_once, Event::Retreat);
    assert_eq!(back_twice.state(), &State::Screening { cursor: 0 });
    assert_eq!(back_twice.selection(), Some(NO));
    assert_eq!(back_twice.screening_answers(), &answers_before);

    let forward = step(&q, &back_twice, Event::Advance);
    assert_eq!(forward.state(), &State::Screening { cursor: 1 });
    assert_eq!(forward.selection(), Some(YES));
    assert_eq!(forward.screening_answers(), &answers_before);
}

#[test]
fn retreat_from_first_clinical_question_returns_to_screening() {
    let q = Questionnaire::dry_eye();
    let session = clear_screening(&q);
    assert!(q.can_retreat(&session));

    let back = step(&q, &session, Event::Retreat);
    assert_eq!(back.state(), &State::Screening { cursor: 6 });
    assert_eq!(back.selection(), Some(NO));

    let again = step(&q, &back, Event::Advance);
    assert_eq!(again.state(), &State::Assessment { cursor: 0 });
}

#[test]
fn clinical_answers_survive_a_trip_back_into_screening() {
    let q = Questionnaire::dry_eye();
    let session = choose(&q, &clear_screening(&q), 3);
    let session = step(&q, &session, Event::Retreat);
    let session = step(&q, &session, Event::Retreat);
    assert_eq!(session.state().phase(), Phase::Screening);

    let session = step(&q, &session, Event::Advance);
    assert_eq!(session.state(), &State::Assessment { cursor: 0 });
    assert_eq!(session.selection(), Some(3));
}

#[test]
fn retake_clears_screening_after_referral() {
    let q = Questionnaire::dry_eye();
    let session = answer_all(&q, q.start(), &[YES; 7]);
    assert_eq!(session.red_flags().len(), 7);

    let retaken = step(&q, &session, Event::Retake);
    assert_eq!(retaken.state(), &State::Screening { cursor: 0 });
    assert!(retaken.screening_answers().is_empty());
    assert!(retaken.red_flags().is_empty());
    assert_eq!(retaken.selection(), None);

    let cleared = answer_all(&q, retaken, &[NO; 7]);
    assert_eq!(cleared.state(), &State::Assessment { cursor: 0 });
}

#[test]
fn retake_outside_referral_is_a_no_op() {
    let q = Questionnaire::dry_eye();
    let session = clear_screening(&q);
    assert_eq!(step(&q, &session, Event::Retake), session);
}

#[test]
fn terminal_states_ignore_navigation() {
    let q = Questionnaire::dry_eye();
    let referral = answer_all(&q, q.start(), &[YES; 7]);
    assert!(q.current_question(&referral).is_none());
    assert!(!q.can_retreat(&referral));
    for event in [Event::Select(0), Event::Advance, Event::Retreat] {
        assert_eq!(step(&q, &referral, event), referral);
    }
}

#[test]
fn all_lowest_answers_score_mild() {
    let q = Questionnaire::dry_eye();
    let session = answer_all(&q, clear_screening(&q), &[0; 12]);
    let result = session.result().unwrap();
    assert_eq!(result.total_score, 0);
    assert_eq!(result.deq5_score, 0);
    assert!(!result.deq5_positive);
    assert_eq!(result.risk_factor_count, 0);
    assert_eq!(result.severity, Severity::Mild);
}

#[test]
fn all_highest_answers_score_severe() {
    let q = Questionnaire::dry_eye();
    let session = answer_all(
        &q,
        clear_screening(&q),
        &[4, 3, 4, 3, 4, 3, 3, 2, 3, 2, 1, 2],
    );
    let result = session.result().unwrap();
    assert_eq!(result.total_score, 36);
    assert_eq!(result.deq5_score, 18);
    assert!(result.deq5_positive);
    assert_eq!(result.risk_factor_count, 4);
    assert_eq!(result.severity, Severity::Severe);
}

#[test]
fn risk_factors_escalate_a_moderate_deq5() {
    let q = Questionnaire::dry_eye();
    let session = answer_all(
        &q,
        clear_screening(&q),
        &[2, 1, 2, 1, 2, 3, 3, 2, 3, 2, 1, 2],
    );
    let result = session.result().unwrap();
    assert_eq!(result.deq5_score, 8);
    assert_eq!(result.total_score, 26);
    assert!(result.risk_factors.mgd);
    assert!(result.risk_factors.autoimmune);
    assert!(result.risk_factors.diabetes);
    assert!(result.risk_factors.tried_treatments);
    assert_eq!(result.severity, Severity::Severe);
}

#[test]
fn two_risk_factors_lift_a_quiet_questionnaire() {
    let q = Questionnaire::dry_eye();
    let session = answer_all(
        &q,
        clear_screening(&q),
        &[0, 0, 0, 0, 0, 3, 3, 2, 2, 0, 1, 0],
    );
    let result = session.result().unwrap();
    assert_eq!(result.total_score, 12);
    assert_eq!(result.risk_factor_count, 2);
    assert!(result.risk_factors.mgd);
    assert!(result.risk_factors.diabetes);
    assert_eq!(result.severity, Severity::Moderate);
}

#[test]
fn final_question_is_flagged() {
    let q = Questionnaire::dry_eye();
    let session = answer_all(&q, clear_screening(&q), &[0; 11]);
    assert!(q.is_final_question(&session));
    assert!(!q.is_final_question(&clear_screening(&q)));
}

#[test]
fn invalid_bank_is_rejected() {
    let bank = QuestionBank {
        screening: Vec::new(),
        clinical: Questionnaire::dry_eye().bank().clinical.clone(),
    };
    let err = Questionnaire::new(bank, Default::default()).unwrap_err();
    assert!(matches!(err, AssessmentError::InvalidBank(_)));
}

proptest! {
    #[test]
    fn any_red_flag_blocks_the_assessment(flags in prop::collection::vec(any::<bool>(), 7)) {
        let q = Questionnaire::dry_eye();
        let mut session = q.start();
        for (i, &flag) in flags.iter().enumerate() {
            session = choose(&q, &session, if flag { YES } else { NO });
            if i + 1 < flags.len() {
                prop_assert_eq!(session.state().phase(), Phase::Screening);
            }
        }
        let expected = if flags.iter().any(|f| *f) { Phase::Referral } else { Phase::Assessment };
        prop_assert_eq!(session.state().phase(), expected);
        prop_assert_eq!(session.red_flags().len(), flags.iter().filter(|f| **f).count());
    }
}

fn stored_session(state: &str) -> Session {
    serde_json::from_str(&format!(
        r#"{{"state":{state},"selection":0,"screening":[],"clinical":[],"red_flags":[]}}"#
    ))
    .unwrap()
}

#[test]
fn session_past_the_bank_is_rejected() {
    let q = Questionnaire::dry_eye();
    let session = stored_session(r#"{"state":"assessment","cursor":99}"#);

    for event in [Event::Advance, Event::Retreat, Event::Select(0)] {
        let err = q.transition(&session, event).unwrap_err();
        assert!(matches!(err, AssessmentError::InvalidSession(_)), "{event:?}");
    }
}

#[test]
fn session_from_a_longer_bank_is_rejected() {
    let mut bank = klara_assessment::bank::dry_eye().clone();
    bank.screening.truncate(1);
    let short = Questionnaire::new(bank, Default::default()).unwrap();

    let full = Questionnaire::dry_eye();
    let session = answer_all(&full, full.start(), &[NO; 3]);
    assert_eq!(session.state(), &State::Screening { cursor: 3 });

    let err = short.transition(&session, Event::Retreat).unwrap_err();
    assert!(matches!(err, AssessmentError::InvalidSession(_)));
}
