use std::collections::HashSet;
use std::sync::LazyLock;

use klara_core::models::question::{
    ClinicalOption, ClinicalQuestion, Question, QuestionBank, RiskFlag, ScreeningOption,
    ScreeningQuestion,
};

use crate::error::AssessmentError;

/// Number of items in the DEQ-5 sub-scale.
pub const DEQ5_ITEMS: usize = 5;

/// The built-in dry-eye question bank.
///
/// Seven safety screening questions, then twelve clinical questions: the
/// five DEQ-5 items (0–18), environmental triggers, and the four risk-factor
/// signals. The clinical maximum is 36.
pub fn dry_eye() -> &'static QuestionBank {
    static BANK: LazyLock<QuestionBank> = LazyLock::new(|| QuestionBank {
        screening: vec![
            red_flag(
                "sudden_vision_loss",
                "Have you had any sudden loss or significant decrease in vision?",
                None,
            ),
            red_flag(
                "severe_eye_pain",
                "Do you have severe or worsening eye pain?",
                Some("Pain beyond a gritty or burning discomfort."),
            ),
            red_flag(
                "eye_injury",
                "Have you recently injured your eye or had a chemical splash in it?",
                None,
            ),
            red_flag(
                "light_sensitivity_redness",
                "Is one eye very red and painfully sensitive to light?",
                None,
            ),
            red_flag(
                "discharge",
                "Do you have thick yellow or green discharge from your eye?",
                None,
            ),
            red_flag(
                "recent_surgery",
                "Have you had eye surgery in the last three months?",
                Some("Including LASIK, cataract or corneal procedures."),
            ),
            red_flag(
                "flashes_curtain",
                "Have you noticed new flashes of light, a shower of floaters, or a curtain over your vision?",
                None,
            ),
        ],
        clinical: vec![
            deq5_frequency(
                "deq5_discomfort_frequency",
                "During a typical day in the past month, how often did your eyes feel discomfort?",
            ),
            deq5_intensity(
                "deq5_discomfort_intensity",
                "When your eyes felt discomfort, how intense was it at the end of the day?",
            ),
            deq5_frequency(
                "deq5_dryness_frequency",
                "During a typical day in the past month, how often did your eyes feel dry?",
            ),
            deq5_intensity(
                "deq5_dryness_intensity",
                "When your eyes felt dry, how intense was the dryness at the end of the day?",
            ),
            deq5_frequency(
                "deq5_watery_frequency",
                "During a typical day in the past month, how often did your eyes look or feel excessively watery?",
            ),
            trigger(
                "screen_use",
                "Do your symptoms worsen with screen use (computer, phone, TV)?",
            ),
            trigger(
                "dry_air",
                "Do your symptoms worsen in air-conditioned, heated or windy environments?",
            ),
            clinical(
                "contact_lenses",
                "Do you wear contact lenses?",
                None,
                &[("No", 0, None), ("Occasionally", 1, None), ("Daily", 2, None)],
            ),
            clinical(
                "eyelid_crusting",
                "How often do you wake with crusty or sticky eyelids?",
                Some("A film over your vision that clears with blinking counts too."),
                &[
                    ("Never", 0, None),
                    ("Sometimes", 1, None),
                    ("Often", 2, Some(RiskFlag::Mgd)),
                    ("Every morning", 3, Some(RiskFlag::Mgd)),
                ],
            ),
            clinical(
                "autoimmune",
                "Have you been diagnosed with an autoimmune condition?",
                Some("For example Sjögren's syndrome, rheumatoid arthritis or lupus."),
                &[
                    ("No", 0, None),
                    ("Not sure", 1, None),
                    ("Yes", 3, Some(RiskFlag::Autoimmune)),
                ],
            ),
            clinical(
                "diabetes",
                "Do you have diabetes?",
                None,
                &[("No", 0, None), ("Yes", 2, Some(RiskFlag::Diabetes))],
            ),
            clinical(
                "prior_treatment",
                "Have you tried treatments for dry eye before?",
                None,
                &[
                    ("I haven't tried anything", 0, None),
                    ("Yes, and they helped", 1, None),
                    ("Yes, without full relief", 2, Some(RiskFlag::Treatment)),
                ],
            ),
        ],
    });
    &BANK
}

/// Parse a question bank from JSON and check it is usable.
pub fn from_json(json: &str) -> Result<QuestionBank, AssessmentError> {
    let bank: QuestionBank = serde_json::from_str(json)?;
    validate(&bank)?;
    Ok(bank)
}

/// Reject banks the questionnaire cannot drive.
pub fn validate(bank: &QuestionBank) -> Result<(), AssessmentError> {
    if bank.screening.is_empty() {
        return Err(invalid("no screening questions"));
    }
    if bank.clinical.is_empty() {
        return Err(invalid("no clinical questions"));
    }

    let questions = bank
        .screening
        .iter()
        .map(|q| q as &dyn Question)
        .chain(bank.clinical.iter().map(|q| q as &dyn Question));

    let mut seen = HashSet::new();
    for question in questions {
        if !seen.insert(question.id()) {
            return Err(invalid(format!("duplicate question id '{}'", question.id())));
        }
        if question.option_count() == 0 {
            return Err(invalid(format!("question '{}' has no options", question.id())));
        }
        let negative = (0..question.option_count())
            .filter_map(|i| question.option_value(i))
            .any(|v| v < 0);
        if negative {
            return Err(invalid(format!(
                "question '{}' has a negative option value",
                question.id()
            )));
        }
    }

    if bank.max_total_score().is_none() {
        return Err(invalid("option values overflow the total score"));
    }

    let deq5_items = bank.deq5_items().count();
    if deq5_items != DEQ5_ITEMS {
        return Err(invalid(format!(
            "DEQ-5 sub-scale has {deq5_items} questions, expected {DEQ5_ITEMS}"
        )));
    }

    Ok(())
}

fn invalid(message: impl Into<String>) -> AssessmentError {
    AssessmentError::InvalidBank(message.into())
}

fn red_flag(id: &str, prompt: &str, context: Option<&str>) -> ScreeningQuestion {
    ScreeningQuestion {
        id: id.to_string(),
        prompt: prompt.to_string(),
        context: context.map(str::to_string),
        options: vec![
            ScreeningOption {
                label: "No".to_string(),
                value: 0,
                red_flag: false,
            },
            ScreeningOption {
                label: "Yes".to_string(),
                value: 1,
                red_flag: true,
            },
        ],
    }
}

fn clinical(
    id: &str,
    prompt: &str,
    context: Option<&str>,
    options: &[(&str, i32, Option<RiskFlag>)],
) -> ClinicalQuestion {
    ClinicalQuestion {
        id: id.to_string(),
        prompt: prompt.to_string(),
        context: context.map(str::to_string),
        options: options
            .iter()
            .map(|(label, value, flag)| ClinicalOption {
                label: label.to_string(),
                value: *value,
                flag: *flag,
            })
            .collect(),
        deq5: false,
    }
}

fn deq5_frequency(id: &str, prompt: &str) -> ClinicalQuestion {
    ClinicalQuestion {
        deq5: true,
        ..clinical(
            id,
            prompt,
            None,
            &[
                ("Never", 0, None),
                ("Rarely", 1, None),
                ("Sometimes", 2, None),
                ("Frequently", 3, None),
                ("Constantly", 4, None),
            ],
        )
    }
}

fn deq5_intensity(id: &str, prompt: &str) -> ClinicalQuestion {
    ClinicalQuestion {
        deq5: true,
        ..clinical(
            id,
            prompt,
            None,
            &[
                ("Never have it", 0, None),
                ("Mild", 1, None),
                ("Moderate", 2, None),
                ("Intense", 3, None),
            ],
        )
    }
}

fn trigger(id: &str, prompt: &str) -> ClinicalQuestion {
    clinical(
        id,
        prompt,
        None,
        &[
            ("No", 0, None),
            ("Slightly", 1, None),
            ("Moderately", 2, None),
            ("Significantly", 3, None),
        ],
    )
}
