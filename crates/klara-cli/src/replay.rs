use std::collections::BTreeMap;
use std::path::Path;

use klara_assessment::questionnaire::Phase;
use klara_assessment::{Event, Questionnaire, Session};
use serde::Deserialize;

/// Pre-recorded answers: question id → chosen option index, per phase.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerFile {
    #[serde(default)]
    pub screening: BTreeMap<String, usize>,
    #[serde(default)]
    pub clinical: BTreeMap<String, usize>,
}

impl AnswerFile {
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read answers at {}: {e}", path.display()))?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Drive a fresh session through the questionnaire with the recorded
/// answers until it reaches a referral or results.
pub fn replay(questionnaire: &Questionnaire, answers: &AnswerFile) -> eyre::Result<Session> {
    let mut session = questionnaire.start();

    while let Some(question) = questionnaire.current_question(&session) {
        let phase_answers = match session.state().phase() {
            Phase::Screening => &answers.screening,
            _ => &answers.clinical,
        };
        let option = *phase_answers
            .get(question.id())
            .ok_or_else(|| eyre::eyre!("no answer for question '{}'", question.id()))?;

        session = questionnaire.transition(&session, Event::Select(option))?;
        session = questionnaire.transition(&session, Event::Advance)?;
    }

    Ok(session)
}
