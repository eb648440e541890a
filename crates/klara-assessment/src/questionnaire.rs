use klara_core::models::answer::AnswerSet;
use klara_core::models::assessment::AssessmentResult;
use klara_core::models::question::{ClinicalQuestion, Question, QuestionBank, ScreeningQuestion};
use serde::{Deserialize, Serialize};

use crate::aggregate;
use crate::bank;
use crate::error::AssessmentError;
use crate::scoring::Thresholds;

/// Where a session is in the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum State {
    /// Answering safety questions. `cursor` indexes the screening list.
    Screening { cursor: usize },
    /// Answering clinical questions. `cursor` indexes the clinical list.
    Assessment { cursor: usize },
    /// A red flag was raised; the patient needs in-person care.
    Referral { red_flags: Vec<String> },
    /// The clinical questionnaire was completed and scored.
    Results { result: AssessmentResult },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Screening,
    Assessment,
    Referral,
    Results,
}

impl State {
    pub fn phase(&self) -> Phase {
        match self {
            State::Screening { .. } => Phase::Screening,
            State::Assessment { .. } => Phase::Assessment,
            State::Referral { .. } => Phase::Referral,
            State::Results { .. } => Phase::Results,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Referral { .. } | State::Results { .. })
    }
}

/// User actions that drive the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "option", rename_all = "snake_case")]
pub enum Event {
    /// Choose the option at this index for the current question.
    Select(usize),
    /// Record the selection and move to the next question.
    Advance,
    /// Go back one question.
    Retreat,
    /// Start screening over after a referral.
    Retake,
}

/// One patient's pass through the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    state: State,
    selection: Option<usize>,
    screening: AnswerSet,
    clinical: AnswerSet,
    red_flags: Vec<String>,
}

impl Session {
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Option currently highlighted for the current question.
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn screening_answers(&self) -> &AnswerSet {
        &self.screening
    }

    pub fn clinical_answers(&self) -> &AnswerSet {
        &self.clinical
    }

    /// Prompts of every red-flag question answered so far.
    pub fn red_flags(&self) -> &[String] {
        &self.red_flags
    }

    pub fn result(&self) -> Option<&AssessmentResult> {
        match &self.state {
            State::Results { result } => Some(result),
            _ => None,
        }
    }
}

/// Position within the active phase, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub phase: Phase,
    pub position: usize,
    pub total: usize,
}

/// Drives sessions over a fixed question bank and scoring configuration.
///
/// Sessions are plain values. [`Questionnaire::transition`] never mutates its
/// input; it returns the next session.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    bank: QuestionBank,
    thresholds: Thresholds,
}

impl Questionnaire {
    pub fn new(bank: QuestionBank, thresholds: Thresholds) -> Result<Self, AssessmentError> {
        bank::validate(&bank)?;
        Ok(Self { bank, thresholds })
    }

    /// The built-in dry-eye bank with the default clinical thresholds.
    pub fn dry_eye() -> Self {
        Self {
            bank: bank::dry_eye().clone(),
            thresholds: Thresholds::default(),
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn start(&self) -> Session {
        Session {
            state: State::Screening { cursor: 0 },
            selection: None,
            screening: AnswerSet::new(),
            clinical: AnswerSet::new(),
            red_flags: Vec::new(),
        }
    }

    /// Apply one event.
    ///
    /// Events that make no sense in the current state (advancing without a
    /// selection, retreating from the first question, retaking outside a
    /// referral, anything after the flow has ended) return the session
    /// unchanged. Selecting an option the current question does not have is
    /// an error, as is a session whose cursor points past this bank.
    pub fn transition(&self, session: &Session, event: Event) -> Result<Session, AssessmentError> {
        let mut next = session.clone();
        match event {
            Event::Select(index) => self.select(&mut next, index)?,
            Event::Advance => self.advance(&mut next)?,
            Event::Retreat => self.retreat(&mut next)?,
            Event::Retake => self.retake(&mut next),
        }
        tracing::debug!(?event, phase = ?next.state.phase(), "questionnaire transition");
        Ok(next)
    }

    pub fn current_question(&self, session: &Session) -> Option<&dyn Question> {
        match session.state {
            State::Screening { cursor } => self
                .bank
                .screening
                .get(cursor)
                .map(|q| q as &dyn Question),
            State::Assessment { cursor } => {
                self.bank.clinical.get(cursor).map(|q| q as &dyn Question)
            }
            State::Referral { .. } | State::Results { .. } => None,
        }
    }

    pub fn progress(&self, session: &Session) -> Option<Progress> {
        match session.state {
            State::Screening { cursor } => Some(Progress {
                phase: Phase::Screening,
                position: cursor + 1,
                total: self.bank.screening.len(),
            }),
            State::Assessment { cursor } => Some(Progress {
                phase: Phase::Assessment,
                position: cursor + 1,
                total: self.bank.clinical.len(),
            }),
            State::Referral { .. } | State::Results { .. } => None,
        }
    }

    pub fn can_advance(&self, session: &Session) -> bool {
        !session.state.is_terminal() && session.selection.is_some()
    }

    /// Back is disabled only on the first screening question and once the
    /// flow has ended.
    pub fn can_retreat(&self, session: &Session) -> bool {
        match session.state {
            State::Screening { cursor } => cursor > 0,
            State::Assessment { .. } => true,
            State::Referral { .. } | State::Results { .. } => false,
        }
    }

    /// The next advance finishes the clinical questionnaire.
    pub fn is_final_question(&self, session: &Session) -> bool {
        matches!(session.state, State::Assessment { cursor } if cursor + 1 == self.bank.clinical.len())
    }

    fn select(&self, session: &mut Session, index: usize) -> Result<(), AssessmentError> {
        let question: &dyn Question = match session.state {
            State::Screening { cursor } => self.screening_at(cursor)? as &dyn Question,
            State::Assessment { cursor } => self.clinical_at(cursor)? as &dyn Question,
            State::Referral { .. } | State::Results { .. } => return Ok(()),
        };
        if index >= question.option_count() {
            return Err(out_of_range(question, index));
        }
        session.selection = Some(index);
        Ok(())
    }

    fn advance(&self, session: &mut Session) -> Result<(), AssessmentError> {
        let Some(index) = session.selection else {
            return Ok(());
        };
        match session.state {
            State::Screening { cursor } => self.advance_screening(session, cursor, index),
            State::Assessment { cursor } => self.advance_assessment(session, cursor, index),
            State::Referral { .. } | State::Results { .. } => Ok(()),
        }
    }

    fn advance_screening(
        &self,
        session: &mut Session,
        cursor: usize,
        index: usize,
    ) -> Result<(), AssessmentError> {
        let question = self.screening_at(cursor)?;
        let answer = question
            .answer(index)
            .ok_or_else(|| out_of_range(question, index))?;
        session.screening.record(&question.id, answer);

        if question.is_red_flag(index) && !session.red_flags.contains(&question.prompt) {
            tracing::info!(question = %question.id, "red flag raised");
            session.red_flags.push(question.prompt.clone());
        }

        if let Some(next) = self.bank.screening.get(cursor + 1) {
            session.state = State::Screening { cursor: cursor + 1 };
            session.selection = session.screening.get(&next.id).map(|a| a.option);
        } else if !session.red_flags.is_empty() {
            session.state = State::Referral {
                red_flags: session.red_flags.clone(),
            };
            session.selection = None;
        } else {
            let first = self.clinical_at(0)?;
            session.state = State::Assessment { cursor: 0 };
            session.selection = session.clinical.get(&first.id).map(|a| a.option);
        }
        Ok(())
    }

    fn advance_assessment(
        &self,
        session: &mut Session,
        cursor: usize,
        index: usize,
    ) -> Result<(), AssessmentError> {
        let question = self.clinical_at(cursor)?;
        let answer = question
            .answer(index)
            .ok_or_else(|| out_of_range(question, index))?;
        session.clinical.record(&question.id, answer);

        if let Some(next) = self.bank.clinical.get(cursor + 1) {
            session.state = State::Assessment { cursor: cursor + 1 };
            session.selection = session.clinical.get(&next.id).map(|a| a.option);
            return Ok(());
        }

        let (input, risk_factors) =
            aggregate::scoring_input(&self.bank, &session.clinical, &self.thresholds)?;
        let severity = self.thresholds.assess(&input)?;
        tracing::info!(
            %severity,
            total_score = input.total_score,
            deq5_score = input.deq5_score,
            risk_factor_count = input.risk_factor_count,
            "assessment scored"
        );
        session.state = State::Results {
            result: AssessmentResult::record(input, risk_factors, severity),
        };
        session.selection = None;
        Ok(())
    }

    fn retreat(&self, session: &mut Session) -> Result<(), AssessmentError> {
        let (state, selection) = match session.state {
            State::Screening { cursor } if cursor > 0 => {
                self.screening_at(cursor)?;
                let previous = self.screening_at(cursor - 1)?;
                (
                    State::Screening { cursor: cursor - 1 },
                    session.screening.get(&previous.id),
                )
            }
            State::Assessment { cursor } => {
                self.clinical_at(cursor)?;
                match cursor.checked_sub(1) {
                    Some(back) => (
                        State::Assessment { cursor: back },
                        session.clinical.get(&self.clinical_at(back)?.id),
                    ),
                    None => {
                        let last = self.bank.screening.len().saturating_sub(1);
                        (
                            State::Screening { cursor: last },
                            session.screening.get(&self.screening_at(last)?.id),
                        )
                    }
                }
            }
            State::Screening { .. } | State::Referral { .. } | State::Results { .. } => {
                return Ok(());
            }
        };

        session.selection = selection.map(|a| a.option);
        session.state = state;
        Ok(())
    }

    fn retake(&self, session: &mut Session) {
        if !matches!(session.state, State::Referral { .. }) {
            return;
        }
        session.screening.clear();
        session.red_flags.clear();
        session.selection = None;
        session.state = State::Screening { cursor: 0 };
    }

    fn screening_at(&self, cursor: usize) -> Result<&ScreeningQuestion, AssessmentError> {
        self.bank.screening.get(cursor).ok_or_else(|| {
            AssessmentError::InvalidSession(format!(
                "screening cursor {cursor} past {} questions",
                self.bank.screening.len()
            ))
        })
    }

    fn clinical_at(&self, cursor: usize) -> Result<&ClinicalQuestion, AssessmentError> {
        self.bank.clinical.get(cursor).ok_or_else(|| {
            AssessmentError::InvalidSession(format!(
                "clinical cursor {cursor} past {} questions",
                self.bank.clinical.len()
            ))
        })
    }
}

fn out_of_range(question: &dyn Question, index: usize) -> AssessmentError {
    AssessmentError::OptionOutOfRange {
        question_id: question.id().to_string(),
        index,
        option_count: question.option_count(),
    }
}
