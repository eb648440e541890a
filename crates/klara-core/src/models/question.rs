use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::answer::Answer;

/// Capability shared by screening and clinical questions.
pub trait Question {
    /// Stable identifier, unique across the whole bank.
    fn id(&self) -> &str;

    /// The text shown to the patient.
    fn prompt(&self) -> &str;

    /// Optional supporting text shown under the prompt.
    fn context(&self) -> Option<&str>;

    fn option_count(&self) -> usize;

    fn option_label(&self, index: usize) -> Option<&str>;

    /// Point contribution of the option at `index`.
    fn option_value(&self, index: usize) -> Option<i32>;

    /// Build the answer recorded when the option at `index` is chosen.
    fn answer(&self, index: usize) -> Option<Answer> {
        self.option_value(index).map(|value| Answer {
            option: index,
            value,
        })
    }

    /// Highest point value any option can contribute.
    fn max_value(&self) -> i32 {
        (0..self.option_count())
            .filter_map(|i| self.option_value(i))
            .max()
            .unwrap_or(0)
    }
}

/// Risk-factor signal carried by a clinical option, independent of its
/// point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskFlag {
    Autoimmune,
    Diabetes,
    /// Meibomian gland dysfunction indicators.
    Mgd,
    /// Prior treatment tried without full relief.
    Treatment,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreeningOption {
    pub label: String,
    pub value: i32,
    /// Choosing this option routes the patient to in-person care.
    #[serde(default)]
    pub red_flag: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClinicalOption {
    pub label: String,
    pub value: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<RiskFlag>,
}

/// A safety question asked before the clinical questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreeningQuestion {
    pub id: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub options: Vec<ScreeningOption>,
}

impl ScreeningQuestion {
    pub fn is_red_flag(&self, index: usize) -> bool {
        self.options.get(index).is_some_and(|o| o.red_flag)
    }
}

/// A scored symptom, trigger or risk-factor question.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClinicalQuestion {
    pub id: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub options: Vec<ClinicalOption>,
    /// Member of the DEQ-5 sub-scale.
    #[serde(default)]
    pub deq5: bool,
}

impl ClinicalQuestion {
    pub fn flag(&self, index: usize) -> Option<RiskFlag> {
        self.options.get(index).and_then(|o| o.flag)
    }
}

impl Question for ScreeningQuestion {
    fn id(&self) -> &str {
        &self.id
    }

    fn prompt(&self) -> &str {
        &self.prompt
    }

    fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    fn option_count(&self) -> usize {
        self.options.len()
    }

    fn option_label(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(|o| o.label.as_str())
    }

    fn option_value(&self, index: usize) -> Option<i32> {
        self.options.get(index).map(|o| o.value)
    }
}

impl Question for ClinicalQuestion {
    fn id(&self) -> &str {
        &self.id
    }

    fn prompt(&self) -> &str {
        &self.prompt
    }

    fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    fn option_count(&self) -> usize {
        self.options.len()
    }

    fn option_label(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(|o| o.label.as_str())
    }

    fn option_value(&self, index: usize) -> Option<i32> {
        self.options.get(index).map(|o| o.value)
    }
}

/// The ordered screening and clinical question lists driving one
/// questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionBank {
    pub screening: Vec<ScreeningQuestion>,
    pub clinical: Vec<ClinicalQuestion>,
}

impl QuestionBank {
    pub fn clinical_question(&self, id: &str) -> Option<&ClinicalQuestion> {
        self.clinical.iter().find(|q| q.id == id)
    }

    pub fn deq5_items(&self) -> impl Iterator<Item = &ClinicalQuestion> {
        self.clinical.iter().filter(|q| q.deq5)
    }

    /// Highest reachable total score across all clinical questions, or
    /// `None` if it does not fit in an `i32`.
    pub fn max_total_score(&self) -> Option<i32> {
        self.clinical
            .iter()
            .try_fold(0i32, |sum, q| sum.checked_add(q.max_value()))
    }

    /// Highest reachable DEQ-5 sub-scale score.
    pub fn max_deq5_score(&self) -> Option<i32> {
        self.deq5_items()
            .try_fold(0i32, |sum, q| sum.checked_add(q.max_value()))
    }
}
