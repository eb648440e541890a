use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::question::RiskFlag;
use super::severity::Severity;

/// Aggregated values the scorer classifies.
///
/// Integers are signed so that malformed input can be represented and
/// rejected by validation instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringInput {
    /// Sum of point values across all clinical answers.
    pub total_score: i32,
    /// Sum of point values across the five DEQ-5 items.
    pub deq5_score: i32,
    /// DEQ-5 score met the diagnostic cutoff.
    pub deq5_positive: bool,
    pub risk_factor_count: i32,
}

/// The four independent risk-factor signals, each counted at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskFactors {
    pub autoimmune: bool,
    pub diabetes: bool,
    pub mgd: bool,
    pub tried_treatments: bool,
}

impl RiskFactors {
    pub fn set(&mut self, flag: RiskFlag) {
        match flag {
            RiskFlag::Autoimmune => self.autoimmune = true,
            RiskFlag::Diabetes => self.diabetes = true,
            RiskFlag::Mgd => self.mgd = true,
            RiskFlag::Treatment => self.tried_treatments = true,
        }
    }

    pub fn count(&self) -> i32 {
        [self.autoimmune, self.diabetes, self.mgd, self.tried_treatments]
            .into_iter()
            .filter(|present| *present)
            .count() as i32
    }

    /// Patient-facing descriptions of the factors that are present.
    pub fn descriptions(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.autoimmune {
            out.push("Autoimmune condition");
        }
        if self.diabetes {
            out.push("Diabetes");
        }
        if self.mgd {
            out.push("Meibomian gland dysfunction (MGD) indicators");
        }
        if self.tried_treatments {
            out.push("Prior treatments tried without full relief");
        }
        out
    }
}

/// One completed assessment. Created once, then only appended to history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentResult {
    pub id: Uuid,
    pub timestamp: jiff::Timestamp,
    pub total_score: i32,
    pub deq5_score: i32,
    pub deq5_positive: bool,
    pub risk_factor_count: i32,
    pub severity: Severity,
    #[serde(flatten)]
    pub risk_factors: RiskFactors,
}

impl AssessmentResult {
    /// Stamp a fresh id and the current time onto a scored outcome.
    pub fn record(input: ScoringInput, risk_factors: RiskFactors, severity: Severity) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: jiff::Timestamp::now(),
            total_score: input.total_score,
            deq5_score: input.deq5_score,
            deq5_positive: input.deq5_positive,
            risk_factor_count: input.risk_factor_count,
            severity,
            risk_factors,
        }
    }
}
