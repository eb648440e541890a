use klara_core::models::assessment::ScoringInput;
use klara_core::models::severity::Severity;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// DEQ-5 score at or above which the screen is diagnostic for dry eye.
pub const DEQ5_POSITIVE_CUTOFF: i32 = 6;
/// Lowest positive DEQ-5 score classified as moderate.
pub const DEQ5_MODERATE_MIN: i32 = 6;
/// Lowest positive DEQ-5 score classified as severe.
pub const DEQ5_SEVERE_MIN: i32 = 12;
/// Total symptom burden that lifts a mild band to moderate.
pub const TOTAL_MODERATE_MIN: i32 = 15;
/// Total symptom burden that lifts a moderate band to severe.
pub const TOTAL_SEVERE_MIN: i32 = 28;
/// Risk factors needed to lift a mild band to moderate.
pub const RISK_MODERATE_MIN: i32 = 2;
/// Risk factors needed to lift a moderate band to severe.
pub const RISK_SEVERE_MIN: i32 = 3;
/// Number of distinct risk factors tracked.
pub const MAX_RISK_FACTORS: i32 = 4;

/// Scoring input rejected before classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("total score {0} is negative")]
    NegativeTotal(i32),

    #[error("DEQ-5 score {0} is negative")]
    NegativeDeq5(i32),

    #[error("risk factor count {count} is outside [0, {max}]")]
    RiskFactorCount { count: i32, max: i32 },
}

/// Band boundaries used by the scorer.
///
/// `Default` carries the clinical constants above. The struct exists so a
/// scorer can be built against an explicit configuration rather than inline
/// numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Thresholds {
    pub deq5_positive_cutoff: i32,
    pub deq5_moderate_min: i32,
    pub deq5_severe_min: i32,
    pub total_moderate_min: i32,
    pub total_severe_min: i32,
    pub risk_moderate_min: i32,
    pub risk_severe_min: i32,
    pub max_risk_factors: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            deq5_positive_cutoff: DEQ5_POSITIVE_CUTOFF,
            deq5_moderate_min: DEQ5_MODERATE_MIN,
            deq5_severe_min: DEQ5_SEVERE_MIN,
            total_moderate_min: TOTAL_MODERATE_MIN,
            total_severe_min: TOTAL_SEVERE_MIN,
            risk_moderate_min: RISK_MODERATE_MIN,
            risk_severe_min: RISK_SEVERE_MIN,
            max_risk_factors: MAX_RISK_FACTORS,
        }
    }
}

impl Thresholds {
    pub fn is_deq5_positive(&self, deq5_score: i32) -> bool {
        deq5_score >= self.deq5_positive_cutoff
    }

    /// Step 1: the band implied by the DEQ-5 sub-scale alone.
    ///
    /// `deq5_score` is only consulted when the screen is positive.
    pub fn primary_band(&self, deq5_score: i32, deq5_positive: bool) -> Severity {
        if !deq5_positive || deq5_score < self.deq5_moderate_min {
            Severity::Mild
        } else if deq5_score < self.deq5_severe_min {
            Severity::Moderate
        } else {
            Severity::Severe
        }
    }

    /// Classify without validating the input.
    ///
    /// Steps run in a fixed order: DEQ-5 band, then total-burden escalation,
    /// then risk-factor escalation. The risk-factor step returns as soon as
    /// it escalates and does not revisit the burden thresholds.
    pub fn classify(&self, input: &ScoringInput) -> Severity {
        let mut base = self.primary_band(input.deq5_score, input.deq5_positive);

        if base == Severity::Mild && input.total_score >= self.total_moderate_min {
            base = Severity::Moderate;
        }
        if base == Severity::Moderate && input.total_score >= self.total_severe_min {
            base = Severity::Severe;
        }

        if base == Severity::Mild && input.risk_factor_count >= self.risk_moderate_min {
            return Severity::Moderate;
        }
        if base == Severity::Moderate && input.risk_factor_count >= self.risk_severe_min {
            return Severity::Severe;
        }

        base
    }

    pub fn validate(&self, input: &ScoringInput) -> Result<(), InputError> {
        if input.total_score < 0 {
            return Err(InputError::NegativeTotal(input.total_score));
        }
        if input.deq5_score < 0 {
            return Err(InputError::NegativeDeq5(input.deq5_score));
        }
        if !(0..=self.max_risk_factors).contains(&input.risk_factor_count) {
            return Err(InputError::RiskFactorCount {
                count: input.risk_factor_count,
                max: self.max_risk_factors,
            });
        }
        Ok(())
    }

    /// Validate, then classify.
    pub fn assess(&self, input: &ScoringInput) -> Result<Severity, InputError> {
        self.validate(input)?;
        Ok(self.classify(input))
    }
}

/// Classify against the default clinical thresholds.
pub fn severity(input: &ScoringInput) -> Severity {
    Thresholds::default().classify(input)
}
