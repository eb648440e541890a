use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::assessment::AssessmentResult;
use crate::error::CoreError;

/// Number of entries plotted on the symptom trend chart.
pub const CHART_WINDOW: usize = 10;

/// Direction of the latest total score relative to the one before it.
/// Lower scores mean fewer symptoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Trend {
    Improving,
    Worsening,
    Stable,
}

/// Append-only record of completed assessments, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomHistory {
    entries: Vec<AssessmentResult>,
}

impl SymptomHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a history from its stored JSON form.
    ///
    /// A corrupt document is discarded and an empty history returned, so a
    /// bad write never locks the patient out of new assessments.
    pub fn hydrate(stored: &str) -> Self {
        match serde_json::from_str::<Vec<AssessmentResult>>(stored) {
            Ok(entries) => Self { entries },
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable symptom history");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    pub fn append(&mut self, result: AssessmentResult) {
        self.entries.push(result);
    }

    pub fn entries(&self) -> &[AssessmentResult] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&AssessmentResult> {
        self.entries.last()
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[AssessmentResult] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn trend(&self) -> Option<Trend> {
        let [.., previous, latest] = self.entries.as_slice() else {
            return None;
        };
        Some(match latest.total_score.cmp(&previous.total_score) {
            std::cmp::Ordering::Less => Trend::Improving,
            std::cmp::Ordering::Greater => Trend::Worsening,
            std::cmp::Ordering::Equal => Trend::Stable,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
