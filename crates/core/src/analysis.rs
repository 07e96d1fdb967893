//! The result of one symptom analysis.

use crate::constants::{
    FALLBACK_DESCRIPTION, FALLBACK_ILLNESS, FALLBACK_RECOMMENDATIONS, FALLBACK_SEVERITY,
};
use crate::knowledge_base::ConditionRecord;
use crate::severity::SeverityBand;
use serde::{Deserialize, Serialize};

/// Suggested condition for a symptom description.
///
/// Serialised with snake_case keys; the score is stored under `confidence_score`, which is
/// the shape callers persist next to the raw symptom text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub illness: String,
    pub description: String,
    pub severity: String,
    pub recommendations: String,
    /// Percentage of the winning condition's keywords found in the input, 0 to 100.
    pub confidence_score: u8,
}

impl AnalysisResult {
    /// The fixed result returned when no condition matches.
    pub fn fallback() -> Self {
        Self {
            illness: FALLBACK_ILLNESS.into(),
            description: FALLBACK_DESCRIPTION.into(),
            severity: FALLBACK_SEVERITY.into(),
            recommendations: FALLBACK_RECOMMENDATIONS.into(),
            confidence_score: 0,
        }
    }

    /// Copy the display fields of `record` and attach `confidence_score`.
    pub fn from_record(record: &ConditionRecord, confidence_score: u8) -> Self {
        Self {
            illness: record.illness().to_owned(),
            description: record.description().to_owned(),
            severity: record.severity().to_owned(),
            recommendations: record.recommendations().to_owned(),
            confidence_score,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.confidence_score == 0 && self.illness == FALLBACK_ILLNESS
    }

    /// Display band of this result's severity label.
    pub fn severity_band(&self) -> SeverityBand {
        SeverityBand::classify(&self.severity)
    }
}
