//! Display banding of free-text severity labels.
//!
//! Severity is stored as prose ("High - Seek immediate medical attention", "Mild to Moderate"),
//! not as an enum. Anything presenting a result needs a coarse band for styling and a short
//! badge label; both are derived here so every surface agrees.

use serde::Serialize;

/// Coarse severity bucket used for presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityBand {
    High,
    Moderate,
    Mild,
}

impl SeverityBand {
    /// Classify a severity label.
    ///
    /// Case-insensitive substring checks, in order: "high", then "moderate". Everything else
    /// (including the fallback "Please consult a doctor") is `Mild`. "Mild to Moderate" is
    /// therefore `Moderate`.
    pub fn classify(severity: &str) -> Self {
        let lowered = severity.to_lowercase();
        if lowered.contains("high") {
            SeverityBand::High
        } else if lowered.contains("moderate") {
            SeverityBand::Moderate
        } else {
            SeverityBand::Mild
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityBand::High => "high",
            SeverityBand::Moderate => "moderate",
            SeverityBand::Mild => "mild",
        }
    }
}

impl std::fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short badge text: the label up to the first `-`, trimmed.
pub fn badge_label(severity: &str) -> &str {
    severity.split('-').next().unwrap_or(severity).trim()
}
