//! Constants used throughout the CuraLink core crate.
//!
//! Fallback strings, defaults and environment variable names live here so the engine, the
//! service layer and the binary agree on them.

/// Illness reported when no keyword of any condition matches.
pub const FALLBACK_ILLNESS: &str = "Unknown Condition";

/// Description reported with the fallback result.
pub const FALLBACK_DESCRIPTION: &str = "Unable to determine condition from provided symptoms";

/// Severity label reported with the fallback result.
pub const FALLBACK_SEVERITY: &str = "Please consult a doctor";

/// Recommendations reported with the fallback result.
pub const FALLBACK_RECOMMENDATIONS: &str =
    "Consult with a healthcare professional for accurate diagnosis";

/// Analysis type recorded when the caller does not supply one.
pub const DEFAULT_ANALYSIS_TYPE: &str = "text";

/// Number of analyses returned by a history query.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Upper bound of a confidence score.
pub const MAX_CONFIDENCE: u8 = 100;

/// Separator between keywords in a keyword phrase.
pub const KEYWORD_SEPARATOR: char = ',';

/// Environment variable naming a YAML knowledge-base file.
pub const KNOWLEDGE_BASE_ENV: &str = "CURALINK_KNOWLEDGE_BASE";

/// Environment variable overriding the default analysis type.
pub const ANALYSIS_TYPE_ENV: &str = "CURALINK_ANALYSIS_TYPE";

/// Environment variable overriding the history limit.
pub const HISTORY_LIMIT_ENV: &str = "CURALINK_HISTORY_LIMIT";
