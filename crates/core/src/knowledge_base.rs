//! Condition knowledge base.
//!
//! A knowledge base is an ordered list of [`ConditionRecord`]s. Definition order matters: when
//! two conditions reach the same confidence the one defined first wins, so the records are
//! held in a `Vec` and never in an unordered map.
//!
//! Two sources are supported:
//! - the built-in table ([`KnowledgeBase::builtin`]), built once per process and shared;
//! - a YAML file with the same shape ([`KnowledgeBase::from_file`]), selected at startup.
//!
//! Keyword phrases are written the way clinicians list them, comma-joined
//! (`"chest pain, shortness of breath"`). The phrase is split and trimmed once, at load time.

use crate::constants::KEYWORD_SEPARATOR;
use crate::error::keyword_error;
use crate::{TriageError, TriageResult};
use curalink_types::Keyword;
use serde::Deserialize;
use std::path::Path;
use std::sync::{Arc, LazyLock};

/// One condition the engine can suggest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionRecord {
    keywords: Vec<Keyword>,
    illness: String,
    description: String,
    severity: String,
    recommendations: String,
}

impl ConditionRecord {
    /// Build a record from a comma-joined keyword phrase and its display fields.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidKnowledgeBase` if the phrase yields an empty, duplicate or
    /// non-lowercase keyword.
    pub fn new(
        keyword_phrase: &str,
        illness: impl Into<String>,
        description: impl Into<String>,
        severity: impl Into<String>,
        recommendations: impl Into<String>,
    ) -> TriageResult<Self> {
        Ok(Self {
            keywords: parse_keywords(keyword_phrase)?,
            illness: illness.into(),
            description: description.into(),
            severity: severity.into(),
            recommendations: recommendations.into(),
        })
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn illness(&self) -> &str {
        &self.illness
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn severity(&self) -> &str {
        &self.severity
    }

    pub fn recommendations(&self) -> &str {
        &self.recommendations
    }

    /// Number of this record's keywords contained in `lowered_input`.
    pub fn match_count(&self, lowered_input: &str) -> usize {
        self.keywords
            .iter()
            .filter(|kw| kw.occurs_in(lowered_input))
            .count()
    }
}

/// Split a comma-joined keyword phrase into trimmed keywords.
///
/// Splitting and trimming is the only preprocessing. Order is kept; duplicates within one
/// phrase are rejected.
///
/// # Errors
///
/// Returns `TriageError::InvalidKnowledgeBase` for empty pieces (`"a,,b"`), duplicates, or
/// keywords containing upper-case characters.
pub fn parse_keywords(phrase: &str) -> TriageResult<Vec<Keyword>> {
    let mut keywords: Vec<Keyword> = Vec::new();
    for piece in phrase.split(KEYWORD_SEPARATOR) {
        let keyword = Keyword::new(piece).map_err(|e| keyword_error(phrase, e))?;
        if keywords.contains(&keyword) {
            return Err(TriageError::InvalidKnowledgeBase(format!(
                "keyword '{keyword}' appears more than once in phrase '{phrase}'"
            )));
        }
        keywords.push(keyword);
    }
    Ok(keywords)
}

/// An ordered, immutable set of condition records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnowledgeBase {
    records: Vec<ConditionRecord>,
}

static BUILTIN: LazyLock<Arc<KnowledgeBase>> = LazyLock::new(|| {
    let records = BUILTIN_CONDITIONS
        .iter()
        .map(|c| {
            ConditionRecord::new(
                c.keywords,
                c.illness,
                c.description,
                c.severity,
                c.recommendations,
            )
        })
        .collect::<TriageResult<Vec<_>>>();

    let records = records.expect("built-in knowledge base is valid");
    Arc::new(KnowledgeBase { records })
});

impl KnowledgeBase {
    /// Build a knowledge base from records in definition order.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidKnowledgeBase` if `records` is empty.
    pub fn new(records: Vec<ConditionRecord>) -> TriageResult<Self> {
        if records.is_empty() {
            return Err(TriageError::InvalidKnowledgeBase(
                "knowledge base must contain at least one condition".into(),
            ));
        }
        Ok(Self { records })
    }

    /// The built-in condition table, shared by every caller in the process.
    pub fn builtin() -> Arc<KnowledgeBase> {
        Arc::clone(&BUILTIN)
    }

    /// Parse a knowledge base from YAML text.
    ///
    /// Uses `serde_path_to_error` so a malformed file reports the failing field
    /// (for example `conditions[2].severity`).
    pub fn from_yaml_str(yaml_text: &str) -> TriageResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let wire: KnowledgeBaseWire = serde_path_to_error::deserialize(deserializer)?;

        let records = wire
            .conditions
            .into_iter()
            .map(|c| {
                ConditionRecord::new(
                    &c.keywords,
                    c.illness,
                    c.description,
                    c.severity,
                    c.recommendations,
                )
            })
            .collect::<TriageResult<Vec<_>>>()?;

        Self::new(records)
    }

    /// Read and parse a YAML knowledge-base file.
    pub fn from_file(path: &Path) -> TriageResult<Self> {
        let text = std::fs::read_to_string(path).map_err(TriageError::FileRead)?;
        Self::from_yaml_str(&text)
    }

    pub fn records(&self) -> &[ConditionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConditionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a KnowledgeBase {
    type Item = &'a ConditionRecord;
    type IntoIter = std::slice::Iter<'a, ConditionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ============================================================================
// Wire model
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KnowledgeBaseWire {
    conditions: Vec<ConditionWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConditionWire {
    keywords: String,
    illness: String,
    description: String,
    severity: String,
    recommendations: String,
}

// ============================================================================
// Built-in table
// ============================================================================

struct BuiltinCondition {
    keywords: &'static str,
    illness: &'static str,
    description: &'static str,
    severity: &'static str,
    recommendations: &'static str,
}

const BUILTIN_CONDITIONS: &[BuiltinCondition] = &[
    BuiltinCondition {
        keywords: "fever, cough, cold",
        illness: "Common Cold/Flu",
        description: "A viral infection affecting the upper respiratory tract",
        severity: "Mild to Moderate",
        recommendations: "Rest, stay hydrated, take paracetamol, avoid close contact with others",
    },
    BuiltinCondition {
        keywords: "chest pain, shortness of breath",
        illness: "Possible Cardiac Issue",
        description: "Potential heart-related condition",
        severity: "High - Seek immediate medical attention",
        recommendations: "EMERGENCY: Call ambulance immediately, seek immediate medical care",
    },
    BuiltinCondition {
        keywords: "headache, dizziness",
        illness: "Migraine/Tension Headache",
        description: "Common headache disorder",
        severity: "Mild to Moderate",
        recommendations: "Rest in dark room, take pain relievers, stay hydrated",
    },
    BuiltinCondition {
        keywords: "stomach pain, nausea",
        illness: "Gastroenteritis/Indigestion",
        description: "Stomach inflammation or digestive issue",
        severity: "Mild to Moderate",
        recommendations: "Light diet, stay hydrated, avoid spicy food, consider antacids",
    },
    BuiltinCondition {
        keywords: "sore throat, fever",
        illness: "Pharyngitis/Strep Throat",
        description: "Throat infection",
        severity: "Mild to Moderate",
        recommendations: "Gargle salt water, use throat lozenges, take antibiotics if prescribed",
    },
    BuiltinCondition {
        keywords: "skin rash, itching",
        illness: "Dermatitis/Allergy",
        description: "Skin inflammation or allergic reaction",
        severity: "Mild",
        recommendations: "Apply moisturizer, avoid triggers, use antihistamines",
    },
    BuiltinCondition {
        keywords: "joint pain, swelling",
        illness: "Arthritis/Joint Inflammation",
        description: "Joint pain and inflammation",
        severity: "Mild to Moderate",
        recommendations: "Rest, ice therapy, pain relievers, physical therapy",
    },
    BuiltinCondition {
        keywords: "persistent cough",
        illness: "Bronchitis/Asthma",
        description: "Lung inflammation",
        severity: "Moderate",
        recommendations: "Cough suppressants, bronchodilators, avoid allergens",
    },
];
