//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! request handling never reads process-wide environment variables. The `*_from_env_value`
//! helpers take the raw variable value as an argument and leave the actual `std::env` read to
//! the binary.

use crate::constants::{DEFAULT_ANALYSIS_TYPE, DEFAULT_HISTORY_LIMIT};
use crate::knowledge_base::KnowledgeBase;
use crate::{TriageError, TriageResult};
use std::path::Path;
use std::sync::Arc;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    knowledge_base: Arc<KnowledgeBase>,
    default_analysis_type: String,
    history_limit: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if `default_analysis_type` is blank or
    /// `history_limit` is zero.
    pub fn new(
        knowledge_base: Arc<KnowledgeBase>,
        default_analysis_type: String,
        history_limit: usize,
    ) -> TriageResult<Self> {
        let default_analysis_type = default_analysis_type.trim().to_string();
        if default_analysis_type.is_empty() {
            return Err(TriageError::InvalidInput(
                "default analysis type cannot be empty".into(),
            ));
        }
        if history_limit == 0 {
            return Err(TriageError::InvalidInput(
                "history limit must be at least 1".into(),
            ));
        }

        Ok(Self {
            knowledge_base,
            default_analysis_type,
            history_limit,
        })
    }

    pub fn knowledge_base(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge_base
    }

    pub fn default_analysis_type(&self) -> &str {
        &self.default_analysis_type
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            knowledge_base: KnowledgeBase::builtin(),
            default_analysis_type: DEFAULT_ANALYSIS_TYPE.into(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve the knowledge base from an optional file path.
///
/// `None` or a blank value selects the built-in table.
pub fn knowledge_base_from_env_value(value: Option<String>) -> TriageResult<Arc<KnowledgeBase>> {
    match non_blank(value) {
        Some(path) => {
            let kb = KnowledgeBase::from_file(Path::new(&path))?;
            tracing::info!(path = %path, conditions = kb.len(), "loaded knowledge base");
            Ok(Arc::new(kb))
        }
        None => Ok(KnowledgeBase::builtin()),
    }
}

/// Parse the default analysis type; `None` or blank yields `"text"`.
pub fn analysis_type_from_env_value(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_ANALYSIS_TYPE.into())
}

/// Parse the history limit; `None` or blank yields the default of 10.
pub fn history_limit_from_env_value(value: Option<String>) -> TriageResult<usize> {
    let Some(raw) = non_blank(value) else {
        return Ok(DEFAULT_HISTORY_LIMIT);
    };

    match raw.parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(TriageError::InvalidInput(format!(
            "history limit must be a positive integer, got '{raw}'"
        ))),
    }
}
