use curalink_types::TextError;

/// Errors raised around the triage engine.
///
/// The engine itself is total and never produces one of these; they come from loading a
/// knowledge base, validating caller input, and serialising results for storage.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid knowledge base: {0}")]
    InvalidKnowledgeBase(String),
    #[error("invalid knowledge base YAML at {path}: {source}")]
    InvalidYaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to read knowledge base file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize analysis: {0}")]
    Serialization(serde_json::Error),
}

impl From<serde_path_to_error::Error<serde_yaml::Error>> for TriageError {
    fn from(err: serde_path_to_error::Error<serde_yaml::Error>) -> Self {
        let path = err.path().to_string();
        let path = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        TriageError::InvalidYaml {
            path,
            source: err.into_inner(),
        }
    }
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;

/// Map a keyword validation failure onto the knowledge-base error, naming the phrase.
pub(crate) fn keyword_error(phrase: &str, err: TextError) -> TriageError {
    match err {
        TextError::Empty => TriageError::InvalidKnowledgeBase(format!(
            "keyword phrase '{phrase}' contains an empty keyword"
        )),
        TextError::NotLowercase(kw) => TriageError::InvalidKnowledgeBase(format!(
            "keyword '{kw}' in phrase '{phrase}' must be lowercase"
        )),
    }
}
