//! Validated text primitives shared across the CuraLink crates.

/// Errors that can occur when creating validated text types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// A keyword contained upper-case characters and could never match lower-cased input
    #[error("Keyword must be lowercase: {0}")]
    NotLowercase(String),
}

/// A trimmed, non-empty, lowercase trigger phrase.
///
/// Keywords are compared against lower-cased input by substring containment, so a keyword
/// with upper-case characters would silently never match. Construction rejects that case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keyword(String);

impl Keyword {
    /// Creates a keyword from a single comma-separated piece of a keyword phrase.
    ///
    /// # Errors
    ///
    /// - `TextError::Empty` if the trimmed piece is empty.
    /// - `TextError::NotLowercase` if the piece changes under lower-casing.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        if trimmed.to_lowercase() != trimmed {
            return Err(TextError::NotLowercase(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this keyword occurs anywhere in `haystack`.
    ///
    /// `haystack` is expected to be lower-cased already.
    pub fn occurs_in(&self, haystack: &str) -> bool {
        haystack.contains(self.0.as_str())
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
