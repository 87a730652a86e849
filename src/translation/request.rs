use crate::errors::InputError;
use crate::translation::glossary::Glossary;

/// Source and target language as they appear in prompts (English names)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// One user-initiated translation: the text and the glossary to enforce.
///
/// Construction rejects blank text so no generation call is wasted on it.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    source_text: String,
    glossary: Glossary,
}

impl TranslationRequest {
    /// Create a request, rejecting empty or whitespace-only text
    pub fn new(source_text: impl Into<String>, glossary: Glossary) -> Result<Self, InputError> {
        let source_text = source_text.into();
        if source_text.trim().is_empty() {
            return Err(InputError::EmptySourceText);
        }
        Ok(Self { source_text, glossary })
    }

    /// Text to translate, unmodified
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Glossary for the glossary-check stage
    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }
}
