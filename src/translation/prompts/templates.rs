/*!
 * Prompt templates for the four translation agents.
 */

use crate::translation::glossary::Glossary;
use crate::translation::request::LanguagePair;

/// Role instruction template with language placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// Draft stage: first, rule-following translation
    pub const TRANSLATION_AGENT: &'static str = "You are a Translation Agent that follows technical rules for accurate translation from {source_language} to {target_language}. \
Only respond with the translated text, without any explanations or notes.";

    /// Refine stage: fluency and natural flow
    pub const REVIEW_AGENT: &'static str = "You are a Review Agent that improves {target_language} translations for natural flow. \
Only respond with the improved translation, without any explanations or notes.";

    /// Glossary-check stage: terminology consistency
    pub const PROOFREADING_AGENT: &'static str = "You are a Proofreading Agent that ensures a {target_language} translation is consistent with the glossary. \
Use the glossary's target term wherever its source term applies, adapting inflection to the sentence. \
Only respond with the corrected translation, without any explanations or notes.";

    /// Finalize stage: final polish
    pub const TRANSLATOR_AGENT: &'static str = "You are the main Translator AI Agent that produces final, polished {target_language} translations. \
Only respond with the final translation, without any explanations or notes.";

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Render the template with the given variables.
    pub fn render(&self, source_language: &str, target_language: &str) -> String {
        self.template
            .replace("{source_language}", source_language)
            .replace("{target_language}", target_language)
    }
}

/// Instruction and user message for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePrompt {
    /// Role instruction (system prompt)
    pub instruction: String,
    /// User message
    pub message: String,
}

impl StagePrompt {
    fn new(template: &str, languages: &LanguagePair, message: String) -> Self {
        Self {
            instruction: PromptTemplate::new(template).render(&languages.source, &languages.target),
            message,
        }
    }

    /// Prompt for the draft stage; the only stage that sees the source text
    pub fn draft(languages: &LanguagePair, source_text: &str) -> Self {
        Self::new(
            PromptTemplate::TRANSLATION_AGENT,
            languages,
            format!(
                "Translate this text from {} to {}: {}",
                languages.source, languages.target, source_text
            ),
        )
    }

    /// Prompt for the refine stage
    pub fn refine(languages: &LanguagePair, draft: &str) -> Self {
        Self::new(
            PromptTemplate::REVIEW_AGENT,
            languages,
            format!("Review and improve this translation: {}", draft),
        )
    }

    /// Prompt for the glossary-check stage.
    ///
    /// The glossary is embedded as one `source_term: target_term` line per entry;
    /// an empty glossary leaves the list empty.
    pub fn glossary_check(languages: &LanguagePair, refined: &str, glossary: &Glossary) -> Self {
        Self::new(
            PromptTemplate::PROOFREADING_AGENT,
            languages,
            format!(
                "Check this translation against the glossary:\n\nTranslation: {}\n\nGlossary:\n{}",
                refined,
                glossary.to_prompt_lines()
            ),
        )
    }

    /// Prompt for the finalize stage
    pub fn finalize(languages: &LanguagePair, proofread: &str) -> Self {
        Self::new(
            PromptTemplate::TRANSLATOR_AGENT,
            languages,
            format!("Finalize this translation: {}", proofread),
        )
    }
}
