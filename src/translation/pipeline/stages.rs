/*!
 * The four translation stages.
 *
 * Each stage function is exactly one generation call: it builds the stage's
 * prompt from its input text and returns the generated text untouched.
 */

use std::fmt;

use crate::errors::ProviderError;
use crate::translation::client::GenerationClient;
use crate::translation::glossary::Glossary;
use crate::translation::prompts::StagePrompt;
use crate::translation::request::LanguagePair;

/// A step of the translation pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Initial rule-following translation of the source text
    Draft,
    /// Fluency and natural-flow review
    Refine,
    /// Terminology correction against the glossary
    GlossaryCheck,
    /// Final polish
    Finalize,
}

impl Stage {
    /// All stages in execution order
    pub const ALL: [Stage; 4] = [Stage::Draft, Stage::Refine, Stage::GlossaryCheck, Stage::Finalize];

    /// Identifier used in errors and logs
    pub fn name(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Refine => "refine",
            Self::GlossaryCheck => "glossary_check",
            Self::Finalize => "finalize",
        }
    }

    /// 1-based position in the pipeline
    pub fn number(self) -> usize {
        match self {
            Self::Draft => 1,
            Self::Refine => 2,
            Self::GlossaryCheck => 3,
            Self::Finalize => 4,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

async fn call(client: &dyn GenerationClient, prompt: StagePrompt) -> Result<String, ProviderError> {
    client.generate(&prompt.instruction, &prompt.message).await
}

/// Draft: translate the source text
pub async fn draft(client: &dyn GenerationClient, languages: &LanguagePair, source_text: &str) -> Result<String, ProviderError> {
    call(client, StagePrompt::draft(languages, source_text)).await
}

/// Refine: improve the draft's fluency
pub async fn refine(client: &dyn GenerationClient, languages: &LanguagePair, draft: &str) -> Result<String, ProviderError> {
    call(client, StagePrompt::refine(languages, draft)).await
}

/// Glossary check: align terminology with the glossary (advisory, not guaranteed)
pub async fn glossary_check(
    client: &dyn GenerationClient,
    languages: &LanguagePair,
    refined: &str,
    glossary: &Glossary,
) -> Result<String, ProviderError> {
    call(client, StagePrompt::glossary_check(languages, refined, glossary)).await
}

/// Finalize: produce the polished result
pub async fn finalize(client: &dyn GenerationClient, languages: &LanguagePair, proofread: &str) -> Result<String, ProviderError> {
    call(client, StagePrompt::finalize(languages, proofread)).await
}
