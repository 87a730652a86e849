/*!
 * Translation of free text through a four-stage generation pipeline.
 *
 * This module contains the core functionality for translating text with an
 * AI provider. It is split into several submodules:
 *
 * - `client`: The generation capability the pipeline depends on
 * - `glossary`: Terminology glossary and its file loaders
 * - `prompts`: Prompt templates for each stage
 * - `request`: Validated translation requests and language pairs
 * - `pipeline`: Stage functions and the orchestrator driving them
 */

// Re-export main types for easier usage
pub use self::client::{GenerationClient, ProviderClient};
pub use self::glossary::{Glossary, GlossaryAudit, GlossaryEntry, load_glossary, load_glossary_lenient};
pub use self::pipeline::{PipelineConfig, PipelineReport, PipelineState, Stage, TranslationPipeline};
pub use self::request::{LanguagePair, TranslationRequest};

// Re-export prompt types
pub use self::prompts::{PromptTemplate, StagePrompt};

// Submodules
pub mod client;
pub mod glossary;
pub mod pipeline;
pub mod prompts;
pub mod request;
