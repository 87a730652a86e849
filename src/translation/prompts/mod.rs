/*!
 * Prompt construction for the translation stages.
 *
 * Each stage sends one role instruction (the system prompt) and one user
 * message. Instructions name the language pair; messages carry the text.
 */

pub mod templates;

// Re-export main types
pub use templates::{PromptTemplate, StagePrompt};
