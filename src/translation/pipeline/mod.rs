/*!
 * Translation pipeline for four-stage text translation.
 *
 * The pipeline processes text through four stages, each one generation call:
 * 1. **Draft**: Translate the source text
 * 2. **Refine**: Improve fluency and natural flow
 * 3. **Glossary check**: Correct terminology against the user's glossary
 * 4. **Finalize**: Polish the result
 */

pub mod orchestrator;
pub mod stages;

// Re-export types used externally
pub use orchestrator::{
    PipelineConfig, PipelineProgress, PipelineReport, PipelineState, ProgressCallback, StageTiming,
    TranslationPipeline,
};
pub use stages::Stage;
